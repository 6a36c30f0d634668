//! API integration tests
//!
//! Integration tests for all HTTP endpoints

mod auth_test;
mod calls_test;
mod chat_test;
