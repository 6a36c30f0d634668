//! Realtime integration tests

mod ws_test;
