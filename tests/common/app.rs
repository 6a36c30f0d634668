//! In-process application for integration tests
//!
//! Builds the same router as `create_app`, but from an `AppState` assembled
//! here: in-memory threads, a mailer that records instead of sending, and an
//! optional database pool.

use async_trait::async_trait;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vnchat::backend::auth::JwtSecret;
use vnchat::backend::chat::{MemoryThreadRepository, ThreadStore};
use vnchat::backend::crypto::MessageCodec;
use vnchat::backend::kyc::{MailError, OtpEmail, OtpMailer, OtpStore};
use vnchat::backend::realtime::ThreadChannels;
use vnchat::backend::routes::create_router;
use vnchat::backend::server::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_ENCRYPTION_KEY: [u8; 32] = [42u8; 32];

/// Mailer that keeps every message it is asked to send
#[derive(Default, Clone)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<(String, OtpEmail)>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, OtpEmail)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl OtpMailer for RecordingMailer {
    async fn send(&self, to: &str, email: &OtpEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push((to.to_string(), email.clone()));
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub mailer: RecordingMailer,
}

impl TestApp {
    /// App without a database
    pub fn new() -> Self {
        Self::with_pool(None)
    }

    pub fn with_pool(db_pool: Option<PgPool>) -> Self {
        let (state, mailer) = test_state(db_pool);
        let server = TestServer::new(create_router(state.clone(), &[]))
            .expect("Failed to start test server");
        Self { server, state, mailer }
    }

    /// App served over a real socket, required for WebSocket tests
    pub fn with_http_transport() -> Self {
        let (state, mailer) = test_state(None);
        let server = TestServer::builder()
            .http_transport()
            .build(create_router(state.clone(), &[]))
            .expect("Failed to start test server");
        Self { server, state, mailer }
    }
}

fn test_state(db_pool: Option<PgPool>) -> (AppState, RecordingMailer) {
    let mailer = RecordingMailer::default();
    let state = AppState {
        db_pool,
        threads: ThreadStore::new(
            Arc::new(MemoryThreadRepository::new()),
            Arc::new(MessageCodec::new(TEST_ENCRYPTION_KEY)),
        ),
        channels: ThreadChannels::new(),
        otp_store: OtpStore::new(Duration::from_secs(600)),
        mailer: Arc::new(mailer.clone()),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
    };
    (state, mailer)
}
