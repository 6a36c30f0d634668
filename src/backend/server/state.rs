/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. Handlers
 * never take the whole thing; the `FromRef` implementations below let each
 * handler extract only what it uses (`State<ThreadStore>`,
 * `State<Option<PgPool>>`, and so on).
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and shares its contents: `PgPool`,
 * `ThreadStore`, `ThreadChannels` and `OtpStore` are handles around `Arc`s.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::sessions::JwtSecret;
use crate::backend::chat::ThreadStore;
use crate::backend::kyc::{OtpMailer, OtpStore};
use crate::backend::realtime::ThreadChannels;

#[derive(Clone)]
pub struct AppState {
    /// `None` when `DATABASE_URL` is unset or unreachable
    pub db_pool: Option<PgPool>,
    pub threads: ThreadStore,
    pub channels: ThreadChannels,
    pub otp_store: OtpStore,
    pub mailer: Arc<dyn OtpMailer>,
    pub jwt_secret: JwtSecret,
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for ThreadStore {
    fn from_ref(state: &AppState) -> Self {
        state.threads.clone()
    }
}

impl FromRef<AppState> for ThreadChannels {
    fn from_ref(state: &AppState) -> Self {
        state.channels.clone()
    }
}

impl FromRef<AppState> for OtpStore {
    fn from_ref(state: &AppState) -> Self {
        state.otp_store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn OtpMailer> {
    fn from_ref(state: &AppState) -> Self {
        state.mailer.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
