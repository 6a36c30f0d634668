/**
 * Server Initialization
 *
 * Builds the application from a `ServerConfig`:
 *
 * 1. Load the database (optional)
 * 2. Pick the thread repository: PostgreSQL when a pool is available,
 *    in-memory otherwise
 * 3. Pick the mailer: SMTP when configured, log-only otherwise
 * 4. Assemble `AppState` and the router
 * 5. Start the periodic cleanup task
 */

use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::chat::{MemoryThreadRepository, PgThreadRepository, ThreadRepository, ThreadStore};
use crate::backend::kyc::{LogMailer, OtpMailer, OtpStore, SmtpMailer};
use crate::backend::realtime::ThreadChannels;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Interval of the background sweep over channels and OTP codes
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only when the SMTP transport cannot be built. A database that is
/// missing or unreachable is logged and the server continues without it.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing vnchat backend server");

    let db_pool = match &config.database_url {
        Some(url) => load_database(url).await,
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            None
        }
    };

    let repo: Arc<dyn ThreadRepository> = match &db_pool {
        Some(pool) => Arc::new(PgThreadRepository::new(pool.clone())),
        None => {
            tracing::warn!("Chat threads are kept in memory and lost on restart");
            Arc::new(MemoryThreadRepository::new())
        }
    };

    let mailer: Arc<dyn OtpMailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
        None => {
            tracing::warn!("SMTP not configured, OTP mail will only be logged");
            Arc::new(LogMailer)
        }
    };

    let app_state = AppState {
        db_pool,
        threads: ThreadStore::new(repo, config.codec.clone()),
        channels: ThreadChannels::new(),
        otp_store: OtpStore::new(config.otp_ttl),
        mailer,
        jwt_secret: config.jwt_secret.clone(),
    };

    spawn_cleanup(&app_state);

    let app = create_router(app_state, &config.cors_origins);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Periodically drop broadcast channels nobody listens to and OTP codes
/// past their deadline
fn spawn_cleanup(app_state: &AppState) {
    let channels = app_state.channels.clone();
    let otp_store = app_state.otp_store.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed_channels = channels.cleanup_inactive_channels();
            let removed_codes = otp_store.purge_expired().await;
            tracing::debug!(
                "Cleanup removed {} idle channels and {} expired codes",
                removed_channels,
                removed_codes
            );
        }
    });
}
