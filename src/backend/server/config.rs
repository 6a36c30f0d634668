/**
 * Server Configuration
 *
 * Configuration is read from environment variables (after `dotenv` has
 * loaded `.env`). Only `ENCRYPTION_KEY` is mandatory; everything else has a
 * development default.
 *
 * | Variable         | Default                  |
 * |------------------|--------------------------|
 * | `SERVER_PORT`    | 3000                     |
 * | `DATABASE_URL`   | unset, in-memory threads |
 * | `JWT_SECRET`     | development secret       |
 * | `ENCRYPTION_KEY` | required                 |
 * | `OTP_TTL_SECS`   | 600                      |
 * | `CORS_ORIGINS`   | `http://localhost:5173`  |
 * | `SMTP_HOST`      | unset, mail is logged    |
 *
 * # Error Handling
 *
 * A missing database is not an error: the server starts without it and
 * database-backed routes answer 503. A bad encryption key or an incomplete
 * SMTP block is, since running with either would lose data or mail.
 */

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::backend::auth::sessions::JwtSecret;
use crate::backend::crypto::{CodecError, MessageCodec};
use crate::backend::kyc::{MailError, SmtpSettings};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OTP_TTL_SECS: u64 = 600;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

const DEV_JWT_SECRET: &str = "vnchat-development-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ENCRYPTION_KEY is not set")]
    MissingEncryptionKey,

    #[error("ENCRYPTION_KEY is invalid: {0}")]
    InvalidEncryptionKey(#[from] CodecError),

    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("SMTP_HOST is set but {0} is missing")]
    IncompleteSmtp(&'static str),

    #[error("SMTP transport could not be configured: {0}")]
    Smtp(#[from] MailError),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: JwtSecret,
    pub codec: Arc<MessageCodec>,
    pub otp_ttl: Duration,
    pub cors_origins: Vec<String>,
    /// `None` when mail should only be logged
    pub smtp: Option<SmtpSettings>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = parse_number(&get, "SERVER_PORT", DEFAULT_PORT)?;
        let otp_ttl = Duration::from_secs(parse_number(&get, "OTP_TTL_SECS", DEFAULT_OTP_TTL_SECS)?);

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => JwtSecret::new(secret),
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                JwtSecret::new(DEV_JWT_SECRET)
            }
        };

        let key = get("ENCRYPTION_KEY").ok_or(ConfigError::MissingEncryptionKey)?;
        let codec = Arc::new(MessageCodec::from_config(&key)?);

        let cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let smtp = match get("SMTP_HOST") {
            Some(host) => {
                let username = get("SMTP_USERNAME").ok_or(ConfigError::IncompleteSmtp("SMTP_USERNAME"))?;
                let password = get("SMTP_PASSWORD").ok_or(ConfigError::IncompleteSmtp("SMTP_PASSWORD"))?;
                Some(SmtpSettings {
                    port: parse_number(&get, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
                    from: get("MAIL_FROM").unwrap_or_else(|| username.clone()),
                    host,
                    username,
                    password,
                })
            }
            None => None,
        };

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            codec,
            otp_ttl,
            cors_origins,
            smtp,
        })
    }
}

fn parse_number<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}

/// Connect to PostgreSQL and apply migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the connection succeeds
/// - `None` if it fails; the failure is logged and the server keeps running
///   without database features
pub async fn load_database(database_url: &str) -> Option<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
