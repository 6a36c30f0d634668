/**
 * One-Time Code Store
 *
 * Short-lived verification codes keyed by email. Every entry carries its
 * own deadline; expired entries are rejected on read and removed by
 * `purge_expired`, which the server runs on its cleanup interval.
 *
 * Deadlines use `tokio::time::Instant`, so tests can drive expiry with a
 * paused clock.
 */

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Number of digits in a code
pub const OTP_LEN: usize = 6;

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: Instant,
}

/// Outcome of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Code matched
    Verified,
    /// A code exists but differs; it stays valid
    Mismatch,
    /// The code expired and has been removed
    Expired,
    /// No code was issued for this email
    Missing,
}

#[derive(Clone)]
pub struct OtpStore {
    entries: Arc<RwLock<HashMap<String, OtpEntry>>>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Draw a fresh code for `email`, replacing any previous one
    pub async fn issue(&self, email: &str) -> String {
        let code = generate_code();
        self.insert(email, code.clone()).await;
        code
    }

    pub async fn insert(&self, email: &str, code: String) {
        let entry = OtpEntry {
            code,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(email.to_string(), entry);
    }

    /// Check `code` for `email` without consuming it.
    ///
    /// An expired entry is still removed.
    pub async fn check(&self, email: &str, code: &str) -> OtpCheck {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get(email) else {
            return OtpCheck::Missing;
        };

        if Instant::now() >= entry.expires_at {
            entries.remove(email);
            return OtpCheck::Expired;
        }
        if entry.code != code {
            return OtpCheck::Mismatch;
        }
        OtpCheck::Verified
    }

    /// Remove the entry of `email` if it still holds `code`
    pub async fn consume(&self, email: &str, code: &str) {
        let mut entries = self.entries.write().await;
        if entries.get(email).is_some_and(|entry| entry.code == code) {
            entries.remove(email);
        }
    }

    /// Drop the code of `email`, if any
    pub async fn discard(&self, email: &str) {
        self.entries.write().await.remove(email);
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Six random digits, never starting with zero
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000u32).to_string()
}
