//! Thread Key Derivation
//!
//! Every two-party conversation is addressed by a canonical key built from
//! the two participant identifiers. The identifiers are sorted byte-wise and
//! joined with [`SEPARATOR`], so the key does not depend on who sent first:
//!
//! ```rust
//! use vnchat::shared::thread_key::ThreadKey;
//!
//! let a = ThreadKey::derive("222", "111");
//! let b = ThreadKey::derive("111", "222");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "111_222");
//! ```
//!
//! The same key names the realtime channel of the thread.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator placed between the two sorted identifiers.
///
/// Virtual numbers are made of digits only, so the separator never appears
/// inside an identifier.
pub const SEPARATOR: char = '_';

/// Canonical, order-independent key of a two-party thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadKey(String);

impl ThreadKey {
    /// Derive the key for the pair `(a, b)`.
    ///
    /// Commutative: `derive(a, b) == derive(b, a)`. Callers reject empty
    /// identifiers before calling this.
    pub fn derive(a: &str, b: &str) -> Self {
        let (low, high) = sort_pair(a, b);
        Self(format!("{low}{SEPARATOR}{high}"))
    }

    /// Parse a key received from a client (for example a channel name).
    ///
    /// Returns `None` unless the input is exactly two distinct, non-empty
    /// identifiers in canonical order.
    pub fn parse(raw: &str) -> Option<Self> {
        let (low, high) = raw.split_once(SEPARATOR)?;
        if low.is_empty() || high.is_empty() || high.contains(SEPARATOR) || low >= high {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// The two identifiers encoded in the key, in ascending order
    pub fn participants(&self) -> (&str, &str) {
        self.0
            .split_once(SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    /// Whether `identifier` is one of the two identifiers in the key
    pub fn includes(&self, identifier: &str) -> bool {
        let (low, high) = self.participants();
        low == identifier || high == identifier
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThreadKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sort two identifiers ascending (byte-wise)
pub fn sort_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
