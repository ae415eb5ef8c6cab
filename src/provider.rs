//! Nonce and timestamp sources.
//!
//! The signing engine never reads the clock or the random source directly,
//! so tests can pin both and assert exact header bytes.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Produces a fresh `oauth_nonce` for each signing operation.
pub trait NonceSource {
    fn nonce(&self) -> String;
}

/// Produces the `oauth_timestamp` in seconds since the Unix epoch.
pub trait Clock {
    fn timestamp(&self) -> u64;
}

/// 128 random bits rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        let bytes: [u8; 16] = rand::thread_rng().gen();
        hex::encode(bytes)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> u64 {
        // a clock set before 1970 yields 0, which the server rejects as stale
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

/// Always returns the same nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    pub fn new<T: Into<String>>(nonce: T) -> Self {
        FixedNonce(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn timestamp(&self) -> u64 {
        self.0
    }
}
