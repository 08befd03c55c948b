//! Nonce generation for Coincheck API authentication.
//!
//! Every signed request carries an `ACCESS-NONCE` header. The exchange rejects
//! a nonce that is not larger than the last one it saw for the same key, so a
//! client must never hand out the same value twice, even when several tasks
//! share it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// Implementations are shared between clones of a client and called from
/// any thread, so they must be strictly increasing under concurrent use.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A clock-backed nonce provider.
///
/// Uses nanoseconds since the UNIX epoch. When the clock has not advanced
/// (coarse resolution, bursts of calls, clock stepping backwards) the
/// previous value plus one is used instead.
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    fn current_time_nanos() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::current_time_nanos();
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

/// A clock-free nonce provider: a plain atomic counter.
///
/// Useful for tests that need deterministic nonces, or for keys whose
/// nonce history is tracked elsewhere.
pub struct SequentialNonce {
    next: AtomicU64,
}

impl SequentialNonce {
    /// Create a counter whose first nonce is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialNonce {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl NonceProvider for SequentialNonce {
    fn next_nonce(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
