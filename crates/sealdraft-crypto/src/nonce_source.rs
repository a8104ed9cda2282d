//! Cryptographically secure randomness for AEAD nonces, salts and keys.
//!
//! Randomness is fatal-if-missing: an entropy fault surfaces as
//! [`SealdraftError::Encryption`] and the current operation stops. Nothing
//! retries, since retrying without fixing the source is unsafe.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sealdraft_types::{Result, Salt, SealdraftError, constants::SALT_SIZE};

/// Source of uniformly random bytes.
///
/// Implementations must be safe to share between concurrent sealing tasks.
pub trait NonceSource: Send + Sync + fmt::Debug {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<()>;

    /// Return `n` random bytes.
    fn draw(&self, n: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }
}

/// Draw a fixed-size random array.
pub fn draw_array<const N: usize>(source: &dyn NonceSource) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    source.fill(&mut out)?;
    Ok(out)
}

/// Draw a fresh commitment salt.
pub fn draw_salt(source: &dyn NonceSource) -> Result<Salt> {
    draw_array::<SALT_SIZE>(source).map(Salt::from_bytes)
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| SealdraftError::Encryption {
                reason: format!("entropy source failure: {e}"),
            })
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use helpers::{CountingNonceSource, FailingNonceSource};

/// Test doubles. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
mod helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{NonceSource, OsNonceSource};
    use sealdraft_types::{Result, SealdraftError};

    /// Always reports an entropy fault.
    #[derive(Debug, Default)]
    pub struct FailingNonceSource;

    impl NonceSource for FailingNonceSource {
        fn fill(&self, _dest: &mut [u8]) -> Result<()> {
            Err(SealdraftError::Encryption {
                reason: "entropy source failure: injected".to_string(),
            })
        }
    }

    /// Delegates to the OS and counts how many fills were requested.
    #[derive(Debug, Default)]
    pub struct CountingNonceSource {
        calls: AtomicUsize,
    }

    impl CountingNonceSource {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NonceSource for CountingNonceSource {
        fn fill(&self, dest: &mut [u8]) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            OsNonceSource.fill(dest)
        }
    }
}
