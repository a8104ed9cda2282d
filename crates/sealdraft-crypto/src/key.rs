//! Symmetric key material.
//!
//! A [`SymmetricKey`] is owned by the caller and passed explicitly into every
//! seal and open. It is never derived from, or embedded in, a sealed payload
//! or commitment: if the participant loses it, the sealed lineup can never be
//! opened again. Keys are zeroized on drop and never printed.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use sealdraft_types::{
    Result, SealdraftError,
    constants::{KEY_DERIVATION_DOMAIN, KEY_SIZE},
};

use crate::nonce_source::{NonceSource, draw_array};

/// 256-bit AEAD key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    #[must_use]
    pub fn from_array(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap caller-held key bytes.
    ///
    /// # Errors
    /// [`SealdraftError::KeyUnavailable`] if `bytes` is empty or not exactly
    /// [`KEY_SIZE`] long. There is no fallback key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(SealdraftError::KeyUnavailable {
                reason: "no key material supplied".to_string(),
            });
        }
        if bytes.len() != KEY_SIZE {
            return Err(SealdraftError::KeyUnavailable {
                reason: format!("expected {KEY_SIZE} key bytes, got {}", bytes.len()),
            });
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Draw a fresh random key. The caller must keep it to open later.
    pub fn generate(source: &dyn NonceSource) -> Result<Self> {
        draw_array::<KEY_SIZE>(source).map(Self)
    }

    /// Derive a key from a wallet signature over a league-specific message.
    ///
    /// HKDF-SHA256 with the signature as input key material and
    /// [`KEY_DERIVATION_DOMAIN`] as `info`. The same signature always yields
    /// the same key, so a participant can recover it at reveal time by
    /// signing again.
    pub fn derive_from_signature(signature: &[u8]) -> Result<Self> {
        if signature.is_empty() {
            return Err(SealdraftError::KeyUnavailable {
                reason: "empty signature".to_string(),
            });
        }
        let hkdf = Hkdf::<Sha256>::new(None, signature);
        let mut key = [0u8; KEY_SIZE];
        hkdf.expand(KEY_DERIVATION_DOMAIN, &mut key)
            .map_err(|e| SealdraftError::KeyUnavailable {
                reason: format!("key expansion failed: {e}"),
            })?;
        Ok(Self(key))
    }

    /// Raw key bytes, for the caller's own storage.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}
