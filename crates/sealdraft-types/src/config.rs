//! Configuration for the sealed-lineup service.
//!
//! Passed in explicitly at construction; nothing reads process-wide state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants,
    error::{Result, SealdraftError},
};

/// Hash function used for lineup commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    #[default]
    #[serde(rename = "sha-256")]
    Sha256,
    /// Ethereum-style Keccak-256, for ledgers that recompute commitments
    /// on-chain.
    #[serde(rename = "keccak-256")]
    Keccak256,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha-256"),
            Self::Keccak256 => write!(f, "keccak-256"),
        }
    }
}

/// 256-bit AEAD used to seal lineups and picks. Both take a 12-byte nonce
/// and produce a 16-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes256Gcm => write!(f, "aes-256-gcm"),
            Self::ChaCha20Poly1305 => write!(f, "chacha20-poly1305"),
        }
    }
}

/// Sealing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealConfig {
    /// Exact number of players every lineup must contain.
    #[serde(default = "default_roster_size")]
    pub roster_size: usize,
    #[serde(default)]
    pub digest: DigestAlgorithm,
    #[serde(default)]
    pub cipher: CipherAlgorithm,
}

fn default_roster_size() -> usize {
    constants::DEFAULT_ROSTER_SIZE
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            roster_size: constants::DEFAULT_ROSTER_SIZE,
            digest: DigestAlgorithm::default(),
            cipher: CipherAlgorithm::default(),
        }
    }
}

impl SealConfig {
    /// Default algorithms with a custom roster size.
    #[must_use]
    pub fn with_roster_size(roster_size: usize) -> Self {
        Self {
            roster_size,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SealdraftError::Configuration(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster_size == 0 || self.roster_size > constants::MAX_ROSTER_SIZE {
            return Err(SealdraftError::Configuration(format!(
                "roster_size must be in 1..={}, got {}",
                constants::MAX_ROSTER_SIZE,
                self.roster_size
            )));
        }
        Ok(())
    }
}
