//! Sealed artifacts: salts, commitments, encrypted payloads and the bundle
//! handed to the ledger-write collaborator.
//!
//! Everything in this module is safe to publish except where noted. Byte
//! fields cross textual boundaries as lowercase hex.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    CipherAlgorithm, DigestAlgorithm, SealId,
    constants::{COMMITMENT_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE},
    error::{Result, SealdraftError},
};

fn decode_fixed<const N: usize>(what: &str, hex_str: &str) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    hex::decode_to_slice(hex_str, &mut out).map_err(|e| {
        SealdraftError::Serialization(format!("{what}: expected {} hex chars: {e}", N * 2))
    })?;
    Ok(out)
}

fn strip_0x(hex_str: &str) -> &str {
    hex_str.strip_prefix("0x").unwrap_or(hex_str)
}

// ---------------------------------------------------------------------------
// Salt
// ---------------------------------------------------------------------------

/// Per-commitment random salt.
///
/// Drawn once per sealing, never reused. Not secret: it is disclosed at
/// reveal time together with the lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salt(#[serde(with = "hex::serde")] pub [u8; SALT_SIZE]);

impl Salt {
    #[must_use]
    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex salt. Accepts an optional `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        decode_fixed("salt", strip_0x(hex_str)).map(Self)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Commitment
// ---------------------------------------------------------------------------

/// 32-byte binding, hiding digest of `(lineup, salt, timestamp)`.
///
/// This is the only value that must reach durable public storage to bind a
/// participant to their lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "hex::serde")] pub [u8; COMMITMENT_SIZE]);

impl Commitment {
    #[must_use]
    pub fn from_bytes(bytes: [u8; COMMITMENT_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_SIZE] {
        &self.0
    }

    /// Fixed-width (64 char) lowercase hex form used on the ledger.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a ledger hex string. Accepts an optional `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        decode_fixed("commitment", strip_0x(hex_str)).map(Self)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// EncryptedPayload
// ---------------------------------------------------------------------------

/// AEAD output with the tag kept separate from the ciphertext.
///
/// `ciphertext.len() + TAG_SIZE` always equals the plaintext length plus the
/// tag; the tag is not appended here so that tampering with either part can
/// be reasoned about independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    #[serde(with = "hex::serde")]
    pub ciphertext: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub nonce: [u8; NONCE_SIZE],
    #[serde(with = "hex::serde")]
    pub tag: [u8; TAG_SIZE],
}

impl EncryptedPayload {
    /// Length of the plaintext this payload decrypts to.
    #[must_use]
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len()
    }

    /// `ciphertext || tag`, the layout most AEAD APIs and stores expect.
    #[must_use]
    pub fn combined(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ciphertext.len() + TAG_SIZE);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Split a `ciphertext || tag` buffer back into a payload.
    pub fn from_combined(nonce: [u8; NONCE_SIZE], combined: &[u8]) -> Result<Self> {
        if combined.len() < TAG_SIZE {
            return Err(SealdraftError::Serialization(format!(
                "sealed buffer of {} bytes is shorter than the {TAG_SIZE}-byte tag",
                combined.len()
            )));
        }
        let (ciphertext, tag_bytes) = combined.split_at(combined.len() - TAG_SIZE);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(tag_bytes);
        Ok(Self {
            ciphertext: ciphertext.to_vec(),
            nonce,
            tag,
        })
    }
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

/// Everything produced by sealing one lineup.
///
/// `commitment` and `salt` may be published immediately. `payload` may be
/// published for availability because its key is held only by the
/// participant. The key is not part of this bundle; losing it makes the
/// payload permanently unopenable.
///
/// `digest` and `cipher` record the algorithms that produced the bundle, so
/// a verifier does not need the committer's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedLineup {
    /// Identifier for log correlation.
    pub id: SealId,
    pub payload: EncryptedPayload,
    pub commitment: Commitment,
    pub salt: Salt,
    /// Commitment timestamp, milliseconds since the UNIX epoch.
    pub committed_at: u64,
    pub digest: DigestAlgorithm,
    pub cipher: CipherAlgorithm,
}

impl SealedLineup {
    /// The value written to the ledger.
    #[must_use]
    pub fn ledger_commitment_hex(&self) -> String {
        self.commitment.to_hex()
    }

    /// The commitment-only view of this bundle.
    #[must_use]
    pub fn commitment_record(&self) -> LineupCommitment {
        LineupCommitment {
            commitment: self.commitment,
            salt: self.salt,
            committed_at: self.committed_at,
            digest: self.digest,
        }
    }
}

/// Commitment without an encrypted payload, for callers that keep the
/// plaintext lineup locally and only need to bind it on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupCommitment {
    pub commitment: Commitment,
    pub salt: Salt,
    pub committed_at: u64,
    pub digest: DigestAlgorithm,
}
