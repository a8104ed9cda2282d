//! # sealdraft-crypto
//!
//! Cryptographic primitives for sealed lineups:
//!
//! 1. **NonceSource**: CSPRNG bytes for nonces, salts and fresh keys
//! 2. **SymmetricKey**: caller-owned 256-bit key, zeroized on drop
//! 3. **Sealer**: AEAD seal/open (AES-256-GCM or ChaCha20-Poly1305)
//! 4. **CommitmentBuilder**: salted SHA-256 / Keccak-256 commitments
//!
//! ## Flow
//!
//! ```text
//! LineupSelection ─┬─ codec::encode_lineup ─ Sealer.seal(key) ─▶ EncryptedPayload
//!                  └─ CommitmentBuilder.commit(salt, ts) ─────▶ Commitment
//! ```
//!
//! The sealer and the commitment builder never share key material: the
//! commitment depends only on the lineup, the public salt and the timestamp.

pub mod commitment;
pub mod key;
pub mod nonce_source;
pub mod sealer;

pub use commitment::CommitmentBuilder;
pub use key::SymmetricKey;
pub use nonce_source::{NonceSource, OsNonceSource, draw_array, draw_salt};
pub use sealer::Sealer;
