//! # sealdraft-types
//!
//! Shared types, errors, configuration and the canonical codec for
//! **sealdraft** sealed lineups.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`PlayerId`], [`PositionCode`], [`SealId`]
//! - **Lineup model**: [`LineupSelection`], [`PlayerSelection`]
//! - **Sealed artifacts**: [`Salt`], [`Commitment`], [`EncryptedPayload`],
//!   [`SealedLineup`], [`LineupCommitment`]
//! - **Configuration**: [`SealConfig`], [`DigestAlgorithm`], [`CipherAlgorithm`]
//! - **Errors**: [`ValidationError`], [`SealdraftError`] with `SD_ERR_` prefix codes
//! - **Codec**: the versioned byte layout hashed into commitments
//! - **Constants**: sizes, limits and domain tags

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod lineup;
pub mod sealed;

pub use config::*;
pub use error::*;
pub use ids::*;
pub use lineup::*;
pub use sealed::*;

// Codec functions and constants are accessed through their modules
// (`sealdraft_types::codec::encode_lineup`, `sealdraft_types::constants::KEY_SIZE`).
