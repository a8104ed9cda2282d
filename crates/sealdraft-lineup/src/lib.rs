//! # sealdraft-lineup
//!
//! **Commit/reveal plane** for sealed fantasy lineups: validation, concurrent
//! pick sealing, and the service handing commitments to a ledger writer.
//!
//! ## Architecture
//!
//! 1. **LineupValidator**: hard gate on roster shape, captaincy and ids
//! 2. **SelectionBatch**: seals draft picks concurrently on tokio tasks
//! 3. **SealedLineupService**: validate → salt → commit → seal, and the
//!    reveal-time `verify_opening`
//!
//! ## Lineup Flow
//!
//! ```text
//! UI → SealedLineupService.seal_lineup(key)
//!     → SealedLineup { commitment → ledger, salt → participant, payload → optional }
//! reveal: (lineup, salt, committed_at) + ledger commitment → verify_opening
//! ```
//!
//! Nothing here touches a network, a wallet or persistent storage. The key
//! stays with the participant; losing it makes a sealed lineup unrecoverable.

pub mod selection_batch;
pub mod service;
pub mod validator;

pub use selection_batch::SelectionBatch;
pub use service::SealedLineupService;
pub use validator::{LineupValidator, validate};
