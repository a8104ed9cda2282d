//! Sealed-lineup service: the public commit/reveal entry points.
//!
//! ## Seal
//!
//! ```text
//! LineupSelection → LineupValidator.validate()
//!     → draw Salt → CommitmentBuilder.commit(salt, now)
//!     → Sealer.seal_lineup(key)
//!     → SealedLineup { payload, commitment, salt, committed_at, digest, cipher }
//! ```
//!
//! A rejected lineup returns its [`ValidationError`] before any randomness is
//! drawn or the key is used.
//!
//! ## Reveal
//!
//! Once lineups may be disclosed, any verifier can call
//! [`SealedLineupService::verify_opening`] with the disclosed lineup, salt
//! and timestamp against the commitment read back from the ledger. A `false`
//! result is a protocol violation and must be rejected by the caller.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;

use sealdraft_crypto::{
    CommitmentBuilder, NonceSource, OsNonceSource, Sealer, SymmetricKey, draw_salt,
};
use sealdraft_types::{
    Commitment, EncryptedPayload, LineupCommitment, LineupSelection, PlayerSelection, Result,
    Salt, SealConfig, SealId, SealdraftError, SealedLineup, ValidationError,
};

use crate::{selection_batch::SelectionBatch, validator::LineupValidator};

/// Orchestrates validation, commitment and sealing.
///
/// Holds configuration only. Keys are passed into each call and never kept.
#[derive(Debug, Clone)]
pub struct SealedLineupService {
    config: SealConfig,
    validator: LineupValidator,
    commitments: CommitmentBuilder,
    sealer: Sealer,
    batch: SelectionBatch,
    entropy: Arc<dyn NonceSource>,
}

impl SealedLineupService {
    /// Service drawing randomness from the OS CSPRNG.
    ///
    /// # Errors
    /// [`SealdraftError::Configuration`] if `config` is invalid.
    pub fn new(config: SealConfig) -> Result<Self> {
        Self::with_nonce_source(config, Arc::new(OsNonceSource))
    }

    /// Service with an explicit randomness source for salts and nonces.
    pub fn with_nonce_source(config: SealConfig, entropy: Arc<dyn NonceSource>) -> Result<Self> {
        config.validate()?;
        let sealer = Sealer::with_nonce_source(config.cipher, Arc::clone(&entropy));
        Ok(Self {
            config,
            validator: LineupValidator::from_config(&config),
            commitments: CommitmentBuilder::new(config.digest),
            batch: SelectionBatch::new(sealer.clone()),
            sealer,
            entropy,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    /// Validate, commit and seal a lineup at the current time.
    pub fn seal_lineup(
        &self,
        selection: &LineupSelection,
        key: &SymmetricKey,
    ) -> Result<SealedLineup> {
        self.seal_lineup_at(selection, key, now_ms())
    }

    /// Validate, commit and seal a lineup with an explicit commitment
    /// timestamp (milliseconds since the UNIX epoch).
    ///
    /// # Errors
    /// - [`SealdraftError::Validation`] for a malformed lineup
    /// - [`SealdraftError::Encryption`] on entropy or cipher failure
    pub fn seal_lineup_at(
        &self,
        selection: &LineupSelection,
        key: &SymmetricKey,
        timestamp_ms: u64,
    ) -> Result<SealedLineup> {
        self.validate(selection)?;

        let salt = draw_salt(self.entropy.as_ref())?;
        let commitment = self.commitments.commit(selection, &salt, timestamp_ms);
        let payload = self.sealer.seal_lineup(selection, key)?;
        let id = SealId::new();

        tracing::info!(
            seal_id = %id,
            roster = selection.len(),
            commitment = %commitment,
            cipher = %self.config.cipher,
            digest = %self.config.digest,
            "Lineup sealed"
        );

        Ok(SealedLineup {
            id,
            payload,
            commitment,
            salt,
            committed_at: timestamp_ms,
            digest: self.config.digest,
            cipher: self.config.cipher,
        })
    }

    /// Validate and commit without sealing, for participants who keep the
    /// plaintext lineup locally.
    pub fn commit_lineup(&self, selection: &LineupSelection) -> Result<LineupCommitment> {
        self.commit_lineup_at(selection, now_ms())
    }

    pub fn commit_lineup_at(
        &self,
        selection: &LineupSelection,
        timestamp_ms: u64,
    ) -> Result<LineupCommitment> {
        self.validate(selection)?;
        let salt = draw_salt(self.entropy.as_ref())?;
        let commitment = self.commitments.commit(selection, &salt, timestamp_ms);

        tracing::debug!(roster = selection.len(), commitment = %commitment, "Lineup committed");

        Ok(LineupCommitment {
            commitment,
            salt,
            committed_at: timestamp_ms,
            digest: self.config.digest,
        })
    }

    /// Whether a disclosed `(selection, salt, timestamp_ms)` opens `commitment`.
    #[must_use]
    pub fn verify_opening(
        &self,
        selection: &LineupSelection,
        salt: &Salt,
        timestamp_ms: u64,
        commitment: &Commitment,
    ) -> bool {
        self.commitments
            .verify(selection, salt, timestamp_ms, commitment)
    }

    /// [`Self::verify_opening`] as a `Result`, for callers rejecting with `?`.
    ///
    /// # Errors
    /// [`SealdraftError::CommitmentMismatch`] if the opening does not match.
    pub fn ensure_opening(
        &self,
        selection: &LineupSelection,
        salt: &Salt,
        timestamp_ms: u64,
        commitment: &Commitment,
    ) -> Result<()> {
        if self.verify_opening(selection, salt, timestamp_ms, commitment) {
            Ok(())
        } else {
            tracing::warn!(commitment = %commitment, "Opening rejected: commitment mismatch");
            Err(SealdraftError::CommitmentMismatch)
        }
    }

    /// Open a sealed lineup with the participant's key and check it against
    /// the bundle's own commitment.
    ///
    /// Uses the cipher and digest recorded in the bundle, so a service
    /// configured with other algorithms can still reveal it.
    ///
    /// # Errors
    /// - [`SealdraftError::Authentication`] if the key is wrong or the payload
    ///   was modified
    /// - [`SealdraftError::CommitmentMismatch`] if the decrypted lineup does
    ///   not open the recorded commitment
    pub fn reveal(&self, sealed: &SealedLineup, key: &SymmetricKey) -> Result<LineupSelection> {
        let sealer = Sealer::with_nonce_source(sealed.cipher, Arc::clone(&self.entropy));
        let selection = sealer.open_lineup(&sealed.payload, key)?;

        let opened = CommitmentBuilder::new(sealed.digest).verify(
            &selection,
            &sealed.salt,
            sealed.committed_at,
            &sealed.commitment,
        );
        if !opened {
            tracing::warn!(
                seal_id = %sealed.id,
                commitment = %sealed.commitment,
                "Opening rejected: commitment mismatch"
            );
            return Err(SealdraftError::CommitmentMismatch);
        }

        tracing::info!(seal_id = %sealed.id, "Lineup revealed");
        Ok(selection)
    }

    /// Seal a round-by-round set of draft picks concurrently.
    ///
    /// Rejects a zero player id and the same player picked twice in one
    /// round before anything is sealed.
    pub async fn seal_selections(
        &self,
        picks: &[PlayerSelection],
        key: &SymmetricKey,
    ) -> Result<Vec<EncryptedPayload>> {
        let mut seen = HashSet::with_capacity(picks.len());
        for pick in picks {
            if !pick.player_id.is_valid() {
                return Err(ValidationError::InvalidPlayerId(pick.player_id).into());
            }
            if !seen.insert((pick.round, pick.player_id)) {
                return Err(ValidationError::DuplicatePlayer(pick.player_id).into());
            }
        }
        self.batch.seal_many(picks, key).await
    }

    fn validate(&self, selection: &LineupSelection) -> Result<()> {
        self.validator.validate(selection).map_err(|err| {
            tracing::debug!(error_code = err.code(), "Lineup rejected");
            SealdraftError::from(err)
        })
    }
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
