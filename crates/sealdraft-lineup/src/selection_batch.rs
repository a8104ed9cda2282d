//! Concurrent sealing of draft picks.
//!
//! Each pick is sealed in its own tokio task. Tasks share nothing mutable:
//! every seal draws its own nonce, and the key is shared read-only for the
//! lifetime of the call. Results come back in input order whatever order the
//! tasks finish in.
//!
//! The batch is all-or-nothing. The first failed seal aborts the remaining
//! tasks and is returned; dropping the `seal_many` future drops the
//! `JoinSet`, which aborts every task, so a cancelled batch delivers nothing.

use std::sync::Arc;

use tokio::task::JoinSet;

use sealdraft_crypto::{Sealer, SymmetricKey};
use sealdraft_types::{
    EncryptedPayload, PlayerSelection, Result, SealdraftError, ValidationError,
    constants::MAX_BATCH_SIZE,
};

/// Fans per-pick seals out over tokio tasks.
#[derive(Debug, Clone)]
pub struct SelectionBatch {
    sealer: Sealer,
}

impl SelectionBatch {
    #[must_use]
    pub fn new(sealer: Sealer) -> Self {
        Self { sealer }
    }

    /// Seal every pick under `key`, returning payloads in input order.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - [`ValidationError::BatchTooLarge`] above [`MAX_BATCH_SIZE`] picks
    ///   (checked before any task is spawned)
    /// - the first sealing error encountered
    /// - [`SealdraftError::Internal`] if a task panicked
    pub async fn seal_many(
        &self,
        selections: &[PlayerSelection],
        key: &SymmetricKey,
    ) -> Result<Vec<EncryptedPayload>> {
        if selections.len() > MAX_BATCH_SIZE {
            return Err(ValidationError::BatchTooLarge {
                count: selections.len(),
                max: MAX_BATCH_SIZE,
            }
            .into());
        }
        if selections.is_empty() {
            return Ok(Vec::new());
        }

        let key = Arc::new(key.clone());
        let mut tasks = JoinSet::new();
        for (index, pick) in selections.iter().copied().enumerate() {
            let sealer = self.sealer.clone();
            let key = Arc::clone(&key);
            tasks.spawn(async move { (index, sealer.seal_selection(&pick, &key)) });
        }

        let mut slots: Vec<Option<EncryptedPayload>> = vec![None; selections.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, sealed) = joined
                .map_err(|e| SealdraftError::Internal(format!("sealing task failed: {e}")))?;
            match sealed {
                Ok(payload) => slots[index] = Some(payload),
                Err(err) => {
                    tasks.abort_all();
                    tracing::warn!(
                        picks = selections.len(),
                        failed_index = index,
                        error = %err,
                        "Pick batch aborted"
                    );
                    return Err(err);
                }
            }
        }

        tracing::debug!(
            picks = selections.len(),
            cipher = %self.sealer.cipher(),
            "Pick batch sealed"
        );

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    SealdraftError::Internal(format!("no sealed payload for pick {index}"))
                })
            })
            .collect()
    }
}
