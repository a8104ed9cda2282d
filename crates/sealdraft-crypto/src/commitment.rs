//! Salted lineup commitments.
//!
//! A commitment is `H(canonical(selection, salt, timestamp_ms))` with `H`
//! chosen by [`DigestAlgorithm`]. It is binding through the hash's collision
//! resistance and hiding because the 16-byte random salt is always part of
//! the preimage. Commitments never touch the sealing key.

use sha2::Sha256;
use sha3::{Digest, Keccak256};
use subtle::ConstantTimeEq;

use sealdraft_types::{
    Commitment, DigestAlgorithm, LineupSelection, Salt, codec, constants::COMMITMENT_SIZE,
};

/// Computes and verifies lineup commitments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitmentBuilder {
    digest: DigestAlgorithm,
}

impl CommitmentBuilder {
    #[must_use]
    pub fn new(digest: DigestAlgorithm) -> Self {
        Self { digest }
    }

    #[must_use]
    pub fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Commit to `selection` under `salt` at `timestamp_ms`.
    ///
    /// Pure: the same inputs always give the same commitment.
    #[must_use]
    pub fn commit(
        &self,
        selection: &LineupSelection,
        salt: &Salt,
        timestamp_ms: u64,
    ) -> Commitment {
        let preimage = codec::commitment_preimage(selection, salt, timestamp_ms);
        let digest = match self.digest {
            DigestAlgorithm::Sha256 => hash::<Sha256>(&preimage),
            DigestAlgorithm::Keccak256 => hash::<Keccak256>(&preimage),
        };
        Commitment::from_bytes(digest)
    }

    /// Recompute the commitment and compare in constant time.
    #[must_use]
    pub fn verify(
        &self,
        selection: &LineupSelection,
        salt: &Salt,
        timestamp_ms: u64,
        commitment: &Commitment,
    ) -> bool {
        let expected = self.commit(selection, salt, timestamp_ms);
        expected.as_bytes()[..]
            .ct_eq(&commitment.as_bytes()[..])
            .into()
    }
}

fn hash<D: Digest>(bytes: &[u8]) -> [u8; COMMITMENT_SIZE] {
    let result = D::digest(bytes);
    let mut out = [0u8; COMMITMENT_SIZE];
    out.copy_from_slice(&result);
    out
}
