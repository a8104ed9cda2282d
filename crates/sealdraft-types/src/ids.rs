//! Identifiers used throughout sealdraft.
//!
//! Player ids and position codes are small integers assigned by the league;
//! `SealId` is a UUIDv7 minted per sealing so log lines can be correlated
//! without ever printing lineup contents.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// League-assigned player identifier. Valid ids are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<u32> for PlayerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PositionCode
// ---------------------------------------------------------------------------

/// Numeric roster slot code (QB, RB, ... as configured by the league).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionCode(pub u32);

impl From<u32> for PositionCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SealId
// ---------------------------------------------------------------------------

/// Identifier of one sealing operation. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SealId(pub Uuid);

impl SealId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SealId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
