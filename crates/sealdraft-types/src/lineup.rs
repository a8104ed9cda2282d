//! Lineup model: the plaintext a participant commits to before the deadline.
//!
//! A [`LineupSelection`] is built by the application layer for each
//! submission attempt. It lives only in memory for validation and sealing and
//! is never stored in the clear by this workspace.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, PositionCode};

/// One participant's lineup.
///
/// `positions` is index-aligned with `player_ids` when present. `captain` and
/// `vice_captain` must name members of `player_ids` and must differ; the
/// `LineupValidator` enforces this together with the roster size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupSelection {
    /// Selected players, in slot order.
    pub player_ids: Vec<PlayerId>,
    /// Position code per slot, if the league uses positional slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<PositionCode>>,
    /// Captain, if one was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<PlayerId>,
    /// Vice captain, if one was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vice_captain: Option<PlayerId>,
}

impl LineupSelection {
    /// A lineup with players only: no positions, captain or vice captain.
    #[must_use]
    pub fn new(player_ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            player_ids: player_ids.into_iter().map(PlayerId).collect(),
            positions: None,
            captain: None,
            vice_captain: None,
        }
    }

    #[must_use]
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = u32>) -> Self {
        self.positions = Some(positions.into_iter().map(PositionCode).collect());
        self
    }

    #[must_use]
    pub fn with_captain(mut self, captain: u32) -> Self {
        self.captain = Some(PlayerId(captain));
        self
    }

    #[must_use]
    pub fn with_vice_captain(mut self, vice_captain: u32) -> Self {
        self.vice_captain = Some(PlayerId(vice_captain));
        self
    }

    /// Number of selected players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.player_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player_ids.is_empty()
    }

    /// Whether `player` is part of this lineup.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.player_ids.contains(&player)
    }
}

/// A single draft pick: one player taken in one draft round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSelection {
    pub player_id: PlayerId,
    pub round: u32,
}

impl PlayerSelection {
    #[must_use]
    pub fn new(player_id: u32, round: u32) -> Self {
        Self {
            player_id: PlayerId(player_id),
            round,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl LineupSelection {
    /// Players `1..=n` in positions `1..=n`, captain 1 and vice captain 2.
    pub fn dummy(n: u32) -> Self {
        let mut lineup = Self::new(1..=n).with_positions(1..=n);
        if n >= 1 {
            lineup.captain = Some(PlayerId(1));
        }
        if n >= 2 {
            lineup.vice_captain = Some(PlayerId(2));
        }
        lineup
    }

    /// `n` distinct random players, captain and vice captain drawn from them.
    pub fn dummy_random(n: usize) -> Self {
        use rand::seq::index::sample;

        let mut rng = rand::thread_rng();
        let ids: Vec<u32> = sample(&mut rng, 100_000, n)
            .into_iter()
            .map(|i| u32::try_from(i).unwrap_or(u32::MAX) + 1)
            .collect();
        let positions: Vec<u32> = (0..n).map(|_| rand::random::<u32>() % 8 + 1).collect();
        let mut lineup = Self::new(ids.iter().copied()).with_positions(positions);
        lineup.captain = ids.first().copied().map(PlayerId);
        lineup.vice_captain = ids.get(1).copied().map(PlayerId);
        lineup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_lineup_shape() {
        let lineup = LineupSelection::dummy(5);
        assert_eq!(lineup.len(), 5);
        assert_eq!(lineup.positions.as_ref().map(Vec::len), Some(5));
        assert_eq!(lineup.captain, Some(PlayerId(1)));
        assert_eq!(lineup.vice_captain, Some(PlayerId(2)));
    }

    #[test]
    fn dummy_random_is_distinct() {
        let lineup = LineupSelection::dummy_random(11);
        let mut ids = lineup.player_ids.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 11);
        assert!(ids.iter().all(|id| id.is_valid()));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let lineup = LineupSelection::new([7, 8]).with_captain(7);
        let json = serde_json::to_string(&lineup).unwrap();
        assert!(json.contains("\"playerIds\":[7,8]"), "Got: {json}");
        assert!(!json.contains("viceCaptain"));

        let back: LineupSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lineup);
    }

    #[test]
    fn contains_checks_membership() {
        let lineup = LineupSelection::new([3, 9]);
        assert!(lineup.contains(PlayerId(9)));
        assert!(!lineup.contains(PlayerId(4)));
    }
}
