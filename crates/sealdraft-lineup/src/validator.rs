//! Lineup validator: structural gate before sealing or committing.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. roster size
//! 2. position count (when positions are supplied)
//! 3. distinct players
//! 4. captain in roster
//! 5. vice captain in roster and different from the captain
//! 6. every player id strictly positive
//!
//! Pure: no randomness, no key, no I/O.

use std::collections::HashSet;

use sealdraft_types::{LineupSelection, SealConfig, ValidationError};

/// Validate `selection` against a roster of exactly `roster_size` players.
pub fn validate(selection: &LineupSelection, roster_size: usize) -> Result<(), ValidationError> {
    LineupValidator::new(roster_size).validate(selection)
}

/// Roster-shape gate configured with a fixed roster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupValidator {
    roster_size: usize,
}

impl LineupValidator {
    #[must_use]
    pub fn new(roster_size: usize) -> Self {
        Self { roster_size }
    }

    #[must_use]
    pub fn from_config(config: &SealConfig) -> Self {
        Self::new(config.roster_size)
    }

    #[must_use]
    pub fn roster_size(&self) -> usize {
        self.roster_size
    }

    /// Run all checks against `selection`.
    ///
    /// # Errors
    /// The [`ValidationError`] of the first failing check.
    pub fn validate(&self, selection: &LineupSelection) -> Result<(), ValidationError> {
        // 1. Roster size
        if selection.player_ids.len() != self.roster_size {
            return Err(ValidationError::WrongRosterSize {
                expected: self.roster_size,
                actual: selection.player_ids.len(),
            });
        }

        // 2. Positions, index-aligned with players
        if let Some(positions) = &selection.positions {
            if positions.len() != self.roster_size {
                return Err(ValidationError::PositionCountMismatch {
                    expected: self.roster_size,
                    actual: positions.len(),
                });
            }
        }

        // 3. No player twice
        let mut seen = HashSet::with_capacity(selection.player_ids.len());
        for id in &selection.player_ids {
            if !seen.insert(*id) {
                return Err(ValidationError::DuplicatePlayer(*id));
            }
        }

        // 4. Captain
        if let Some(captain) = selection.captain {
            if !seen.contains(&captain) {
                return Err(ValidationError::CaptainNotInRoster(captain));
            }
        }

        // 5. Vice captain
        if let Some(vice) = selection.vice_captain {
            if !seen.contains(&vice) || selection.captain == Some(vice) {
                return Err(ValidationError::ViceCaptainInvalid(vice));
            }
        }

        // 6. Ids are positive
        if let Some(bad) = selection.player_ids.iter().find(|id| !id.is_valid()) {
            return Err(ValidationError::InvalidPlayerId(*bad));
        }

        Ok(())
    }
}

impl Default for LineupValidator {
    fn default() -> Self {
        Self::from_config(&SealConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use sealdraft_types::PlayerId;

    use super::*;

    #[test]
    fn valid_lineup_passes() {
        let lineup = LineupSelection::dummy(5);
        assert_eq!(validate(&lineup, 5), Ok(()));
    }

    #[test]
    fn lineup_without_optionals_passes() {
        let lineup = LineupSelection::new([11, 12, 13, 14, 15]);
        assert!(LineupValidator::default().validate(&lineup).is_ok());
    }

    #[test]
    fn short_roster_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 4]);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::WrongRosterSize {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn long_roster_rejected() {
        let lineup = LineupSelection::dummy(6);
        assert!(matches!(
            validate(&lineup, 5),
            Err(ValidationError::WrongRosterSize { actual: 6, .. })
        ));
    }

    #[test]
    fn position_count_mismatch_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 4, 5]).with_positions([1, 2, 3]);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::PositionCountMismatch {
                expected: 5,
                actual: 3
            })
        );
    }

    #[test]
    fn duplicate_player_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 2, 5]);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::DuplicatePlayer(PlayerId(2)))
        );
    }

    #[test]
    fn captain_outside_roster_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 4, 5]).with_captain(9);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::CaptainNotInRoster(PlayerId(9)))
        );
    }

    #[test]
    fn vice_outside_roster_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 4, 5])
            .with_captain(1)
            .with_vice_captain(6);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::ViceCaptainInvalid(PlayerId(6)))
        );
    }

    #[test]
    fn vice_equal_to_captain_rejected() {
        let lineup = LineupSelection::new([1, 2, 3, 4, 5])
            .with_captain(3)
            .with_vice_captain(3);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::ViceCaptainInvalid(PlayerId(3)))
        );
    }

    #[test]
    fn vice_without_captain_passes() {
        let lineup = LineupSelection::new([1, 2, 3, 4, 5]).with_vice_captain(4);
        assert!(validate(&lineup, 5).is_ok());
    }

    #[test]
    fn zero_player_id_rejected() {
        let lineup = LineupSelection::new([0, 2, 3, 4, 5]);
        assert_eq!(
            validate(&lineup, 5),
            Err(ValidationError::InvalidPlayerId(PlayerId(0)))
        );
    }

    #[test]
    fn first_failure_wins() {
        // Wrong size, duplicate and bad captain at once: size is reported.
        let lineup = LineupSelection::new([1, 1, 2]).with_captain(9);
        assert!(matches!(
            validate(&lineup, 5),
            Err(ValidationError::WrongRosterSize { .. })
        ));

        // Duplicate and bad captain: duplicate is reported.
        let lineup = LineupSelection::new([1, 1, 2, 3, 4]).with_captain(9);
        assert!(matches!(
            validate(&lineup, 5),
            Err(ValidationError::DuplicatePlayer(_))
        ));

        // Zero id alongside a bad captain: captain is reported.
        let lineup = LineupSelection::new([0, 2, 3, 4, 5]).with_captain(9);
        assert!(matches!(
            validate(&lineup, 5),
            Err(ValidationError::CaptainNotInRoster(_))
        ));
    }

    #[test]
    fn custom_roster_size() {
        let validator = LineupValidator::from_config(&SealConfig::with_roster_size(11));
        assert_eq!(validator.roster_size(), 11);
        assert!(validator.validate(&LineupSelection::dummy(11)).is_ok());
        assert!(validator.validate(&LineupSelection::dummy(5)).is_err());
    }
}
