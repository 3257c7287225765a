//! Three-success talent check (DSA-style).
//!
//! Three dice are compared against three thresholds, die `i` against
//! threshold `i`. A die at or below its threshold succeeds for free. A die
//! above it may still succeed by paying the difference from the talent
//! pool. The difference is deducted whether or not the pool could cover
//! it, so the remaining talent can go negative.
//!
//! The check passes with three successes, or automatically with two or
//! more natural ones. Two or more ones make a pass critical; two or more
//! maximum faces make a failure critical.

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;
use crate::resolution::{DieResult, Outcome, RollOutcome};

/// Configuration for a single talent check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentCheck {
    /// Base value each die is compared against, by position.
    pub thresholds: [i64; 3],
    /// Talent points available to buy down rolls above a threshold.
    pub talent: i64,
}

impl TalentCheck {
    /// Number of dice this check resolves.
    pub const DICE: u32 = 3;

    /// Successes needed to pass without help from natural ones.
    pub const SUCCESSES_NEEDED: u32 = 3;

    /// Resolve a roll. Dice past the third have no threshold and fail.
    pub fn resolve(&self, roll: &RollResult) -> RollOutcome {
        let mut talent = self.talent;
        let mut successes = 0;
        let mut rolls = Vec::with_capacity(roll.count());

        for (index, &value) in roll.values().iter().enumerate() {
            let success = match self.thresholds.get(index) {
                Some(&threshold) => {
                    let face = i64::from(value);
                    if face <= threshold {
                        true
                    } else {
                        let overspend = face.saturating_sub(threshold);
                        let covered = overspend <= talent;
                        talent = talent.saturating_sub(overspend);
                        covered
                    }
                }
                None => false,
            };
            if success {
                successes += 1;
            }
            rolls.push(DieResult { value, success });
        }

        let double_one = roll.ones() >= 2;
        let passed = successes >= Self::SUCCESSES_NEEDED || double_one;
        let critical = if passed {
            double_one
        } else {
            roll.maxes() >= 2
        };

        RollOutcome {
            dice: roll.dice(),
            rolls,
            successes,
            remaining_talent: Some(talent),
            outcome: Outcome::classify(passed, critical),
        }
    }
}
