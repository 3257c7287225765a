//! Threshold pool resolution (HexDec-style).
//!
//! Every die that strictly exceeds the base value is a success, and one
//! success passes the roll. A maximum face on any die makes the result
//! critical; on a failed roll a natural one does too.

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;
use crate::resolution::{DieResult, Outcome, RollOutcome};

/// Configuration for threshold pool resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPool {
    /// A die must roll strictly above this value to succeed.
    pub base: i64,
}

impl ThresholdPool {
    /// Resolve a roll by counting dice above the base.
    pub fn resolve(&self, roll: &RollResult) -> RollOutcome {
        let rolls: Vec<DieResult> = roll
            .values()
            .iter()
            .map(|&value| DieResult {
                value,
                success: i64::from(value) > self.base,
            })
            .collect();
        let successes = rolls.iter().filter(|r| r.success).count() as u32;
        let passed = successes > 0;
        let critical = roll.maxes() > 0 || (!passed && roll.ones() > 0);

        RollOutcome {
            dice: roll.dice(),
            rolls,
            successes,
            remaining_talent: None,
            outcome: Outcome::classify(passed, critical),
        }
    }
}
