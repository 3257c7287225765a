//! Resolution algorithms for interpreting dice rolls.
//!
//! Each rule system resolves dice differently:
//! - **Talent check** (DSA): three dice against three thresholds, with a
//!   talent pool that pays for rolls above the threshold
//! - **Threshold pool** (HexDec): any die strictly above a single base
//!   value is a success

pub mod talent;
pub mod threshold;

pub use talent::TalentCheck;
pub use threshold::ThresholdPool;

use serde::{Deserialize, Serialize};

use crate::dice::Dice;

/// Overall classification of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// An exceptional success triggered by extreme low faces.
    CriticalSuccess,
    /// A standard success.
    Success,
    /// A standard failure.
    Failure,
    /// A catastrophic failure triggered by extreme faces.
    CriticalFailure,
}

impl Outcome {
    /// Returns true for both kinds of success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success)
    }

    /// Returns true for critical outcomes.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::CriticalFailure)
    }

    /// Classify from a success flag and a critical flag.
    pub fn classify(success: bool, critical: bool) -> Self {
        match (success, critical) {
            (true, true) => Self::CriticalSuccess,
            (true, false) => Self::Success,
            (false, true) => Self::CriticalFailure,
            (false, false) => Self::Failure,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// One rolled die, tagged with whether it counted as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Face value.
    pub value: u32,
    /// Whether this die succeeded.
    pub success: bool,
}

/// The structured result of resolving a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The expression that was rolled.
    pub dice: Dice,
    /// Every die in roll order.
    pub rolls: Vec<DieResult>,
    /// Number of successful dice.
    pub successes: u32,
    /// Talent points left after the roll, for systems that use a talent pool.
    pub remaining_talent: Option<i64>,
    /// Overall classification.
    pub outcome: Outcome,
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rolls: Vec<String> = self
            .rolls
            .iter()
            .map(|r| {
                if r.success {
                    format!("{}*", r.value)
                } else {
                    r.value.to_string()
                }
            })
            .collect();
        let plural = if self.successes == 1 { "" } else { "es" };
        write!(
            f,
            "{}: {} [{}] ({} success{plural}",
            self.outcome,
            self.dice,
            rolls.join(", "),
            self.successes
        )?;
        if let Some(talent) = self.remaining_talent {
            write!(f, ", {talent} talent left")?;
        }
        write!(f, ")")
    }
}
