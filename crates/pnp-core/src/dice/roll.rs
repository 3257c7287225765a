//! Raw dice roll results.

use serde::{Deserialize, Serialize};

use super::Dice;

/// The face values produced by rolling a [`Dice`] expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    dice: Dice,
    values: Vec<u32>,
}

impl RollResult {
    /// Wrap already-rolled values. Used by resolvers and tests.
    pub fn new(dice: Dice, values: Vec<u32>) -> Self {
        Self { dice, values }
    }

    /// The expression that was rolled.
    pub fn dice(&self) -> Dice {
        self.dice
    }

    /// Face values in roll order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Count dice showing exactly `face`.
    pub fn count_face(&self, face: u32) -> usize {
        self.values.iter().filter(|&&v| v == face).count()
    }

    /// Count dice showing 1.
    pub fn ones(&self) -> usize {
        self.count_face(1)
    }

    /// Count dice showing their highest face.
    pub fn maxes(&self) -> usize {
        self.count_face(self.dice.sides)
    }

    /// Sum of all face values.
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(u32::to_string).collect();
        write!(f, "{}: [{}]", self.dice, values.join(", "))
    }
}
