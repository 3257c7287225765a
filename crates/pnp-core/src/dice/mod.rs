//! Dice expressions and rolling.
//!
//! A dice expression is written `NdM`: roll `N` dice with `M` sides each.
//! Every rule system shares the same limits on pool size and die size,
//! which are checked before any randomness is consumed.

pub mod roll;

pub use roll::RollResult;

use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{PnpError, PnpResult};

/// Largest number of dice a single roll may use.
pub const MAX_DICE: u32 = 50;

/// Largest number of sides a die may have.
pub const MAX_SIDES: u32 = 100;

/// A dice expression such as `3d20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    /// How many dice to roll.
    pub number: u32,
    /// Sides on each die.
    pub sides: u32,
}

impl Dice {
    /// Create a dice expression without range checks.
    pub fn new(number: u32, sides: u32) -> Self {
        Self { number, sides }
    }

    /// Check that the expression lies within the supported range.
    pub fn validate(&self) -> PnpResult<()> {
        if (1..=MAX_DICE).contains(&self.number) && (1..=MAX_SIDES).contains(&self.sides) {
            Ok(())
        } else {
            Err(PnpError::InvalidDiceRange {
                number: self.number,
                sides: self.sides,
            })
        }
    }

    /// Roll every die using the given RNG.
    ///
    /// Out-of-range expressions fail before the RNG is touched.
    pub fn roll(&self, rng: &mut StdRng) -> PnpResult<RollResult> {
        self.validate()?;
        let values = (0..self.number)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        Ok(RollResult::new(*self, values))
    }
}

/// Parse `NdM`, ignoring the case of `d`.
impl FromStr for Dice {
    type Err = PnpError;

    fn from_str(s: &str) -> PnpResult<Self> {
        let invalid = || PnpError::InvalidDice(s.to_string());
        let lower = s.trim().to_lowercase();
        let (number, sides) = lower.split_once('d').ok_or_else(invalid)?;
        Ok(Self {
            number: number.parse().map_err(|_| invalid())?,
            sides: sides.parse().map_err(|_| invalid())?,
        })
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.number, self.sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn parse_dice() {
        let d: Dice = "1d6".parse().unwrap();
        assert_eq!(d.number, 1);
        assert_eq!(d.sides, 6);
        assert_eq!("3D20".parse::<Dice>().unwrap(), Dice::new(3, 20));
    }

    #[test]
    fn parse_dice_failure() {
        for input in ["ad6", "1d", "d6", "1d6d", "-1d6", "16", "", "1x6"] {
            assert!(
                matches!(input.parse::<Dice>(), Err(PnpError::InvalidDice(_))),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn output_dice() {
        assert_eq!("1d6".parse::<Dice>().unwrap().to_string(), "1d6");
        assert_eq!("2D10".parse::<Dice>().unwrap().to_string(), "2d10");
    }

    #[test]
    fn range_limits() {
        assert!(Dice::new(1, 1).validate().is_ok());
        assert!(Dice::new(50, 100).validate().is_ok());
        for dice in [
            Dice::new(0, 6),
            Dice::new(51, 6),
            Dice::new(3, 0),
            Dice::new(3, 101),
        ] {
            assert!(matches!(
                dice.validate(),
                Err(PnpError::InvalidDiceRange { .. })
            ));
        }
    }

    #[test]
    fn invalid_range_does_not_consume_rng() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut untouched = StdRng::seed_from_u64(7);
        assert!(Dice::new(0, 20).roll(&mut rng).is_err());
        let a = Dice::new(3, 20).roll(&mut rng).unwrap();
        let b = Dice::new(3, 20).roll(&mut untouched).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn roll_produces_valid_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = Dice::new(10, 6).roll(&mut rng).unwrap();
        assert_eq!(result.count(), 10);
        assert!(result.values().iter().all(|v| (1..=6).contains(v)));
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let dice = Dice::new(3, 20);
        let r1 = dice.roll(&mut StdRng::seed_from_u64(99)).unwrap();
        let r2 = dice.roll(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(r1.values(), r2.values());
    }
}
