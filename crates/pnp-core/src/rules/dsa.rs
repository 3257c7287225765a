//! Das Schwarze Auge: three-success talent checks.
//!
//! A check rolls exactly three d20 against three attribute values and
//! uses the talent value as a pool to buy down rolls that miss.

use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{PnpError, PnpResult};
use crate::resolution::{RollOutcome, TalentCheck};
use crate::rules::{ArgKind, AttributeTemplate, RollArgs, RollSignature, RuleSystem};
use crate::sheet::Character;
use crate::store::UserId;

const ATTRIBUTES: [&str; 12] = [
    "MU", "KL", "IN", "CH", "FF", "GE", "KO", "KK", "LeP", "Aus", "AsP", "KaP",
];

/// The DSA rule system.
#[derive(Debug, Clone)]
pub struct Dsa {
    attributes: Vec<AttributeTemplate>,
}

impl Default for Dsa {
    fn default() -> Self {
        Self {
            attributes: ATTRIBUTES.into_iter().map(AttributeTemplate::new).collect(),
        }
    }
}

impl Dsa {
    /// Create the DSA rule system.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleSystem for Dsa {
    fn name(&self) -> &str {
        "DSA"
    }

    fn attributes(&self) -> &[AttributeTemplate] {
        &self.attributes
    }

    fn roll_help(&self) -> &str {
        "Usage: roll XdY BASE BASE BASE TALENT (e.g. `roll 3d20 10 11 12 5`)"
    }

    fn roll_signature(&self) -> RollSignature {
        RollSignature::standard()
            .typed("dice", ArgKind::Dice)
            .typed("base1", ArgKind::Int)
            .typed("base2", ArgKind::Int)
            .typed("base3", ArgKind::Int)
            .typed("talent", ArgKind::Int)
    }

    fn handle_roll(
        &self,
        requester: &UserId,
        _character: Option<&Character>,
        args: &RollArgs,
        rng: &mut StdRng,
    ) -> PnpResult<RollOutcome> {
        let dice = args.dice("dice")?;
        dice.validate()?;
        if dice.number != TalentCheck::DICE {
            return Err(PnpError::DicePoolSize {
                expected: TalentCheck::DICE,
                actual: dice.number,
            });
        }

        let check = TalentCheck {
            thresholds: [args.int("base1")?, args.int("base2")?, args.int("base3")?],
            talent: args.int("talent")?,
        };
        let roll = dice.roll(rng)?;
        debug!(%requester, %roll, talent = check.talent, "talent check");
        Ok(check.resolve(&roll))
    }
}
