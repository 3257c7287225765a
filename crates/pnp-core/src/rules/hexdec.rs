//! HexDec: threshold dice pools with spendable resources.

use rand::rngs::StdRng;
use tracing::debug;

use crate::error::PnpResult;
use crate::resolution::{RollOutcome, ThresholdPool};
use crate::rules::{ArgKind, AttributeTemplate, RollArgs, RollSignature, RuleSystem};
use crate::sheet::Character;
use crate::store::UserId;

const ATTRIBUTES: [&str; 5] = ["Vita", "AP", "Körper", "Geist", "Sozial"];

/// The HexDec rule system. Every attribute is a spendable pool.
#[derive(Debug, Clone)]
pub struct HexDec {
    attributes: Vec<AttributeTemplate>,
}

impl Default for HexDec {
    fn default() -> Self {
        Self {
            attributes: ATTRIBUTES
                .into_iter()
                .map(|name| AttributeTemplate::new(name).spendable())
                .collect(),
        }
    }
}

impl HexDec {
    /// Create the HexDec rule system.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleSystem for HexDec {
    fn name(&self) -> &str {
        "HexDec"
    }

    fn attributes(&self) -> &[AttributeTemplate] {
        &self.attributes
    }

    fn roll_help(&self) -> &str {
        "Usage: roll XdY BASE (e.g. `roll 3d20 15`)"
    }

    fn roll_signature(&self) -> RollSignature {
        RollSignature::standard()
            .typed("dice", ArgKind::Dice)
            .typed("base", ArgKind::Int)
    }

    fn handle_roll(
        &self,
        requester: &UserId,
        _character: Option<&Character>,
        args: &RollArgs,
        rng: &mut StdRng,
    ) -> PnpResult<RollOutcome> {
        let pool = ThresholdPool {
            base: args.int("base")?,
        };
        let roll = args.dice("dice")?.roll(rng)?;
        debug!(%requester, %roll, base = pool.base, "threshold pool");
        Ok(pool.resolve(&roll))
    }
}
