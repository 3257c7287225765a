//! Rule systems: attribute templates, roll signatures and roll handlers.
//!
//! A [`RuleSystem`] defines one game system. It declares which attributes
//! a character must have and how a roll command is typed and resolved.
//! Concrete systems live in [`dsa`] and [`hexdec`]; [`preset`] resolves a
//! system by name. A [`LoadedSystem`] pairs a rule system with its
//! validated [`RollArgumentBinder`] so every configuration error surfaces
//! when the system is loaded rather than on the first roll.

pub mod binder;
pub mod dsa;
pub mod hexdec;
pub mod preset;

pub use binder::{ArgKind, ParamDecl, RollArg, RollArgs, RollArgumentBinder, RollSignature};

use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::error::{PnpError, PnpResult};
use crate::resolution::RollOutcome;
use crate::sheet::{Attribute, Character};
use crate::store::UserId;
use crate::validate::validate_system;

/// One entry of a rule system's attribute template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTemplate {
    /// Canonical name, in the casing used for display.
    pub name: String,
    /// Whether characters may spend and gain this attribute.
    pub spendable: bool,
}

impl AttributeTemplate {
    /// A non-spendable template entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spendable: false,
        }
    }

    /// Mark the attribute as spendable.
    pub fn spendable(mut self) -> Self {
        self.spendable = true;
        self
    }
}

/// A pluggable game system.
pub trait RuleSystem: std::fmt::Debug {
    /// Display name (e.g., "DSA").
    fn name(&self) -> &str;

    /// Attributes every character of this system has, in display order.
    fn attributes(&self) -> &[AttributeTemplate];

    /// Usage string shown when a roll command is malformed.
    fn roll_help(&self) -> &str;

    /// Declared parameter list of [`RuleSystem::handle_roll`].
    fn roll_signature(&self) -> RollSignature;

    /// Resolve a roll from already-typed arguments.
    ///
    /// Must not have side effects beyond consuming randomness.
    fn handle_roll(
        &self,
        requester: &UserId,
        character: Option<&Character>,
        args: &RollArgs,
        rng: &mut StdRng,
    ) -> PnpResult<RollOutcome>;

    /// Find the template entry for a name, ignoring case.
    fn find_template(&self, name: &str) -> Option<&AttributeTemplate> {
        let lower = name.to_lowercase();
        self.attributes()
            .iter()
            .find(|t| t.name.to_lowercase() == lower)
    }

    /// The template's casing for a name, ignoring case.
    fn find_proper_name(&self, name: &str) -> Option<&str> {
        self.find_template(name).map(|t| t.name.as_str())
    }

    /// Parse the attribute tokens of a character creation request.
    ///
    /// Every token must be named and known to the template, and every
    /// template attribute must be supplied exactly once. The result uses
    /// the template's casing, spendability and order.
    fn parse_attributes(&self, tokens: &[&str]) -> PnpResult<Vec<Attribute>> {
        let mut parsed: Vec<Attribute> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let attribute: Attribute = token.parse()?;
            if attribute.is_anonymous() {
                return Err(PnpError::AnonymousAttribute);
            }
            let template = self
                .find_template(attribute.name())
                .ok_or_else(|| PnpError::UnknownAttribute(attribute.name().to_string()))?;
            if parsed.iter().any(|a| a.name() == template.name) {
                return Err(PnpError::DuplicateAttribute(template.name.clone()));
            }
            parsed.push(
                attribute
                    .with_name(template.name.as_str())
                    .spendable(template.spendable),
            );
        }

        let missing: Vec<String> = self
            .attributes()
            .iter()
            .filter(|t| !parsed.iter().any(|a| a.name() == t.name))
            .map(|t| t.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(PnpError::MissingAttributes(missing));
        }

        let mut ordered = Vec::with_capacity(parsed.len());
        for template in self.attributes() {
            if let Some(index) = parsed.iter().position(|a| a.name() == template.name) {
                ordered.push(parsed.swap_remove(index));
            }
        }
        Ok(ordered)
    }
}

/// A rule system whose configuration has been checked.
#[derive(Debug)]
pub struct LoadedSystem {
    system: Box<dyn RuleSystem>,
    binder: RollArgumentBinder,
}

impl LoadedSystem {
    /// Validate a rule system and derive its roll binder.
    pub fn new(system: Box<dyn RuleSystem>) -> PnpResult<Self> {
        let binder = RollArgumentBinder::new(&system.roll_signature())?;

        for issue in validate_system(system.as_ref()) {
            if issue.is_error {
                return Err(PnpError::InvalidSystem(issue.to_string()));
            }
            warn!(system = system.name(), "{issue}");
        }

        info!(
            system = system.name(),
            attributes = system.attributes().len(),
            roll_args = binder.arity(),
            "rule system loaded"
        );
        Ok(Self { system, binder })
    }

    /// The underlying rule system.
    pub fn system(&self) -> &dyn RuleSystem {
        self.system.as_ref()
    }

    /// The validated roll binder.
    pub fn binder(&self) -> &RollArgumentBinder {
        &self.binder
    }

    /// Bind raw roll tokens and resolve them.
    pub fn roll(
        &self,
        requester: &UserId,
        character: Option<&Character>,
        tokens: &[&str],
        rng: &mut StdRng,
    ) -> PnpResult<RollOutcome> {
        let args = self.binder.parse_roll_args(tokens)?;
        self.system.handle_roll(requester, character, &args, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::Outcome;

    #[derive(Debug)]
    struct ThreeStats {
        attributes: Vec<AttributeTemplate>,
        signature: RollSignature,
    }

    impl ThreeStats {
        fn new(signature: RollSignature) -> Self {
            Self {
                attributes: vec![
                    AttributeTemplate::new("Stärke"),
                    AttributeTemplate::new("Intelligenz").spendable(),
                    AttributeTemplate::new("gEsChIcK"),
                ],
                signature,
            }
        }
    }

    impl RuleSystem for ThreeStats {
        fn name(&self) -> &str {
            "three"
        }

        fn attributes(&self) -> &[AttributeTemplate] {
            &self.attributes
        }

        fn roll_help(&self) -> &str {
            "roll NdM"
        }

        fn roll_signature(&self) -> RollSignature {
            self.signature.clone()
        }

        fn handle_roll(
            &self,
            _requester: &UserId,
            _character: Option<&Character>,
            args: &RollArgs,
            rng: &mut StdRng,
        ) -> PnpResult<RollOutcome> {
            let roll = args.dice("dice")?.roll(rng)?;
            Ok(RollOutcome {
                dice: roll.dice(),
                rolls: Vec::new(),
                successes: 0,
                remaining_talent: None,
                outcome: Outcome::Success,
            })
        }
    }

    fn system() -> ThreeStats {
        ThreeStats::new(RollSignature::standard().typed("dice", ArgKind::Dice))
    }

    #[test]
    fn attribute_name() {
        let sys = system();
        for template in sys.attributes() {
            assert_eq!(
                sys.find_proper_name(&template.name.to_lowercase()),
                Some(template.name.as_str())
            );
        }
        assert_eq!(sys.find_proper_name("unknown"), None);
    }

    #[test]
    fn parse_all_attributes_canonicalizes() {
        let attrs = system()
            .parse_attributes(&["GESCHICK=4", "stärke=3", "intelligenz=2/5"])
            .unwrap();
        let names: Vec<&str> = attrs.iter().map(Attribute::name).collect();
        assert_eq!(names, ["Stärke", "Intelligenz", "gEsChIcK"]);
        assert_eq!(attrs[0].value(), 3);
        assert!(attrs[1].is_limited());
        assert!(attrs[1].is_spendable());
        assert!(!attrs[2].is_spendable());
    }

    #[test]
    fn parse_missing_attribute() {
        match system().parse_attributes(&["Stärke=3", "gEsChIcK=4"]) {
            Err(PnpError::MissingAttributes(missing)) => assert_eq!(missing, ["Intelligenz"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_unknown_attribute() {
        assert!(matches!(
            system().parse_attributes(&["Stärke=3", "Charme=1"]),
            Err(PnpError::UnknownAttribute(name)) if name == "Charme"
        ));
    }

    #[test]
    fn parse_anonymous_attribute() {
        assert!(matches!(
            system().parse_attributes(&["3"]),
            Err(PnpError::AnonymousAttribute)
        ));
    }

    #[test]
    fn parse_malformed_attribute() {
        assert!(matches!(
            system().parse_attributes(&["Stärke=x"]),
            Err(PnpError::AttributeParse { name }) if name == "Stärke"
        ));
    }

    #[test]
    fn parse_duplicate_attribute() {
        assert!(matches!(
            system().parse_attributes(&["Stärke=3", "STÄRKE=4"]),
            Err(PnpError::DuplicateAttribute(_))
        ));
    }

    #[test]
    fn load_rejects_untyped_signature() {
        let sys = ThreeStats::new(RollSignature::standard().untyped("test"));
        let err = LoadedSystem::new(Box::new(sys)).unwrap_err();
        assert!(err.is_startup_error());
    }

    #[test]
    fn load_rejects_missing_prefix() {
        let sys = ThreeStats::new(RollSignature::new().typed("dice", ArgKind::Dice));
        assert!(matches!(
            LoadedSystem::new(Box::new(sys)),
            Err(PnpError::MissingBaseArguments(_))
        ));
    }

    #[test]
    fn loaded_system_rolls() {
        use rand::SeedableRng;

        let loaded = LoadedSystem::new(Box::new(system())).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = loaded
            .roll(&UserId::from("gm"), None, &["2d6"], &mut rng)
            .unwrap();
        assert_eq!(outcome.dice.to_string(), "2d6");
        assert!(loaded.roll(&UserId::from("gm"), None, &[], &mut rng).is_err());
    }
}
