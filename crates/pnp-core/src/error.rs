//! Error types for the game-master engine.

/// Errors that can occur while parsing, mutating, rolling or persisting.
#[derive(Debug, thiserror::Error)]
pub enum PnpError {
    /// An attribute token could not be parsed. The name may be empty.
    #[error("malformed attribute '{name}'")]
    AttributeParse {
        /// Name given in the token, if any.
        name: String,
    },

    /// An attribute token lacked a `name=` prefix where one is required.
    #[error("attribute has no name")]
    AnonymousAttribute,

    /// An attribute name is not part of the active rule system.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Required attributes were not supplied.
    #[error("missing attributes: {}", .0.join(", "))]
    MissingAttributes(Vec<String>),

    /// The same attribute was given twice (case-insensitive).
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// A character was created without a name.
    #[error("character name must not be empty")]
    EmptyCharacterName,

    /// Spend or gain was attempted on an attribute that does not allow it.
    #[error("attribute '{0}' cannot be spent or gained")]
    NotSpendable(String),

    /// A mutation would push a limited attribute below its minimum.
    #[error("cannot go from {current} to {attempted}, minimum is {minimum}")]
    Underflow {
        /// Value before the mutation.
        current: i64,
        /// Value the mutation would have produced.
        attempted: i64,
        /// Lower bound of the attribute.
        minimum: i64,
    },

    /// A mutation would push a limited attribute above its maximum.
    #[error("cannot go from {current} to {attempted}, maximum is {maximum}")]
    Overflow {
        /// Value before the mutation.
        current: i64,
        /// Value the mutation would have produced.
        attempted: i64,
        /// Upper bound of the attribute.
        maximum: i64,
    },

    /// A dice expression is not of the form `NdM`.
    #[error("'{0}' is not a valid dice expression")]
    InvalidDice(String),

    /// A dice expression is outside the supported count or side range.
    #[error("cannot roll {number}d{sides}: at most 50 dice with at most 100 sides")]
    InvalidDiceRange {
        /// Requested number of dice.
        number: u32,
        /// Requested number of sides.
        sides: u32,
    },

    /// The rule system needs a specific number of dice.
    #[error("expected {expected} dice, got {actual}")]
    DicePoolSize {
        /// Number of dice the rule system resolves.
        expected: u32,
        /// Number of dice requested.
        actual: u32,
    },

    /// A roll parameter was declared without an argument kind.
    #[error("roll parameter '{0}' has no declared type")]
    AnnotationMissing(String),

    /// A roll parameter name appears twice in one signature.
    #[error("roll parameter '{0}' is declared more than once")]
    DuplicateRollParameter(String),

    /// A rule system's roll signature omits fixed prefix parameters.
    #[error("roll signature is missing base parameters: {}", .0.join(", "))]
    MissingBaseArguments(Vec<String>),

    /// A rule system failed structural validation.
    #[error("invalid rule system: {0}")]
    InvalidSystem(String),

    /// No rule system is registered under this name.
    #[error("unknown rule system: {0}")]
    UnknownSystem(String),

    /// Fewer roll tokens were supplied than the signature declares.
    #[error("missing roll argument '{param}' at position {position}")]
    MissingRollArgument {
        /// Declared parameter name.
        param: String,
        /// Zero-based position in the argument list.
        position: usize,
    },

    /// A roll token could not be converted to its declared kind.
    #[error("invalid value '{value}' for roll argument '{param}'")]
    InvalidRollArgument {
        /// Declared parameter name.
        param: String,
        /// Raw token that failed to convert.
        value: String,
    },

    /// A bound roll argument was read with the wrong kind or does not exist.
    #[error("roll argument '{param}' is not a {expected}")]
    RollArgumentType {
        /// Parameter name that was looked up.
        param: String,
        /// Kind the caller asked for.
        expected: String,
    },

    /// The player has no character.
    #[error("player '{0}' has no character")]
    CharacterNotFound(String),

    /// The player already has a character.
    #[error("player '{player}' already has a character ({character})")]
    CharacterExists {
        /// Player identity.
        player: String,
        /// Name of the existing character.
        character: String,
    },

    /// The character has no attribute with this name.
    #[error("character {character} has no attribute named '{name}'")]
    AttributeNotFound {
        /// Character name.
        character: String,
        /// Requested attribute name.
        name: String,
    },

    /// Spend and gain amounts must not be negative.
    #[error("amount must not be negative, got {0}")]
    InvalidAmount(i64),

    /// A command line could not be understood.
    #[error("usage: {0}")]
    InvalidCommand(String),

    /// Reading or writing the character store failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The character store snapshot could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PnpError {
    /// Returns true for rule-system configuration errors that must abort startup.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::AnnotationMissing(_)
                | Self::DuplicateRollParameter(_)
                | Self::MissingBaseArguments(_)
                | Self::InvalidSystem(_)
                | Self::UnknownSystem(_)
        )
    }

    /// Returns true for errors caused by malformed roll input.
    pub fn is_roll_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDice(_)
                | Self::InvalidDiceRange { .. }
                | Self::DicePoolSize { .. }
                | Self::MissingRollArgument { .. }
                | Self::InvalidRollArgument { .. }
                | Self::RollArgumentType { .. }
        )
    }
}

/// Convenience result type for engine operations.
pub type PnpResult<T> = Result<T, PnpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_lists_names() {
        let err = PnpError::MissingAttributes(vec!["MU".to_string(), "KL".to_string()]);
        assert_eq!(err.to_string(), "missing attributes: MU, KL");
    }

    #[test]
    fn startup_errors_are_classified() {
        assert!(PnpError::AnnotationMissing("x".to_string()).is_startup_error());
        assert!(PnpError::UnknownSystem("gurps".to_string()).is_startup_error());
        assert!(!PnpError::AnonymousAttribute.is_startup_error());
    }

    #[test]
    fn roll_errors_are_classified() {
        assert!(PnpError::InvalidDice("ad6".to_string()).is_roll_error());
        assert!(
            PnpError::InvalidDiceRange {
                number: 0,
                sides: 6
            }
            .is_roll_error()
        );
        assert!(!PnpError::InvalidAmount(-1).is_roll_error());
    }
}
