//! Roll signatures and argument binding.
//!
//! Every rule system declares the parameter list of its roll handler as a
//! [`RollSignature`]. The fixed prefix (`requester`, `character`) is
//! supplied by the engine; every parameter after it is filled from the
//! raw tokens of a roll command. The [`RollArgumentBinder`] checks the
//! declaration once when a rule system is loaded and then converts tokens
//! into typed [`RollArgs`] on every roll.

use tracing::debug;

use crate::dice::Dice;
use crate::error::{PnpError, PnpResult};

/// Parameters every roll handler receives before its own arguments.
pub const BASE_PARAMETERS: [&str; 2] = ["requester", "character"];

/// The type a roll argument is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A dice expression such as `3d20`.
    Dice,
    /// A signed integer.
    Int,
    /// A floating point number.
    Float,
    /// The raw token.
    Str,
}

impl ArgKind {
    /// Convert a raw token into a value of this kind.
    pub fn parse(self, param: &str, token: &str) -> PnpResult<RollArg> {
        let invalid = || PnpError::InvalidRollArgument {
            param: param.to_string(),
            value: token.to_string(),
        };
        match self {
            Self::Dice => Ok(RollArg::Dice(token.parse()?)),
            Self::Int => token.trim().parse().map(RollArg::Int).map_err(|_| invalid()),
            Self::Float => token
                .trim()
                .parse()
                .map(RollArg::Float)
                .map_err(|_| invalid()),
            Self::Str => Ok(RollArg::Str(token.to_string())),
        }
    }
}

impl std::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dice => write!(f, "dice"),
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "number"),
            Self::Str => write!(f, "text"),
        }
    }
}

/// A converted roll argument.
#[derive(Debug, Clone, PartialEq)]
pub enum RollArg {
    /// A dice expression.
    Dice(Dice),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Free text.
    Str(String),
}

impl RollArg {
    /// The kind this value was converted to.
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Dice(_) => ArgKind::Dice,
            Self::Int(_) => ArgKind::Int,
            Self::Float(_) => ArgKind::Float,
            Self::Str(_) => ArgKind::Str,
        }
    }
}

/// One declared parameter of a roll handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Declared kind; `None` means the declaration is incomplete.
    pub kind: Option<ArgKind>,
}

/// The declared parameter list of a roll handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollSignature {
    params: Vec<ParamDecl>,
}

impl RollSignature {
    /// An empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signature that already declares the fixed prefix.
    pub fn standard() -> Self {
        Self::new().requester().character()
    }

    /// Declare the `requester` prefix parameter.
    pub fn requester(self) -> Self {
        self.declare(BASE_PARAMETERS[0], None)
    }

    /// Declare the `character` prefix parameter.
    pub fn character(self) -> Self {
        self.declare(BASE_PARAMETERS[1], None)
    }

    /// Declare a typed roll parameter.
    pub fn typed(self, name: &str, kind: ArgKind) -> Self {
        self.declare(name, Some(kind))
    }

    /// Declare a parameter without a kind. Loading such a signature fails.
    pub fn untyped(self, name: &str) -> Self {
        self.declare(name, None)
    }

    /// The declared parameters in order.
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    fn declare(mut self, name: &str, kind: Option<ArgKind>) -> Self {
        self.params.push(ParamDecl {
            name: name.to_string(),
            kind,
        });
        self
    }
}

/// Roll arguments after conversion, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollArgs {
    values: Vec<(String, RollArg)>,
}

impl RollArgs {
    /// Look up an argument by parameter name.
    pub fn get(&self, param: &str) -> Option<&RollArg> {
        self.values
            .iter()
            .find(|(name, _)| name == param)
            .map(|(_, value)| value)
    }

    /// The converted values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &RollArg> {
        self.values.iter().map(|(_, value)| value)
    }

    /// Number of bound arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no arguments were bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read a dice argument.
    pub fn dice(&self, param: &str) -> PnpResult<Dice> {
        match self.get(param) {
            Some(RollArg::Dice(dice)) => Ok(*dice),
            _ => Err(mistyped(param, ArgKind::Dice)),
        }
    }

    /// Read an integer argument.
    pub fn int(&self, param: &str) -> PnpResult<i64> {
        match self.get(param) {
            Some(RollArg::Int(value)) => Ok(*value),
            _ => Err(mistyped(param, ArgKind::Int)),
        }
    }

    /// Read a floating point argument.
    pub fn float(&self, param: &str) -> PnpResult<f64> {
        match self.get(param) {
            Some(RollArg::Float(value)) => Ok(*value),
            _ => Err(mistyped(param, ArgKind::Float)),
        }
    }

    /// Read a text argument.
    pub fn text(&self, param: &str) -> PnpResult<&str> {
        match self.get(param) {
            Some(RollArg::Str(value)) => Ok(value),
            _ => Err(mistyped(param, ArgKind::Str)),
        }
    }
}

fn mistyped(param: &str, expected: ArgKind) -> PnpError {
    PnpError::RollArgumentType {
        param: param.to_string(),
        expected: expected.to_string(),
    }
}

/// Converts raw roll tokens according to a validated signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollArgumentBinder {
    params: Vec<(String, ArgKind)>,
}

impl RollArgumentBinder {
    /// Derive the argument list from a signature.
    ///
    /// Fails with [`PnpError::AnnotationMissing`] for a parameter after the
    /// prefix that has no kind, and with [`PnpError::MissingBaseArguments`]
    /// if the signature does not declare the whole prefix. A name declared
    /// twice fails with [`PnpError::DuplicateRollParameter`].
    pub fn new(signature: &RollSignature) -> PnpResult<Self> {
        let mut missing: Vec<&str> = BASE_PARAMETERS.to_vec();
        let mut seen: Vec<&str> = Vec::new();
        let mut params = Vec::new();

        for decl in signature.params() {
            if seen.contains(&decl.name.as_str()) {
                return Err(PnpError::DuplicateRollParameter(decl.name.clone()));
            }
            seen.push(&decl.name);
            if let Some(index) = missing.iter().position(|base| *base == decl.name) {
                missing.remove(index);
                continue;
            }
            let kind = decl
                .kind
                .ok_or_else(|| PnpError::AnnotationMissing(decl.name.clone()))?;
            params.push((decl.name.clone(), kind));
        }

        if !missing.is_empty() {
            return Err(PnpError::MissingBaseArguments(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        Ok(Self { params })
    }

    /// Kinds of the roll arguments in order.
    pub fn kinds(&self) -> Vec<ArgKind> {
        self.params.iter().map(|(_, kind)| *kind).collect()
    }

    /// Names of the roll arguments in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| name.as_str())
    }

    /// Number of tokens a roll needs.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Convert raw tokens left to right. Surplus tokens are ignored.
    pub fn parse_roll_args(&self, tokens: &[&str]) -> PnpResult<RollArgs> {
        if tokens.len() > self.params.len() {
            debug!(
                extra = tokens.len() - self.params.len(),
                "ignoring surplus roll arguments"
            );
        }

        let mut values = Vec::with_capacity(self.params.len());
        for (position, (param, kind)) in self.params.iter().enumerate() {
            let token = tokens
                .get(position)
                .ok_or_else(|| PnpError::MissingRollArgument {
                    param: param.clone(),
                    position,
                })?;
            debug!(%param, %kind, token, "converting roll argument");
            values.push((param.clone(), kind.parse(param, token)?));
        }

        Ok(RollArgs { values })
    }
}
