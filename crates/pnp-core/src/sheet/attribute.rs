//! Character attributes (MU, LeP, Vita, etc.).
//!
//! An attribute is a named integer that is optionally bounded by a
//! minimum and maximum. Bounded ("limited") attributes keep their value
//! inside the bounds across every mutation. Spendable attributes can be
//! spent and gained like a resource pool.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PnpError, PnpResult};

/// A named numeric value with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    value: i64,
    minimum: i64,
    maximum: i64,
    limited: bool,
    spendable: bool,
}

/// A new value for [`Attribute::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Replace only the value.
    Value(i64),
    /// Take the value, and the bounds if the source is limited, from another attribute.
    From(Attribute),
}

impl From<i64> for Update {
    fn from(value: i64) -> Self {
        Self::Value(value)
    }
}

impl From<Attribute> for Update {
    fn from(attribute: Attribute) -> Self {
        Self::From(attribute)
    }
}

impl Attribute {
    /// Create an unbounded, non-spendable attribute.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            minimum: 0,
            maximum: 0,
            limited: false,
            spendable: false,
        }
    }

    /// Create a bounded attribute.
    ///
    /// Fails if `minimum > maximum`, or with [`PnpError::Overflow`] /
    /// [`PnpError::Underflow`] if `value` lies outside the bounds.
    pub fn limited(
        name: impl Into<String>,
        minimum: i64,
        value: i64,
        maximum: i64,
    ) -> PnpResult<Self> {
        let name = name.into();
        if minimum > maximum {
            return Err(PnpError::AttributeParse { name });
        }
        let attribute = Self {
            name,
            value: minimum,
            minimum,
            maximum,
            limited: true,
            spendable: false,
        };
        attribute.check_bounds(value)?;
        Ok(Self { value, ..attribute })
    }

    /// Set whether spend and gain are allowed.
    pub fn spendable(mut self, spendable: bool) -> Self {
        self.spendable = spendable;
        self
    }

    /// Replace the attribute's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name, possibly empty for anonymous tokens.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Lower bound (only enforced when limited).
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Upper bound (only enforced when limited).
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Returns true if the bounds are enforced.
    pub fn is_limited(&self) -> bool {
        self.limited
    }

    /// Returns true if spend and gain are allowed.
    pub fn is_spendable(&self) -> bool {
        self.spendable
    }

    /// Returns true if the attribute was parsed without a name.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Spend `amount` points. Returns the new value.
    ///
    /// A limited attribute refuses to drop below its minimum and keeps
    /// its value in that case.
    pub fn spend(&mut self, amount: i64) -> PnpResult<i64> {
        if !self.spendable {
            return Err(PnpError::NotSpendable(self.name.clone()));
        }
        let attempted = self.value.saturating_sub(amount);
        if self.limited && attempted < self.minimum {
            return Err(PnpError::Underflow {
                current: self.value,
                attempted,
                minimum: self.minimum,
            });
        }
        self.value = attempted;
        Ok(self.value)
    }

    /// Gain `amount` points. Returns the new value.
    ///
    /// A limited attribute refuses to exceed its maximum and keeps its
    /// value in that case. Clamping instead is left to the caller.
    pub fn gain(&mut self, amount: i64) -> PnpResult<i64> {
        if !self.spendable {
            return Err(PnpError::NotSpendable(self.name.clone()));
        }
        let attempted = self.value.saturating_add(amount);
        if self.limited && attempted > self.maximum {
            return Err(PnpError::Overflow {
                current: self.value,
                attempted,
                maximum: self.maximum,
            });
        }
        self.value = attempted;
        Ok(self.value)
    }

    /// Overwrite the value, or merge another attribute into this one.
    ///
    /// A bare value must lie within the current bounds of a limited
    /// attribute. Merging a limited attribute adopts its bounds and makes
    /// this attribute limited. Name and spendability never change.
    pub fn update(&mut self, update: impl Into<Update>) -> PnpResult<()> {
        match update.into() {
            Update::From(source) if source.limited => {
                self.value = source.value;
                self.minimum = source.minimum;
                self.maximum = source.maximum;
                self.limited = true;
            }
            Update::From(source) => {
                self.check_bounds(source.value)?;
                self.value = source.value;
            }
            Update::Value(value) => {
                self.check_bounds(value)?;
                self.value = value;
            }
        }
        Ok(())
    }

    fn check_bounds(&self, attempted: i64) -> PnpResult<()> {
        if !self.limited {
            return Ok(());
        }
        if attempted > self.maximum {
            return Err(PnpError::Overflow {
                current: self.value,
                attempted,
                maximum: self.maximum,
            });
        }
        if attempted < self.minimum {
            return Err(PnpError::Underflow {
                current: self.value,
                attempted,
                minimum: self.minimum,
            });
        }
        Ok(())
    }
}

/// Parse `[name=]value`, `[name=]value/max` or `[name=]min/value/max`.
impl FromStr for Attribute {
    type Err = PnpError;

    fn from_str(text: &str) -> PnpResult<Self> {
        let (name, body) = match text.split_once('=') {
            Some((name, body)) => (name.trim(), body.trim()),
            None => ("", text.trim()),
        };
        let malformed = || PnpError::AttributeParse {
            name: name.to_string(),
        };

        let numbers = body
            .split('/')
            .map(|part| part.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;

        match numbers.as_slice() {
            [value] => Ok(Self::new(name, *value)),
            [value, maximum] => Self::limited(name, 0, *value, *maximum).map_err(|_| malformed()),
            [minimum, value, maximum] => {
                Self::limited(name, *minimum, *value, *maximum).map_err(|_| malformed())
            }
            _ => Err(malformed()),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.limited {
            write!(f, "{}/{}", self.value, self.maximum)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
