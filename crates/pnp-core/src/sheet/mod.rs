//! Character sheets: a name plus an ordered set of attributes.
//!
//! Attributes are keyed by their lowercase name so lookups are
//! case-insensitive, while iteration and display keep the order in which
//! the attributes were declared.

pub mod attribute;

pub use attribute::{Attribute, Update};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PnpError, PnpResult};

/// A player character tracked by the game master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CharacterRecord")]
pub struct Character {
    name: String,
    attributes: IndexMap<String, Attribute>,
}

/// Stored shape of a [`Character`], re-validated on load.
#[derive(Deserialize)]
struct CharacterRecord {
    name: String,
    attributes: IndexMap<String, Attribute>,
}

impl TryFrom<CharacterRecord> for Character {
    type Error = PnpError;

    fn try_from(record: CharacterRecord) -> PnpResult<Self> {
        Character::new(record.name, record.attributes.into_values())
    }
}

impl Character {
    /// Create a character from a name and its attributes.
    ///
    /// The name must not be empty, every attribute must be named, and no
    /// two attributes may share a name ignoring case.
    pub fn new(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> PnpResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PnpError::EmptyCharacterName);
        }

        let mut map = IndexMap::new();
        for attribute in attributes {
            if attribute.is_anonymous() {
                return Err(PnpError::AnonymousAttribute);
            }
            let key = attribute.name().to_lowercase();
            if map.contains_key(&key) {
                return Err(PnpError::DuplicateAttribute(attribute.name().to_string()));
            }
            map.insert(key, attribute);
        }

        Ok(Self {
            name,
            attributes: map,
        })
    }

    /// Character name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the character has the attribute (case-insensitive).
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    /// Look up an attribute by name (case-insensitive).
    pub fn attribute(&self, name: &str) -> PnpResult<&Attribute> {
        self.attributes
            .get(&name.to_lowercase())
            .ok_or_else(|| self.not_found(name))
    }

    /// Look up an attribute for mutation (case-insensitive).
    pub fn attribute_mut(&mut self, name: &str) -> PnpResult<&mut Attribute> {
        let character = &self.name;
        self.attributes
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| PnpError::AttributeNotFound {
                character: character.clone(),
                name: name.to_string(),
            })
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if the character has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn not_found(&self, name: &str) -> PnpError {
        PnpError::AttributeNotFound {
            character: self.name.clone(),
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attributes: Vec<String> = self
            .attributes()
            .map(|a| format!("{}: {a}", a.name()))
            .collect();
        write!(f, "{} ({})", self.name, attributes.join(", "))
    }
}
