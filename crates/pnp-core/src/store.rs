//! Character registry keyed by player, with pluggable persistence.
//!
//! The [`CharacterStore`] owns every character and writes a full snapshot
//! through its [`Persistence`] port after each successful mutation. A
//! failed mutation never reaches the port, and a failed save is rolled
//! back so memory and storage stay in step.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PnpError, PnpResult};
use crate::sheet::Character;

/// Opaque player identity supplied by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identity.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every stored character, keyed by owning player.
pub type Registry = BTreeMap<UserId, Character>;

/// Load/save port for the registry snapshot.
pub trait Persistence {
    /// Load the last saved snapshot.
    fn load(&self) -> PnpResult<Registry>;

    /// Replace the stored snapshot.
    fn save(&mut self, registry: &Registry) -> PnpResult<()>;
}

/// Stores the registry as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`. Nothing is read until [`Persistence::load`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> PnpResult<Registry> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store file, starting empty");
            return Ok(Registry::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&mut self, registry: &Registry) -> PnpResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(registry)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), characters = registry.len(), "store saved");
        Ok(())
    }
}

/// Keeps the snapshot in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Registry,
    saves: usize,
}

impl MemoryStore {
    /// An empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with `snapshot`.
    pub fn with_snapshot(snapshot: Registry) -> Self {
        Self { snapshot, saves: 0 }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> &Registry {
        &self.snapshot
    }

    /// How many times the snapshot was saved.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> PnpResult<Registry> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, registry: &Registry) -> PnpResult<()> {
        self.snapshot = registry.clone();
        self.saves += 1;
        Ok(())
    }
}

/// Process-scoped registry of characters.
#[derive(Debug)]
pub struct CharacterStore<P: Persistence> {
    characters: Registry,
    port: P,
}

impl<P: Persistence> CharacterStore<P> {
    /// Load the registry through `port`.
    pub fn open(port: P) -> PnpResult<Self> {
        let characters = port.load()?;
        info!(characters = characters.len(), "character store opened");
        Ok(Self { characters, port })
    }

    /// The persistence port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// The character owned by `player`.
    pub fn get(&self, player: &UserId) -> PnpResult<&Character> {
        self.characters
            .get(player)
            .ok_or_else(|| PnpError::CharacterNotFound(player.to_string()))
    }

    /// Whether `player` owns a character.
    pub fn contains(&self, player: &UserId) -> bool {
        self.characters.contains_key(player)
    }

    /// All characters, ordered by player.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &Character)> {
        self.characters.iter()
    }

    /// Number of stored characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if no player owns a character.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Register a new character for `player` and save.
    pub fn insert(&mut self, player: UserId, character: Character) -> PnpResult<&Character> {
        if let Some(existing) = self.characters.get(&player) {
            return Err(PnpError::CharacterExists {
                player: player.to_string(),
                character: existing.name().to_string(),
            });
        }
        self.characters.insert(player.clone(), character);
        if let Err(e) = self.persist() {
            self.characters.remove(&player);
            return Err(e);
        }
        let character = self.get(&player)?;
        info!(%player, character = character.name(), "character created");
        Ok(character)
    }

    /// Remove `player`'s character and save. Returns the removed character.
    pub fn remove(&mut self, player: &UserId) -> PnpResult<Character> {
        let character = self
            .characters
            .remove(player)
            .ok_or_else(|| PnpError::CharacterNotFound(player.to_string()))?;
        if let Err(e) = self.persist() {
            self.characters.insert(player.clone(), character);
            return Err(e);
        }
        info!(%player, character = character.name(), "character deleted");
        Ok(character)
    }

    /// Run a fallible mutation on `player`'s character.
    ///
    /// The mutation works on a copy that replaces the stored character
    /// only if both the mutation and the save succeed, so an error leaves
    /// the registry untouched.
    pub fn modify<T>(
        &mut self,
        player: &UserId,
        f: impl FnOnce(&mut Character) -> PnpResult<T>,
    ) -> PnpResult<T> {
        let mut draft = self.get(player)?.clone();
        let result = f(&mut draft)?;
        let previous = self.characters.insert(player.clone(), draft);
        if let Err(e) = self.persist() {
            if let Some(previous) = previous {
                self.characters.insert(player.clone(), previous);
            }
            return Err(e);
        }
        Ok(result)
    }

    fn persist(&mut self) -> PnpResult<()> {
        self.port.save(&self.characters)
    }
}
