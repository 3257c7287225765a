//! Configuration for a game-master session.

use std::path::PathBuf;

/// Configuration for a game-master session.
#[derive(Debug, Clone)]
pub struct GmConfig {
    /// Name of the rule system to load (see [`crate::rules::preset`]).
    pub system: String,
    /// Where the JSON character store lives.
    pub store_path: PathBuf,
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GmConfig {
    fn default() -> Self {
        Self {
            system: "dsa".to_string(),
            store_path: PathBuf::from("characters.json"),
            seed: None,
        }
    }
}

impl GmConfig {
    /// Set the rule system name.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Set the character store path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GmConfig::default();
        assert_eq!(cfg.system, "dsa");
        assert_eq!(cfg.store_path, PathBuf::from("characters.json"));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = GmConfig::default()
            .with_system("hexdec")
            .with_store_path("/tmp/party.json")
            .with_seed(123);
        assert_eq!(cfg.system, "hexdec");
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/party.json"));
        assert_eq!(cfg.seed, Some(123));
    }
}
