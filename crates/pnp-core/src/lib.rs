//! Game-master engine for pen-and-paper roleplaying over chat.
//!
//! Tracks per-player character sheets (named attributes with optional
//! bounds), rolls dice and resolves them under a pluggable rule system.
//! Ships with two systems: DSA talent checks and HexDec threshold pools.
//! A [`GameMaster`] session ties everything to a persistent
//! [`CharacterStore`] and is driven one [`Command`] at a time.

pub mod config;
pub mod dice;
pub mod error;
pub mod resolution;
pub mod rules;
pub mod session;
pub mod sheet;
pub mod store;
pub mod validate;

pub use config::GmConfig;
pub use dice::{Dice, RollResult};
pub use error::{PnpError, PnpResult};
pub use resolution::{DieResult, Outcome, RollOutcome, TalentCheck, ThresholdPool};
pub use rules::{
    ArgKind, AttributeTemplate, LoadedSystem, RollArgs, RollArgumentBinder, RollSignature,
    RuleSystem,
};
pub use session::{Command, GameMaster, Reply};
pub use sheet::{Attribute, Character, Update};
pub use store::{CharacterStore, JsonFileStore, MemoryStore, Persistence, Registry, UserId};
pub use validate::{ValidationIssue, validate_system};
