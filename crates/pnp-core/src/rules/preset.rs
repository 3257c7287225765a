//! Built-in rule systems, resolvable by name.

use crate::error::{PnpError, PnpResult};
use crate::rules::dsa::Dsa;
use crate::rules::hexdec::HexDec;
use crate::rules::{LoadedSystem, RuleSystem};

const AVAILABLE: [&str; 2] = ["dsa", "hexdec"];

/// Names accepted by [`by_name`].
pub fn available() -> &'static [&'static str] {
    &AVAILABLE
}

/// Resolve a built-in rule system by name (case-insensitive).
pub fn by_name(name: &str) -> PnpResult<Box<dyn RuleSystem>> {
    match name.trim().to_lowercase().as_str() {
        "dsa" => Ok(Box::new(Dsa::new())),
        "hexdec" => Ok(Box::new(HexDec::new())),
        _ => Err(PnpError::UnknownSystem(name.to_string())),
    }
}

/// Resolve and validate a built-in rule system.
pub fn load(name: &str) -> PnpResult<LoadedSystem> {
    LoadedSystem::new(by_name(name)?)
}
