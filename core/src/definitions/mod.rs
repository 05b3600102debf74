//! Trigger definitions
//!
//! Loads trigger, action and condition definitions from TOML and turns them
//! into a `TriggerSet` of ready-to-activate engines.

mod error;
mod loader;
mod set;

#[cfg(test)]
mod set_tests;

pub use error::DefinitionError;
pub use loader::{load_definitions_from_dir, load_definitions_from_file};
pub use set::TriggerSet;
pub use trigger_types::DefinitionFile;
