pub mod builtin;
pub mod collaborators;
pub mod context;
pub mod definitions;
pub mod trigger;

// Re-exports for convenience
pub use collaborators::{ActionRef, Actionable, Precondition};
pub use context::{AppConfig, AppConfigExt, ConfigError, HostContext};
pub use definitions::{
    DefinitionError, DefinitionFile, TriggerSet, load_definitions_from_dir,
    load_definitions_from_file,
};
pub use trigger::{
    ActivationOutcome, ConfigurationError, DispatchReport, FireState, TaskHandle, TimedAction,
    TriggerConfig, TriggerEngine, build_explanation,
};
