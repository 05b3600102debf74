//! Delayed-action triggers
//!
//! This module provides:
//! - **Config**: What a trigger checks and which actions it fires, with delays
//! - **Engine**: Activation gate, dispatch, and per-frame update of delayed actions
//! - **Scheduler**: Table of pending delayed actions owned by each trigger
//! - **Explanation**: Text rendering of a config, grouped by fire time
//!
//! # Flow
//!
//! ```text
//! activate(now) ──► gate (enabled, retrigger, preconditions)
//!                      │
//!                      ▼
//!               dispatch each action
//!              ├─ delay == 0 ──► execute now, in list order
//!              └─ delay > 0  ──► scheduler entry at now + delay
//!                                        │
//!                   update(now) ◄────────┘ (host frame loop)
//! ```

mod config;
mod engine;
mod error;
mod explain;
mod scheduler;


pub use config::{TimedAction, TriggerConfig};
pub use engine::{ActivationOutcome, DispatchReport, FireState, TriggerEngine};
pub use error::ConfigurationError;
pub use explain::{NULL_ACTION, build_explanation};
pub use scheduler::{ActionScheduler, PendingAction, TaskHandle};
