//! Static trigger configuration
//!
//! Built once by whoever sets the trigger up, then handed to
//! `TriggerEngine::new`. The engine only ever reads it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::collaborators::{ActionRef, Precondition};

/// An action paired with its offset from the activation instant.
#[derive(Debug, Clone)]
pub struct TimedAction {
    pub delay: Duration,
    pub action: ActionRef,
}

impl TimedAction {
    pub fn new(delay: Duration, action: ActionRef) -> Self {
        Self { delay, action }
    }

    /// Run as part of the activation call
    pub fn immediate(action: ActionRef) -> Self {
        Self::new(Duration::ZERO, action)
    }

    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}

#[derive(Clone)]
pub struct TriggerConfig {
    /// Free text shown above the explanation (empty = none)
    pub description: String,

    /// What fires this trigger, e.g. "When the player enters the room"
    pub condition: String,

    pub enabled: bool,

    /// If false, only the first successful activation dispatches
    pub allow_retrigger: bool,

    /// If false, `preconditions` is never consulted
    pub has_preconditions: bool,

    pub preconditions: Vec<Arc<dyn Precondition>>,

    pub actions: Vec<TimedAction>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            condition: "When activated".to_string(),
            enabled: true,
            allow_retrigger: true,
            has_preconditions: false,
            preconditions: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl TriggerConfig {
    pub fn with_action(mut self, delay: Duration, action: ActionRef) -> Self {
        self.actions.push(TimedAction::new(delay, action));
        self
    }

    /// Adds a precondition and turns precondition checking on
    pub fn with_precondition(mut self, precondition: Arc<dyn Precondition>) -> Self {
        self.has_preconditions = true;
        self.preconditions.push(precondition);
        self
    }
}

impl fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("description", &self.description)
            .field("condition", &self.condition)
            .field("enabled", &self.enabled)
            .field("allow_retrigger", &self.allow_retrigger)
            .field("has_preconditions", &self.has_preconditions)
            .field("preconditions", &self.preconditions.len())
            .field("actions", &self.actions)
            .finish()
    }
}
