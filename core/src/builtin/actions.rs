use std::sync::Arc;

use trigger_types::{ActionDefinition, ActionKind};

use crate::collaborators::Actionable;
use crate::context::HostContext;

/// Emits `message` at info level.
#[derive(Debug, Clone, PartialEq)]
pub struct LogAction {
    pub id: String,
    pub enabled: bool,
    pub message: String,
}

impl Actionable for LogAction {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn execute(&self, ctx: &HostContext) {
        tracing::info!(host = ctx.name(), action = %self.id, "{}", self.message);
        ctx.record(&self.id);
    }

    fn describe(&self, indent: &str, _ctx: &HostContext) -> String {
        format!("{indent}logs \"{}\"", self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetVariable {
    pub id: String,
    pub enabled: bool,
    pub variable: String,
    pub value: f64,
}

impl Actionable for SetVariable {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn execute(&self, ctx: &HostContext) {
        ctx.set_variable(&self.variable, self.value);
        tracing::debug!(
            host = ctx.name(),
            variable = %self.variable,
            value = self.value,
            "variable set"
        );
        ctx.record(&self.id);
    }

    fn describe(&self, indent: &str, _ctx: &HostContext) -> String {
        format!("{indent}sets variable {} to {}", self.variable, self.value)
    }
}

/// Adds `amount` (possibly negative) to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeVariable {
    pub id: String,
    pub enabled: bool,
    pub variable: String,
    pub amount: f64,
}

impl Actionable for ChangeVariable {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn execute(&self, ctx: &HostContext) {
        let value = ctx.change_variable(&self.variable, self.amount);
        tracing::debug!(host = ctx.name(), variable = %self.variable, value, "variable changed");
        ctx.record(&self.id);
    }

    fn describe(&self, indent: &str, _ctx: &HostContext) -> String {
        if self.amount < 0.0 {
            format!("{indent}subtracts {} from variable {}", -self.amount, self.variable)
        } else {
            format!("{indent}adds {} to variable {}", self.amount, self.variable)
        }
    }
}

pub fn build_action(def: &ActionDefinition) -> Arc<dyn Actionable> {
    let id = def.id.clone();
    let enabled = def.enabled;
    match &def.kind {
        ActionKind::Log { message } => Arc::new(LogAction {
            id,
            enabled,
            message: message.clone(),
        }),
        ActionKind::SetVariable { variable, value } => Arc::new(SetVariable {
            id,
            enabled,
            variable: variable.clone(),
            value: *value,
        }),
        ActionKind::ChangeVariable { variable, amount } => Arc::new(ChangeVariable {
            id,
            enabled,
            variable: variable.clone(),
            amount: *amount,
        }),
    }
}
