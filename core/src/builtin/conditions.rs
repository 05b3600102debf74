use std::sync::Arc;

use trigger_types::{CompareOp, ConditionDefinition, ConditionKind};

use crate::collaborators::Precondition;
use crate::context::HostContext;

/// Compares a host variable against a constant. Missing variables read as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableCompare {
    pub variable: String,
    pub op: CompareOp,
    pub value: f64,
}

impl Precondition for VariableCompare {
    fn evaluate(&self, ctx: &HostContext) -> bool {
        let current = ctx.variable(&self.variable).unwrap_or(0.0);
        self.op.evaluate(current, self.value)
    }

    fn describe(&self, _ctx: &HostContext) -> String {
        format!("{} {} {}", self.variable, self.op.symbol(), self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Always(pub bool);

impl Precondition for Always {
    fn evaluate(&self, _ctx: &HostContext) -> bool {
        self.0
    }

    fn describe(&self, _ctx: &HostContext) -> String {
        let text = if self.0 { "always" } else { "never" };
        text.to_string()
    }
}

pub fn build_condition(def: &ConditionDefinition) -> Arc<dyn Precondition> {
    match &def.kind {
        ConditionKind::VariableCompare {
            variable,
            op,
            value,
        } => Arc::new(VariableCompare {
            variable: variable.clone(),
            op: *op,
            value: *value,
        }),
        ConditionKind::Always { value } => Arc::new(Always(*value)),
    }
}
