//! Built-in preconditions and actions
//!
//! Concrete collaborators that definition files can refer to. The engine
//! itself only sees them through `Precondition` and `Actionable`.

mod actions;
mod conditions;

pub use actions::{ChangeVariable, LogAction, SetVariable, build_action};
pub use conditions::{Always, VariableCompare, build_condition};
