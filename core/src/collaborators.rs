//! Capability traits the trigger engine consumes
//!
//! The engine never knows what a precondition checks or what an action does.
//! It only evaluates, executes and asks for descriptions.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::context::HostContext;
use crate::trigger::ConfigurationError;

/// A boolean gate evaluated before a trigger fires.
///
/// Implementations are expected to be free of side effects.
pub trait Precondition: Send + Sync {
    fn evaluate(&self, ctx: &HostContext) -> bool;

    /// Short phrase used after "If " in explanations
    fn describe(&self, ctx: &HostContext) -> String;
}

/// A behavior a trigger executes, optionally after a delay.
pub trait Actionable: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn execute(&self, ctx: &HostContext);

    /// Description with every line prefixed by `indent`
    fn describe(&self, indent: &str, ctx: &HostContext) -> String;
}

/// Non-owning reference from a trigger to an action.
///
/// The action's owner controls its lifetime. An empty slot and an action
/// that has since been dropped both resolve to a `ConfigurationError`.
#[derive(Clone, Default)]
pub struct ActionRef(Option<Weak<dyn Actionable>>);

impl ActionRef {
    pub fn new<T: Actionable + 'static>(action: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(action);
        Self(Some(weak))
    }

    pub fn from_dyn(action: &Arc<dyn Actionable>) -> Self {
        Self(Some(Arc::downgrade(action)))
    }

    /// An empty slot
    pub fn null() -> Self {
        Self(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The action, if the slot is filled and the action is still alive
    pub fn upgrade(&self) -> Option<Arc<dyn Actionable>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    /// Like `upgrade`, but says why the action is unavailable.
    /// `index` is the slot's position in the trigger's action list.
    pub fn resolve(&self, index: usize) -> Result<Arc<dyn Actionable>, ConfigurationError> {
        match &self.0 {
            None => Err(ConfigurationError::MissingAction { index }),
            Some(weak) => weak
                .upgrade()
                .ok_or(ConfigurationError::DroppedAction { index }),
        }
    }
}

impl fmt::Debug for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("ActionRef(null)"),
            Some(weak) if weak.strong_count() == 0 => f.write_str("ActionRef(dropped)"),
            Some(_) => f.write_str("ActionRef(live)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Chime;

    impl Actionable for Chime {
        fn is_enabled(&self) -> bool {
            true
        }

        fn execute(&self, ctx: &HostContext) {
            ctx.record("chime");
        }

        fn describe(&self, indent: &str, _ctx: &HostContext) -> String {
            format!("{indent}chimes")
        }
    }

    #[test]
    fn concrete_action_resolves_while_alive() {
        let chime = Arc::new(Chime);
        let slot = ActionRef::new(&chime);
        let ctx = HostContext::default();

        let action = slot.resolve(0).unwrap();
        action.execute(&ctx);
        assert_eq!(ctx.journal(), ["chime"]);
        assert_eq!(format!("{slot:?}"), "ActionRef(live)");

        drop(action);
        drop(chime);
        assert_eq!(slot.resolve(2).err(), Some(ConfigurationError::DroppedAction { index: 2 }));
        assert!(slot.upgrade().is_none());
    }

    #[test]
    fn null_slot_reports_missing_action() {
        let slot = ActionRef::null();
        assert!(slot.is_null());
        assert_eq!(slot.resolve(1).err(), Some(ConfigurationError::MissingAction { index: 1 }));
    }
}
