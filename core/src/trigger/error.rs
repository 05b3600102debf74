//! Error types for trigger dispatch

use thiserror::Error;

/// A configuration defect found while dispatching.
///
/// These are logged and skipped; activation never fails because of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("action slot {index} has no action assigned")]
    MissingAction { index: usize },

    #[error("action in slot {index} no longer exists")]
    DroppedAction { index: usize },

    #[error("delay of action slot {index} is too large to schedule")]
    DelayOutOfRange { index: usize },
}
