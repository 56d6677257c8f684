//! Error taxonomy for the tiling core.
//!
//! Every fallible entry point on [`crate::context::CoreContext`] returns
//! `Result<T, CoreError>`. Recoverable variants are absorbed by the command
//! dispatcher (logged at `warn!` and dropped); [`CoreError::Invariant`] is
//! never constructed by normal control flow and backs the assertions that
//! guard the tree invariants.

use crate::registry::Wid;
use crate::workspace::LayoutMode;
use thiserror::Error;

/// Errors raised by core operations.
///
/// See the error handling design for the absorption policy: everything
/// except [`CoreError::Invariant`] is silently dropped by the caller after a
/// `warn!` log; there are no retries, since commands are user-driven and
/// will simply be re-issued.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A command referenced a `Wid` absent from the registry.
    #[error("window {0:?} not found")]
    NotFound(Wid),

    /// A command meaningful only in one layout mode was issued in another.
    #[error("command requires {expected:?} mode, workspace is in {actual:?}")]
    WrongMode {
        expected: LayoutMode,
        actual: LayoutMode,
    },

    /// The platform reported a space transition in progress; entry point
    /// short-circuited to a no-op.
    #[error("space transition in progress")]
    Transitioning,

    /// The platform refused to focus the target window.
    #[error("window {0:?} could not be focused")]
    Unfocusable(Wid),

    /// A `[MODULE]` tree invariant was violated. This should never occur;
    /// it indicates a bug in the core itself, not caller misuse.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl CoreError {
    /// True for errors that are silently absorbed rather than surfaced.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CoreError::Invariant(_))
    }
}
