//! Error taxonomy for the tracing core.
//!
//! No operation here aborts a session: the session layer absorbs every
//! variant as a logged no-op and keeps consuming events.

use tracepose_input::PointerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    /// `open` called for a pointer that already has a live path. The
    /// original path is kept.
    DuplicatePointer { id: PointerId },
    /// `extend`/`close` called for a pointer that was never opened.
    UnknownPointer { id: PointerId },
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::DuplicatePointer { id } => {
                write!(f, "pointer {id} already has a live path")
            }
            TraceError::UnknownPointer { id } => {
                write!(f, "no live path for pointer {id}")
            }
        }
    }
}

impl std::error::Error for TraceError {}
