//! Pointer input model for the Tracepose task engine.
//!
//! The host UI layer produces [`PointerSample`]s in the surface's local
//! coordinate space and either feeds them to the session directly or queues
//! them through a [`PointerDispatcher`] for serial delivery.

pub mod dispatcher;
pub mod types;

pub use dispatcher::PointerDispatcher;
pub use types::{PointerEvent, PointerId, PointerPhase, PointerSample};

pub mod prelude {
    pub use crate::dispatcher::PointerDispatcher;
    pub use crate::types::{PointerEvent, PointerId, PointerPhase, PointerSample};
}
