//! Testing utilities and harness for Tracepose.

pub mod robot;

pub use robot::{RenderLog, SharedRecorder, SharedRenderLog, TraceRobot};

pub mod prelude {
    pub use crate::robot::{RenderLog, SharedRecorder, SharedRenderLog, TraceRobot};
}
