//! Tracepose core: path interpolation and ordered-target sequencing.
//!
//! Two independent components composed behind one serial event stream:
//!
//! - [`PathTracer`] turns sparse raw pointer samples into a dense,
//!   evenly-spaced trail per pointer, resetting on release.
//! - [`TargetSequencer`] gates an ordered list of target zones on the raw
//!   pointer position, counts completed cycles at gesture boundaries, and
//!   raises [`SessionComplete`] after the configured trial count.
//!
//! [`TraceSession`] wires both to a host through the [`RenderSink`] and
//! [`SampleSink`] boundaries. No operation here panics or aborts a session;
//! malformed events degrade to logged no-ops.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod path_tracer;
pub mod recorder;
pub mod sequencer;
pub mod session;

pub use config::{SessionConfig, TargetSpec, TARGET_BASE_COLORS, VISITED_COLOR};
pub use error::TraceError;
pub use geometry::{Color, Point};
pub use path_tracer::{interpolate, PathExtension, PathTracer, StrokeSegment, TracedPath};
pub use recorder::{RecordedSample, TraceRecorder};
pub use sequencer::{GestureEnd, SessionComplete, Target, TargetSequencer};
pub use session::{NullRender, NullSamples, RenderSink, SampleSink, TraceSession};

pub mod prelude {
    pub use crate::config::{SessionConfig, TargetSpec};
    pub use crate::geometry::{Color, Point};
    pub use crate::recorder::TraceRecorder;
    pub use crate::sequencer::SessionComplete;
    pub use crate::session::{NullRender, NullSamples, RenderSink, SampleSink, TraceSession};
}
