//! Per-pointer path tracing.
//!
//! Raw pointer samples arrive sparsely; [`interpolate`] densifies each hop
//! into evenly spaced points so the rendered trail looks continuous. The
//! [`PathTracer`] keys one [`TracedPath`] per live pointer, so interleaved
//! events from simultaneous pointers never touch each other's state.

use std::collections::HashMap;

use smallvec::SmallVec;
use tracepose_input::{PointerId, PointerSample};

use crate::constants::{PRESSURE_STEADY_MAX, PRESSURE_STEADY_MIN};
use crate::error::TraceError;
use crate::geometry::Point;

/// Evenly spaced points between `from` (exclusive) and `to` (exclusive).
///
/// Hops shorter than `step` yield nothing: sub-threshold jitter is
/// suppressed rather than drawn. For longer hops, `floor(dist / step) - 1`
/// points are emitted; the slot at the destination itself is intentionally
/// left empty, leaving a small gap before the next raw sample. The gap only
/// affects visual density, never gating.
pub fn interpolate(from: Point, to: Point, step: f32) -> SmallVec<[Point; 8]> {
    debug_assert!(step > 0.0, "interpolation step must be positive");
    let mut out = SmallVec::new();
    let dist = from.distance_to(to);
    if dist < step {
        return out;
    }
    let m = dist / step;
    for i in 1..m as usize {
        out.push(from.lerp(to, i as f32 / m));
    }
    out
}

/// Hue seed in `0.0..1.0` for a pointer's trail color.
///
/// Fibonacci hashing keeps consecutive ids well spread around the hue
/// wheel, and determinism keeps replayed sessions looking identical.
pub fn color_seed(id: PointerId) -> f32 {
    let hashed = id.0.wrapping_mul(2_654_435_769);
    (hashed >> 8) as f32 / (1u32 << 24) as f32
}

/// One stroke-width group within a path.
///
/// Opened when the sample pressure drifts out of the steady band; a pure
/// rendering hint, the logical path continues uninterrupted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSegment {
    /// Index into the path's point sequence where this group starts.
    pub start: usize,
    /// Pressure recorded when the group opened, if the device reports any.
    pub pressure: Option<f32>,
}

/// The drawn trail of one pointer, from press to release.
///
/// Points are monotonically appended, never reordered or removed.
#[derive(Clone, Debug)]
pub struct TracedPath {
    pointer: PointerId,
    points: Vec<Point>,
    segments: Vec<StrokeSegment>,
    color_seed: f32,
}

impl TracedPath {
    fn new(pointer: PointerId, origin: Point, pressure: Option<f32>) -> Self {
        Self {
            pointer,
            points: vec![origin],
            segments: vec![StrokeSegment { start: 0, pressure }],
            color_seed: color_seed(pointer),
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    pub fn color_seed(&self) -> f32 {
        self.color_seed
    }

    /// The anchor for the next interpolation hop: the last point actually
    /// appended, not the last raw sample seen. Suppressed samples leave the
    /// anchor in place.
    pub fn last_point(&self) -> Point {
        self.points.last().copied().unwrap_or(Point::ZERO)
    }

    fn current_pressure(&self) -> Option<f32> {
        self.segments.last().and_then(|segment| segment.pressure)
    }
}

/// Points appended by one `extend` call, for the render layer.
#[derive(Clone, Debug, Default)]
pub struct PathExtension {
    pub appended: SmallVec<[Point; 8]>,
    /// True when this call opened a new stroke-width group.
    pub new_segment: bool,
}

/// Registry of live paths, keyed by pointer id.
pub struct PathTracer {
    step: f32,
    paths: HashMap<PointerId, TracedPath>,
}

impl PathTracer {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            paths: HashMap::new(),
        }
    }

    /// Starts a path at the sample position.
    ///
    /// A second `open` for a live pointer is a host error: the original
    /// path is kept and [`TraceError::DuplicatePointer`] reported.
    pub fn open(&mut self, sample: &PointerSample) -> Result<&TracedPath, TraceError> {
        if self.paths.contains_key(&sample.id) {
            return Err(TraceError::DuplicatePointer { id: sample.id });
        }
        let origin = Point::new(sample.x, sample.y);
        let path = TracedPath::new(sample.id, origin, sample.pressure);
        Ok(self.paths.entry(sample.id).or_insert(path))
    }

    /// Densifies the hop from the path's anchor to the sample position and
    /// appends the result.
    ///
    /// A pressure drift outside the steady band opens a new stroke segment
    /// first, re-recording the reference pressure; this happens even when
    /// the hop itself is suppressed.
    pub fn extend(&mut self, sample: &PointerSample) -> Result<PathExtension, TraceError> {
        let path = self
            .paths
            .get_mut(&sample.id)
            .ok_or(TraceError::UnknownPointer { id: sample.id })?;

        let mut extension = PathExtension::default();

        if let (Some(pressure), Some(recorded)) = (sample.pressure, path.current_pressure()) {
            let ratio = pressure / recorded;
            let steady = ratio > PRESSURE_STEADY_MIN && ratio < PRESSURE_STEADY_MAX;
            if !steady {
                path.segments.push(StrokeSegment {
                    start: path.points.len(),
                    pressure: Some(pressure),
                });
                extension.new_segment = true;
            }
        }

        let target = Point::new(sample.x, sample.y);
        extension.appended = interpolate(path.last_point(), target, self.step);
        path.points.extend_from_slice(&extension.appended);

        Ok(extension)
    }

    /// Finalizes and removes the pointer's path, handing it back for
    /// renderer teardown. No further mutation is possible.
    pub fn close(&mut self, id: PointerId) -> Result<TracedPath, TraceError> {
        self.paths
            .remove(&id)
            .ok_or(TraceError::UnknownPointer { id })
    }

    pub fn is_active(&self, id: PointerId) -> bool {
        self.paths.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, id: PointerId) -> Option<&TracedPath> {
        self.paths.get(&id)
    }
}
