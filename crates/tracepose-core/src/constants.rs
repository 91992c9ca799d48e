//! Shared task constants for pointer tracing and target gating.
//!
//! All distances are in the surface's logical pixels. The tracing task is
//! tuned for finger input on a tablet-class display; hosts with very
//! different densities should scale these through [`crate::SessionConfig`]
//! rather than editing them here.

/// Interpolation step in logical pixels.
///
/// Consecutive drawn points are spaced this far apart, and raw samples that
/// move less than this distance from the path's last drawn point are
/// suppressed entirely so finger jitter does not clutter the path.
pub const DEFAULT_INTERPOLATION_STEP: f32 = 5.0;

/// Pressure-ratio band treated as "steady pressure".
///
/// When `sample_pressure / segment_pressure` leaves this band, the path
/// starts a new stroke segment so the renderer can pick a new stroke width.
pub const PRESSURE_STEADY_MIN: f32 = 0.95;
pub const PRESSURE_STEADY_MAX: f32 = 1.05;

/// Fraction of a target's diameter used as the gate half-width.
///
/// A visit registers when the pointer is within a square of this half-width
/// around the target center, on both axes independently.
pub const GATE_DIAMETER_FRACTION: f32 = 0.3;

/// Full ordered cycles required before the session completes.
pub const DEFAULT_REQUIRED_CYCLES: u32 = 3;

/// Radius of the built-in four-target layout.
pub const DEFAULT_TARGET_RADIUS: f32 = 40.0;
