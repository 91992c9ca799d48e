//! Session configuration.
//!
//! Supplied once by the host's setup layer before the session starts and
//! immutable for its duration. [`SessionConfig::default`] reproduces the
//! reference tracing task: four translucent targets in reading order,
//! visited color opaque white, three required cycles.

use crate::constants::{
    DEFAULT_INTERPOLATION_STEP, DEFAULT_REQUIRED_CYCLES, DEFAULT_TARGET_RADIUS,
    GATE_DIAMETER_FRACTION,
};
use crate::geometry::{Color, Point};

/// Base colors of the built-in four-target layout, in visitation order.
pub const TARGET_BASE_COLORS: [Color; 4] = [
    Color::rgba(1.0, 0.0, 0.0, 0.5),
    Color::rgba(0.0, 1.0, 0.0, 0.5),
    Color::rgba(0.0, 0.0, 1.0, 0.5),
    Color::rgba(0.5, 0.5, 1.0, 0.5),
];

/// Displayed while a target is visited, until the cycle resets.
pub const VISITED_COLOR: Color = Color::WHITE;

/// Geometry and appearance of one target zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSpec {
    pub center: Point,
    pub radius: f32,
    /// Half-width of the square visit gate. Defaults to
    /// [`GATE_DIAMETER_FRACTION`] of the diameter when unset.
    pub gate_half_width: Option<f32>,
    pub base_color: Color,
}

impl TargetSpec {
    pub fn new(center: Point, radius: f32, base_color: Color) -> Self {
        Self {
            center,
            radius,
            gate_half_width: None,
            base_color,
        }
    }

    pub fn with_gate_half_width(mut self, half_width: f32) -> Self {
        self.gate_half_width = Some(half_width);
        self
    }

    /// The effective gate half-width, explicit or derived from the diameter.
    pub fn effective_gate(&self) -> f32 {
        self.gate_half_width
            .unwrap_or(self.radius * 2.0 * GATE_DIAMETER_FRACTION)
    }
}

/// Immutable per-session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Target zones in required visitation order.
    pub targets: Vec<TargetSpec>,
    /// Full ordered cycles needed before the session completes.
    pub required_cycles: u32,
    /// Spacing of interpolated path points; also the jitter floor.
    pub interpolation_step: f32,
    pub visited_color: Color,
}

impl SessionConfig {
    pub fn new(targets: Vec<TargetSpec>, required_cycles: u32) -> Self {
        Self {
            targets,
            required_cycles,
            interpolation_step: DEFAULT_INTERPOLATION_STEP,
            visited_color: VISITED_COLOR,
        }
    }

    pub fn with_interpolation_step(mut self, step: f32) -> Self {
        self.interpolation_step = step;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        // Reading-order ring on an 800x600 surface.
        let centers = [
            Point::new(100.0, 100.0),
            Point::new(700.0, 100.0),
            Point::new(700.0, 500.0),
            Point::new(100.0, 500.0),
        ];
        let targets = centers
            .iter()
            .zip(TARGET_BASE_COLORS.iter())
            .map(|(&center, &color)| TargetSpec::new(center, DEFAULT_TARGET_RADIUS, color))
            .collect();
        Self::new(targets, DEFAULT_REQUIRED_CYCLES)
    }
}
