//! Raw pointer event types.

use std::fmt;

/// Identifies one continuous contact gesture, stable from press to release.
///
/// Ids may be reused by the platform after the gesture ends; the engine only
/// relies on uniqueness among *live* pointers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The primary pointer (mouse button 1, first touch).
    pub const PRIMARY: PointerId = PointerId(0);
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which edge of the contact lifecycle a sample belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One raw sample as delivered by the host, in surface-local coordinates.
///
/// Pressure is only present on platforms/devices that report it; samples
/// without pressure never trigger stroke regrouping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
    pub pressure: Option<f32>,
    /// Milliseconds on the host's monotonic clock.
    pub time_ms: u64,
}

impl PointerSample {
    pub fn new(id: PointerId, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            id,
            x,
            y,
            pressure: None,
            time_ms,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

/// A sample tagged with its lifecycle phase, as queued for dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub sample: PointerSample,
}

impl PointerEvent {
    pub fn down(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Down,
            sample,
        }
    }

    pub fn moved(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Move,
            sample,
        }
    }

    pub fn up(sample: PointerSample) -> Self {
        Self {
            phase: PointerPhase::Up,
            sample,
        }
    }
}
