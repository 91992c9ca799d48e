//! Session composition root.
//!
//! Wires one [`PathTracer`] and one [`TargetSequencer`] behind a single
//! serial pointer event stream, forwards drawing work to a [`RenderSink`]
//! and accepted samples to a [`SampleSink`], and absorbs every anomaly as a
//! logged no-op so session continuity is never at risk.

use smallvec::SmallVec;
use tracepose_input::{PointerDispatcher, PointerEvent, PointerId, PointerPhase, PointerSample};

use crate::config::SessionConfig;
use crate::geometry::{Color, Point};
use crate::path_tracer::PathTracer;
use crate::sequencer::{GestureEnd, SessionComplete, TargetSequencer};

/// Drawing boundary. The host owns the actual canvas; the session only
/// reports what changed. Default implementations are no-ops so hosts
/// override just what they draw.
pub trait RenderSink {
    fn path_started(&mut self, _pointer: PointerId, _origin: Point, _color_seed: f32) {}

    /// Points appended to a live path, in append order. `new_segment` marks
    /// the start of a new stroke-width group.
    fn path_points_appended(&mut self, _pointer: PointerId, _points: &[Point], _new_segment: bool) {
    }

    fn path_closed(&mut self, _pointer: PointerId) {}

    fn target_color_changed(&mut self, _index: usize, _color: Color) {}
}

/// Telemetry boundary: one record per accepted down/move sample. Storage
/// format and destination are the recorder's concern.
pub trait SampleSink {
    fn record(&mut self, time_ms: u64, x: f32, y: f32);
}

/// Render sink for hosts that do not draw.
#[derive(Default)]
pub struct NullRender;

impl RenderSink for NullRender {}

/// Sample sink for hosts that do not record.
#[derive(Default)]
pub struct NullSamples;

impl SampleSink for NullSamples {
    fn record(&mut self, _time_ms: u64, _x: f32, _y: f32) {}
}

/// One interactive tracing session.
pub struct TraceSession<R: RenderSink, S: SampleSink> {
    tracer: PathTracer,
    sequencer: TargetSequencer,
    render: R,
    samples: S,
}

impl<R: RenderSink, S: SampleSink> TraceSession<R, S> {
    pub fn new(config: &SessionConfig, render: R, samples: S) -> Self {
        Self {
            tracer: PathTracer::new(config.interpolation_step),
            sequencer: TargetSequencer::new(config),
            render,
            samples,
        }
    }

    /// Opens a path for the pointer. A duplicate down for a live pointer is
    /// ignored and the original path kept.
    pub fn pointer_down(&mut self, sample: &PointerSample) {
        match self.tracer.open(sample) {
            Ok(path) => {
                let origin = Point::new(sample.x, sample.y);
                let seed = path.color_seed();
                self.render.path_started(sample.id, origin, seed);
                self.samples.record(sample.time_ms, sample.x, sample.y);
            }
            Err(err) => log::warn!("pointer down ignored: {err}"),
        }
    }

    /// Extends the pointer's path and feeds the raw position to the target
    /// gate. Moves for pointers never opened are ignored.
    pub fn pointer_move(&mut self, sample: &PointerSample) {
        let extension = match self.tracer.extend(sample) {
            Ok(extension) => extension,
            Err(err) => {
                log::warn!("pointer move ignored: {err}");
                return;
            }
        };

        if !extension.appended.is_empty() || extension.new_segment {
            self.render
                .path_points_appended(sample.id, &extension.appended, extension.new_segment);
        }

        // Gating sees the raw sample position, not the densified trail.
        let lit = self.sequencer.on_move(Point::new(sample.x, sample.y));
        let recolors: SmallVec<[(usize, Color); 4]> = lit
            .iter()
            .map(|&i| (i, self.sequencer.targets()[i].visited_color))
            .collect();
        for (index, color) in recolors {
            self.render.target_color_changed(index, color);
        }

        self.samples.record(sample.time_ms, sample.x, sample.y);
    }

    /// Closes the pointer's path, then runs the cycle and session checks.
    ///
    /// Returns the completion signal when this release finished the last
    /// required cycle.
    pub fn pointer_up(&mut self, sample: &PointerSample) -> Option<SessionComplete> {
        if let Err(err) = self.tracer.close(sample.id) {
            log::warn!("pointer up ignored: {err}");
            return None;
        }
        self.render.path_closed(sample.id);

        let outcome = self.sequencer.on_gesture_end();
        if outcome == GestureEnd::Pending {
            return None;
        }

        let restores: SmallVec<[(usize, Color); 4]> = self
            .sequencer
            .targets()
            .iter()
            .map(|t| (t.index, t.base_color))
            .collect();
        for (index, color) in restores {
            self.render.target_color_changed(index, color);
        }

        if outcome == GestureEnd::SessionComplete {
            let signal = SessionComplete {
                cycles: self.sequencer.required_cycles(),
            };
            log::info!("session complete after {} cycles", signal.cycles);
            return Some(signal);
        }
        None
    }

    /// Routes one queued event to the matching handler.
    pub fn handle(&mut self, event: &PointerEvent) -> Option<SessionComplete> {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(&event.sample);
                None
            }
            PointerPhase::Move => {
                self.pointer_move(&event.sample);
                None
            }
            PointerPhase::Up => self.pointer_up(&event.sample),
        }
    }

    /// Drains a dispatcher queue in order. Returns the completion signal if
    /// any drained event finished the session.
    pub fn drain(&mut self, dispatcher: &mut PointerDispatcher) -> Option<SessionComplete> {
        let mut completed = None;
        dispatcher.drain(|event| {
            if let Some(signal) = self.handle(&event) {
                completed = Some(signal);
            }
        });
        completed
    }

    pub fn tracer(&self) -> &PathTracer {
        &self.tracer
    }

    pub fn sequencer(&self) -> &TargetSequencer {
        &self.sequencer
    }

    /// Hands the sinks back, consuming the session. Used by hosts that
    /// flush recorded samples at teardown.
    pub fn into_sinks(self) -> (R, S) {
        (self.render, self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSpec;
    use tracepose_input::PointerId;

    #[derive(Default)]
    struct CountingRender {
        started: u32,
        appended_points: usize,
        closed: u32,
        recolors: Vec<(usize, Color)>,
    }

    impl RenderSink for CountingRender {
        fn path_started(&mut self, _pointer: PointerId, _origin: Point, _seed: f32) {
            self.started += 1;
        }

        fn path_points_appended(&mut self, _pointer: PointerId, points: &[Point], _new: bool) {
            self.appended_points += points.len();
        }

        fn path_closed(&mut self, _pointer: PointerId) {
            self.closed += 1;
        }

        fn target_color_changed(&mut self, index: usize, color: Color) {
            self.recolors.push((index, color));
        }
    }

    #[derive(Default)]
    struct CountingSamples {
        records: Vec<(u64, f32, f32)>,
    }

    impl SampleSink for CountingSamples {
        fn record(&mut self, time_ms: u64, x: f32, y: f32) {
            self.records.push((time_ms, x, y));
        }
    }

    fn two_target_config() -> SessionConfig {
        let targets = vec![
            TargetSpec::new(Point::new(0.0, 0.0), 5.0, Color::rgba(1.0, 0.0, 0.0, 0.5))
                .with_gate_half_width(2.0),
            TargetSpec::new(Point::new(50.0, 0.0), 5.0, Color::rgba(0.0, 1.0, 0.0, 0.5))
                .with_gate_half_width(2.0),
        ];
        SessionConfig::new(targets, 1)
    }

    fn sample(id: u32, x: f32, y: f32, time_ms: u64) -> PointerSample {
        PointerSample::new(PointerId(id), x, y, time_ms)
    }

    type TestSession = TraceSession<CountingRender, CountingSamples>;

    fn session(config: &SessionConfig) -> TestSession {
        TraceSession::new(config, CountingRender::default(), CountingSamples::default())
    }

    #[test]
    fn test_full_gesture_reports_render_and_telemetry() {
        let config = two_target_config();
        let mut session = session(&config);

        session.pointer_down(&sample(0, 0.0, 0.0, 0));
        // Only moves gate: a sub-step wiggle lights target 0 at the origin.
        session.pointer_move(&sample(0, 1.0, 0.0, 8));
        session.pointer_move(&sample(0, 50.0, 0.0, 16));
        let signal = session.pointer_up(&sample(0, 50.0, 0.0, 32));

        // One cycle of a one-cycle session.
        assert_eq!(signal, Some(SessionComplete { cycles: 1 }));

        let (render, samples) = session.into_sinks();
        assert_eq!(render.started, 1);
        assert_eq!(render.closed, 1);
        // The suppressed wiggle left the anchor at the origin.
        assert_eq!(render.appended_points, 9);
        // Two visit recolors to white, then two base restores at cycle end.
        assert_eq!(render.recolors.len(), 4);
        assert_eq!(render.recolors[0], (0, Color::WHITE));
        assert_eq!(render.recolors[1], (1, Color::WHITE));
        assert_eq!(render.recolors[2].1, Color::rgba(1.0, 0.0, 0.0, 0.5));
        // Down and both moves recorded, up not.
        assert_eq!(samples.records.len(), 3);
        assert_eq!(samples.records[0], (0, 0.0, 0.0));
    }

    #[test]
    fn test_move_before_down_is_absorbed() {
        let config = two_target_config();
        let mut session = session(&config);

        session.pointer_move(&sample(3, 0.0, 0.0, 0));

        let (render, samples) = session.into_sinks();
        assert_eq!(render.appended_points, 0);
        assert!(samples.records.is_empty());
    }

    #[test]
    fn test_up_without_down_is_absorbed() {
        let config = two_target_config();
        let mut session = session(&config);
        assert_eq!(session.pointer_up(&sample(3, 0.0, 0.0, 0)), None);
        let (render, _) = session.into_sinks();
        assert_eq!(render.closed, 0);
    }

    #[test]
    fn test_duplicate_down_keeps_first_path() {
        let config = two_target_config();
        let mut session = session(&config);

        session.pointer_down(&sample(0, 0.0, 0.0, 0));
        session.pointer_down(&sample(0, 99.0, 99.0, 1));

        assert_eq!(session.tracer().active_count(), 1);
        let path = session.tracer().path(PointerId(0)).expect("live path");
        assert_eq!(path.points()[0], Point::new(0.0, 0.0));

        let (render, _) = session.into_sinks();
        assert_eq!(render.started, 1, "second down must not restart the path");
    }

    #[test]
    fn test_unreleased_pointer_up_does_not_end_cycle() {
        // Gesture-end checks run only for pointers the session knows.
        let config = two_target_config();
        let mut session = session(&config);

        session.pointer_down(&sample(0, 0.0, 0.0, 0));
        session.pointer_move(&sample(0, 1.0, 0.0, 8));
        session.pointer_move(&sample(0, 50.0, 0.0, 16));
        // Up for an unknown pointer: both targets stay visited, no signal.
        assert_eq!(session.pointer_up(&sample(7, 50.0, 0.0, 32)), None);
        assert!(session.sequencer().targets().iter().all(|t| t.visited()));
    }

    #[test]
    fn test_drain_routes_events_in_order() {
        let config = two_target_config();
        let mut session = session(&config);
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.push_down(sample(0, 0.0, 0.0, 0));
        dispatcher.push_move(sample(0, 1.0, 0.0, 8));
        dispatcher.push_move(sample(0, 50.0, 0.0, 16));
        dispatcher.push_up(sample(0, 50.0, 0.0, 32));

        let signal = session.drain(&mut dispatcher);
        assert_eq!(signal, Some(SessionComplete { cycles: 1 }));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_suppressed_move_still_gates_and_records() {
        // A sub-step wiggle draws nothing but still counts for gating and
        // telemetry, exactly like a drawn move.
        let targets = vec![
            TargetSpec::new(Point::new(2.0, 0.0), 5.0, Color::WHITE).with_gate_half_width(1.0),
        ];
        let config = SessionConfig::new(targets, 1);
        let mut session = TraceSession::new(
            &config,
            CountingRender::default(),
            CountingSamples::default(),
        );

        session.pointer_down(&sample(0, 0.0, 0.0, 0));
        session.pointer_move(&sample(0, 2.0, 0.0, 16));

        assert!(session.sequencer().targets()[0].visited());
        let (render, samples) = session.into_sinks();
        assert_eq!(render.appended_points, 0);
        assert_eq!(samples.records.len(), 2);
    }
}
