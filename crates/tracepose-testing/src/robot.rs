//! Robot-style scripted gestures against a real session.
//!
//! The robot owns a [`TraceSession`] wired to capturing sinks and exposes
//! imperative gesture verbs:
//!
//! ```
//! use tracepose_core::SessionConfig;
//! use tracepose_testing::TraceRobot;
//!
//! let mut robot = TraceRobot::new(SessionConfig::default());
//! robot.touch_down(0, 100.0, 100.0);
//! robot.drag_to(0, 700.0, 100.0);
//! robot.release(0);
//! assert!(robot.completions().is_empty());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracepose_core::{
    Color, Point, RecordedSample, RenderSink, SampleSink, SessionComplete, SessionConfig,
    TraceRecorder, TraceSession,
};
use tracepose_input::{PointerId, PointerSample};

/// Milliseconds advanced per scripted event, a typical touch frame.
const TICK_MS: u64 = 16;

/// Everything the session reported through its render boundary.
#[derive(Default)]
pub struct RenderLog {
    pub started: Vec<(PointerId, Point, f32)>,
    pub appended: HashMap<PointerId, Vec<Point>>,
    pub segment_starts: HashMap<PointerId, u32>,
    pub closed: Vec<PointerId>,
    pub recolors: Vec<(usize, Color)>,
}

/// Clonable handle to a [`RenderLog`], usable as the session's render sink.
#[derive(Clone, Default)]
pub struct SharedRenderLog(Rc<RefCell<RenderLog>>);

impl SharedRenderLog {
    pub fn borrow(&self) -> std::cell::Ref<'_, RenderLog> {
        self.0.borrow()
    }
}

impl RenderSink for SharedRenderLog {
    fn path_started(&mut self, pointer: PointerId, origin: Point, color_seed: f32) {
        self.0.borrow_mut().started.push((pointer, origin, color_seed));
    }

    fn path_points_appended(&mut self, pointer: PointerId, points: &[Point], new_segment: bool) {
        let mut log = self.0.borrow_mut();
        log.appended.entry(pointer).or_default().extend_from_slice(points);
        if new_segment {
            *log.segment_starts.entry(pointer).or_default() += 1;
        }
    }

    fn path_closed(&mut self, pointer: PointerId) {
        self.0.borrow_mut().closed.push(pointer);
    }

    fn target_color_changed(&mut self, index: usize, color: Color) {
        self.0.borrow_mut().recolors.push((index, color));
    }
}

/// Clonable handle to a [`TraceRecorder`], usable as the session's sample sink.
#[derive(Clone, Default)]
pub struct SharedRecorder(Rc<RefCell<TraceRecorder>>);

impl SharedRecorder {
    pub fn samples(&self) -> Vec<RecordedSample> {
        self.0.borrow().samples().to_vec()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl SampleSink for SharedRecorder {
    fn record(&mut self, time_ms: u64, x: f32, y: f32) {
        self.0.borrow_mut().record(time_ms, x, y);
    }
}

/// Programmatic gesture control over a real [`TraceSession`].
pub struct TraceRobot {
    session: TraceSession<SharedRenderLog, SharedRecorder>,
    render: SharedRenderLog,
    recorder: SharedRecorder,
    clock_ms: u64,
    last_position: HashMap<PointerId, (f32, f32)>,
    completions: Vec<SessionComplete>,
}

impl TraceRobot {
    pub fn new(config: SessionConfig) -> Self {
        let render = SharedRenderLog::default();
        let recorder = SharedRecorder::default();
        let session = TraceSession::new(&config, render.clone(), recorder.clone());
        Self {
            session,
            render,
            recorder,
            clock_ms: 0,
            last_position: HashMap::new(),
            completions: Vec::new(),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock_ms += TICK_MS;
        self.clock_ms
    }

    fn sample(&mut self, id: u32, x: f32, y: f32, pressure: Option<f32>) -> PointerSample {
        let time_ms = self.tick();
        self.last_position.insert(PointerId(id), (x, y));
        let mut sample = PointerSample::new(PointerId(id), x, y, time_ms);
        sample.pressure = pressure;
        sample
    }

    pub fn touch_down(&mut self, id: u32, x: f32, y: f32) {
        let sample = self.sample(id, x, y, None);
        self.session.pointer_down(&sample);
    }

    pub fn touch_down_with_pressure(&mut self, id: u32, x: f32, y: f32, pressure: f32) {
        let sample = self.sample(id, x, y, Some(pressure));
        self.session.pointer_down(&sample);
    }

    /// One move event straight to the destination.
    pub fn drag_to(&mut self, id: u32, x: f32, y: f32) {
        let sample = self.sample(id, x, y, None);
        self.session.pointer_move(&sample);
    }

    pub fn drag_to_with_pressure(&mut self, id: u32, x: f32, y: f32, pressure: f32) {
        let sample = self.sample(id, x, y, Some(pressure));
        self.session.pointer_move(&sample);
    }

    /// Releases the pointer at its last known position.
    pub fn release(&mut self, id: u32) {
        let (x, y) = self
            .last_position
            .get(&PointerId(id))
            .copied()
            .unwrap_or((0.0, 0.0));
        let sample = self.sample(id, x, y, None);
        if let Some(signal) = self.session.pointer_up(&sample) {
            self.completions.push(signal);
        }
        self.last_position.remove(&PointerId(id));
    }

    /// One continuous gesture down -> through each point -> release.
    pub fn swipe_through(&mut self, id: u32, points: &[(f32, f32)]) {
        let Some(&(x0, y0)) = points.first() else {
            return;
        };
        self.touch_down(id, x0, y0);
        // A sub-step wiggle gates the starting zone; down events do not.
        // Half a pixel stays strictly inside even the tightest test gates.
        self.drag_to(id, x0 + 0.5, y0);
        for &(x, y) in &points[1..] {
            self.drag_to(id, x, y);
        }
        self.release(id);
    }

    /// Traces one full cycle through every configured target, in order.
    pub fn trace_all_targets(&mut self, id: u32) {
        let centers: Vec<(f32, f32)> = self
            .session
            .sequencer()
            .targets()
            .iter()
            .map(|t| (t.center.x, t.center.y))
            .collect();
        self.swipe_through(id, &centers);
    }

    pub fn target_visited(&self, index: usize) -> bool {
        self.session.sequencer().targets()[index].visited()
    }

    pub fn completed_cycles(&self) -> u32 {
        self.session.sequencer().completed_cycles()
    }

    pub fn completions(&self) -> &[SessionComplete] {
        &self.completions
    }

    pub fn render(&self) -> std::cell::Ref<'_, RenderLog> {
        self.render.borrow()
    }

    pub fn recorder(&self) -> &SharedRecorder {
        &self.recorder
    }

    pub fn session(&self) -> &TraceSession<SharedRenderLog, SharedRecorder> {
        &self.session
    }

    pub fn rendered_points(&self, id: u32) -> Vec<Point> {
        self.render
            .borrow()
            .appended
            .get(&PointerId(id))
            .cloned()
            .unwrap_or_default()
    }
}
