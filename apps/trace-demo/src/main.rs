//! Headless Tracepose demo.
//!
//! Scripts the reference task end to end: for each required cycle, one
//! continuous gesture is driven through every target in order, with the
//! resulting render traffic logged instead of drawn. Run with
//! `RUST_LOG=debug` to watch targets light up.

mod config;

use anyhow::Context;
use tracepose_core::{
    Color, Point, RenderSink, SessionComplete, TraceRecorder, TraceSession,
};
use tracepose_input::{PointerDispatcher, PointerId, PointerSample};

/// Render sink that narrates drawing traffic through the log.
#[derive(Default)]
struct LogRender {
    points_drawn: usize,
}

impl RenderSink for LogRender {
    fn path_started(&mut self, pointer: PointerId, origin: Point, color_seed: f32) {
        log::debug!(
            "path {pointer} started at ({:.1}, {:.1}), hue seed {color_seed:.3}",
            origin.x,
            origin.y
        );
    }

    fn path_points_appended(&mut self, pointer: PointerId, points: &[Point], new_segment: bool) {
        self.points_drawn += points.len();
        if new_segment {
            log::debug!("path {pointer}: new stroke segment");
        }
    }

    fn path_closed(&mut self, pointer: PointerId) {
        log::debug!("path {pointer} closed");
    }

    fn target_color_changed(&mut self, index: usize, color: Color) {
        log::debug!("target {index} recolored to {color:?}");
    }
}

fn next_tick(clock_ms: &mut u64) -> u64 {
    *clock_ms += 16;
    *clock_ms
}

/// Queues one gesture that sweeps through every waypoint.
fn queue_gesture(dispatcher: &mut PointerDispatcher, clock_ms: &mut u64, waypoints: &[Point]) {
    let first = waypoints[0];
    dispatcher.push_down(PointerSample::new(
        PointerId::PRIMARY,
        first.x,
        first.y,
        next_tick(clock_ms),
    ));
    // Down events do not gate; a short move lights the starting zone.
    dispatcher.push_move(PointerSample::new(
        PointerId::PRIMARY,
        first.x + 1.0,
        first.y,
        next_tick(clock_ms),
    ));
    for waypoint in &waypoints[1..] {
        dispatcher.push_move(PointerSample::new(
            PointerId::PRIMARY,
            waypoint.x,
            waypoint.y,
            next_tick(clock_ms),
        ));
    }
    let last = waypoints[waypoints.len() - 1];
    dispatcher.push_up(PointerSample::new(
        PointerId::PRIMARY,
        last.x,
        last.y,
        next_tick(clock_ms),
    ));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = config::load_settings();
    let session_config = settings.session_config();
    log::info!(
        "starting session: {} targets, {} cycles required",
        session_config.targets.len(),
        session_config.required_cycles
    );

    let mut session = TraceSession::new(
        &session_config,
        LogRender::default(),
        TraceRecorder::new(),
    );

    let waypoints: Vec<Point> = session_config.targets.iter().map(|t| t.center).collect();
    let mut dispatcher = PointerDispatcher::new();
    let mut clock_ms = 0;
    let mut completion: Option<SessionComplete> = None;

    for cycle in 0..session_config.required_cycles {
        queue_gesture(&mut dispatcher, &mut clock_ms, &waypoints);
        if let Some(signal) = session.drain(&mut dispatcher) {
            completion = Some(signal);
        }
        log::info!(
            "gesture {} done, cycles completed: {}",
            cycle + 1,
            session.sequencer().completed_cycles()
        );
    }

    let (render, recorder) = session.into_sinks();
    match completion {
        Some(signal) => println!(
            "session complete: {} cycles, {} points drawn, {} samples recorded",
            signal.cycles,
            render.points_drawn,
            recorder.len()
        ),
        None => println!("session did not complete"),
    }

    if let Some(path) = &settings.record_path {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("creating record file {path}"))?;
        recorder
            .write_to(&mut file)
            .with_context(|| format!("writing samples to {path}"))?;
        log::info!("wrote {} samples to {path}", recorder.len());
    }

    Ok(())
}
