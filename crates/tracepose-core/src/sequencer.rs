//! Ordered target visitation.
//!
//! One [`TargetSequencer`] is shared by every pointer in the session. Each
//! move can flip targets from unvisited to visited, gated on the square
//! proximity check and on the predecessor already being visited; gesture
//! ends are where cycles and session completion are decided.

use smallvec::SmallVec;

use crate::config::SessionConfig;
use crate::geometry::{Color, Point};

/// One target zone plus its process-wide visitation flag.
///
/// Flags live for the whole session and are only mutated here; they reset
/// as a group when a cycle completes.
#[derive(Clone, Debug)]
pub struct Target {
    pub index: usize,
    pub center: Point,
    pub radius: f32,
    pub gate_half_width: f32,
    pub base_color: Color,
    pub visited_color: Color,
    visited: bool,
}

impl Target {
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// The color the host should currently display for this target.
    pub fn current_color(&self) -> Color {
        if self.visited {
            self.visited_color
        } else {
            self.base_color
        }
    }
}

/// Raised once when the configured trial count has been reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionComplete {
    /// How many full cycles the finished session comprised.
    pub cycles: u32,
}

/// Outcome of a gesture-end evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    /// Not every target is visited yet; flags carry over to the next gesture.
    Pending,
    /// All targets were visited: flags reset, trial counter advanced.
    CycleComplete,
    /// The cycle that just completed was the last required one.
    SessionComplete,
}

/// The ordered gating state machine over the session's targets.
pub struct TargetSequencer {
    targets: Vec<Target>,
    completed_cycles: u32,
    required_cycles: u32,
}

impl TargetSequencer {
    pub fn new(config: &SessionConfig) -> Self {
        let targets = config
            .targets
            .iter()
            .enumerate()
            .map(|(index, spec)| Target {
                index,
                center: spec.center,
                radius: spec.radius,
                gate_half_width: spec.effective_gate(),
                base_color: spec.base_color,
                visited_color: config.visited_color,
                visited: false,
            })
            .collect();
        Self {
            targets,
            completed_cycles: 0,
            required_cycles: config.required_cycles,
        }
    }

    /// Evaluates every target against the current pointer position.
    ///
    /// Returns the indices that flipped to visited in this call. Gates are
    /// checked in index order against the flags as they were when the call
    /// started, so a predecessor visited within the same call does not
    /// unlock its successor; order is enforced strictly across calls.
    pub fn on_move(&mut self, position: Point) -> SmallVec<[usize; 4]> {
        let entering: SmallVec<[bool; 8]> = self.targets.iter().map(|t| t.visited).collect();
        let mut lit = SmallVec::new();
        for (i, target) in self.targets.iter_mut().enumerate() {
            if entering[i] {
                continue;
            }
            if i > 0 && !entering[i - 1] {
                continue;
            }
            if position.within_square(target.center, target.gate_half_width) {
                target.visited = true;
                lit.push(i);
                log::debug!("target {i} visited");
            }
        }
        lit
    }

    /// Runs the cycle- and session-completion checks at gesture end.
    ///
    /// Only gesture boundaries can advance the trial counter: a pointer
    /// lingering over the last target across many moves still counts a
    /// single cycle, at release.
    pub fn on_gesture_end(&mut self) -> GestureEnd {
        if self.targets.is_empty() || !self.targets.iter().all(|t| t.visited) {
            return GestureEnd::Pending;
        }

        for target in &mut self.targets {
            target.visited = false;
        }
        self.completed_cycles += 1;
        log::debug!(
            "cycle complete ({}/{})",
            self.completed_cycles,
            self.required_cycles
        );

        if self.completed_cycles >= self.required_cycles {
            self.completed_cycles = 0;
            GestureEnd::SessionComplete
        } else {
            GestureEnd::CycleComplete
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn required_cycles(&self) -> u32 {
        self.required_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSpec;

    /// Four targets on a diagonal with a 1px square gate.
    fn diagonal_config() -> SessionConfig {
        let targets = (0..4)
            .map(|i| {
                let c = i as f32 * 10.0;
                TargetSpec::new(Point::new(c, c), 5.0, Color::rgba(0.0, 0.0, 0.0, 0.5))
                    .with_gate_half_width(1.0)
            })
            .collect();
        SessionConfig::new(targets, 3)
    }

    fn visit_all(sequencer: &mut TargetSequencer) {
        for i in 0..4 {
            let c = i as f32 * 10.0;
            sequencer.on_move(Point::new(c, c));
        }
    }

    #[test]
    fn test_first_target_has_no_predecessor_gate() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        let lit = sequencer.on_move(Point::new(0.0, 0.0));
        assert_eq!(lit.as_slice(), &[0]);
        assert!(sequencer.targets()[0].visited());
    }

    #[test]
    fn test_out_of_order_visit_is_ignored() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        // Jump straight to target 2's zone.
        let lit = sequencer.on_move(Point::new(20.0, 20.0));
        assert!(lit.is_empty());
        assert!(!sequencer.targets()[2].visited());
    }

    #[test]
    fn test_order_is_enforced_across_calls_not_within_one() {
        // Overlapping gates: both centers inside one 30px square.
        let targets = vec![
            TargetSpec::new(Point::new(0.0, 0.0), 5.0, Color::WHITE).with_gate_half_width(30.0),
            TargetSpec::new(Point::new(10.0, 0.0), 5.0, Color::WHITE).with_gate_half_width(30.0),
        ];
        let mut sequencer = TargetSequencer::new(&SessionConfig::new(targets, 1));

        // One move inside both gates lights only the first target.
        let lit = sequencer.on_move(Point::new(5.0, 0.0));
        assert_eq!(lit.as_slice(), &[0]);
        assert!(!sequencer.targets()[1].visited());

        // The next call sees the predecessor flag and lets the second through.
        let lit = sequencer.on_move(Point::new(5.0, 0.0));
        assert_eq!(lit.as_slice(), &[1]);
    }

    #[test]
    fn test_visited_flag_sticks_until_cycle_reset() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        sequencer.on_move(Point::new(0.0, 0.0));
        // Wandering far away does not clear the flag.
        sequencer.on_move(Point::new(500.0, 500.0));
        assert!(sequencer.targets()[0].visited());
    }

    #[test]
    fn test_gesture_end_without_full_visitation_is_pending() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        sequencer.on_move(Point::new(0.0, 0.0));
        assert_eq!(sequencer.on_gesture_end(), GestureEnd::Pending);
        // Partial progress carries over.
        assert!(sequencer.targets()[0].visited());
        assert_eq!(sequencer.completed_cycles(), 0);
    }

    #[test]
    fn test_cycle_completion_resets_flags_and_counts_once() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        visit_all(&mut sequencer);
        // Linger over the last target after completing the set.
        sequencer.on_move(Point::new(30.0, 30.0));
        sequencer.on_move(Point::new(30.0, 30.0));

        assert_eq!(sequencer.on_gesture_end(), GestureEnd::CycleComplete);
        assert_eq!(sequencer.completed_cycles(), 1);
        assert!(sequencer.targets().iter().all(|t| !t.visited()));
        assert!(sequencer
            .targets()
            .iter()
            .all(|t| t.current_color() == t.base_color));

        // A second gesture end without new visits does not count again.
        assert_eq!(sequencer.on_gesture_end(), GestureEnd::Pending);
        assert_eq!(sequencer.completed_cycles(), 1);
    }

    #[test]
    fn test_session_completes_after_required_cycles() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        for cycle in 0..3 {
            visit_all(&mut sequencer);
            let outcome = sequencer.on_gesture_end();
            if cycle < 2 {
                assert_eq!(outcome, GestureEnd::CycleComplete);
            } else {
                assert_eq!(outcome, GestureEnd::SessionComplete);
            }
        }
        // Counter reset: a fourth cycle is just the first of a fresh run.
        assert_eq!(sequencer.completed_cycles(), 0);
        visit_all(&mut sequencer);
        assert_eq!(sequencer.on_gesture_end(), GestureEnd::CycleComplete);
    }

    #[test]
    fn test_cycle_can_accumulate_over_several_gestures() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        sequencer.on_move(Point::new(0.0, 0.0));
        sequencer.on_move(Point::new(10.0, 10.0));
        assert_eq!(sequencer.on_gesture_end(), GestureEnd::Pending);

        sequencer.on_move(Point::new(20.0, 20.0));
        sequencer.on_move(Point::new(30.0, 30.0));
        assert_eq!(sequencer.on_gesture_end(), GestureEnd::CycleComplete);
    }

    #[test]
    fn test_visited_target_displays_visited_color() {
        let mut sequencer = TargetSequencer::new(&diagonal_config());
        sequencer.on_move(Point::new(0.0, 0.0));
        let target = &sequencer.targets()[0];
        assert_eq!(target.current_color(), target.visited_color);
    }
}
