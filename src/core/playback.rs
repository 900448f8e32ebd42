//! Playback controller.
//!
//! Owns the one authoritative simulation time and every view built from the current
//! parameters. All inputs (play, pause, reset, scrub, apply) and the per-frame `tick`
//! run on the caller's single event loop; each of them ends with at most one call to
//! `push_time`, which updates every view for the same instant before returning.

use crate::core::error::ParameterError;
use crate::core::graph::{GraphKind, GraphView};
use crate::core::kinematics::{DerivedMilestones, SimulationParameters, display_height, velocity};
use crate::core::params::validate;
use crate::core::scene::SceneView;
use crate::core::solution::{SolutionStep, solution_steps};

/// Wall-clock seconds for a full flight from t = 0.
pub const FULL_FLIGHT_DURATION_S: f64 = 5.0;
/// Delay between consecutive key-point reveals after a run completes.
pub const KEY_POINT_STAGGER_S: f64 = 0.15;
/// Delay between consecutive solution-step reveals after a run completes.
pub const SOLUTION_STAGGER_S: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Linear advance from `from_time_s` to impact over `duration_s` of wall time.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveRun {
    started_at_s: f64,
    from_time_s: f64,
    duration_s: f64,
}

impl ActiveRun {
    fn fraction(&self, now_s: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((now_s - self.started_at_s) / self.duration_s).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Idle,
    Playing(ActiveRun),
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct StagedReveal {
    started_at_s: f64,
    key_points_shown: usize,
    steps_shown: usize,
}

/// Text of the numeric displays for the current instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readouts {
    pub time: String,
    pub velocity: String,
    pub height: String,
    pub acceleration: String,
    pub slider: String,
}

impl Readouts {
    pub fn at(time_s: f64, velocity_mps: f64, height_m: f64, gravity_mps2: f64) -> Self {
        Self {
            time: format!("{time_s:.3} s"),
            velocity: format!("{velocity_mps:.2} m/s"),
            height: format!("{height_m:.2} m"),
            acceleration: format!("{:.2} m/s²", -gravity_mps2),
            slider: format!("{time_s:.2} s"),
        }
    }
}

pub struct Playback {
    params: SimulationParameters,
    milestones: DerivedMilestones,
    scene: SceneView,
    velocity_graph: GraphView,
    height_graph: GraphView,
    solution: Vec<SolutionStep>,
    readouts: Readouts,
    time_s: f64,
    mode: Mode,
    reveal: Option<StagedReveal>,
    steps_visible: usize,
    full_duration_s: f64,
}

impl Playback {
    /// Starts idle at t = 0. An unusable parameter set is replaced by the default throw.
    pub fn new(params: SimulationParameters) -> Self {
        let params = validate(params).unwrap_or_else(|err| {
            log::warn!("{err}; starting from the default throw");
            SimulationParameters::default()
        });
        let milestones = DerivedMilestones::from_parameters(params);
        let mut playback = Self {
            params,
            milestones,
            scene: SceneView::build(params, &milestones),
            velocity_graph: GraphView::build(GraphKind::Velocity, params, &milestones),
            height_graph: GraphView::build(GraphKind::Height, params, &milestones),
            solution: solution_steps(params, &milestones),
            readouts: Readouts::at(0.0, 0.0, 0.0, params.gravity_mps2),
            time_s: 0.0,
            mode: Mode::Idle,
            reveal: None,
            steps_visible: 0,
            full_duration_s: FULL_FLIGHT_DURATION_S,
        };
        playback.push_time(0.0);
        playback
    }

    /// Overrides the wall-clock length of a full flight. Non-positive or non-finite
    /// values keep the default.
    pub fn with_full_duration(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.full_duration_s = seconds;
        } else {
            log::warn!("ignoring playback duration {seconds}; using {FULL_FLIGHT_DURATION_S} s");
        }
        self
    }

    pub fn state(&self) -> PlaybackState {
        match self.mode {
            Mode::Idle => PlaybackState::Idle,
            Mode::Playing(_) => PlaybackState::Playing,
            Mode::Paused => PlaybackState::Paused,
        }
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn params(&self) -> SimulationParameters {
        self.params
    }

    pub fn milestones(&self) -> &DerivedMilestones {
        &self.milestones
    }

    pub fn scene(&self) -> &SceneView {
        &self.scene
    }

    pub fn velocity_graph(&self) -> &GraphView {
        &self.velocity_graph
    }

    pub fn height_graph(&self) -> &GraphView {
        &self.height_graph
    }

    pub fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    /// Solution steps revealed so far.
    pub fn visible_steps(&self) -> &[SolutionStep] {
        &self.solution[..self.steps_visible]
    }

    pub fn key_points_revealed(&self) -> usize {
        self.graphs()
            .into_iter()
            .map(|g| {
                g.key_points
                    .iter()
                    .filter(|k| {
                        g.surface
                            .get(k.marker)
                            .is_some_and(|e| e.style.opacity > 0.0)
                    })
                    .count()
            })
            .sum()
    }

    /// Label of the single play/pause control.
    pub fn play_label(&self) -> &'static str {
        match self.mode {
            Mode::Playing(_) => "Pause",
            Mode::Idle | Mode::Paused => "Play",
        }
    }

    fn graphs(&self) -> [&GraphView; 2] {
        [&self.velocity_graph, &self.height_graph]
    }

    fn total_key_points(&self) -> usize {
        self.velocity_graph.key_points.len() + self.height_graph.key_points.len()
    }

    /// Replaces the parameters wholesale, rebuilds every view and returns to t = 0.
    ///
    /// A set that fails validation is rejected and the last accepted set stays in
    /// place along with the current time and state.
    pub fn apply(&mut self, params: SimulationParameters) -> Result<(), ParameterError> {
        let params = validate(params).inspect_err(|err| {
            log::warn!("{err}; keeping the current parameters");
        })?;
        let milestones = DerivedMilestones::from_parameters(params);
        self.params = params;
        self.milestones = milestones;
        self.scene = SceneView::build(params, &milestones);
        self.velocity_graph = GraphView::build(GraphKind::Velocity, params, &milestones);
        self.height_graph = GraphView::build(GraphKind::Height, params, &milestones);
        self.solution = solution_steps(params, &milestones);
        log::debug!(
            "applied v0={} y0={} g={}; impact at {:.3} s",
            params.initial_velocity_mps,
            params.initial_height_m,
            params.gravity_mps2,
            milestones.time_to_impact_s
        );
        self.reset();
        Ok(())
    }

    /// Starts or resumes the advance toward impact. A finished run starts over from 0.
    pub fn play(&mut self, now_s: f64) {
        if matches!(self.mode, Mode::Playing(_)) {
            return;
        }
        let impact_s = self.milestones.time_to_impact_s;
        if self.time_s >= impact_s {
            self.reset();
        }
        let remaining = if !self.milestones.is_degenerate() {
            1.0 - self.time_s / impact_s
        } else {
            0.0
        };
        let run = ActiveRun {
            started_at_s: now_s,
            from_time_s: self.time_s,
            duration_s: self.full_duration_s * remaining,
        };
        log::debug!(
            "play from t={:.3} s over {:.3} s",
            run.from_time_s,
            run.duration_s
        );
        self.mode = Mode::Playing(run);
    }

    pub fn pause(&mut self) {
        if matches!(self.mode, Mode::Playing(_)) {
            log::debug!("pause at t={:.3} s", self.time_s);
            self.mode = Mode::Paused;
        }
    }

    pub fn toggle(&mut self, now_s: f64) {
        match self.mode {
            Mode::Playing(_) => self.pause(),
            Mode::Idle | Mode::Paused => self.play(now_s),
        }
    }

    /// Cancels any run and returns every view to t = 0 with the reveals hidden.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.reveal = None;
        self.steps_visible = 0;
        self.velocity_graph.hide_key_points();
        self.height_graph.hide_key_points();
        self.push_time(0.0);
    }

    /// Sets the time directly. Pauses a running playback first; otherwise the state
    /// is left as it is.
    pub fn scrub(&mut self, time_s: f64) {
        if !time_s.is_finite() {
            return;
        }
        self.pause();
        self.push_time(time_s);
    }

    /// Advances the running playback to wall-clock time `now_s` and any staged reveal.
    pub fn tick(&mut self, now_s: f64) {
        if let Mode::Playing(run) = self.mode {
            let fraction = run.fraction(now_s);
            let impact_s = self.milestones.time_to_impact_s;
            if fraction >= 1.0 {
                self.push_time(impact_s);
                self.complete(now_s);
            } else {
                self.push_time(run.from_time_s + (impact_s - run.from_time_s) * fraction);
            }
        }
        self.advance_reveal(now_s);
    }

    fn complete(&mut self, now_s: f64) {
        self.mode = Mode::Idle;
        self.reveal = Some(StagedReveal {
            started_at_s: now_s,
            key_points_shown: 0,
            steps_shown: 0,
        });
        log::info!(
            "flight complete: impact at {:.3} s, {:.2} m/s",
            self.milestones.time_to_impact_s,
            self.milestones.impact_velocity_mps
        );
    }

    fn advance_reveal(&mut self, now_s: f64) {
        let Some(mut reveal) = self.reveal else {
            return;
        };
        let elapsed = (now_s - reveal.started_at_s).max(0.0);
        let key_due = due_count(elapsed, KEY_POINT_STAGGER_S, self.total_key_points());
        while reveal.key_points_shown < key_due {
            self.show_key_point(reveal.key_points_shown);
            reveal.key_points_shown += 1;
        }
        let steps_due = due_count(elapsed, SOLUTION_STAGGER_S, self.solution.len());
        reveal.steps_shown = reveal.steps_shown.max(steps_due);
        self.steps_visible = reveal.steps_shown;

        let finished = reveal.key_points_shown == self.total_key_points()
            && reveal.steps_shown == self.solution.len();
        self.reveal = (!finished).then_some(reveal);
    }

    /// Key points are numbered across both charts, velocity chart first.
    fn show_key_point(&mut self, index: usize) {
        let velocity_count = self.velocity_graph.key_points.len();
        if index < velocity_count {
            self.velocity_graph.set_key_point_visible(index, true);
        } else {
            self.height_graph
                .set_key_point_visible(index - velocity_count, true);
        }
    }

    /// The single atomic view update: ball, arrow, label, readouts, then charts.
    fn push_time(&mut self, time_s: f64) {
        let t = time_s.clamp(0.0, self.milestones.time_to_impact_s);
        let height_m = display_height(self.params, t);
        let velocity_mps = velocity(self.params, t);
        self.time_s = t;
        self.scene.show(t, height_m, velocity_mps);
        self.readouts = Readouts::at(t, velocity_mps, height_m, self.params.gravity_mps2);
        self.velocity_graph.show(t, velocity_mps);
        self.height_graph.show(t, height_m);
    }
}

/// How many staggered items are due `elapsed` seconds after the first one.
fn due_count(elapsed: f64, stagger: f64, total: usize) -> usize {
    ((elapsed / stagger).floor() as usize + 1).min(total)
}
