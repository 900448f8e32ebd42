//! Velocity-time and height-time charts.
//!
//! Every chart precomputes [`SAMPLE_COUNT`] points once per build. Playback only
//! truncates the curve to an index into those points and moves the dot to the exact
//! scaled position, so the drawn curve and the dot cannot drift apart.

use glam::DVec2;

use crate::core::kinematics::{DerivedMilestones, SimulationParameters, position, velocity};
use crate::core::surface::{ElementId, Rgba, Style, Surface};
use crate::core::window::{
    AxisRange, height_axis, ticks, time_axis, time_grid_step, value_grid_step, velocity_axis,
};

pub const GRAPH_W: f64 = 440.0;
pub const GRAPH_H: f64 = 300.0;
pub const MARGIN_TOP: f64 = 18.0;
pub const MARGIN_RIGHT: f64 = 16.0;
pub const MARGIN_BOTTOM: f64 = 34.0;
pub const MARGIN_LEFT: f64 = 48.0;

/// Intervals between precomputed samples; the sample array holds one more point.
pub const SAMPLE_STEPS: usize = 200;
pub const SAMPLE_COUNT: usize = SAMPLE_STEPS + 1;

const GRID: Rgba = Rgba::hex(0xe2e8f0);
const AXIS: Rgba = Rgba::hex(0x94a3b8);
const LABEL: Rgba = Rgba::hex(0x64748b);
const KEY_LABEL: Rgba = Rgba::hex(0x1e293b);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
    Velocity,
    Height,
}

impl GraphKind {
    pub fn color(self) -> Rgba {
        match self {
            Self::Velocity => Rgba::hex(0x059669),
            Self::Height => Rgba::hex(0xd97706),
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Self::Velocity => "v (m/s)",
            Self::Height => "y (m)",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Velocity => "v",
            Self::Height => "y",
        }
    }

    /// Value plotted at `time_s`, as the chart shows it.
    pub fn value_at(self, params: SimulationParameters, time_s: f64) -> f64 {
        match self {
            Self::Velocity => velocity(params, time_s),
            Self::Height => position(params, time_s),
        }
    }

    pub fn value_range(self, params: SimulationParameters, milestones: &DerivedMilestones) -> AxisRange {
        match self {
            Self::Velocity => velocity_axis(params, milestones),
            Self::Height => height_axis(params, milestones),
        }
    }
}

/// Affine mapping shared by gridlines, samples, key points and the dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
    pub time: AxisRange,
    pub value: AxisRange,
}

impl AxisScale {
    pub fn plot_width() -> f64 {
        GRAPH_W - MARGIN_LEFT - MARGIN_RIGHT
    }

    pub fn plot_height() -> f64 {
        GRAPH_H - MARGIN_TOP - MARGIN_BOTTOM
    }

    pub fn x(&self, time_s: f64) -> f64 {
        MARGIN_LEFT + ((time_s - self.time.min) / self.time.span()) * Self::plot_width()
    }

    pub fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + Self::plot_height()
            - ((value - self.value.min) / self.value.span()) * Self::plot_height()
    }

    pub fn point(&self, time_s: f64, value: f64) -> DVec2 {
        DVec2::new(self.x(time_s), self.y(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecomputedSample {
    pub time_s: f64,
    pub screen: DVec2,
}

/// Marker circle plus its label, hidden until a run completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPoint {
    pub marker: ElementId,
    pub label: ElementId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphView {
    pub kind: GraphKind,
    pub surface: Surface,
    pub curve: ElementId,
    pub dot: ElementId,
    pub key_points: Vec<KeyPoint>,
    pub scale: AxisScale,
    pub samples: Vec<PrecomputedSample>,
    pub time_to_impact_s: f64,
}

/// Index into the sample array for `time_s`; snaps to the nearest sample.
pub fn sample_index(time_s: f64, time_to_impact_s: f64) -> usize {
    if time_to_impact_s <= 0.0 {
        return 0;
    }
    let fraction = (time_s / time_to_impact_s).clamp(0.0, 1.0);
    ((fraction * SAMPLE_STEPS as f64).round() as usize).min(SAMPLE_STEPS)
}

impl GraphView {
    pub fn build(
        kind: GraphKind,
        params: SimulationParameters,
        milestones: &DerivedMilestones,
    ) -> Self {
        let scale = AxisScale {
            time: time_axis(milestones),
            value: kind.value_range(params, milestones),
        };
        let mut surface = Surface::new(GRAPH_W, GRAPH_H);
        draw_axes(&mut surface, kind, &scale);

        let t_end = milestones.time_to_impact_s;
        let samples: Vec<PrecomputedSample> = (0..=SAMPLE_STEPS)
            .map(|i| {
                let t = (i as f64 / SAMPLE_STEPS as f64) * t_end;
                PrecomputedSample {
                    time_s: t,
                    screen: scale.point(t, kind.value_at(params, t)),
                }
            })
            .collect();

        let color = kind.color();
        let curve = surface.path(vec![samples[0].screen], Style::stroked(color, 2.5));
        surface.tag(curve, &format!("{}-curve", kind.slug()));
        let dot = surface.circle(samples[0].screen, 5.0, Style::filled(color));
        surface.tag(dot, &format!("{}-dot", kind.slug()));

        let key_points = key_point_specs(kind, params, milestones)
            .into_iter()
            .map(|(t, value, text)| add_key_point(&mut surface, &scale, color, t, value, text))
            .collect();

        Self {
            kind,
            surface,
            curve,
            dot,
            key_points,
            scale,
            samples,
            time_to_impact_s: t_end,
        }
    }

    /// Draws the curve up to the sample nearest `time_s` and places the dot exactly at
    /// `(time_s, value)`.
    pub fn show(&mut self, time_s: f64, value: f64) {
        let end = sample_index(time_s, self.time_to_impact_s);
        self.surface.set_path(
            self.curve,
            self.samples[..=end].iter().map(|s| s.screen),
        );
        self.surface
            .move_circle(self.dot, self.scale.point(time_s, value));
    }

    pub fn set_key_point_visible(&mut self, index: usize, visible: bool) {
        if let Some(key) = self.key_points.get(index).copied() {
            let opacity = if visible { 1.0 } else { 0.0 };
            self.surface.set_opacity(key.marker, opacity);
            self.surface.set_opacity(key.label, opacity);
        }
    }

    pub fn hide_key_points(&mut self) {
        for index in 0..self.key_points.len() {
            self.set_key_point_visible(index, false);
        }
    }
}

fn draw_axes(surface: &mut Surface, kind: GraphKind, scale: &AxisScale) {
    let right = GRAPH_W - MARGIN_RIGHT;
    let bottom = GRAPH_H - MARGIN_BOTTOM;

    let value_step = value_grid_step(scale.value);
    for v in ticks(scale.value.min, scale.value.max, value_step) {
        let y = scale.y(v);
        surface.line(
            DVec2::new(MARGIN_LEFT, y),
            DVec2::new(right, y),
            Style::stroked(GRID, 1.0),
        );
        surface.text(
            DVec2::new(MARGIN_LEFT - 30.0, y + 3.0),
            format!("{v:.0}"),
            9.0,
            AXIS,
        );
    }

    let time_step = time_grid_step(scale.time);
    for t in ticks(0.0, scale.time.max, time_step) {
        let x = scale.x(t);
        surface.line(
            DVec2::new(x, MARGIN_TOP),
            DVec2::new(x, bottom),
            Style::stroked(GRID, 1.0),
        );
        surface.text(
            DVec2::new(x - 5.0, bottom + 14.0),
            format!("{t:.1}"),
            9.0,
            AXIS,
        );
    }

    surface.line(
        DVec2::new(MARGIN_LEFT, MARGIN_TOP),
        DVec2::new(MARGIN_LEFT, bottom),
        Style::stroked(AXIS, 1.5),
    );
    surface.line(
        DVec2::new(MARGIN_LEFT, bottom),
        DVec2::new(right, bottom),
        Style::stroked(AXIS, 1.5),
    );
    if kind == GraphKind::Velocity && scale.value.contains(0.0) {
        surface.line(
            DVec2::new(MARGIN_LEFT, scale.y(0.0)),
            DVec2::new(right, scale.y(0.0)),
            Style::stroked(AXIS, 1.0).with_opacity(0.4).with_dash(4.0, 4.0),
        );
    }

    surface.text(
        DVec2::new(GRAPH_W / 2.0 - 8.0, GRAPH_H - 4.0),
        "t (s)",
        10.0,
        LABEL,
    );
    surface.text(
        DVec2::new(4.0, MARGIN_TOP - 5.0),
        kind.axis_label(),
        10.0,
        LABEL,
    );
}

/// Start, apex (or zero crossing) and impact, in that order.
fn key_point_specs(
    kind: GraphKind,
    params: SimulationParameters,
    milestones: &DerivedMilestones,
) -> Vec<(f64, f64, String)> {
    let (peak_t, peak_m) = milestones.in_flight_peak(params);
    let impact_t = milestones.time_to_impact_s;
    match kind {
        GraphKind::Velocity => vec![
            (
                0.0,
                params.initial_velocity_mps,
                format!("v₀={:.1} m/s", params.initial_velocity_mps),
            ),
            (
                peak_t,
                velocity(params, peak_t),
                if milestones.time_to_apex_s > 0.0 {
                    format!("v=0 (t={peak_t:.2}s)")
                } else {
                    format!("v={:.1} (t={peak_t:.2}s)", velocity(params, peak_t))
                },
            ),
            (
                impact_t,
                milestones.impact_velocity_mps,
                format!("v={:.1} m/s", milestones.impact_velocity_mps),
            ),
        ],
        GraphKind::Height => vec![
            (
                0.0,
                params.initial_height_m,
                format!("y₀={:.1}m", params.initial_height_m),
            ),
            (peak_t, peak_m, format!("y_max={peak_m:.1}m")),
            (impact_t, 0.0, format!("y=0 (t={impact_t:.2}s)")),
        ],
    }
}

fn add_key_point(
    surface: &mut Surface,
    scale: &AxisScale,
    color: Rgba,
    time_s: f64,
    value: f64,
    text: String,
) -> KeyPoint {
    let center = scale.point(time_s, value);
    let marker = surface.circle(
        center,
        4.0,
        Style::filled(Rgba::WHITE)
            .with_stroke(color, 2.0)
            .with_opacity(0.0),
    );
    let mid_value = (scale.value.max + scale.value.min) / 2.0;
    let offset_y = if value > mid_value { -10.0 } else { 14.0 };
    let offset_x = if time_s > scale.time.max * 0.7 { -75.0 } else { 6.0 };
    let label = surface.text_styled(
        center + DVec2::new(offset_x, offset_y),
        text,
        9.0,
        Style::filled(KEY_LABEL).with_opacity(0.0).with_bold(),
    );
    KeyPoint { marker, label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::Shape;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn defaults() -> (SimulationParameters, DerivedMilestones) {
        let params = SimulationParameters::default();
        (params, DerivedMilestones::from_parameters(params))
    }

    fn curve_len(graph: &GraphView) -> usize {
        match &graph.surface.get(graph.curve).expect("curve").shape {
            Shape::Path { points } => points.len(),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    fn dot_center(graph: &GraphView) -> DVec2 {
        match &graph.surface.get(graph.dot).expect("dot").shape {
            Shape::Circle { center, .. } => *center,
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn precomputes_exactly_201_samples_across_the_flight() {
        let (params, m) = defaults();
        let graph = GraphView::build(GraphKind::Velocity, params, &m);
        assert_eq!(graph.samples.len(), SAMPLE_COUNT);
        assert_eq!(graph.samples[0].time_s, 0.0);
        assert_close(graph.samples[SAMPLE_STEPS].time_s, m.time_to_impact_s, 1e-12);
        assert_eq!(curve_len(&graph), 1);
    }

    #[test]
    fn samples_share_the_gridline_scale() {
        let (params, m) = defaults();
        let graph = GraphView::build(GraphKind::Height, params, &m);
        for sample in &graph.samples {
            let expected = graph
                .scale
                .point(sample.time_s, position(params, sample.time_s));
            assert_eq!(sample.screen, expected);
        }
        assert_close(graph.scale.y(graph.scale.value.min), GRAPH_H - MARGIN_BOTTOM, 1e-9);
        assert_close(graph.scale.y(graph.scale.value.max), MARGIN_TOP, 1e-9);
        assert_close(graph.scale.x(0.0), MARGIN_LEFT, 1e-12);
    }

    #[test]
    fn key_points_start_hidden() {
        let (params, m) = defaults();
        let graph = GraphView::build(GraphKind::Velocity, params, &m);
        assert_eq!(graph.key_points.len(), 3);
        for key in &graph.key_points {
            assert_eq!(graph.surface.get(key.marker).map(|e| e.style.opacity), Some(0.0));
            assert_eq!(graph.surface.get(key.label).map(|e| e.style.opacity), Some(0.0));
        }
    }

    #[test]
    fn key_point_visibility_toggles() {
        let (params, m) = defaults();
        let mut graph = GraphView::build(GraphKind::Height, params, &m);
        graph.set_key_point_visible(1, true);
        let apex = graph.key_points[1];
        assert_eq!(graph.surface.get(apex.marker).map(|e| e.style.opacity), Some(1.0));
        graph.hide_key_points();
        assert_eq!(graph.surface.get(apex.label).map(|e| e.style.opacity), Some(0.0));
    }

    #[test]
    fn curve_snaps_while_dot_stays_exact() {
        let (params, m) = defaults();
        let mut graph = GraphView::build(GraphKind::Velocity, params, &m);
        let t = m.time_to_impact_s * 0.4037;
        graph.show(t, velocity(params, t));

        assert_eq!(curve_len(&graph), sample_index(t, m.time_to_impact_s) + 1);
        assert_eq!(curve_len(&graph), 82);
        assert_eq!(dot_center(&graph), graph.scale.point(t, velocity(params, t)));
        assert_ne!(dot_center(&graph), graph.samples[81].screen);
    }

    #[test]
    fn full_flight_draws_every_sample() {
        let (params, m) = defaults();
        let mut graph = GraphView::build(GraphKind::Height, params, &m);
        graph.show(m.time_to_impact_s, 0.0);
        assert_eq!(curve_len(&graph), SAMPLE_COUNT);
        graph.show(0.0, params.initial_height_m);
        assert_eq!(curve_len(&graph), 1);
    }

    #[test]
    fn sample_index_handles_zero_length_flight() {
        assert_eq!(sample_index(0.0, 0.0), 0);
        assert_eq!(sample_index(5.0, 0.0), 0);
        assert_eq!(sample_index(10.0, 2.0), SAMPLE_STEPS);
        assert_eq!(sample_index(1.0, 2.0), 100);
    }

    #[test]
    fn ground_launch_chart_is_finite() {
        let params = SimulationParameters {
            initial_velocity_mps: 0.0,
            initial_height_m: 0.0,
            gravity_mps2: 9.81,
        };
        let m = DerivedMilestones::from_parameters(params);
        let mut graph = GraphView::build(GraphKind::Velocity, params, &m);
        graph.show(0.0, 0.0);
        assert!(graph.samples.iter().all(|s| s.screen.is_finite()));
        assert!(dot_center(&graph).is_finite());
        assert!(!graph.surface.to_svg().contains("NaN"));
    }
}
