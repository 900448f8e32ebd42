//! The side view: sky, ground, building, height scale, ghost trajectory, reference
//! lines, and the three mutable elements (ball, velocity arrow, time label).

use glam::DVec2;

use crate::core::kinematics::{DerivedMilestones, SimulationParameters, sample_heights};
use crate::core::surface::{ElementId, GradientStop, Paint, Rgba, Style, Surface};
use crate::core::window::{nice_step, scene_range_m, ticks};

pub const SIM_W: f64 = 300.0;
pub const SIM_H: f64 = 460.0;
pub const GROUND_ROW: f64 = SIM_H - 28.0;
pub const TOP_MARGIN: f64 = 30.0;

pub const BALL_X: f64 = 145.0;
pub const BALL_RADIUS: f64 = 7.0;
pub const GLOW_RADIUS: f64 = 16.0;
pub const ARROW_X: f64 = BALL_X + 18.0;
/// Arrow pixels per m/s of velocity.
pub const ARROW_PX_PER_MPS: f64 = 2.0;
pub const GHOST_STEP_S: f64 = 0.02;
const MAX_GHOST_POINTS: f64 = 2_000.0;

const BUILDING_X: f64 = 50.0;
const BUILDING_W: f64 = 55.0;
const FLOOR_SPACING_M: f64 = 5.0;
const MAX_FLOORS: usize = 12;
const REFERENCE_LINE_START_X: f64 = 28.0;
const REFERENCE_LINE_END_X: f64 = 195.0;
const REFERENCE_LABEL_X: f64 = 198.0;

const SLATE_500: Rgba = Rgba::hex(0x64748b);
const SLATE_400: Rgba = Rgba::hex(0x94a3b8);
const BALL_BLUE: Rgba = Rgba::hex(0x2563eb);
const ARROW_GREEN: Rgba = Rgba::hex(0x059669);
const APEX_AMBER: Rgba = Rgba::hex(0xd97706);
const LAUNCH_VIOLET: Rgba = Rgba::hex(0x7c3aed);

/// Affine meters-to-pixel-row mapping of the scene.
///
/// Ground maps to [`GROUND_ROW`] and `range_m` maps to [`TOP_MARGIN`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeterScale {
    pub range_m: f64,
}

impl MeterScale {
    pub fn row(&self, meters: f64) -> f64 {
        GROUND_ROW - (meters / self.range_m) * (GROUND_ROW - TOP_MARGIN)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneHandles {
    pub ball: ElementId,
    pub glow: ElementId,
    pub velocity_arrow: ElementId,
    pub time_label: ElementId,
}

/// A fully built scene. Rebuilding means constructing a new `SceneView`; the old one
/// is dropped with every element it owned.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneView {
    pub surface: Surface,
    pub handles: SceneHandles,
    pub scale: MeterScale,
}

/// Arrow end point for a ball at `ball_row`: up for `v >= 0`, down otherwise.
pub fn arrow_tip(ball_row: f64, velocity_mps: f64) -> DVec2 {
    let direction = if velocity_mps >= 0.0 { -1.0 } else { 1.0 };
    DVec2::new(
        ARROW_X,
        ball_row + direction * velocity_mps.abs() * ARROW_PX_PER_MPS,
    )
}

pub fn time_label_text(time_s: f64) -> String {
    format!("t = {time_s:.2} s")
}

impl SceneView {
    pub fn build(params: SimulationParameters, milestones: &DerivedMilestones) -> Self {
        let scale = MeterScale {
            range_m: scene_range_m(params, milestones),
        };
        let mut surface = Surface::new(SIM_W, SIM_H);

        draw_backdrop(&mut surface);
        draw_building(&mut surface, &scale, params.initial_height_m);
        draw_height_scale(&mut surface, &scale);
        draw_ghost_path(&mut surface, &scale, params, milestones);
        draw_reference_lines(&mut surface, &scale, params, milestones);

        let launch_row = scale.row(params.initial_height_m.max(0.0));
        let glow = surface.circle(
            DVec2::new(BALL_X, launch_row),
            GLOW_RADIUS,
            Style::filled(BALL_BLUE.with_alpha(0.15)),
        );
        surface.tag(glow, "ball-glow");
        let ball = surface.circle(
            DVec2::new(BALL_X, launch_row),
            BALL_RADIUS,
            Style::filled(BALL_BLUE),
        );
        surface.tag(ball, "ball");
        let velocity_arrow = surface.line(
            DVec2::new(ARROW_X, launch_row),
            arrow_tip(launch_row, params.initial_velocity_mps),
            Style::stroked(ARROW_GREEN, 2.5).with_arrow_head(),
        );
        surface.tag(velocity_arrow, "vel-arrow");
        let time_label = surface.text(
            DVec2::new(120.0, SIM_H - 6.0),
            time_label_text(0.0),
            11.0,
            Rgba::hex(0x475569),
        );
        surface.tag(time_label, "time-label");

        log::debug!(
            "scene rebuilt: {} elements, {:.2} m visible",
            surface.len(),
            scale.range_m
        );

        Self {
            surface,
            handles: SceneHandles {
                ball,
                glow,
                velocity_arrow,
                time_label,
            },
            scale,
        }
    }

    pub fn ball_center(&self, height_m: f64) -> DVec2 {
        DVec2::new(BALL_X, self.scale.row(height_m))
    }

    /// Moves ball, glow, arrow and time label to one instant. `height_m` must already
    /// be clamped to the ground.
    pub fn show(&mut self, time_s: f64, height_m: f64, velocity_mps: f64) {
        let center = self.ball_center(height_m);
        self.surface.move_circle(self.handles.ball, center);
        self.surface.move_circle(self.handles.glow, center);
        self.surface.set_line(
            self.handles.velocity_arrow,
            DVec2::new(ARROW_X, center.y),
            arrow_tip(center.y, velocity_mps),
        );
        self.surface
            .set_text(self.handles.time_label, &time_label_text(time_s));
    }
}

fn draw_backdrop(surface: &mut Surface) {
    surface.rect(
        0.0,
        0.0,
        SIM_W,
        SIM_H,
        Style {
            fill: Some(Paint::VerticalGradient(vec![
                GradientStop {
                    offset: 0.0,
                    color: Rgba::hex(0xbfdbfe),
                },
                GradientStop {
                    offset: 0.7,
                    color: Rgba::hex(0xdbeafe),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba::hex(0xbbf7d0),
                },
            ])),
            ..Style::default()
        },
    );
    surface.rect(
        0.0,
        GROUND_ROW,
        SIM_W,
        SIM_H - GROUND_ROW,
        Style::filled(Rgba::hex(0x86efac)),
    );
    surface.line(
        DVec2::new(0.0, GROUND_ROW),
        DVec2::new(SIM_W, GROUND_ROW),
        Style::stroked(Rgba::hex(0x22c55e), 2.0),
    );
    let hatch = Style::stroked(Rgba::hex(0x4ade80), 1.0).with_opacity(0.3);
    for x in ticks(0.0, SIM_W - 1.0, 10.0) {
        surface.line(
            DVec2::new(x, GROUND_ROW),
            DVec2::new(x - 6.0, SIM_H),
            hatch.clone(),
        );
    }
}

/// Building whose roof sits just above the launch height, with one window per floor;
/// the top window marks the launch point.
fn draw_building(surface: &mut Surface, scale: &MeterScale, launch_height_m: f64) {
    let roof_m = launch_height_m.max(0.0) + 2.0;
    let roof_row = scale.row(roof_m);
    surface.rect(
        BUILDING_X,
        roof_row,
        BUILDING_W,
        GROUND_ROW - roof_row,
        Style::filled(Rgba::hex(0xcbd5e1)).with_stroke(SLATE_400, 1.0),
    );

    let floors = ((launch_height_m / FLOOR_SPACING_M).floor().max(0.0) as usize).min(MAX_FLOORS);
    for floor in 1..=floors {
        let floor_m = launch_height_m * floor as f64 / floors as f64;
        let window_row = scale.row(floor_m) - 5.0;
        let is_launch = floor == floors;
        let (fill, stroke) = if is_launch {
            (Rgba::hex(0xfbbf24), Rgba::hex(0xf59e0b))
        } else {
            (Rgba::hex(0xe2e8f0), SLATE_400)
        };
        for column in 0..2 {
            surface.rect(
                BUILDING_X + 8.0 + column as f64 * 26.0,
                window_row,
                14.0,
                11.0,
                Style::filled(fill).with_stroke(stroke, 1.0),
            );
        }
    }
}

fn draw_height_scale(surface: &mut Surface, scale: &MeterScale) {
    let step = nice_step(scale.range_m / 6.0);
    let tick_style = Style::stroked(SLATE_400, 1.0).with_opacity(0.6);
    for meters in ticks(0.0, scale.range_m - 1.0, step) {
        let row = scale.row(meters);
        surface.line(
            DVec2::new(14.0, row),
            DVec2::new(22.0, row),
            tick_style.clone(),
        );
        surface.text(
            DVec2::new(2.0, row + 4.0),
            format!("{meters:.0}"),
            9.0,
            SLATE_500,
        );
    }
    surface.text(
        DVec2::new(2.0, scale.row(scale.range_m - 1.0)),
        "y(m)",
        9.0,
        SLATE_500,
    );
}

fn draw_ghost_path(
    surface: &mut Surface,
    scale: &MeterScale,
    params: SimulationParameters,
    milestones: &DerivedMilestones,
) {
    // Long flights get a coarser step so the path stays bounded.
    let step = GHOST_STEP_S.max(milestones.time_to_impact_s / MAX_GHOST_POINTS);
    let points = sample_heights(params, milestones.time_to_impact_s, step)
        .into_iter()
        .map(|(_, y)| DVec2::new(BALL_X, scale.row(y.max(0.0))))
        .collect();
    let ghost = surface.path(
        points,
        Style::stroked(BALL_BLUE, 1.5)
            .with_dash(4.0, 4.0)
            .with_opacity(0.25),
    );
    surface.tag(ghost, "trajectory");
}

fn draw_reference_lines(
    surface: &mut Surface,
    scale: &MeterScale,
    params: SimulationParameters,
    milestones: &DerivedMilestones,
) {
    let (_, peak_m) = milestones.in_flight_peak(params);
    let peak_row = scale.row(peak_m);
    surface.line(
        DVec2::new(REFERENCE_LINE_START_X, peak_row),
        DVec2::new(REFERENCE_LINE_END_X, peak_row),
        Style::stroked(APEX_AMBER, 1.0)
            .with_opacity(0.5)
            .with_dash(5.0, 4.0),
    );
    surface.text(
        DVec2::new(REFERENCE_LABEL_X, peak_row + 4.0),
        format!("y_max={peak_m:.1}m"),
        9.0,
        APEX_AMBER,
    );

    let launch_row = scale.row(params.initial_height_m);
    surface.line(
        DVec2::new(REFERENCE_LINE_START_X, launch_row),
        DVec2::new(REFERENCE_LINE_END_X, launch_row),
        Style::stroked(LAUNCH_VIOLET, 1.0)
            .with_opacity(0.35)
            .with_dash(5.0, 4.0),
    );
    surface.text(
        DVec2::new(REFERENCE_LABEL_X, launch_row + 4.0),
        format!("y₀={:.1}m", params.initial_height_m),
        9.0,
        LAUNCH_VIOLET,
    );

    surface.text(
        DVec2::new(REFERENCE_LABEL_X, GROUND_ROW - 4.0),
        "y=0",
        9.0,
        SLATE_500,
    );
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

    fn default_scene() -> SceneView {
        let params = SimulationParameters::default();
        SceneView::build(params, &DerivedMilestones::from_parameters(params))
    }

    #[test]
    fn scale_pins_ground_and_top_margin() {
        let scene = default_scene();
        assert_close(scene.scale.row(0.0), GROUND_ROW, 1e-12);
        assert_close(scene.scale.row(scene.scale.range_m), TOP_MARGIN, 1e-9);
    }

    #[test]
    fn arrow_points_with_the_velocity() {
        assert_eq!(arrow_tip(200.0, 10.0), DVec2::new(ARROW_X, 180.0));
        assert_eq!(arrow_tip(200.0, -5.0), DVec2::new(ARROW_X, 210.0));
        assert_eq!(arrow_tip(200.0, 0.0), DVec2::new(ARROW_X, 200.0));
    }

    #[test]
    fn show_moves_all_mutable_elements() {
        let mut scene = default_scene();
        scene.show(1.5, 12.0, -4.5);

        let row = scene.scale.row(12.0);
        let surface = &scene.surface;
        for id in [scene.handles.ball, scene.handles.glow] {
            match &surface.get(id).expect("handle is live").shape {
                Shape::Circle { center, .. } => assert_eq!(*center, DVec2::new(BALL_X, row)),
                other => panic!("unexpected shape {other:?}"),
            }
        }
        match &surface.get(scene.handles.velocity_arrow).expect("arrow").shape {
            Shape::Line { from, to } => {
                assert_eq!(*from, DVec2::new(ARROW_X, row));
                assert_close(to.y, row + 9.0, 1e-9);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        match &surface.get(scene.handles.time_label).expect("label").shape {
            Shape::Text { content, .. } => assert_eq!(content, "t = 1.50 s"),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn rebuild_is_equivalent_and_fresh() {
        let params = SimulationParameters::default();
        let milestones = DerivedMilestones::from_parameters(params);
        let mut first = SceneView::build(params, &milestones);
        first.show(2.0, 5.0, -9.0);
        let second = SceneView::build(params, &milestones);
        let third = SceneView::build(params, &milestones);
        assert_eq!(second, third);
        assert_ne!(first, second);
        assert_eq!(first.handles, second.handles);
        assert_eq!(first.surface.len(), second.surface.len());
    }

    #[test]
    fn default_building_has_four_floors() {
        let scene = default_scene();
        let windows = scene
            .surface
            .elements()
            .iter()
            .filter(|e| matches!(e.shape, Shape::Rect { size, .. } if size == DVec2::new(14.0, 11.0)))
            .count();
        assert_eq!(windows, 8);
    }

    #[test]
    fn ground_launch_builds_without_nan() {
        let params = SimulationParameters {
            initial_velocity_mps: 0.0,
            initial_height_m: 0.0,
            gravity_mps2: 9.81,
        };
        let scene = SceneView::build(params, &DerivedMilestones::from_parameters(params));
        assert!(scene.surface.to_svg().find("NaN").is_none());
        assert_eq!(scene.ball_center(0.0).y, GROUND_ROW);
        let ghost = scene.surface.find("trajectory").expect("ghost path");
        match &scene.surface.get(ghost).expect("ghost").shape {
            Shape::Path { points } => assert_eq!(points.len(), 1),
            other => panic!("unexpected shape {other:?}"),
        }
    }
}
