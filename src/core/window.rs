//! Axis windows shared by the scene and the two charts.

use crate::core::kinematics::{DerivedMilestones, SimulationParameters};

/// Smallest vertical span the scene ever shows, so a short drop still has room.
pub const MIN_SCENE_RANGE_M: f64 = 10.0;
const APEX_HEADROOM_M: f64 = 3.0;
const LAUNCH_HEADROOM_M: f64 = 5.0;

const VALUE_GRID_STEP: f64 = 5.0;
const TIME_GRID_STEP_S: f64 = 0.5;
const MAX_GRID_LINES: f64 = 12.0;

/// Closed value interval of one chart axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        (self.max - self.min).max(f64::EPSILON)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn floor_to(value: f64, step: f64) -> f64 {
    (value / step).floor() * step
}

fn ceil_to(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

/// Meters covered between the ground row and the top margin of the scene.
pub fn scene_range_m(params: SimulationParameters, milestones: &DerivedMilestones) -> f64 {
    let (_, peak_m) = milestones.in_flight_peak(params);
    (peak_m + APEX_HEADROOM_M)
        .max(params.initial_height_m + LAUNCH_HEADROOM_M)
        .max(MIN_SCENE_RANGE_M)
}

/// Time axis: impact rounded up to a tenth of a second plus a little margin.
pub fn time_axis(milestones: &DerivedMilestones) -> AxisRange {
    AxisRange {
        min: 0.0,
        max: ceil_to(milestones.time_to_impact_s, 0.1) + 0.2,
    }
}

/// Velocity axis from the impact velocity (floored to 5) up to the launch velocity
/// (ceiled to 5) plus one extra grid step.
pub fn velocity_axis(params: SimulationParameters, milestones: &DerivedMilestones) -> AxisRange {
    AxisRange {
        min: floor_to(milestones.impact_velocity_mps, VALUE_GRID_STEP),
        max: ceil_to(params.initial_velocity_mps, VALUE_GRID_STEP) + VALUE_GRID_STEP,
    }
}

/// Height axis from just below ground up to the peak (ceiled to 5) plus headroom.
pub fn height_axis(params: SimulationParameters, milestones: &DerivedMilestones) -> AxisRange {
    let (_, peak_m) = milestones.in_flight_peak(params);
    AxisRange {
        min: -2.0,
        max: ceil_to(peak_m, VALUE_GRID_STEP) + APEX_HEADROOM_M,
    }
}

/// Rounds a raw step up to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Gridline spacing for value axes: every 5 units unless that would crowd the chart.
pub fn value_grid_step(range: AxisRange) -> f64 {
    VALUE_GRID_STEP.max(nice_step(range.span() / MAX_GRID_LINES))
}

/// Gridline spacing for the time axis: every half second unless that would crowd the chart.
pub fn time_grid_step(range: AxisRange) -> f64 {
    TIME_GRID_STEP_S.max(nice_step(range.span() / MAX_GRID_LINES))
}

/// Tick values `start, start + step, ...` not exceeding `end`, computed without drift.
pub fn ticks(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end < start {
        return vec![start];
    }
    let count = ((end - start) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}
