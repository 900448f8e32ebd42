pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const DEFAULT_VELOCITY_MPS: f64 = 10.0;
pub const DEFAULT_HEIGHT_M: f64 = 20.0;

/// Launch conditions for one run. Replaced as a whole when the user applies new values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
    pub initial_velocity_mps: f64,
    pub initial_height_m: f64,
    pub gravity_mps2: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_velocity_mps: DEFAULT_VELOCITY_MPS,
            initial_height_m: DEFAULT_HEIGHT_M,
            gravity_mps2: EARTH_GRAVITY_MPS2,
        }
    }
}

/// Scalar milestones of a flight, always recomputed from the parameters they belong to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedMilestones {
    pub time_to_apex_s: f64,
    pub apex_height_m: f64,
    pub time_to_impact_s: f64,
    pub impact_velocity_mps: f64,
}

pub fn position(params: SimulationParameters, time_s: f64) -> f64 {
    params.initial_height_m + (params.initial_velocity_mps * time_s)
        - (0.5 * params.gravity_mps2 * time_s * time_s)
}

pub fn velocity(params: SimulationParameters, time_s: f64) -> f64 {
    params.initial_velocity_mps - (params.gravity_mps2 * time_s)
}

/// Height that may be shown on screen: the analytic value never goes below ground.
pub fn display_height(params: SimulationParameters, time_s: f64) -> f64 {
    let y = position(params, time_s);
    // Also folds -0.0 into 0.0 so readouts never print "-0.00".
    if y > 0.0 { y } else { 0.0 }
}

/// `v0^2 + 2*g*y0`, the discriminant of the ground-impact quadratic.
pub fn impact_discriminant(params: SimulationParameters) -> f64 {
    params.initial_velocity_mps * params.initial_velocity_mps
        + 2.0 * params.gravity_mps2 * params.initial_height_m
}

/// Non-negative root of `y0 + v0*t - g*t^2/2 = 0`, if the flight reaches the ground at all.
pub fn time_to_impact(params: SimulationParameters) -> Option<f64> {
    let disc = impact_discriminant(params);
    if disc < 0.0 || params.gravity_mps2 <= 0.0 {
        return None;
    }
    let t = (params.initial_velocity_mps + disc.sqrt()) / params.gravity_mps2;
    (t.is_finite() && t >= 0.0).then_some(t)
}

impl DerivedMilestones {
    /// Callers are expected to pass validated parameters (see `params::resolve`);
    /// an unreachable ground is reported as a zero-length flight.
    pub fn from_parameters(params: SimulationParameters) -> Self {
        let time_to_apex_s = params.initial_velocity_mps / params.gravity_mps2;
        let time_to_impact_s = time_to_impact(params).unwrap_or(0.0);
        Self {
            time_to_apex_s,
            apex_height_m: position(params, time_to_apex_s),
            time_to_impact_s,
            impact_velocity_mps: velocity(params, time_to_impact_s),
        }
    }

    /// Highest point actually reached during `[0, time_to_impact]`.
    ///
    /// Equals the analytic apex when the ball is thrown upward; for a downward throw the
    /// apex lies before launch and the peak is the launch point itself.
    pub fn in_flight_peak(&self, params: SimulationParameters) -> (f64, f64) {
        let t = self.time_to_apex_s.clamp(0.0, self.time_to_impact_s);
        (t, position(params, t))
    }

    pub fn is_degenerate(&self) -> bool {
        self.time_to_impact_s <= 0.0
    }
}

/// `(t, y(t))` pairs covering `[0, time_to_impact]` every `step_s`, always ending exactly at impact.
pub fn sample_heights(
    params: SimulationParameters,
    time_to_impact_s: f64,
    step_s: f64,
) -> Vec<(f64, f64)> {
    let step = step_s.max(f64::EPSILON);
    let whole_steps = (time_to_impact_s / step).floor().max(0.0) as usize;
    let mut samples: Vec<(f64, f64)> = (0..=whole_steps)
        .map(|i| {
            let t = i as f64 * step;
            (t, position(params, t))
        })
        .collect();
    let last_t = whole_steps as f64 * step;
    if time_to_impact_s - last_t > 1e-9 {
        samples.push((time_to_impact_s, position(params, time_to_impact_s)));
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn default_throw_milestones() {
        let params = SimulationParameters::default();
        let m = DerivedMilestones::from_parameters(params);

        assert_close(m.time_to_apex_s, 1.0194, 0.0001);
        assert_close(m.apex_height_m, 25.097, 0.001);
        assert_close(m.time_to_impact_s, 3.2814, 0.0001);
        assert_close(m.impact_velocity_mps, -22.190, 0.001);
    }

    #[test]
    fn starts_at_launch_conditions() {
        let params = SimulationParameters::default();
        assert_close(position(params, 0.0), 20.0, 1e-12);
        assert_close(velocity(params, 0.0), 10.0, 1e-12);
    }

    #[test]
    fn lands_on_the_ground_at_impact_time() {
        let params = SimulationParameters {
            initial_velocity_mps: 3.5,
            initial_height_m: 7.25,
            gravity_mps2: 1.62,
        };
        let m = DerivedMilestones::from_parameters(params);
        assert_close(position(params, m.time_to_impact_s), 0.0, 1e-9);
        assert_close(velocity(params, m.time_to_apex_s), 0.0, 1e-12);
    }

    #[test]
    fn ground_launch_is_a_zero_length_flight() {
        let params = SimulationParameters {
            initial_velocity_mps: 0.0,
            initial_height_m: 0.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
        };
        let m = DerivedMilestones::from_parameters(params);
        assert_eq!(m.time_to_impact_s, 0.0);
        assert!(m.is_degenerate());
        assert_eq!(m.impact_velocity_mps, 0.0);
    }

    #[test]
    fn unreachable_ground_has_no_impact_time() {
        let params = SimulationParameters {
            initial_velocity_mps: 1.0,
            initial_height_m: -10.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
        };
        assert!(time_to_impact(params).is_none());
    }

    #[test]
    fn display_height_never_goes_negative() {
        let params = SimulationParameters::default();
        let m = DerivedMilestones::from_parameters(params);
        assert_eq!(display_height(params, m.time_to_impact_s + 0.5), 0.0);
        assert_eq!(format!("{:.2}", display_height(params, m.time_to_impact_s)), "0.00");
    }

    #[test]
    fn downward_throw_peaks_at_launch() {
        let params = SimulationParameters {
            initial_velocity_mps: -4.0,
            initial_height_m: 12.0,
            gravity_mps2: EARTH_GRAVITY_MPS2,
        };
        let m = DerivedMilestones::from_parameters(params);
        assert!(m.time_to_apex_s < 0.0);
        let (t, y) = m.in_flight_peak(params);
        assert_eq!(t, 0.0);
        assert_close(y, 12.0, 1e-12);
    }

    #[test]
    fn height_samples_end_exactly_at_impact() {
        let params = SimulationParameters::default();
        let m = DerivedMilestones::from_parameters(params);
        let samples = sample_heights(params, m.time_to_impact_s, 0.02);

        assert_eq!(samples[0], (0.0, 20.0));
        let (last_t, last_y) = *samples.last().expect("at least one sample");
        assert_close(last_t, m.time_to_impact_s, 1e-12);
        assert_close(last_y, 0.0, 1e-9);
        assert_eq!(sample_heights(params, 0.0, 0.02).len(), 1);
    }
}
