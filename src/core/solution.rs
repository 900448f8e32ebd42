//! Worked solution shown step by step once a run reaches the ground.

use crate::core::kinematics::{DerivedMilestones, SimulationParameters};

#[derive(Clone, Debug, PartialEq)]
pub struct SolutionStep {
    pub title: &'static str,
    pub formula: &'static str,
    pub working: String,
}

pub fn solution_steps(
    params: SimulationParameters,
    milestones: &DerivedMilestones,
) -> Vec<SolutionStep> {
    let v0 = params.initial_velocity_mps;
    let y0 = params.initial_height_m;
    let g = params.gravity_mps2;
    vec![
        SolutionStep {
            title: "Time to apex",
            formula: "t_top = v0 / g",
            working: format!(
                "t_top = {v0:.2} / {g:.2} = {:.3} s",
                milestones.time_to_apex_s
            ),
        },
        SolutionStep {
            title: "Maximum height",
            formula: "y_max = y0 + v0*t_top - g*t_top^2/2",
            working: format!(
                "y_max = {y0:.2} + {v0:.2}*{t:.3} - {g:.2}*{t:.3}^2/2 = {:.2} m",
                milestones.apex_height_m,
                t = milestones.time_to_apex_s
            ),
        },
        SolutionStep {
            title: "Time to impact",
            formula: "t = (v0 + sqrt(v0^2 + 2*g*y0)) / g",
            working: format!(
                "t = ({v0:.2} + sqrt({v0:.2}^2 + 2*{g:.2}*{y0:.2})) / {g:.2} = {:.3} s",
                milestones.time_to_impact_s
            ),
        },
        SolutionStep {
            title: "Impact velocity",
            formula: "v = v0 - g*t",
            working: format!(
                "v = {v0:.2} - {g:.2}*{:.3} = {:.2} m/s",
                milestones.time_to_impact_s, milestones.impact_velocity_mps
            ),
        },
    ]
}
