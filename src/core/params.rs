//! Turns the three text fields of the parameter form into a validated
//! [`SimulationParameters`] value.
//!
//! Nothing here fails hard: every rejected field is replaced by its documented
//! default and reported back so the caller can show a status line.

use crate::core::error::{ParameterError, ParameterField};
use crate::core::kinematics::{
    DEFAULT_HEIGHT_M, DEFAULT_VELOCITY_MPS, EARTH_GRAVITY_MPS2, SimulationParameters,
    impact_discriminant, time_to_impact,
};

pub const MAX_ABS_VELOCITY_MPS: f64 = 1_000.0;
pub const MAX_ABS_HEIGHT_M: f64 = 10_000.0;
pub const MAX_GRAVITY_MPS2: f64 = 1_000.0;

/// Raw, unvalidated text of the parameter form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterForm {
    pub velocity: String,
    pub height: String,
    pub gravity: String,
}

impl ParameterForm {
    pub fn from_parameters(params: SimulationParameters) -> Self {
        Self {
            velocity: format_field(params.initial_velocity_mps),
            height: format_field(params.initial_height_m),
            gravity: format_field(params.gravity_mps2),
        }
    }
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self::from_parameters(SimulationParameters::default())
    }
}

fn format_field(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Parameters that survived validation plus every fallback that was applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub params: SimulationParameters,
    pub rejected: Vec<ParameterError>,
}

fn parse_field(input: &str, field: ParameterField) -> Result<f64, ParameterError> {
    let trimmed = input.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ParameterError::NotANumber {
            field,
            input: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { field });
    }
    Ok(value)
}

fn check_range(value: f64, field: ParameterField, max_abs: f64) -> Result<f64, ParameterError> {
    if value.abs() > max_abs {
        return Err(ParameterError::OutOfRange {
            field,
            value,
            min: -max_abs,
            max: max_abs,
        });
    }
    Ok(value)
}

pub fn parse_velocity(input: &str) -> Result<f64, ParameterError> {
    let value = parse_field(input, ParameterField::Velocity)?;
    check_range(value, ParameterField::Velocity, MAX_ABS_VELOCITY_MPS)
}

pub fn parse_height(input: &str) -> Result<f64, ParameterError> {
    let value = parse_field(input, ParameterField::Height)?;
    check_range(value, ParameterField::Height, MAX_ABS_HEIGHT_M)
}

pub fn parse_gravity(input: &str) -> Result<f64, ParameterError> {
    check_gravity(parse_field(input, ParameterField::Gravity)?)
}

fn check_gravity(value: f64) -> Result<f64, ParameterError> {
    if value <= 0.0 {
        return Err(ParameterError::NonPositiveGravity { value });
    }
    if value > MAX_GRAVITY_MPS2 {
        return Err(ParameterError::OutOfRange {
            field: ParameterField::Gravity,
            value,
            min: 0.0,
            max: MAX_GRAVITY_MPS2,
        });
    }
    Ok(value)
}

/// Validates a complete set, e.g. one built in code rather than typed in.
pub fn validate(params: SimulationParameters) -> Result<SimulationParameters, ParameterError> {
    check_range(
        finite(params.initial_velocity_mps, ParameterField::Velocity)?,
        ParameterField::Velocity,
        MAX_ABS_VELOCITY_MPS,
    )?;
    check_range(
        finite(params.initial_height_m, ParameterField::Height)?,
        ParameterField::Height,
        MAX_ABS_HEIGHT_M,
    )?;
    check_gravity(finite(params.gravity_mps2, ParameterField::Gravity)?)?;
    if time_to_impact(params).is_none() {
        return Err(ParameterError::NoGroundImpact {
            discriminant: impact_discriminant(params),
        });
    }
    Ok(params)
}

fn finite(value: f64, field: ParameterField) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite { field })
    }
}

fn or_default(
    result: Result<f64, ParameterError>,
    default: f64,
    rejected: &mut Vec<ParameterError>,
) -> f64 {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{err}; using {default}");
            rejected.push(err);
            default
        }
    }
}

/// Resolves the form into a usable parameter set.
///
/// Each field is parsed on its own; a bad field falls back to its default without
/// touching the others. If the combination never reaches the ground the height
/// falls back to its default, which always yields a positive impact time.
pub fn resolve(form: &ParameterForm) -> Resolved {
    let mut rejected = Vec::new();
    let mut params = SimulationParameters {
        initial_velocity_mps: or_default(
            parse_velocity(&form.velocity),
            DEFAULT_VELOCITY_MPS,
            &mut rejected,
        ),
        initial_height_m: or_default(parse_height(&form.height), DEFAULT_HEIGHT_M, &mut rejected),
        gravity_mps2: or_default(
            parse_gravity(&form.gravity),
            EARTH_GRAVITY_MPS2,
            &mut rejected,
        ),
    };

    if time_to_impact(params).is_none() {
        let err = ParameterError::NoGroundImpact {
            discriminant: impact_discriminant(params),
        };
        log::warn!("{err}; using height {DEFAULT_HEIGHT_M}");
        rejected.push(err);
        params.initial_height_m = DEFAULT_HEIGHT_M;
    }

    Resolved { params, rejected }
}
