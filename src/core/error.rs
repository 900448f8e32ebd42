use std::fmt;

use thiserror::Error;

/// Which input field a parameter problem belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterField {
    Velocity,
    Height,
    Gravity,
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Velocity => "initial velocity",
            Self::Height => "initial height",
            Self::Gravity => "gravity",
        })
    }
}

/// A rejected user value. Always recovered by substituting the field's default.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParameterError {
    #[error("invalid {field}: '{input}' is not a number")]
    NotANumber { field: ParameterField, input: String },
    #[error("invalid {field}: value must be finite")]
    NonFinite { field: ParameterField },
    #[error("invalid gravity: {value} must be greater than zero")]
    NonPositiveGravity { value: f64 },
    #[error("invalid {field}: {value} is outside {min}..={max}")]
    OutOfRange {
        field: ParameterField,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("no ground impact: v0^2 + 2*g*y0 is negative ({discriminant})")]
    NoGroundImpact { discriminant: f64 },
}

impl ParameterError {
    pub fn field(&self) -> ParameterField {
        match self {
            Self::NotANumber { field, .. }
            | Self::NonFinite { field }
            | Self::OutOfRange { field, .. } => *field,
            Self::NonPositiveGravity { .. } => ParameterField::Gravity,
            Self::NoGroundImpact { .. } => ParameterField::Height,
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not draw chart '{path}': {message}")]
    Plot { path: String, message: String },
}
