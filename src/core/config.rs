//! Command-line and environment configuration shared by both binaries.
//!
//! Options that only make sense for one binary (playback speed for the window,
//! snapshot export for the CLI) live with that binary's own argument group.

use std::path::PathBuf;

use clap::Args;

use crate::core::params::{ParameterForm, Resolved, resolve};
use crate::core::playback::FULL_FLIGHT_DURATION_S;

/// Launch parameters as typed by the user. Kept as text so the same fallback
/// rules apply as for the interactive form.
#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Initial vertical velocity in m/s (positive is upward).
    #[arg(long, short = 'v', default_value = "10", env = "VT_VELOCITY", allow_hyphen_values = true)]
    pub velocity: String,

    /// Initial height above the ground in m.
    #[arg(long, short = 'y', default_value = "20", env = "VT_HEIGHT", allow_hyphen_values = true)]
    pub height: String,

    /// Gravitational acceleration in m/s^2 (must be positive).
    #[arg(long, short = 'g', default_value = "9.81", env = "VT_GRAVITY", allow_hyphen_values = true)]
    pub gravity: String,
}

impl LaunchArgs {
    pub fn form(&self) -> ParameterForm {
        ParameterForm {
            velocity: self.velocity.clone(),
            height: self.height.clone(),
            gravity: self.gravity.clone(),
        }
    }

    pub fn resolve(&self) -> Resolved {
        resolve(&self.form())
    }
}

/// Options of the headless snapshot/export binary.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Print the readouts at this simulation time (clamped to the flight).
    #[arg(long)]
    pub at: Option<f64>,

    /// Write the scene and both charts as SVG files into this directory.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

/// Options of the interactive window.
#[derive(Args, Debug, Clone)]
pub struct PlaybackArgs {
    /// Wall-clock seconds a full flight takes to play back.
    #[arg(long, default_value_t = FULL_FLIGHT_DURATION_S, env = "VT_DURATION")]
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct HeadlessCli {
        #[command(flatten)]
        launch: LaunchArgs,
        #[command(flatten)]
        snapshot: SnapshotArgs,
    }

    #[derive(Parser, Debug)]
    struct WindowCli {
        #[command(flatten)]
        launch: LaunchArgs,
        #[command(flatten)]
        playback: PlaybackArgs,
    }

    #[test]
    fn negative_values_parse_as_text() {
        let cli = HeadlessCli::try_parse_from(["vt", "-v", "-12.5", "--height", "0"]).unwrap();
        assert_eq!(cli.launch.velocity, "-12.5");
        assert_eq!(cli.launch.height, "0");
        assert!(cli.launch.resolve().rejected.is_empty());
    }

    #[test]
    fn duration_belongs_to_the_window_only() {
        assert!(HeadlessCli::try_parse_from(["vt", "--duration", "8"]).is_err());
        let cli = WindowCli::try_parse_from(["vt", "--duration", "8"]).unwrap();
        assert_eq!(cli.playback.duration, 8.0);
    }
}
