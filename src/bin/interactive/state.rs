use vertical_throw::core::config::{LaunchArgs, PlaybackArgs};
use vertical_throw::core::params::{ParameterForm, Resolved, resolve};
use vertical_throw::core::playback::Playback;

pub(crate) struct AppRuntime {
    pub(crate) playback: Playback,
    pub(crate) form: ParameterForm,
    pub(crate) slider_time: f32,
    /// The parameter panel owns the keyboard.
    pub(crate) panel_focused: bool,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(launch: &LaunchArgs, options: &PlaybackArgs) -> Self {
        let resolved = launch.resolve();
        let playback = Playback::new(resolved.params).with_full_duration(options.duration);
        let mut state = Self {
            playback,
            form: ParameterForm::from_parameters(resolved.params),
            slider_time: 0.0,
            panel_focused: false,
            status_line: String::new(),
        };
        state.set_status_from(&resolved);
        state
    }

    /// Re-reads the form, rebuilds every view and writes the accepted values back.
    pub(crate) fn apply_form(&mut self) {
        let resolved = resolve(&self.form);
        if let Err(err) = self.playback.apply(resolved.params) {
            self.status_line = format!("{err}; parameters unchanged");
            return;
        }
        self.form = ParameterForm::from_parameters(resolved.params);
        self.set_status_from(&resolved);
    }

    fn set_status_from(&mut self, resolved: &Resolved) {
        self.status_line = if resolved.rejected.is_empty() {
            format!(
                "Applied: flight lasts {:.3} s",
                self.playback.milestones().time_to_impact_s
            )
        } else {
            resolved
                .rejected
                .iter()
                .map(|err| format!("{err}; default used"))
                .collect::<Vec<_>>()
                .join(" | ")
        };
    }
}
