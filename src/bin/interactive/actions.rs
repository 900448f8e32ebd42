use vertical_throw::core::playback::PlaybackState;

use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions, now_s: f64) {
    if actions.apply {
        state.apply_form();
        log::info!("parameters applied: {:?}", state.playback.params());
    }

    if actions.reset {
        state.playback.reset();
        state.status_line = "Reset".to_string();
    }

    if actions.play_pause {
        state.playback.toggle(now_s);
        state.status_line = match state.playback.state() {
            PlaybackState::Playing => "Playing".to_string(),
            PlaybackState::Paused => "Paused".to_string(),
            PlaybackState::Idle => "Ready".to_string(),
        };
    }

    if let Some(time_s) = actions.scrub_to {
        state.playback.scrub(time_s);
    }

    if actions.scrub_by != 0.0 {
        let target = state.playback.time_s() + actions.scrub_by;
        state.playback.scrub(target);
    }
}
