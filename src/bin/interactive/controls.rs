use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::constants::{PANEL_H, PANEL_W, PANEL_X, PANEL_Y, SCRUB_KEY_STEP_S};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) play_pause: bool,
    pub(crate) reset: bool,
    pub(crate) apply: bool,
    /// Absolute time picked on the slider.
    pub(crate) scrub_to: Option<f64>,
    /// Relative nudge from the arrow keys.
    pub(crate) scrub_by: f64,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            play_pause: self.play_pause || other.play_pause,
            reset: self.reset || other.reset,
            apply: self.apply || other.apply,
            scrub_to: other.scrub_to.or(self.scrub_to),
            scrub_by: self.scrub_by + other.scrub_by,
        }
    }
}

/// Shortcut keys pressed this frame.
#[derive(Default, Clone, Copy)]
pub(crate) struct KeyPresses {
    pub(crate) space: bool,
    pub(crate) reset: bool,
    pub(crate) enter: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

pub(crate) fn read_keys() -> KeyPresses {
    KeyPresses {
        space: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        enter: is_key_pressed(KeyCode::Enter),
        left: is_key_pressed(KeyCode::Left),
        right: is_key_pressed(KeyCode::Right),
    }
}

fn panel_rect() -> Rect {
    Rect::new(PANEL_X, PANEL_Y, PANEL_W, PANEL_H)
}

/// A click inside the panel hands the keyboard to its text fields; a click
/// anywhere else hands it back to the shortcuts.
pub(crate) fn panel_focus_after(focused: bool, click: Option<Vec2>) -> bool {
    match click {
        Some(point) => panel_rect().contains(point),
        None => focused,
    }
}

/// While the panel has the keyboard only Enter (apply) is honoured.
pub(crate) fn hotkey_actions(keys: KeyPresses, panel_focused: bool) -> FrameActions {
    if panel_focused {
        return FrameActions {
            apply: keys.enter,
            ..Default::default()
        };
    }
    let mut scrub_by = 0.0;
    if keys.left {
        scrub_by -= SCRUB_KEY_STEP_S;
    }
    if keys.right {
        scrub_by += SCRUB_KEY_STEP_S;
    }
    FrameActions {
        play_pause: keys.space,
        reset: keys.reset,
        apply: keys.enter,
        scrub_to: None,
        scrub_by,
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let t_end = state.playback.milestones().time_to_impact_s as f32;
    let play_label = format!("{} (Space)", state.playback.play_label());
    let slider_label = format!("Time  {}", state.playback.readouts().slider);

    state.slider_time = state.playback.time_s() as f32;
    let before = state.slider_time;

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(PANEL_X, PANEL_Y), vec2(PANEL_W, PANEL_H))
        .label("Throw Parameters")
        .movable(false)
        .ui(&mut *root_ui(), |ui| {
            ui.input_text(hash!(), "v0 (m/s)", &mut state.form.velocity);
            ui.input_text(hash!(), "y0 (m)", &mut state.form.height);
            ui.input_text(hash!(), "g (m/s^2)", &mut state.form.gravity);
            if ui.button(None, "Apply (Enter)") {
                actions.apply = true;
            }
            ui.separator();
            if ui.button(None, play_label.as_str()) {
                actions.play_pause = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            ui.separator();
            ui.slider(
                hash!(),
                &slider_label,
                0.0..t_end.max(0.001),
                &mut state.slider_time,
            );
            ui.label(None, "Click outside this panel to use the shortcuts");
        });

    if (state.slider_time - before).abs() > f32::EPSILON {
        actions.scrub_to = Some(f64::from(state.slider_time));
    }
    actions
}
