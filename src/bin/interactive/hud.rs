use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, HEADER_COLOR, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(
    state: &AppRuntime,
    left: f32,
    bottom: f32,
    font: Option<&Font>,
) {
    draw_header_block(left, font);
    draw_readouts(state, left, bottom + 34.0, font);
    draw_solution(state, left, bottom + 64.0, font);
}

fn draw_header_block(left: f32, font: Option<&Font>) {
    draw_ui_text(
        "Vertical Throw - Kinematics Playground",
        left,
        TITLE_Y,
        30,
        HEADER_COLOR,
        font,
    );
    draw_ui_text(
        "Controls: Space play/pause | R reset | Left/Right scrub | Enter apply parameters",
        left,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

fn draw_readouts(state: &AppRuntime, left: f32, y: f32, font: Option<&Font>) {
    let readouts = state.playback.readouts();
    draw_ui_text(
        &format!(
            "t = {}   v = {}   y = {}   a = {}",
            readouts.time, readouts.velocity, readouts.height, readouts.acceleration
        ),
        left,
        y,
        22,
        HEADER_COLOR,
        font,
    );
    draw_ui_text(&state.status_line, left, y - 26.0, 18, DARKGRAY, font);
}

fn draw_solution(state: &AppRuntime, left: f32, y: f32, font: Option<&Font>) {
    for (i, step) in state.playback.visible_steps().iter().enumerate() {
        draw_ui_text(
            &format!("{}. {}: {}", i + 1, step.title, step.working),
            left,
            y + i as f32 * 20.0,
            18,
            DARKGRAY,
            font,
        );
    }
}
