use macroquad::prelude::*;
use vertical_throw::core::config::{LaunchArgs, PlaybackArgs};
use vertical_throw::core::scene::{SIM_H, SIM_W};

use crate::actions::apply_actions;
use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MSAA_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH, VIEW_GAP,
};
use crate::controls::{draw_control_panel, hotkey_actions, panel_focus_after, read_keys};
use crate::hud::draw_hud;
use crate::render::draw_surface;
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Vertical Throw".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

/// Screen rectangles for the scene and the two charts.
struct Layout {
    scene: Rect,
    velocity_chart: Rect,
    height_chart: Rect,
}

impl Layout {
    fn for_screen(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        let height = (bottom - top).max(1.0);
        let scene_w = (height * (SIM_W / SIM_H) as f32).min((right - left) * 0.4).max(1.0);
        let charts_x = left + scene_w + VIEW_GAP;
        let chart_h = ((height - VIEW_GAP) * 0.5).max(1.0);
        let chart_w = (right - charts_x).max(1.0);
        Self {
            scene: Rect::new(left, top, scene_w, height),
            velocity_chart: Rect::new(charts_x, top, chart_w, chart_h),
            height_chart: Rect::new(charts_x, top + chart_h + VIEW_GAP, chart_w, chart_h),
        }
    }
}

pub(crate) async fn run(launch: LaunchArgs, playback: PlaybackArgs) {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("could not load '{UI_FONT_PATH}': {err}; falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new(&launch, &playback);

    loop {
        let now = get_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let left = LEFT_MARGIN;
        let right = screen_w - RIGHT_MARGIN;
        let top = TOP_MARGIN;
        let bottom = screen_h - BOTTOM_MARGIN;

        let click = is_mouse_button_pressed(MouseButton::Left).then(|| Vec2::from(mouse_position()));
        state.panel_focused = panel_focus_after(state.panel_focused, click);
        let actions = hotkey_actions(read_keys(), state.panel_focused)
            .merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions, now);
        state.playback.tick(now);

        clear_background(BACKGROUND);
        let layout = Layout::for_screen(left, right, top, bottom);
        draw_surface(&state.playback.scene().surface, layout.scene, ui_font.as_ref());
        draw_surface(
            &state.playback.velocity_graph().surface,
            layout.velocity_chart,
            ui_font.as_ref(),
        );
        draw_surface(
            &state.playback.height_graph().surface,
            layout.height_chart,
            ui_font.as_ref(),
        );
        draw_hud(&state, left, bottom, ui_font.as_ref());

        next_frame().await;
    }
}
