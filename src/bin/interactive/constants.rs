use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const PANEL_X: f32 = 18.0;
pub const PANEL_Y: f32 = 96.0;
pub const PANEL_W: f32 = 340.0;
pub const PANEL_H: f32 = 430.0;

pub const LEFT_MARGIN: f32 = PANEL_X + PANEL_W + 24.0;
pub const RIGHT_MARGIN: f32 = 24.0;
pub const TOP_MARGIN: f32 = 96.0;
pub const BOTTOM_MARGIN: f32 = 150.0;
pub const VIEW_GAP: f32 = 18.0;

pub const TITLE_Y: f32 = 44.0;
pub const CONTROLS_Y: f32 = 74.0;
pub const SCRUB_KEY_STEP_S: f64 = 0.05;
/// Gradient fills are painted as this many horizontal bands.
pub const GRADIENT_BANDS: usize = 48;

pub const BACKGROUND: Color = Color::new(0.97, 0.98, 0.99, 1.0);
pub const HEADER_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const VIEW_BORDER: Color = Color::new(0.80, 0.84, 0.88, 1.0);
