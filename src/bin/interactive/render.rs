use glam::DVec2;
use macroquad::prelude::*;
use vertical_throw::core::surface::{Element, GradientStop, Paint, Rgba, Shape, Surface};

use crate::constants::{GRADIENT_BANDS, VIEW_BORDER};

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

/// Maps a surface's view box into `dest`, keeping the aspect ratio and centring the result.
struct Viewport {
    origin: Vec2,
    scale: f32,
}

impl Viewport {
    fn fit(view_box: DVec2, dest: Rect) -> Self {
        let scale = (dest.w / view_box.x as f32).min(dest.h / view_box.y as f32);
        let used = vec2(view_box.x as f32 * scale, view_box.y as f32 * scale);
        Self {
            origin: vec2(dest.x + (dest.w - used.x) * 0.5, dest.y + (dest.h - used.y) * 0.5),
            scale,
        }
    }

    fn point(&self, p: DVec2) -> Vec2 {
        self.origin + vec2(p.x as f32, p.y as f32) * self.scale
    }

    fn length(&self, value: f64) -> f32 {
        value as f32 * self.scale
    }
}

fn to_color(color: Rgba, opacity: f64) -> Color {
    Color::from_rgba(
        color.r,
        color.g,
        color.b,
        (color.a * opacity * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

fn gradient_at(stops: &[GradientStop], offset: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::WHITE;
    };
    let mut previous = first;
    for stop in stops {
        if offset <= stop.offset {
            let span = stop.offset - previous.offset;
            if span <= 0.0 {
                return stop.color;
            }
            let k = (offset - previous.offset) / span;
            let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * k).round() as u8;
            return Rgba {
                r: mix(previous.color.r, stop.color.r),
                g: mix(previous.color.g, stop.color.g),
                b: mix(previous.color.b, stop.color.b),
                a: previous.color.a + (stop.color.a - previous.color.a) * k,
            };
        }
        previous = stop;
    }
    previous.color
}

/// Visible runs of a dash pattern laid along a polyline. The pattern continues
/// across vertices instead of restarting on every segment.
fn dash_runs(points: &[Vec2], dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let period = dash + gap;
    let mut runs = Vec::new();
    // Distance already covered in the current dash + gap period.
    let mut phase = 0.0f32;
    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let length = from.distance(to);
        if length <= f32::EPSILON {
            continue;
        }
        let dir = (to - from) / length;
        let mut travelled = 0.0f32;
        while travelled < length {
            let left = length - travelled;
            if phase < dash {
                let step = (dash - phase).min(left);
                runs.push((from + dir * travelled, from + dir * (travelled + step)));
                travelled += step;
                phase = if step >= dash - phase { dash } else { phase + step };
            } else {
                let step = (period - phase).min(left);
                travelled += step;
                phase = if step >= period - phase { 0.0 } else { phase + step };
            }
        }
    }
    runs
}

fn draw_polyline(points: &[Vec2], thickness: f32, color: Color, dash: Option<(f32, f32)>) {
    match dash.filter(|(d, g)| *d > 0.0 && *g >= 0.0) {
        Some((dash, gap)) => {
            for (a, b) in dash_runs(points, dash, gap) {
                draw_line(a.x, a.y, b.x, b.y, thickness, color);
            }
        }
        None => {
            for pair in points.windows(2) {
                draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, thickness, color);
            }
        }
    }
}

fn draw_arrow_head(from: Vec2, to: Vec2, thickness: f32, color: Color) {
    let length = from.distance(to);
    if length <= f32::EPSILON {
        return;
    }
    let dir = (to - from) / length;
    let normal = vec2(-dir.y, dir.x);
    let head = (thickness * 3.5).max(6.0);
    let base = to - dir * head;
    draw_triangle(
        to,
        base + normal * head * 0.4,
        base - normal * head * 0.4,
        color,
    );
}

fn draw_element(element: &Element, view: &Viewport, font: Option<&Font>) {
    let style = &element.style;
    if style.opacity <= 0.0 {
        return;
    }
    let thickness = view.length(style.stroke_width).max(1.0);
    let dash = style
        .dash
        .map(|(d, g)| (view.length(d), view.length(g)));
    let stroke = style.stroke.map(|c| to_color(c, style.opacity));

    match &element.shape {
        Shape::Rect { origin, size } => {
            let top_left = view.point(*origin);
            let w = view.length(size.x);
            let h = view.length(size.y);
            match &style.fill {
                Some(Paint::Solid(color)) => {
                    draw_rectangle(top_left.x, top_left.y, w, h, to_color(*color, style.opacity));
                }
                Some(Paint::VerticalGradient(stops)) => {
                    let band = h / GRADIENT_BANDS as f32;
                    for i in 0..GRADIENT_BANDS {
                        let offset = (i as f64 + 0.5) / GRADIENT_BANDS as f64;
                        let color = to_color(gradient_at(stops, offset), style.opacity);
                        draw_rectangle(top_left.x, top_left.y + band * i as f32, w, band + 0.5, color);
                    }
                }
                None => {}
            }
            if let Some(color) = stroke {
                draw_rectangle_lines(top_left.x, top_left.y, w, h, thickness, color);
            }
        }
        Shape::Line { from, to } => {
            if let Some(color) = stroke {
                let (a, b) = (view.point(*from), view.point(*to));
                draw_polyline(&[a, b], thickness, color, dash);
                if style.arrow_head {
                    draw_arrow_head(a, b, thickness, color);
                }
            }
        }
        Shape::Circle { center, radius } => {
            let c = view.point(*center);
            let r = view.length(*radius);
            if let Some(Paint::Solid(color)) = &style.fill {
                draw_circle(c.x, c.y, r, to_color(*color, style.opacity));
            }
            if let Some(color) = stroke {
                draw_circle_lines(c.x, c.y, r, thickness, color);
            }
        }
        Shape::Text { anchor, content, size } => {
            let color = match &style.fill {
                Some(Paint::Solid(color)) => to_color(*color, style.opacity),
                _ => to_color(Rgba::hex(0x222222), style.opacity),
            };
            let p = view.point(*anchor);
            let font_size = view.length(*size).round().max(6.0) as u16;
            draw_ui_text(content, p.x, p.y, font_size, color, font);
        }
        Shape::Path { points } => {
            if let Some(color) = stroke {
                let screen: Vec<Vec2> = points.iter().map(|p| view.point(*p)).collect();
                draw_polyline(&screen, thickness, color, dash);
            }
        }
    }
}

/// Paints every element of `surface` into `dest` in insertion order.
pub(crate) fn draw_surface(surface: &Surface, dest: Rect, font: Option<&Font>) {
    let view = Viewport::fit(surface.view_box(), dest);
    for element in surface.elements() {
        draw_element(element, &view, font);
    }
    let size = surface.view_box();
    draw_rectangle_lines(
        view.origin.x,
        view.origin.y,
        view.length(size.x),
        view.length(size.y),
        1.0,
        VIEW_BORDER,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(runs: &[(Vec2, Vec2)]) -> f32 {
        runs.iter().map(|(a, b)| a.distance(*b)).sum()
    }

    #[test]
    fn dash_pattern_continues_across_vertices() {
        let points: Vec<Vec2> = (0..=4).map(|i| vec2(i as f32 * 4.0, 0.0)).collect();
        let runs = dash_runs(&points, 6.0, 4.0);
        let spans: Vec<(f32, f32)> = runs.iter().map(|(a, b)| (a.x, b.x)).collect();
        assert_eq!(spans, vec![(0.0, 4.0), (4.0, 6.0), (10.0, 12.0), (12.0, 16.0)]);
    }

    #[test]
    fn segments_shorter_than_a_dash_still_leave_gaps() {
        let points: Vec<Vec2> = (0..=50).map(|i| vec2(0.0, i as f32 * 4.06)).collect();
        let runs = dash_runs(&points, 5.7, 4.26);
        let total = 50.0 * 4.06;
        let visible = covered(&runs);
        assert!(visible < total * 0.7, "visible={visible}, total={total}");
        assert!(visible > total * 0.4, "visible={visible}, total={total}");
    }

    #[test]
    fn zero_gap_draws_the_whole_line() {
        let runs = dash_runs(&[vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 7.0)], 3.0, 0.0);
        assert!((covered(&runs) - 17.0).abs() < 1e-4);
    }
}
