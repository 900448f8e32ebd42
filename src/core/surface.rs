//! Retained drawing surface.
//!
//! Builders append primitives and keep the returned [`ElementId`] for the few
//! elements they mutate later. The surface knows nothing about the simulation;
//! it can be painted by the interactive binary or serialised to SVG.

use std::fmt::Write as _;

use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::hex(0xffffff);

    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    fn svg(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Top-to-bottom gradient across the shape's bounding box.
    VerticalGradient(Vec<GradientStop>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Dash and gap lengths in view-box units.
    pub dash: Option<(f64, f64)>,
    pub arrow_head: bool,
    pub bold: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            dash: None,
            arrow_head: false,
            bold: false,
        }
    }
}

impl Style {
    pub fn filled(color: Rgba) -> Self {
        Self {
            fill: Some(Paint::Solid(color)),
            ..Self::default()
        }
    }

    pub fn stroked(color: Rgba, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Rgba, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_dash(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn with_arrow_head(mut self) -> Self {
        self.arrow_head = true;
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { origin: DVec2, size: DVec2 },
    Line { from: DVec2, to: DVec2 },
    Circle { center: DVec2, radius: f64 },
    Text { anchor: DVec2, content: String, size: f64 },
    Path { points: Vec<DVec2> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
    pub tag: Option<String>,
}

/// Index of an element inside the surface that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    view_box: DVec2,
    elements: Vec<Element>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            view_box: DVec2::new(width, height),
            elements: Vec::new(),
        }
    }

    pub fn view_box(&self) -> DVec2 {
        self.view_box
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn add(&mut self, shape: Shape, style: Style) -> ElementId {
        self.elements.push(Element {
            shape,
            style,
            tag: None,
        });
        ElementId(self.elements.len() - 1)
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: Style) -> ElementId {
        self.add(
            Shape::Rect {
                origin: DVec2::new(x, y),
                size: DVec2::new(w.max(0.0), h.max(0.0)),
            },
            style,
        )
    }

    pub fn line(&mut self, from: DVec2, to: DVec2, style: Style) -> ElementId {
        self.add(Shape::Line { from, to }, style)
    }

    pub fn circle(&mut self, center: DVec2, radius: f64, style: Style) -> ElementId {
        self.add(Shape::Circle { center, radius }, style)
    }

    pub fn text(
        &mut self,
        anchor: DVec2,
        content: impl Into<String>,
        size: f64,
        color: Rgba,
    ) -> ElementId {
        self.text_styled(anchor, content, size, Style::filled(color))
    }

    pub fn text_styled(
        &mut self,
        anchor: DVec2,
        content: impl Into<String>,
        size: f64,
        style: Style,
    ) -> ElementId {
        self.add(
            Shape::Text {
                anchor,
                content: content.into(),
                size,
            },
            style,
        )
    }

    pub fn path(&mut self, points: Vec<DVec2>, style: Style) -> ElementId {
        self.add(Shape::Path { points }, style)
    }

    /// Attaches a lookup name, emitted as the SVG `id`.
    pub fn tag(&mut self, id: ElementId, tag: &str) -> ElementId {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.tag = Some(tag.to_string());
        }
        id
    }

    pub fn find(&self, tag: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.tag.as_deref() == Some(tag))
            .map(ElementId)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn shape_mut(&mut self, id: ElementId) -> Option<&mut Shape> {
        self.elements.get_mut(id.0).map(|e| &mut e.shape)
    }

    pub fn move_circle(&mut self, id: ElementId, center: DVec2) {
        if let Some(Shape::Circle { center: c, .. }) = self.shape_mut(id) {
            *c = center;
        }
    }

    pub fn set_line(&mut self, id: ElementId, from: DVec2, to: DVec2) {
        if let Some(Shape::Line { from: f, to: t }) = self.shape_mut(id) {
            *f = from;
            *t = to;
        }
    }

    pub fn set_text(&mut self, id: ElementId, content: &str) {
        if let Some(Shape::Text { content: c, .. }) = self.shape_mut(id) {
            c.clear();
            c.push_str(content);
        }
    }

    pub fn set_path(&mut self, id: ElementId, points: impl IntoIterator<Item = DVec2>) {
        if let Some(Shape::Path { points: p }) = self.shape_mut(id) {
            p.clear();
            p.extend(points);
        }
    }

    pub fn set_opacity(&mut self, id: ElementId, opacity: f64) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.style.opacity = opacity;
        }
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let mut defs = String::new();
        let mut body = String::new();
        let mut gradients = 0usize;
        let mut needs_arrow = false;

        for element in &self.elements {
            let fill = match &element.style.fill {
                None => "none".to_string(),
                Some(Paint::Solid(color)) => color.svg(),
                Some(Paint::VerticalGradient(stops)) => {
                    gradients += 1;
                    let _ = write!(
                        defs,
                        r#"<linearGradient id="grad{gradients}" x1="0" y1="0" x2="0" y2="1">"#
                    );
                    for stop in stops {
                        let _ = write!(
                            defs,
                            r#"<stop offset="{}%" stop-color="{}"/>"#,
                            stop.offset * 100.0,
                            stop.color.svg()
                        );
                    }
                    defs.push_str("</linearGradient>");
                    format!("url(#grad{gradients})")
                }
            };
            needs_arrow |= element.style.arrow_head;
            write_element(&mut body, element, &fill);
        }

        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
            self.view_box.x, self.view_box.y
        );
        if needs_arrow {
            defs.push_str(
                r#"<marker id="arrowHead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="context-stroke"/></marker>"#,
            );
        }
        if !defs.is_empty() {
            let _ = write!(out, "<defs>{defs}</defs>");
        }
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn write_element(out: &mut String, element: &Element, fill: &str) {
    let style = &element.style;
    let mut attrs = format!(r#" fill="{fill}""#);
    if let Some(stroke) = style.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.svg(),
            style.stroke_width
        );
    }
    if style.opacity < 1.0 {
        let _ = write!(attrs, r#" opacity="{}""#, style.opacity);
    }
    if let Some((dash, gap)) = style.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash},{gap}""#);
    }
    if style.arrow_head {
        attrs.push_str(r#" marker-end="url(#arrowHead)""#);
    }
    if let Some(tag) = &element.tag {
        let _ = write!(attrs, r#" id="{tag}""#);
    }

    let _ = match &element.shape {
        Shape::Rect { origin, size } => write!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"{attrs}/>"#,
            origin.x, origin.y, size.x, size.y
        ),
        Shape::Line { from, to } => write!(
            out,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{attrs}/>"#,
            from.x, from.y, to.x, to.y
        ),
        Shape::Circle { center, radius } => write!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{radius}"{attrs}/>"#,
            center.x, center.y
        ),
        Shape::Text {
            anchor,
            content,
            size,
        } => {
            let weight = if style.bold { r#" font-weight="600""# } else { "" };
            write!(
                out,
                r#"<text x="{:.1}" y="{:.1}" font-family="monospace" font-size="{size}px"{weight}{attrs}>{}</text>"#,
                anchor.x,
                anchor.y,
                escape(content)
            )
        }
        Shape::Path { points } => {
            let mut d = String::new();
            for (i, p) in points.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{:.1},{:.1} ", p.x, p.y);
            }
            write!(out, r#"<path d="{}"{attrs}/>"#, d.trim_end())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_call_appends_a_primitive() {
        let mut surface = Surface::new(100.0, 50.0);
        let style = Style::stroked(Rgba::hex(0x94a3b8), 1.0);
        let a = surface.line(DVec2::ZERO, DVec2::new(10.0, 0.0), style.clone());
        let b = surface.line(DVec2::ZERO, DVec2::new(10.0, 0.0), style);
        assert_ne!(a, b);
        assert_eq!(surface.len(), 2);
        assert_eq!(surface.get(a), surface.get(b));
    }

    #[test]
    fn tagged_elements_can_be_found_and_mutated() {
        let mut surface = Surface::new(100.0, 50.0);
        surface.rect(0.0, 0.0, 100.0, 50.0, Style::filled(Rgba::WHITE));
        let label = surface.text(DVec2::new(4.0, 40.0), "t = 0.00 s", 11.0, Rgba::hex(0x475569));
        surface.tag(label, "time-label");

        let found = surface.find("time-label").expect("label is tagged");
        assert_eq!(found, label);
        surface.set_text(found, "t = 1.50 s");
        match &surface.get(label).expect("label exists").shape {
            Shape::Text { content, .. } => assert_eq!(content, "t = 1.50 s"),
            other => panic!("unexpected shape {other:?}"),
        }
        assert!(surface.find("missing").is_none());
    }

    #[test]
    fn mutators_ignore_mismatched_shapes() {
        let mut surface = Surface::new(10.0, 10.0);
        let dot = surface.circle(DVec2::new(1.0, 1.0), 2.0, Style::filled(Rgba::WHITE));
        surface.set_text(dot, "nope");
        surface.move_circle(dot, DVec2::new(5.0, 6.0));
        assert_eq!(
            surface.get(dot).map(|e| &e.shape),
            Some(&Shape::Circle {
                center: DVec2::new(5.0, 6.0),
                radius: 2.0
            })
        );
    }

    #[test]
    fn svg_output_carries_styles_and_ids() {
        let mut surface = Surface::new(300.0, 460.0);
        surface.rect(
            0.0,
            0.0,
            300.0,
            460.0,
            Style {
                fill: Some(Paint::VerticalGradient(vec![
                    GradientStop {
                        offset: 0.0,
                        color: Rgba::hex(0xbfdbfe),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: Rgba::hex(0xbbf7d0),
                    },
                ])),
                ..Style::default()
            },
        );
        let arrow = surface.line(
            DVec2::new(163.0, 100.0),
            DVec2::new(163.0, 65.0),
            Style::stroked(Rgba::hex(0x059669), 2.5).with_arrow_head(),
        );
        surface.tag(arrow, "vel-arrow");
        surface.path(
            vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)],
            Style::stroked(Rgba::hex(0x2563eb), 1.5)
                .with_dash(4.0, 4.0)
                .with_opacity(0.25),
        );
        surface.text(DVec2::new(0.0, 0.0), "a < b", 9.0, Rgba::hex(0x64748b));

        let svg = surface.to_svg();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 460">"#));
        assert!(svg.contains(r#"fill="url(#grad1)""#));
        assert!(svg.contains(r#"id="vel-arrow""#));
        assert!(svg.contains(r#"marker-end="url(#arrowHead)""#));
        assert!(svg.contains(r#"d="M1.0,2.0 L3.0,4.0""#));
        assert!(svg.contains(r#"stroke-dasharray="4,4""#));
        assert!(svg.contains("a &lt; b"));
    }
}
