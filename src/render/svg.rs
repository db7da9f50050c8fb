use std::fmt::Write as _;

use crate::error::{OverlayError, OverlayResult};
use crate::render::{CirclePrimitive, Layer, PolygonPaint, PolygonPrimitive, Renderer, Scene, Shape};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes scenes into standalone SVG documents.
///
/// Styles become one `<style>` block, each layer a `<g>` element and each
/// shape a `<polygon>` or `<circle>` carrying its style class.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_document: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }

    pub fn take_document(&mut self) -> Option<String> {
        self.last_document.take()
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &Scene) -> OverlayResult<()> {
        scene.validate()?;
        self.last_document = Some(render_document(scene)?);
        Ok(())
    }
}

/// Builds the SVG document text for `scene` without validating it.
pub fn render_document(scene: &Scene) -> OverlayResult<String> {
    let mut out = String::new();
    write_document(&mut out, scene)
        .map_err(|err| OverlayError::InvalidData(format!("svg serialization failed: {err}")))?;
    Ok(out)
}

fn write_document(out: &mut String, scene: &Scene) -> std::fmt::Result {
    let (width, height) = (scene.viewport.width, scene.viewport.height);
    write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    if !scene.styles.is_empty() {
        out.push_str(r#"<style type="text/css">"#);
        for class in &scene.styles {
            out.push_str(&escape_xml(&class.to_css_rule()));
        }
        out.push_str("</style>");
    }
    for layer in scene.ordered_layers() {
        write_layer(out, layer)?;
    }
    out.push_str("</svg>");
    Ok(())
}

fn write_layer(out: &mut String, layer: &Layer) -> std::fmt::Result {
    write!(out, r#"<g id="{}">"#, escape_xml(layer.name()))?;
    for child in layer.children() {
        match child {
            Shape::Polygon(polygon) => write_polygon(out, polygon)?,
            Shape::Circle(circle) => write_circle(out, circle)?,
        }
    }
    out.push_str("</g>");
    Ok(())
}

fn write_polygon(out: &mut String, polygon: &PolygonPrimitive) -> std::fmt::Result {
    let points = polygon
        .vertices
        .iter()
        .map(|vertex| format!("{},{}", vertex.x, vertex.y))
        .collect::<Vec<_>>()
        .join(" ");
    let fill = match polygon.paint {
        PolygonPaint::Fill => "",
        PolygonPaint::Frame => r#" fill="none""#,
    };
    write!(
        out,
        r#"<polygon class="{}"{fill} points="{points}"/>"#,
        escape_xml(polygon.style.as_str())
    )
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<circle class="{}" cx="{}" cy="{}" r="{}""#,
        escape_xml(circle.style.as_str()),
        circle.center.x,
        circle.center.y,
        circle.radius
    )?;
    if let Some(record) = circle.record {
        write!(out, r#" data-record="{}""#, record.get())?;
    }
    out.push_str("/>");
    Ok(())
}

/// Escapes XML special characters and drops chars XML 1.0 cannot carry.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !matches!(
            c as u32,
            0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
        ) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
