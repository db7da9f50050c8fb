use serde::{Deserialize, Serialize};

use crate::core::{Point, ProjectedRange, RangeVertices, RecordId};
use crate::error::{OverlayError, OverlayResult};
use crate::style::StyleId;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> OverlayResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(OverlayError::InvalidData(format!(
                "color `{hex}` must have the form #rrggbb"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| OverlayError::InvalidData(format!("color `{hex}` is not hex")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn validate(self) -> OverlayResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(OverlayError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// CSS `#rrggbb` form; alpha is carried by separate opacity statements.
    #[must_use]
    pub fn to_css_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }
}

/// How a polygon is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonPaint {
    Fill,
    Frame,
}

/// Closed polygon in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub vertices: RangeVertices,
    pub paint: PolygonPaint,
    pub style: StyleId,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(vertices: RangeVertices, paint: PolygonPaint, style: StyleId) -> Self {
        Self {
            vertices,
            paint,
            style,
        }
    }

    /// Filled region of a projected range.
    #[must_use]
    pub fn fill_of(range: &ProjectedRange, style: StyleId) -> Self {
        Self::new(range.vertices.clone(), PolygonPaint::Fill, style)
    }

    /// Frame-only outline sharing the vertices of [`PolygonPrimitive::fill_of`].
    #[must_use]
    pub fn frame_of(range: &ProjectedRange, style: StyleId) -> Self {
        Self::new(range.vertices.clone(), PolygonPaint::Frame, style)
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if self.vertices.len() < 2 {
            return Err(OverlayError::InvalidData(
                "polygon needs at least two vertices".to_owned(),
            ));
        }
        if !self.vertices.iter().all(|vertex| vertex.is_finite()) {
            return Err(OverlayError::InvalidData(
                "polygon coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Circle marker, optionally tied to the record it encodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub style: StyleId,
    pub record: Option<RecordId>,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(center: Point, radius: f64, style: StyleId) -> Self {
        Self {
            center,
            radius,
            style,
            record: None,
        }
    }

    #[must_use]
    pub fn for_record(mut self, record: RecordId) -> Self {
        self.record = Some(record);
        self
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if !self.center.is_finite() {
            return Err(OverlayError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(OverlayError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Drawable child of a [`crate::render::Layer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(PolygonPrimitive),
    Circle(CirclePrimitive),
}

impl Shape {
    #[must_use]
    pub fn style(&self) -> &StyleId {
        match self {
            Self::Polygon(polygon) => &polygon.style,
            Self::Circle(circle) => &circle.style,
        }
    }

    pub fn validate(&self) -> OverlayResult<()> {
        match self {
            Self::Polygon(polygon) => polygon.validate(),
            Self::Circle(circle) => circle.validate(),
        }
    }
}

impl From<PolygonPrimitive> for Shape {
    fn from(polygon: PolygonPrimitive) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<CirclePrimitive> for Shape {
    fn from(circle: CirclePrimitive) -> Self {
        Self::Circle(circle)
    }
}
