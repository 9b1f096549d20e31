//! Low-level SVG primitives with validated geometry.
//!
//! Unlike the chart renderers, which turn bad input data into a diagnostic
//! document, these builders reject impossible geometry outright: a
//! non-positive radius or size always means the caller computed something
//! wrong.

use crate::render::escape_xml;
use std::fmt::Write as _;
use thiserror::Error;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("invalid canvas size: width={width}, height={height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("invalid rectangle size: width={width}, height={height}")]
    InvalidRect { width: f32, height: f32 },
    #[error("invalid circle radius: {0}")]
    InvalidRadius(f32),
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Root `<svg>` element collecting serialized children.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    class: Option<String>,
    font_family: Option<String>,
    body: String,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            class: None,
            font_family: None,
            body: String::new(),
        })
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn push(&mut self, element: &str) {
        self.body.push_str(element);
    }

    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            svg,
            "<svg xmlns=\"{SVG_NS}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\"",
            w = self.width,
            h = self.height
        );
        if let Some(class) = &self.class {
            let _ = write!(svg, " class=\"{}\"", escape_xml(class));
        }
        if let Some(family) = &self.font_family {
            let _ = write!(svg, " style=\"font-family: {}\"", escape_xml(family));
        }
        svg.push('>');
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
    fill: String,
    class: Option<&'static str>,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ShapeError> {
        if !positive(width) || !positive(height) {
            return Err(ShapeError::InvalidRect { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            radius: 0.0,
            fill: "none".to_string(),
            class: None,
        })
    }

    pub fn fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"",
            self.x, self.y, self.width, self.height
        );
        if self.radius > 0.0 {
            let _ = write!(out, " rx=\"{r:.2}\" ry=\"{r:.2}\"", r = self.radius);
        }
        if let Some(class) = self.class {
            let _ = write!(out, " class=\"{class}\"");
        }
        let _ = write!(out, " fill=\"{}\"/>", escape_xml(&self.fill));
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    cx: f32,
    cy: f32,
    r: f32,
    fill: String,
    opacity: Option<f32>,
    class: Option<&'static str>,
}

impl Circle {
    pub fn new(cx: f32, cy: f32, r: f32) -> Result<Self, ShapeError> {
        if !positive(r) {
            return Err(ShapeError::InvalidRadius(r));
        }
        Ok(Self {
            cx,
            cy,
            r,
            fill: "none".to_string(),
            opacity: None,
            class: None,
        })
    }

    pub fn fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"",
            self.cx, self.cy, self.r
        );
        if let Some(class) = self.class {
            let _ = write!(out, " class=\"{class}\"");
        }
        let _ = write!(out, " fill=\"{}\"", escape_xml(&self.fill));
        if let Some(opacity) = self.opacity {
            let _ = write!(out, " fill-opacity=\"{opacity:.2}\"");
        }
        out.push_str("/>");
        out
    }
}
