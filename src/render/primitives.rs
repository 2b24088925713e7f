use crate::core::BarGeometry;
use crate::error::{BarViewError, BarViewResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
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

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .into_iter()
            .all(|channel| (0.0..=1.0).contains(&channel))
    }
}

/// One bucket drawn as a vertical stroke from `y_bottom` up to `y_top`.
///
/// `title` is hover text; the default shell shows the bucket depth.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPrimitive {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub title: String,
}

impl BarPrimitive {
    #[must_use]
    pub fn from_geometry(bar: BarGeometry, stroke_width: f64, color: Color) -> Self {
        Self {
            x: bar.x,
            y_top: bar.y_top,
            y_bottom: bar.y_bottom,
            stroke_width,
            color,
            title: bar.label,
        }
    }

    pub fn validate(&self) -> BarViewResult<()> {
        if ![self.x, self.y_top, self.y_bottom]
            .into_iter()
            .all(f64::is_finite)
        {
            return Err(BarViewError::InvalidData(
                "bar coordinates must be finite".to_owned(),
            ));
        }
        if self.y_top > self.y_bottom {
            return Err(BarViewError::InvalidData(format!(
                "bar top {} lies below its bottom {}",
                self.y_top, self.y_bottom
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(BarViewError::InvalidData(
                "bar stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.color.is_valid() {
            return Err(BarViewError::InvalidData(
                "bar color channels must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Full-height shaded band marking the selection window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPrimitive {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl SelectionPrimitive {
    #[must_use]
    pub const fn new(x: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            width,
            height,
            fill,
        }
    }

    pub fn validate(self) -> BarViewResult<()> {
        if !self.x.is_finite() || !self.width.is_finite() || !self.height.is_finite() {
            return Err(BarViewError::InvalidData(
                "selection geometry must be finite".to_owned(),
            ));
        }
        if self.width <= 0.0 || self.height < 0.0 {
            return Err(BarViewError::InvalidData(format!(
                "selection band must have positive width, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.fill.is_valid() {
            return Err(BarViewError::InvalidData(
                "selection fill channels must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}
