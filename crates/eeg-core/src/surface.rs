//! Drawing surface capability handed to the renderers for one frame
//!
//! The host owns the surface. Renderers only borrow it for the duration of a
//! draw call and never keep a reference between frames.

use serde::{Deserialize, Serialize};
use crate::wave_types::Rgb;

/// Position in surface pixels, origin top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Region covering a whole surface of the given size
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Horizontal text placement relative to the anchor point.
/// The anchor y is the text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Center,
}

/// Primitive drawing operations offered by the host
pub trait DrawingSurface {
    /// Surface size as (width, height)
    fn size(&self) -> (f32, f32);

    /// Erase a region back to the surface background
    fn clear(&mut self, region: Region);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, width: f32);

    /// Stroke a connected path through `points`
    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f32) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], color, width);
        }
    }

    fn fill_rect(&mut self, rect: Region, color: Rgb);

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor, font_size: f32, color: Rgb);
}
