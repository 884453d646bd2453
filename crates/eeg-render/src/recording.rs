//! Surface that records draw calls instead of rasterizing them

use eeg_core::{DrawingSurface, Point, Region, Rgb, TextAnchor};

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Region),
    Line { from: Point, to: Point, color: Rgb, width: f32 },
    Polyline { points: Vec<Point>, color: Rgb, width: f32 },
    Rect { rect: Region, color: Rgb },
    Text { text: String, at: Point, anchor: TextAnchor, font_size: f32, color: Rgb },
}

/// In-memory surface of a fixed size
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Region, &Rgb)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Point], &Rgb)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Polyline { points, color, .. } => Some((points.as_slice(), color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, region: Region) {
        self.ops.push(DrawOp::Clear(region));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.ops.push(DrawOp::Line { from, to, color, width });
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f32) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), color, width });
    }

    fn fill_rect(&mut self, rect: Region, color: Rgb) {
        self.ops.push(DrawOp::Rect { rect, color });
    }

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor, font_size: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            anchor,
            font_size,
            color,
        });
    }
}
