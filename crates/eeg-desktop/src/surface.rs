//! `DrawingSurface` backed by an egui painter

use eeg_core::{DrawingSurface, Point, Region, Rgb, TextAnchor};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Maps surface coordinates onto a screen rectangle owned by egui
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect, background: Color32) -> Self {
        Self { painter, rect, background }
    }

    fn to_pos(&self, point: Point) -> Pos2 {
        map_point(self.rect, point)
    }

    fn to_rect(&self, region: Region) -> Rect {
        Rect::from_min_size(
            self.to_pos(Point::new(region.x, region.y)),
            egui::vec2(region.width, region.height),
        )
    }
}

fn map_point(rect: Rect, point: Point) -> Pos2 {
    rect.min + egui::vec2(point.x, point.y)
}

impl DrawingSurface for EguiSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, region: Region) {
        self.painter.rect_filled(self.to_rect(region), 0.0, self.background);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.painter.line_segment(
            [self.to_pos(from), self.to_pos(to)],
            Stroke::new(width, to_color32(color)),
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgb, width: f32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_pos(*p)).collect();
        self.painter.add(Shape::line(points, Stroke::new(width, to_color32(color))));
    }

    fn fill_rect(&mut self, rect: Region, color: Rgb) {
        self.painter.rect_filled(self.to_rect(rect), 0.0, to_color32(color));
    }

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor, font_size: f32, color: Rgb) {
        let align = match anchor {
            TextAnchor::Start => Align2::LEFT_BOTTOM,
            TextAnchor::Center => Align2::CENTER_BOTTOM,
        };

        self.painter.text(
            self.to_pos(at),
            align,
            text,
            FontId::proportional(font_size),
            to_color32(color),
        );
    }
}
