use crate::text::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Pen,
    Marker,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkStyle {
    pub tool: Tool,
    pub color: Color,
    pub width: f32,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color::BLACK,
            width: 3.0,
        }
    }
}

/// One sampled point of a stroke. Synthesized strokes fabricate the time
/// offset so they are indistinguishable from hand-drawn input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub pos: Point,
    pub time_offset: f32,
    pub size: f32,
    pub opacity: f32,
}

/// One continuous ink mark: an ordered sequence of timed, sized points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub style: InkStyle,
}

impl Stroke {
    pub fn new(style: InkStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    /// Build a stroke from bare positions, fabricating uniform size, full
    /// opacity, and monotonically increasing time offsets.
    pub fn from_positions(positions: Vec<Point>, style: InkStyle, time_step: f32) -> Self {
        let width = style.width;
        let points = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| StrokePoint {
                pos,
                time_offset: time_step * i as f32,
                size: width,
                opacity: 1.0,
            })
            .collect();
        Self { points, style }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds of all sampled positions.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.points.first()?;
        let mut min = first.pos;
        let mut max = first.pos;
        for p in &self.points {
            min.x = min.x.min(p.pos.x);
            min.y = min.y.min(p.pos.y);
            max.x = max.x.max(p.pos.x);
            max.y = max.y.max(p.pos.y);
        }
        Some((min, max))
    }
}
