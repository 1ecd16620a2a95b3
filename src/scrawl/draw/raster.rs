//! Rasterize a drawing to PNG at its natural bounds.

use super::stroke::Point;
use super::DrawingModel;
use crate::error::{Result, ScrawlError};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Blank margin around the ink, in pixels.
const PADDING: f32 = 8.0;

/// Render the model's strokes onto a transparent canvas sized to their
/// bounds and return the encoded PNG.
pub fn rasterize(model: &DrawingModel) -> Result<Vec<u8>> {
    let (min, max) = natural_bounds(model);
    let width = ((max.x - min.x) + PADDING * 2.0).ceil().max(1.0) as u32;
    let height = ((max.y - min.y) + PADDING * 2.0).ceil().max(1.0) as u32;

    let mut canvas = RgbaImage::new(width, height);
    for stroke in model.strokes() {
        let c = stroke.style.color;
        for window in stroke.points.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            let steps = a.pos.distance(&b.pos).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let pos = a.pos.lerp(&b.pos, t);
                let size = a.size + (b.size - a.size) * t;
                let opacity = a.opacity + (b.opacity - a.opacity) * t;
                let alpha = (opacity.clamp(0.0, 1.0) * c.a as f32) as u8;
                stamp(
                    &mut canvas,
                    pos.x - min.x + PADDING,
                    pos.y - min.y + PADDING,
                    (size / 2.0).max(0.5),
                    Rgba([c.r, c.g, c.b, alpha]),
                );
            }
        }
        // A single-sample stroke is still a visible dot.
        if stroke.points.len() == 1 {
            let p = &stroke.points[0];
            let alpha = (p.opacity.clamp(0.0, 1.0) * c.a as f32) as u8;
            stamp(
                &mut canvas,
                p.pos.x - min.x + PADDING,
                p.pos.y - min.y + PADDING,
                (p.size / 2.0).max(0.5),
                Rgba([c.r, c.g, c.b, alpha]),
            );
        }
    }

    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ScrawlError::Image(e.to_string()))?;
    Ok(bytes)
}

fn natural_bounds(model: &DrawingModel) -> (Point, Point) {
    let mut bounds: Option<(Point, Point)> = None;
    for stroke in model.strokes() {
        if let Some((lo, hi)) = stroke.bounds() {
            bounds = Some(match bounds {
                None => (lo, hi),
                Some((min, max)) => (
                    Point::new(min.x.min(lo.x), min.y.min(lo.y)),
                    Point::new(max.x.max(hi.x), max.y.max(hi.y)),
                ),
            });
        }
    }
    bounds.unwrap_or((Point::new(0.0, 0.0), Point::new(0.0, 0.0)))
}

fn stamp(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let r = radius.ceil() as i32;
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 > radius * radius {
                continue;
            }
            let x = cx.round() as i32 + dx;
            let y = cy.round() as i32 + dy;
            if x >= 0 && y >= 0 && x < w && y < h {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{convert, InkStyle, ShapeKind};
    use crate::text::Color;

    #[test]
    fn produces_decodable_png_sized_to_bounds() {
        let mut model = DrawingModel::new();
        model.push_stroke(convert(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(60.0, 40.0),
            &InkStyle::default(),
        ));

        let bytes = rasterize(&model).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.width() >= 60);
        assert!(decoded.height() >= 40);
    }

    #[test]
    fn ink_lands_on_the_canvas() {
        let mut model = DrawingModel::new();
        model.push_stroke(convert(
            ShapeKind::Line,
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            &InkStyle {
                color: Color::rgb(255, 0, 0),
                ..InkStyle::default()
            },
        ));

        let bytes = rasterize(&model).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        // Midpoint of the line, shifted by the canvas padding.
        let px = decoded.get_pixel(10 + PADDING as u32, PADDING as u32);
        assert_eq!(px[0], 255);
        assert!(px[3] > 0);
    }

    #[test]
    fn empty_model_is_a_valid_png() {
        let bytes = rasterize(&DrawingModel::new()).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }
}
