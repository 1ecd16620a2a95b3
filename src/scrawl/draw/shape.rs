//! Geometric gesture to stroke conversion.
//!
//! A dragged shape is built as a closed polyline inscribed in the drag's
//! bounding box, then walked at fixed increments with arc-length
//! interpolation so the samples are evenly spaced along the outline. The
//! shape's mathematical definition is discarded; only the sampled stroke
//! survives, indistinguishable from hand-drawn input.

use super::stroke::{InkStyle, Point, Stroke};

/// Samples taken along a closed outline.
pub const SAMPLE_STEPS: usize = 100;
/// Fabricated seconds between consecutive samples.
pub const TIME_STEP: f32 = 0.01;
/// Inner radius of a star arm relative to the outer radius.
pub const STAR_INNER_RATIO: f32 = 0.4;
/// Arrow head wing length, in canvas units.
pub const ARROW_HEAD_LENGTH: f32 = 20.0;
/// Angle between the shaft and each arrow head wing, in degrees.
pub const ARROW_HEAD_ANGLE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Arrow,
    Rectangle,
    Ellipse,
    Triangle,
    Star,
}

/// Convert a drag gesture into a stroke ready for the drawing model.
pub fn convert(kind: ShapeKind, start: Point, end: Point, style: &InkStyle) -> Stroke {
    let positions = match kind {
        ShapeKind::Line => line_positions(start, end),
        ShapeKind::Arrow => arrow_positions(start, end),
        _ => sample_closed_path(&shape_vertices(kind, start, end), SAMPLE_STEPS),
    };
    Stroke::from_positions(positions, *style, TIME_STEP)
}

fn line_positions(start: Point, end: Point) -> Vec<Point> {
    if start.distance(&end) == 0.0 {
        return vec![start];
    }
    vec![start, end]
}

fn arrow_positions(start: Point, end: Point) -> Vec<Point> {
    if start.distance(&end) == 0.0 {
        return vec![start];
    }
    let shaft = (end.y - start.y).atan2(end.x - start.x);
    let spread = ARROW_HEAD_ANGLE.to_radians();
    let back = shaft + std::f32::consts::PI;
    let wing = |angle: f32| {
        Point::new(
            end.x + ARROW_HEAD_LENGTH * angle.cos(),
            end.y + ARROW_HEAD_LENGTH * angle.sin(),
        )
    };
    // Shaft, then both head wings; the pen returns to the tip in between.
    vec![start, end, wing(back - spread), end, wing(back + spread)]
}

/// Closed outline vertices for the box-inscribed shapes. The outline is
/// implicitly closed; the first vertex is not repeated.
pub fn shape_vertices(kind: ShapeKind, start: Point, end: Point) -> Vec<Point> {
    let (x0, x1) = (start.x.min(end.x), start.x.max(end.x));
    let (y0, y1) = (start.y.min(end.y), start.y.max(end.y));
    let center = Point::new((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let rx = (x1 - x0) / 2.0;
    let ry = (y1 - y0) / 2.0;

    match kind {
        ShapeKind::Rectangle => vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ],
        ShapeKind::Triangle => vec![
            Point::new(center.x, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ],
        ShapeKind::Ellipse => (0..SAMPLE_STEPS)
            .map(|i| {
                let theta = std::f32::consts::TAU * i as f32 / SAMPLE_STEPS as f32;
                Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
            })
            .collect(),
        ShapeKind::Star => star_vertices(center, rx, ry),
        ShapeKind::Line | ShapeKind::Arrow => vec![start, end],
    }
}

/// Five-pointed star: ten vertices alternating the outer radius and
/// `STAR_INNER_RATIO` times it, spaced 36 degrees apart, first arm pointing
/// up (-90 degrees).
fn star_vertices(center: Point, rx: f32, ry: f32) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let angle = (-90.0 + 36.0 * i as f32).to_radians();
            let factor = if i % 2 == 0 { 1.0 } else { STAR_INNER_RATIO };
            Point::new(
                center.x + rx * factor * angle.cos(),
                center.y + ry * factor * angle.sin(),
            )
        })
        .collect()
}

/// Walk a closed polyline in `steps` fixed increments of total arc length,
/// interpolating within segments. A degenerate outline (zero perimeter)
/// collapses to at most one sample.
pub fn sample_closed_path(vertices: &[Point], steps: usize) -> Vec<Point> {
    if vertices.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(vertices.len());
    let mut total = 0.0f32;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let len = a.distance(&b);
        segments.push((a, b, len));
        total += len;
    }

    if total <= f32::EPSILON {
        return vec![vertices[0]];
    }

    let mut samples = Vec::with_capacity(steps);
    for step in 0..steps {
        let mut target = total * step as f32 / steps as f32;
        let before = samples.len();
        for (a, b, len) in &segments {
            if target <= *len {
                let t = if *len > 0.0 { target / len } else { 0.0 };
                samples.push(a.lerp(b, t));
                break;
            }
            target -= len;
        }
        // Rounding can push the last target a hair past the final segment.
        if samples.len() == before {
            samples.push(segments[segments.len() - 1].1);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn star_in_100_box_has_spec_geometry() {
        let verts = shape_vertices(
            ShapeKind::Star,
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        );
        assert_eq!(verts.len(), 10);

        let center = Point::new(50.0, 50.0);
        for (i, v) in verts.iter().enumerate() {
            let expected_radius = if i % 2 == 0 { 50.0 } else { 20.0 };
            assert!(
                (v.distance(&center) - expected_radius).abs() < EPS,
                "vertex {} radius {}",
                i,
                v.distance(&center)
            );
            let angle = (v.y - center.y).atan2(v.x - center.x).to_degrees();
            let expected = -90.0 + 36.0 * i as f32;
            let diff = (angle - expected).rem_euclid(360.0);
            assert!(
                diff < EPS || (360.0 - diff) < EPS,
                "vertex {} angle {} expected {}",
                i,
                angle,
                expected
            );
        }
        // First arm points straight up.
        assert!((verts[0].x - 50.0).abs() < EPS);
        assert!(verts[0].y.abs() < EPS);
    }

    #[test]
    fn zero_area_drag_yields_at_most_one_point() {
        let p = Point::new(40.0, 40.0);
        for kind in [
            ShapeKind::Rectangle,
            ShapeKind::Ellipse,
            ShapeKind::Triangle,
            ShapeKind::Star,
            ShapeKind::Line,
            ShapeKind::Arrow,
        ] {
            let stroke = convert(kind, p, p, &InkStyle::default());
            assert!(stroke.points.len() <= 1, "{:?}", kind);
        }
    }

    #[test]
    fn rectangle_sampling_is_arc_length_proportional() {
        let stroke = convert(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            &InkStyle::default(),
        );
        assert_eq!(stroke.points.len(), SAMPLE_STEPS);
        assert_eq!(stroke.points[0].pos, Point::new(0.0, 0.0));

        // Perimeter is 300; sample 25 sits 75 units in, on the top edge.
        let quarter = stroke.points[25].pos;
        assert!((quarter.x - 75.0).abs() < EPS);
        assert!(quarter.y.abs() < EPS);
    }

    #[test]
    fn samples_carry_synthetic_timing_and_width() {
        let style = InkStyle {
            width: 7.0,
            ..InkStyle::default()
        };
        let stroke = convert(
            ShapeKind::Ellipse,
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            &style,
        );
        for (i, p) in stroke.points.iter().enumerate() {
            assert!((p.time_offset - TIME_STEP * i as f32).abs() < 1e-6);
            assert_eq!(p.size, 7.0);
            assert_eq!(p.opacity, 1.0);
        }
    }

    #[test]
    fn arrow_head_geometry() {
        let stroke = convert(
            ShapeKind::Arrow,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &InkStyle::default(),
        );
        let positions: Vec<_> = stroke.points.iter().map(|p| p.pos).collect();
        assert_eq!(positions.len(), 5);
        let tip = Point::new(100.0, 0.0);
        assert_eq!(positions[1], tip);
        assert_eq!(positions[3], tip);

        for wing in [positions[2], positions[4]] {
            assert!((wing.distance(&tip) - ARROW_HEAD_LENGTH).abs() < EPS);
            // Wings sit behind the tip, 30 degrees off the shaft.
            let angle = (wing.y - tip.y).atan2(wing.x - tip.x).to_degrees();
            assert!(
                (angle.abs() - 150.0).abs() < EPS,
                "wing angle {}",
                angle
            );
        }
    }

    #[test]
    fn line_is_two_points() {
        let stroke = convert(
            ShapeKind::Line,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            &InkStyle::default(),
        );
        assert_eq!(stroke.points.len(), 2);
    }
}
