//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in logical display coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn quad(rect: &Rect, color: Color) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Rectangle border drawn inside the rect, `width` pixels thick
pub fn outline(rect: &Rect, width: f32, color: Color) -> Vec<Vertex> {
    let w = width.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    if w <= 0.0 {
        return Vec::new();
    }
    let sides = [
        Rect::new(rect.x, rect.y, rect.w, w),
        Rect::new(rect.x, rect.bottom() - w, rect.w, w),
        Rect::new(rect.x, rect.y + w, w, rect.h - 2.0 * w),
        Rect::new(rect.right() - w, rect.y + w, w, rect.h - 2.0 * w),
    ];
    sides.iter().flat_map(|side| quad(side, color)).collect()
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Rectangle covered by an axis-aligned thick line, `None` for diagonals
pub fn axis_line_rect(from: Vec2, to: Vec2, width: f32) -> Option<Rect> {
    let half = width / 2.0;
    if from.y == to.y {
        let x = from.x.min(to.x);
        Some(Rect::new(x, from.y - half, (to.x - from.x).abs(), width))
    } else if from.x == to.x {
        let y = from.y.min(to.y);
        Some(Rect::new(from.x - half, y, width, (to.y - from.y).abs()))
    } else {
        None
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Color = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_quad_corners() {
        let v = quad(&Rect::new(10.0, 20.0, 30.0, 40.0), C);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
    }

    #[test]
    fn test_outline_has_four_sides() {
        assert_eq!(outline(&Rect::new(0.0, 0.0, 100.0, 50.0), 3.0, C).len(), 24);
        assert!(outline(&Rect::new(0.0, 0.0, 100.0, 50.0), 0.0, C).is_empty());
    }

    #[test]
    fn test_axis_line_rect() {
        let horizontal = axis_line_rect(Vec2::new(0.0, 10.0), Vec2::new(800.0, 10.0), 3.0);
        assert_eq!(horizontal, Some(Rect::new(0.0, 8.5, 800.0, 3.0)));
        assert_eq!(axis_line_rect(Vec2::ZERO, Vec2::ONE, 1.0), None);
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, C).is_empty());
        assert_eq!(line(Vec2::ZERO, Vec2::new(5.0, 5.0), 2.0, C).len(), 6);
    }
}
