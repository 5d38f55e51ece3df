//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segments used for the ball and keypoint markers
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let tl = top_left;
    let tr = top_left + Vec2::new(size.x, 0.0);
    let bl = top_left + Vec2::new(0.0, size.y);
    let br = top_left + size;

    vec![
        Vertex::at(tl, color),
        Vertex::at(bl, color),
        Vertex::at(tr, color),
        Vertex::at(tr, color),
        Vertex::at(bl, color),
        Vertex::at(br, color),
    ]
}

/// Generate vertices for a line segment drawn as a quad of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::at(a1, color),
        Vertex::at(b1, color),
        Vertex::at(a2, color),
        Vertex::at(a2, color),
        Vertex::at(b1, color),
        Vertex::at(b2, color),
    ]
}
