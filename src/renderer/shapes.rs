//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Convert an HSL color (hue in degrees) to linear-ish RGBA.
///
/// Bubbles carry only a hue; saturation and lightness are fixed the way the
/// original art used them (70% / 50%).
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, 1.0]
}

/// Rotate a local-space point around the origin and translate to `center`
#[inline]
fn place(center: Vec2, angle: f32, local: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    center + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Generate vertices for a ring (hollow circle outline)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_stroke(center, (inner_radius + outer_radius) / 2.0, 0.0, 2.0 * PI, outer_radius - inner_radius, color, segments)
}

/// Generate vertices for a stroked arc: a band of the given width centered
/// on `radius`, spanning `theta_start..theta_end`
pub fn arc_stroke(
    center: Vec2,
    radius: f32,
    theta_start: f32,
    theta_end: f32,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let span = theta_end - theta_start;
    let inner_r = radius - width / 2.0;
    let outer_r = radius + width / 2.0;

    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let t1 = i as f32 / segments as f32;
        let t2 = (i + 1) as f32 / segments as f32;
        let theta1 = theta_start + t1 * span;
        let theta2 = theta_start + t2 * span;

        let inner1 = center + inner_r * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_r * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_r * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_r * Vec2::new(theta2.cos(), theta2.sin());

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a line segment drawn as a quad of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a rectangle centered at `center`, rotated by `angle`
pub fn oriented_quad(
    center: Vec2,
    angle: f32,
    length: f32,
    height: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let hl = length / 2.0;
    let hh = height / 2.0;

    let a = place(center, angle, Vec2::new(-hl, -hh));
    let b = place(center, angle, Vec2::new(-hl, hh));
    let c = place(center, angle, Vec2::new(hl, -hh));
    let d = place(center, angle, Vec2::new(hl, hh));

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a triangle given in local space, rotated and placed
pub fn oriented_triangle(
    center: Vec2,
    angle: f32,
    local: [Vec2; 3],
    color: [f32; 4],
) -> Vec<Vertex> {
    local
        .iter()
        .map(|&p| {
            let world = place(center, angle, p);
            Vertex::new(world.x, world.y, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 3);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_color(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 0.001);
        assert!(red[1].abs() < 0.001);

        let green = hsl_color(120.0, 1.0, 0.5);
        assert!((green[1] - 1.0).abs() < 0.001);

        let blue = hsl_color(240.0, 1.0, 0.5);
        assert!((blue[2] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_oriented_quad_rotates() {
        // 90 degree rotation maps the long axis onto y
        let verts = oriented_quad(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 30.0, 5.0, [1.0; 4]);
        let max_y = verts
            .iter()
            .map(|v| v.position[1].abs())
            .fold(0.0f32, f32::max);
        assert!((max_y - 15.0).abs() < 0.01);
    }
}
