//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixel space (origin at
//! the top-left, y down). Angles follow the canvas convention: positive is
//! clockwise on screen.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append a triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Append a quad given its corners in order
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let [a, b, c, d] = corners;
    out.push(Vertex::new(a.x, a.y, colors[0]));
    out.push(Vertex::new(b.x, b.y, colors[1]));
    out.push(Vertex::new(c.x, c.y, colors[2]));

    out.push(Vertex::new(c.x, c.y, colors[2]));
    out.push(Vertex::new(d.x, d.y, colors[3]));
    out.push(Vertex::new(a.x, a.y, colors[0]));
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    vertical_gradient(out, x, y, w, h, color, color);
}

/// Axis-aligned rectangle blending from `top` to `bottom`
pub fn vertical_gradient(
    out: &mut Vec<Vertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    quad(
        out,
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        [top, top, bottom, bottom],
    );
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        triangle(
            out,
            center,
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        );
    }
}

/// Thick arc band between `inner_radius` and `outer_radius`, from `start` to `end`
#[allow(clippy::too_many_arguments)]
pub fn arc_band(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) {
    let span = end - start;
    for i in 0..segments {
        let theta1 = start + span * i as f32 / segments as f32;
        let theta2 = start + span * (i + 1) as f32 / segments as f32;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        quad(
            out,
            [
                center + dir1 * inner_radius,
                center + dir1 * outer_radius,
                center + dir2 * outer_radius,
                center + dir2 * inner_radius,
            ],
            [color; 4],
        );
    }
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    arc_band(out, center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments);
}

/// Line segment of the given width
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    quad(out, [from + perp, to + perp, to - perp, from - perp], [color; 4]);
}

/// Dashed line: `dash` pixels drawn, `gap` pixels skipped, starting with a dash
pub fn dashed_line(
    out: &mut Vec<Vertex>,
    from: Vec2,
    to: Vec2,
    width: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) {
    let length = from.distance(to);
    if length <= 0.0 || dash <= 0.0 {
        return;
    }
    let dir = (to - from) / length;

    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        line(out, from + dir * t, from + dir * end, width, color);
        t += dash + gap;
    }
}

/// Rotate vertices appended since `first` by `angle` about the local origin,
/// then move them to `origin` (the canvas translate-then-rotate pattern)
pub fn place(out: &mut [Vertex], first: usize, origin: Vec2, angle: f32) {
    let rot = Vec2::from_angle(angle);
    for v in &mut out[first..] {
        let local = Vec2::from(v.position);
        let world = origin + rot.rotate(local);
        v.position = world.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_corners() {
        let mut out = Vec::new();
        rect(&mut out, 10.0, 20.0, 30.0, 40.0, WHITE);
        assert_eq!(out.len(), 6);
        for v in &out {
            assert!(v.position[0] == 10.0 || v.position[0] == 40.0);
            assert!(v.position[1] == 20.0 || v.position[1] == 60.0);
        }
    }

    #[test]
    fn test_gradient_colors_by_edge() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        let mut out = Vec::new();
        vertical_gradient(&mut out, 0.0, 0.0, 100.0, 50.0, top, bottom);
        for v in &out {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(50.0, 50.0);
        circle(&mut out, center, 12.0, WHITE, 32);
        assert_eq!(out.len(), 32 * 3);
        for v in &out {
            assert!(Vec2::from(v.position).distance(center) <= 12.0 + 1e-4);
        }
    }

    #[test]
    fn test_dash_pattern() {
        let mut out = Vec::new();
        dashed_line(&mut out, Vec2::ZERO, Vec2::new(0.0, -200.0), 2.0, 5.0, 5.0, WHITE);
        // 200px with a 10px period
        assert_eq!(out.len(), 20 * 6);
        assert!(out.iter().all(|v| v.position[1] <= 0.0 && v.position[1] >= -200.0));
    }

    #[test]
    fn test_place_rotates_clockwise() {
        // A point straight up, rotated a quarter turn clockwise, points right
        let mut out = vec![Vertex::new(0.0, -10.0, WHITE)];
        place(&mut out, 0, Vec2::new(100.0, 100.0), std::f32::consts::FRAC_PI_2);
        assert!((out[0].position[0] - 110.0).abs() < 1e-4);
        assert!((out[0].position[1] - 100.0).abs() < 1e-4);
    }
}
