//! Bresenham walkers: segments, rays and full lines
//!
//! All three share the same integer-error stepping on rounded endpoints and
//! differ only in when the walk stops.

use crate::display::RenderBuffer;
use crate::math::{Color, Vec2};

/// Past 2^24 a unit step no longer changes an f32 and a walk never ends
const MAX_COORD: f32 = 16_777_216.0;

/// False for NaN, infinite or too large to step one pixel at a time
#[inline]
fn walkable(p: Vec2) -> bool {
    p.x.abs() < MAX_COORD && p.y.abs() < MAX_COORD
}

/// Error-accumulating grid walker from `from` toward `toward`
///
/// Both points are expected to be rounded already. The walk direction is
/// fixed at construction; it keeps stepping past `toward` if asked to.
struct Walker {
    pos: Vec2,
    distance_x: f32,
    distance_y: f32,
    step_x: f32,
    step_y: f32,
    error: f32,
}

impl Walker {
    fn new(from: Vec2, toward: Vec2) -> Self {
        let distance_x = (toward.x - from.x).abs();
        let distance_y = -(toward.y - from.y).abs();
        Self {
            pos: from,
            distance_x,
            distance_y,
            step_x: if from.x < toward.x { 1.0 } else { -1.0 },
            step_y: if from.y < toward.y { 1.0 } else { -1.0 },
            error: distance_x + distance_y,
        }
    }

    /// Same slope, walking the other way
    fn reversed(&self) -> Self {
        Self {
            pos: self.pos,
            distance_x: self.distance_x,
            distance_y: self.distance_y,
            step_x: -self.step_x,
            step_y: -self.step_y,
            error: self.distance_x + self.distance_y,
        }
    }

    #[inline]
    fn step(&mut self) {
        let error2 = 2.0 * self.error;
        if error2 >= self.distance_y {
            self.error += self.distance_y;
            self.pos.x += self.step_x;
        }
        if error2 <= self.distance_x {
            self.error += self.distance_x;
            self.pos.y += self.step_y;
        }
    }

    /// Outside `[0, width] x [0, height]`, one step past the last pixel
    #[inline]
    fn escaped(&self, buffer: &RenderBuffer) -> bool {
        self.pos.x < 0.0
            || self.pos.x > buffer.width() as f32
            || self.pos.y < 0.0
            || self.pos.y > buffer.height() as f32
    }

    /// Plot until the walker leaves the buffer (the last plot is clipped)
    fn trace_to_edge(&mut self, buffer: &mut RenderBuffer, c: Color) {
        loop {
            buffer.draw_pixel(self.pos.x, self.pos.y, c);
            if self.escaped(buffer) {
                break;
            }
            self.step();
        }
    }
}

/// Draw from `p0` up to, but not including, `p1`
///
/// A segment whose rounded endpoints coincide draws nothing; use
/// `RenderBuffer::draw_pixel` for a single dot.
pub fn draw_segment(buffer: &mut RenderBuffer, p0: Vec2, p1: Vec2, c: Color) {
    if !(walkable(p0) && walkable(p1)) {
        return;
    }
    let end = p1.round();
    let mut walker = Walker::new(p0.round(), end);
    while walker.pos != end {
        buffer.draw_pixel(walker.pos.x, walker.pos.y, c);
        walker.step();
    }
}

/// Draw from `point` through `direction` until the buffer edge
pub fn draw_ray(buffer: &mut RenderBuffer, point: Vec2, direction: Vec2, c: Color) {
    if !(walkable(point) && walkable(direction)) {
        return;
    }
    Walker::new(point.round(), direction.round()).trace_to_edge(buffer, c);
}

/// Draw the full line through `point` and `direction`, clipped to the buffer
///
/// Two rays leave `point` in opposite directions, each with its own error
/// accumulator.
pub fn draw_line(buffer: &mut RenderBuffer, point: Vec2, direction: Vec2, c: Color) {
    if !(walkable(point) && walkable(direction)) {
        return;
    }
    let mut forward = Walker::new(point.round(), direction.round());
    let mut backward = forward.reversed();
    forward.trace_to_edge(buffer, c);
    backward.trace_to_edge(buffer, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    fn lit(buffer: &RenderBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..buffer.height() as i32 {
            for x in 0..buffer.width() as i32 {
                if buffer.pixel(x, y) != Some(0) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_segment_excludes_endpoint() {
        let mut buf = RenderBuffer::with_size(8, 8);
        draw_segment(&mut buf, vec2(0.0, 0.0), vec2(4.0, 0.0), Color::WHITE);
        assert_eq!(lit(&buf), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_single_point_segment_draws_nothing() {
        let mut buf = RenderBuffer::with_size(4, 4);
        draw_segment(&mut buf, vec2(1.2, 1.0), vec2(0.8, 1.4), Color::WHITE);
        assert!(lit(&buf).is_empty());
    }

    #[test]
    fn test_segment_steep_and_reversed() {
        let mut buf = RenderBuffer::with_size(8, 8);
        draw_segment(&mut buf, vec2(2.0, 5.0), vec2(0.0, 1.0), Color::WHITE);
        assert_eq!(lit(&buf), vec![(0, 2), (1, 3), (1, 4), (2, 5)]);
    }

    #[test]
    fn test_segment_diagonal() {
        let mut buf = RenderBuffer::with_size(6, 6);
        draw_segment(&mut buf, vec2(0.0, 0.0), vec2(3.0, 3.0), Color::WHITE);
        assert_eq!(lit(&buf), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_ray_runs_to_edge() {
        let mut buf = RenderBuffer::with_size(10, 5);
        draw_ray(&mut buf, vec2(2.0, 2.0), vec2(5.0, 2.0), Color::WHITE);
        let expected: Vec<_> = (2..10).map(|x| (x, 2)).collect();
        assert_eq!(lit(&buf), expected);
    }

    #[test]
    fn test_non_finite_endpoints_draw_nothing() {
        let mut buf = RenderBuffer::with_size(4, 4);
        draw_segment(&mut buf, vec2(0.0, 0.0), vec2(f32::NAN, 2.0), Color::WHITE);
        draw_ray(&mut buf, vec2(f32::INFINITY, 0.0), vec2(1.0, 1.0), Color::WHITE);
        draw_line(&mut buf, vec2(1.0, 1.0), vec2(f32::NAN, 1.0), Color::WHITE);
        // Too large to step through
        draw_segment(&mut buf, vec2(1e30, 0.0), vec2(0.0, 0.0), Color::WHITE);
        assert!(lit(&buf).is_empty());
    }

    #[test]
    fn test_ray_outside_terminates() {
        let mut buf = RenderBuffer::with_size(4, 4);
        draw_ray(&mut buf, vec2(-3.0, -3.0), vec2(-8.0, -8.0), Color::WHITE);
        assert!(lit(&buf).is_empty());
    }

    #[test]
    fn test_line_spans_both_directions() {
        let mut buf = RenderBuffer::with_size(10, 5);
        draw_line(&mut buf, vec2(4.0, 2.0), vec2(6.0, 2.0), Color::WHITE);
        let expected: Vec<_> = (0..10).map(|x| (x, 2)).collect();
        assert_eq!(lit(&buf), expected);

        let mut buf = RenderBuffer::with_size(6, 6);
        draw_line(&mut buf, vec2(2.0, 2.0), vec2(3.0, 3.0), Color::WHITE);
        assert_eq!(lit(&buf), (0..6).map(|i| (i, i)).collect::<Vec<_>>());
    }
}
