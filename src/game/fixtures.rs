//! Triangle coverage fixture
//!
//! 27 triangles tiling a 16x10 area, with vertices on pixel centers and a
//! few deliberately off-grid. Drawn at 1:1 they exercise the fill rule on
//! shared edges; scaled up they show where each pixel came from.

use crate::math::{vec2, Color, Vec2};

/// One fixture triangle and its fill color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureTriangle {
    pub points: [Vec2; 3],
    pub color: Color,
}

const fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Color) -> FixtureTriangle {
    FixtureTriangle {
        points: [vec2(a.0, a.1), vec2(b.0, b.1), vec2(c.0, c.1)],
        color,
    }
}

pub const TRIANGLE_COUNT: usize = 27;

#[rustfmt::skip]
const TRIANGLES: [FixtureTriangle; TRIANGLE_COUNT] = [
    tri((0.5, 10.5),   (0.5, 5.5),    (2.5, 8.5),    Color::RED),
    tri((0.5, 5.5),    (3.5, 4.5),    (0.5, 0.5),    Color::YELLOW),
    tri((0.5, 10.5),   (2.5, 8.5),    (4.5, 10.5),   Color::BLUE),
    tri((2.5, 8.5),    (0.5, 5.5),    (3.5, 4.5),    Color::GREEN),
    tri((0.5, 0.5),    (3.5, 4.5),    (6.5, 1.5),    Color::RED),
    tri((2.5, 8.5),    (4.5, 10.5),   (6.5, 7.5),    Color::YELLOW),
    tri((2.5, 8.5),    (6.5, 7.5),    (3.5, 4.5),    Color::PINK),
    tri((3.5, 4.5),    (6.5, 4.5),    (6.5, 7.5),    Color::TEAL),
    tri((3.5, 4.5),    (6.5, 4.5),    (6.5, 1.5),    Color::BLUE),
    tri((0.5, 0.5),    (6.5, 1.5),    (15.5, 0.5),   Color::GREEN),
    tri((4.5, 10.5),   (6.5, 7.5),    (10.5, 10.5),  Color::GREEN),
    tri((6.5, 7.5),    (9.5, 4.5),    (10.5, 10.5),  Color::BLUE),
    tri((6.5, 7.5),    (6.5, 4.5),    (9.5, 4.5),    Color::RED),
    tri((6.5, 4.5),    (6.5, 1.5),    (9.5, 4.5),    Color::PINK),
    tri((6.5, 1.5),    (9.5, 4.5),    (10.15, 4.20), Color::TEAL),
    tri((10.5, 10.5),  (9.5, 4.5),    (10.75, 6.25), Color::YELLOW),
    tri((9.5, 4.5),    (10.75, 6.25), (10.4, 4.75),  Color::GREEN),
    tri((9.5, 4.5),    (10.4, 4.75),  (10.15, 4.20), Color::ORANGE),
    tri((6.5, 1.5),    (15.5, 0.5),   (10.15, 4.20), Color::YELLOW),
    tri((10.5, 10.5),  (16.5, 10.5),  (10.75, 6.25), Color::RED),
    tri((10.75, 6.25), (16.5, 10.5),  (11.8, 5.1),   Color::TEAL),
    tri((10.75, 6.25), (10.4, 4.75),  (11.8, 5.1),   Color::BLUE),
    tri((10.4, 4.75),  (11.8, 5.1),   (16.5, 1.5),   Color::YELLOW),
    tri((10.4, 4.75),  (10.15, 4.20), (16.5, 1.5),   Color::PINK),
    tri((10.15, 4.20), (15.5, 0.5),   (16.5, 1.5),   Color::RED),
    tri((16.5, 1.5),   (16.5, 10.5),  (11.8, 5.1),   Color::GREEN),
    tri((15.5, 0.5),   (16.5, 0.5),   (16.5, 1.5),   Color::BLUE),
];

/// Fresh copy of the fixture at 1:1 scale
///
/// Returned by value so callers can transform it for one frame without
/// touching the next.
pub fn triangles() -> [FixtureTriangle; TRIANGLE_COUNT] {
    TRIANGLES
}

/// Corners of the backdrop the fixture is drawn over
/// (bottom-left, bottom-right, top-left, top-right)
pub const BACKGROUND: [Vec2; 4] = [vec2(0.0, 0.0), vec2(16.0, 0.0), vec2(0.0, 10.0), vec2(16.0, 10.0)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_fresh_each_call() {
        let mut a = triangles();
        a[0].points[0].x = 99.0;
        assert_eq!(triangles()[0].points[0].x, 0.5);
    }

    #[test]
    fn test_fixture_stays_near_background() {
        for t in triangles() {
            for p in t.points {
                assert!((0.0..=16.5).contains(&p.x) && (0.0..=10.5).contains(&p.y), "{:?}", p);
            }
        }
    }
}
