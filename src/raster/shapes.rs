//! Compound shapes built from pixels, segments and triangles

use super::line::draw_segment;
use super::triangle::draw_triangle;
use crate::display::RenderBuffer;
use crate::math::{Color, Rect, Vec2};

/// Walk `start, start + 1, ...` up to `end` inclusive
///
/// Steps that can't round into `[0, limit)` are skipped up front so huge or
/// far offscreen rectangles cost nothing; `draw_pixel` still does the exact
/// bounds check on whatever is left.
pub(crate) fn grid_walk(start: f32, end: f32, limit: u32) -> impl Iterator<Item = f32> {
    let (first, last) = if start.is_finite() && end.is_finite() {
        let first = (-0.5 - start).floor().max(0.0);
        let last = (end - start).floor().min((limit as f32 - start).ceil());
        (first as i64, last as i64)
    } else {
        (0, -1)
    };
    (first..=last).map(move |i| start + i as f32)
}

/// Fill an axis-aligned rectangle, including its far edges
///
/// A `w` by `h` rect covers `w + 1` columns and `h + 1` rows.
pub fn draw_rect(buffer: &mut RenderBuffer, r: Rect, c: Color) {
    let (width, height) = (buffer.width(), buffer.height());
    for y in grid_walk(r.y, r.y + r.h, height) {
        for x in grid_walk(r.x, r.x + r.w, width) {
            buffer.draw_pixel(x, y, c);
        }
    }
}

/// Fill the rectangle described by corner points
///
/// Corners are bottom-left, bottom-right, top-left, top-right (see
/// `Rect::corners`); they are rounded first and only the first three are
/// read.
pub fn draw_rect_pts(buffer: &mut RenderBuffer, points: &[Vec2; 4], c: Color) {
    let p0 = points[0].round();
    let p1 = points[1].round();
    let p2 = points[2].round();

    let (width, height) = (buffer.width(), buffer.height());
    for y in grid_walk(p0.y, p2.y, height) {
        for x in grid_walk(p0.x, p1.x, width) {
            buffer.draw_pixel(x, y, c);
        }
    }
}

/// Outline an axis-aligned rectangle with four segments
pub fn draw_box(buffer: &mut RenderBuffer, rect: Rect, c: Color) {
    let [p0, p1, p2, p3] = rect.outline();
    draw_segment(buffer, p0, p1, c);
    draw_segment(buffer, p1, p2, c);
    draw_segment(buffer, p2, p3, c);
    draw_segment(buffer, p3, p0, c);
}

/// Draw a convex quad as the triangles p0-p1-p2 and p0-p2-p3
///
/// Non-convex input renders wrong; that's accepted.
pub fn draw_quad(buffer: &mut RenderBuffer, points: &[Vec2; 4], c: Color, fill: bool) {
    let [p0, p1, p2, p3] = *points;
    draw_triangle(buffer, (p0, p1, p2), c, fill);
    draw_triangle(buffer, (p0, p2, p3), c, fill);
}

/// Outline a closed polygon through all points
pub fn draw_polygon(buffer: &mut RenderBuffer, points: &[Vec2], c: Color) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    let mut prev = first;
    for &p in rest {
        draw_segment(buffer, prev, p, c);
        prev = p;
    }
    draw_segment(buffer, first, prev, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    const WHITE: u32 = 0x00FF_FFFF;

    fn pixels(buffer: &RenderBuffer) -> Vec<(i32, i32)> {
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

    fn block(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.push((x, y));
            }
        }
        out
    }

    #[test]
    fn test_rect_includes_far_edges() {
        let mut buf = RenderBuffer::with_size(10, 10);
        draw_rect(&mut buf, Rect::new(2.0, 3.0, 4.0, 2.0), Color::WHITE);
        assert_eq!(pixels(&buf), block(2, 3, 6, 5));
    }

    #[test]
    fn test_rect_clipped_and_offscreen() {
        let mut buf = RenderBuffer::with_size(4, 3);
        draw_rect(&mut buf, Rect::new(-1000.0, -5.0, 2000.0, 1000.0), Color::WHITE);
        assert_eq!(pixels(&buf), block(0, 0, 3, 2));

        let mut buf = RenderBuffer::with_size(4, 3);
        draw_rect(&mut buf, Rect::new(10.0, 10.0, 5.0, 5.0), Color::WHITE);
        draw_rect(&mut buf, Rect::new(f32::NAN, 0.0, 1.0, 1.0), Color::WHITE);
        assert!(pixels(&buf).is_empty());
    }

    #[test]
    fn test_rect_pts_rounds_corners() {
        let mut a = RenderBuffer::with_size(10, 10);
        let corners = [vec2(0.6, 1.4), vec2(3.4, 1.4), vec2(0.6, 2.6), vec2(3.4, 2.6)];
        draw_rect_pts(&mut a, &corners, Color::WHITE);
        assert_eq!(pixels(&a), block(1, 1, 3, 3));

        let mut b = RenderBuffer::with_size(10, 10);
        draw_rect(&mut b, Rect::new(1.0, 1.0, 2.0, 2.0), Color::WHITE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_box_outline() {
        let mut buf = RenderBuffer::with_size(8, 8);
        draw_box(&mut buf, Rect::new(1.0, 1.0, 3.0, 2.0), Color::WHITE);
        assert_eq!(
            pixels(&buf),
            vec![
                (1, 1), (2, 1), (3, 1), (4, 1),
                (1, 2), (4, 2),
                (1, 3), (2, 3), (3, 3), (4, 3),
            ]
        );
    }

    #[test]
    fn test_unit_quad_matches_rect() {
        // The quad's right/top edges are exclusive, the rect's inclusive
        let mut quad = RenderBuffer::with_size(6, 6);
        draw_quad(&mut quad, &[vec2(1.0, 1.0), vec2(2.0, 1.0), vec2(2.0, 2.0), vec2(1.0, 2.0)], Color::WHITE, true);
        let mut rect = RenderBuffer::with_size(6, 6);
        draw_rect(&mut rect, Rect::new(1.0, 1.0, 0.0, 0.0), Color::WHITE);
        assert_eq!(pixels(&quad), vec![(1, 1)]);
        assert_eq!(quad, rect);
    }

    #[test]
    fn test_quad_matches_rect_without_seam() {
        let half = Color::WHITE.with_alpha(0.5);
        for r in [Rect::new(2.0, 2.0, 3.0, 3.0), Rect::new(3.0, 1.0, 4.0, 2.0)] {
            let mut quad = RenderBuffer::with_size(12, 12);
            let p = [
                vec2(r.x, r.y),
                vec2(r.x + r.w + 1.0, r.y),
                vec2(r.x + r.w + 1.0, r.y + r.h + 1.0),
                vec2(r.x, r.y + r.h + 1.0),
            ];
            draw_quad(&mut quad, &p, half, true);
            let mut rect = RenderBuffer::with_size(12, 12);
            draw_rect(&mut rect, r, half);
            assert_eq!(quad, rect, "{:?}", r);
        }
    }

    #[test]
    fn test_polygon_closes_loop() {
        let mut buf = RenderBuffer::with_size(8, 8);
        draw_polygon(&mut buf, &[vec2(1.0, 1.0), vec2(5.0, 1.0), vec2(3.0, 4.0)], Color::WHITE);
        assert_eq!(
            pixels(&buf),
            vec![(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (2, 2), (4, 2), (2, 3), (4, 3)]
        );
        assert_eq!(buf.pixel(5, 1), Some(WHITE));

        let mut empty = RenderBuffer::with_size(4, 4);
        draw_polygon(&mut empty, &[], Color::WHITE);
        draw_polygon(&mut empty, &[vec2(1.0, 1.0)], Color::WHITE);
        assert!(pixels(&empty).is_empty());
    }
}
