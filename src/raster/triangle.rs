//! Scanline triangle rasterizer
//!
//! Vertices are ordered top to bottom, then the triangle is either filled
//! directly (flat top / flat bottom) or split at the middle vertex's height
//! into one of each. Spans follow the top-left rule: a pixel is covered when
//! its center lies inside, `ceil(x - 0.5)` inclusive on the left and
//! exclusive on the right, so triangles sharing an edge never overlap.
//!
//! Known quirk: vertices are ordered with three fixed compare-and-swaps, not
//! a stable sort. Equal heights keep whatever order those swaps leave, and
//! the flat-top / flat-bottom choice depends on it. Keep the sequence as is;
//! changing it changes the pixels produced for degenerate input.

use super::line::draw_segment;
use crate::display::RenderBuffer;
use crate::math::{Color, Vec2};

/// Fill and/or outline a triangle
///
/// Accepts anything convertible into three points (`[Vec2; 3]` or a
/// `(Vec2, Vec2, Vec2)` tuple). Without `fill` only the three edges are
/// traced in `c`.
pub fn draw_triangle(
    buffer: &mut RenderBuffer,
    points: impl Into<[Vec2; 3]>,
    c: Color,
    fill: bool,
) {
    let mut verts = sort_by_height(points.into());
    if fill {
        fill_sorted(buffer, &mut verts, c);
    } else {
        trace_edges(buffer, &verts, c);
    }
}

/// Like `draw_triangle`, but the edges are always traced in `outline`
/// after the (optional) fill pass
pub fn draw_triangle_outline(
    buffer: &mut RenderBuffer,
    points: impl Into<[Vec2; 3]>,
    c: Color,
    outline: Color,
    fill: bool,
) {
    let mut verts = sort_by_height(points.into());
    if fill {
        fill_sorted(buffer, &mut verts, c);
    }
    trace_edges(buffer, &verts, outline);
}

/// Order vertices by descending y with three pairwise swaps
#[inline]
fn sort_by_height(points: [Vec2; 3]) -> [Vec2; 3] {
    let [mut p0, mut p1, mut p2] = points;
    if p0.y < p1.y {
        std::mem::swap(&mut p0, &mut p1);
    }
    if p0.y < p2.y {
        std::mem::swap(&mut p0, &mut p2);
    }
    if p1.y < p2.y {
        std::mem::swap(&mut p1, &mut p2);
    }
    [p0, p1, p2]
}

fn trace_edges(buffer: &mut RenderBuffer, verts: &[Vec2; 3], c: Color) {
    let [p0, p1, p2] = *verts;
    draw_segment(buffer, p0, p1, c);
    draw_segment(buffer, p1, p2, c);
    draw_segment(buffer, p2, p0, c);
}

/// Fill a height-sorted triangle
///
/// Flat cases put their shared-height pair in left-to-right order in place,
/// which is the vertex order the edge pass then traces.
fn fill_sorted(buffer: &mut RenderBuffer, verts: &mut [Vec2; 3], c: Color) {
    if verts[0].y == verts[1].y {
        if verts[0].x > verts[1].x {
            verts.swap(0, 1);
        }
        fill_flat_top(buffer, verts[0], verts[1], verts[2], c);
    } else if verts[1].y == verts[2].y {
        if verts[1].x > verts[2].x {
            verts.swap(1, 2);
        }
        fill_flat_bottom(buffer, verts[0], verts[1], verts[2], c);
    } else {
        let [top, mid, bottom] = *verts;
        // Where the long edge crosses the middle vertex's height
        let split_x = top.x + ((mid.y - top.y) / (bottom.y - top.y)) * (bottom.x - top.x);
        let split = Vec2::new(split_x, mid.y);
        let (left, right) = if mid.x > split.x {
            (split, mid)
        } else {
            (mid, split)
        };
        fill_flat_top(buffer, left, right, bottom, c);
        fill_flat_bottom(buffer, top, left, right, c);
    }
}

/// Fill span of one scanline, clipped to the buffer
#[inline]
fn fill_span(buffer: &mut RenderBuffer, y: i32, x_left: f32, x_right: f32, c: Color) {
    let start_x = ((x_left - 0.5).ceil() as i32).max(0);
    let end_x = ((x_right - 0.5).ceil() as i32).min(buffer.width() as i32);
    for x in start_x..end_x {
        buffer.draw_pixel(x as f32, y as f32, c);
    }
}

/// Horizontal edge `left`-`right` on top, `apex` below
///
/// Covers rows from the apex up to, not including, the top edge's row.
fn fill_flat_top(buffer: &mut RenderBuffer, left: Vec2, right: Vec2, apex: Vec2, c: Color) {
    let left_slope = (left.x - apex.x) / (left.y - apex.y);
    let right_slope = (right.x - apex.x) / (right.y - apex.y);

    let start_y = (apex.y.round() as i32).max(0);
    let end_y = (left.y.round() as i32).min(buffer.height() as i32);

    for y in start_y..end_y {
        let row = y as f32 + 0.5;
        let x0 = left_slope * (row - left.y) + left.x;
        let x1 = right_slope * (row - right.y) + right.x;
        fill_span(buffer, y, x0, x1, c);
    }
}

/// `apex` on top, horizontal edge `left`-`right` below
///
/// Covers rows from the apex's row down to the bottom edge's row, both
/// included.
fn fill_flat_bottom(buffer: &mut RenderBuffer, apex: Vec2, left: Vec2, right: Vec2, c: Color) {
    let left_slope = (left.x - apex.x) / (left.y - apex.y);
    let right_slope = (right.x - apex.x) / (right.y - apex.y);

    let start_y = (apex.y.round() as i32).min(buffer.height() as i32 - 1);
    let end_y = (left.y.round() as i32).max(0);

    for y in (end_y..=start_y).rev() {
        let row = y as f32 + 0.5 - apex.y;
        let x0 = left_slope * row + apex.x;
        let x1 = right_slope * row + apex.x;
        fill_span(buffer, y, x0, x1, c);
    }
}
