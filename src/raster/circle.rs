use super::line::draw_segment;
use crate::display::RenderBuffer;
use crate::math::{vec2, Color};

/// Draw a circle centered at (xm, ym) using the midpoint algorithm
///
/// Each step plots the four symmetric points. With `fill` set, every time the
/// y accumulator advances the matching row pair is spanned with segments, so
/// the interior is covered one scanline at a time.
pub fn draw_circle(buffer: &mut RenderBuffer, xm: f32, ym: f32, r: f32, c: Color, fill: bool) {
    // Beyond 2^24 the unit steps of the walk stop changing x
    if !(xm.is_finite() && ym.is_finite() && r.abs() < 16_777_216.0) {
        return;
    }

    let mut x = -r;
    let mut y = 0.0_f32;
    let mut err = 2.0 - 2.0 * r;

    loop {
        buffer.draw_pixel(xm - x, ym + y, c);
        buffer.draw_pixel(xm - y, ym - x, c);
        buffer.draw_pixel(xm + x, ym - y, c);
        buffer.draw_pixel(xm + y, ym + x, c);

        let e = err;
        if e <= y {
            if fill {
                // x is negative here, so the span runs right to left
                draw_segment(buffer, vec2(xm - x - 1.0, ym + y), vec2(xm + x, ym + y), c);
                if y != 0.0 {
                    draw_segment(buffer, vec2(xm - x - 1.0, ym - y), vec2(xm + x, ym - y), c);
                }
            }
            y += 1.0;
            err += y * 2.0 + 1.0;
        }
        if e > x || err > y {
            x += 1.0;
            err += x * 2.0 + 1.0;
        }
        if x >= 0.0 {
            break;
        }
    }
}
