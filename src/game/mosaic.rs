use crate::display::RenderBuffer;
use crate::math::Vec2;
use crate::raster::grid_walk;

/// Upscale a low-resolution region of `source` into `cell`-sized blocks
///
/// `area` holds corner points (bottom-left, bottom-right, top-left, ...).
/// Every sample in it, plus one extra column on the right, is read from
/// `source` and painted as a `(cell - 1)` square block at `sample * cell`,
/// leaving a one pixel seam between blocks. Blocks are clipped to `buffer`.
pub fn draw_mosaic(buffer: &mut RenderBuffer, source: &RenderBuffer, area: &[Vec2; 4], cell: f32) {
    if !(cell.is_finite() && cell > 0.0) {
        return;
    }

    let (width, height) = (buffer.width(), buffer.height());
    // Steps per block side; past the buffer size the rest is clipped anyway
    let span = (cell - 1.0).ceil().min(width.max(height) as f32 + 1.0);
    if span < 1.0 {
        return;
    }

    let x_start = area[0].x.round() as i32;
    let x_end = area[1].x.round() as i32 + 1;
    let y_start = area[0].y.round() as i32;
    let y_end = area[2].y.round() as i32;

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let c = source.get_color(x as f32, y as f32);
            let block_x = x as f32 * cell;
            let block_y = y as f32 * cell;

            for y2 in grid_walk(block_y, block_y + span - 1.0, height) {
                for x2 in grid_walk(block_x, block_x + span - 1.0, width) {
                    buffer.draw_pixel(x2, y2, c);
                }
            }
        }
    }
}
