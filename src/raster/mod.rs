//! Software rasterizer
//!
//! Drawing routines that write straight into a `RenderBuffer`. Everything
//! here is total: offscreen pixels are dropped, degenerate shapes draw
//! nothing, nothing is reported back.

mod circle;
mod line;
mod shapes;
mod triangle;

pub use circle::draw_circle;
pub use line::{draw_line, draw_ray, draw_segment};
pub(crate) use shapes::grid_walk;
pub use shapes::{draw_box, draw_polygon, draw_quad, draw_rect, draw_rect_pts};
pub use triangle::{draw_triangle, draw_triangle_outline};
