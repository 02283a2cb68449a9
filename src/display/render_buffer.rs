use crate::math::Color;

/// Every pixel is one `u32` word packed as `0x00RRGGBB`
pub const BYTES_PER_PIXEL: u32 = 4;

const RGB_MASK: u32 = 0x00FF_FFFF;

// ============================================================================
// Utility Functions
// ============================================================================

/// Source-over blend of one 8-bit channel against a [0, 1] source channel
///
/// The result is rounded, then clamped so an over-range source can never
/// carry into the neighbouring channel.
#[inline]
fn blend_channel(current: u32, src: f32, alpha: f32) -> u32 {
    let blended = (1.0 - alpha) * current as f32 + alpha * (src * 255.0);
    blended.round().clamp(0.0, 255.0) as u32
}

/// Composite `c` over a packed pixel word, keeping the unused high byte
#[inline]
fn blend_word(word: u32, c: Color) -> u32 {
    let r = blend_channel((word >> 16) & 0xFF, c.r, c.a);
    let g = blend_channel((word >> 8) & 0xFF, c.g, c.a);
    let b = blend_channel(word & 0xFF, c.b, c.a);
    (word & !RGB_MASK) | (r << 16) | (g << 8) | b
}

/// Unpack a pixel word into an opaque color
#[inline]
fn word_to_color(word: u32) -> Color {
    Color::rgba(
        ((word >> 16) & 0xFF) as f32 / 255.0,
        ((word >> 8) & 0xFF) as f32 / 255.0,
        (word & 0xFF) as f32 / 255.0,
        1.0,
    )
}

// ============================================================================
// RenderBuffer
// ============================================================================

/// 32-bit `0x00RRGGBB` render target for the software rasterizer
///
/// Memory is row-major with a fixed pitch, and the vertical axis is flipped:
/// memory row 0 holds screen row `height - 1`, so `y = 0` is the bottom edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBuffer {
    memory: Vec<u8>,
    width: u32,
    height: u32,
    pitch: usize,
}

impl RenderBuffer {
    /// Create a zeroed (black) buffer
    ///
    /// # Panics
    /// Panics if the byte size overflows `usize`, like `Vec` does on capacity
    /// overflow. Use `try_with_size` to handle that case.
    pub fn with_size(width: u32, height: u32) -> Self {
        match Self::try_with_size(width, height) {
            Some(buffer) => buffer,
            None => panic!("render buffer size overflow: {}x{}", width, height),
        }
    }

    /// Create a zeroed buffer, or None if its byte size doesn't fit in `usize`
    pub fn try_with_size(width: u32, height: u32) -> Option<Self> {
        let pitch = (width as usize).checked_mul(BYTES_PER_PIXEL as usize)?;
        let len = (height as usize).checked_mul(pitch)?;
        Some(Self {
            memory: vec![0; len],
            width,
            height,
            pitch,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per memory row
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> u32 {
        BYTES_PER_PIXEL
    }

    /// Check if integer coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Byte offset of screen pixel (x, y), applying the vertical flip
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (self.height - 1 - y) as usize * self.pitch + x as usize * BYTES_PER_PIXEL as usize
    }

    #[inline]
    fn read_word(&self, offset: usize) -> u32 {
        let m = &self.memory;
        u32::from_ne_bytes([m[offset], m[offset + 1], m[offset + 2], m[offset + 3]])
    }

    #[inline]
    fn write_word(&mut self, offset: usize, word: u32) {
        self.memory[offset..offset + 4].copy_from_slice(&word.to_ne_bytes());
    }

    /// Raw packed word at integer screen coordinates, None if out of bounds
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.read_word(self.pixel_offset(x as u32, y as u32)) & RGB_MASK)
        } else {
            None
        }
    }

    /// Read the pixel at truncated coordinates as an opaque color
    ///
    /// Reads outside the buffer return opaque black.
    pub fn get_color(&self, x: f32, y: f32) -> Color {
        match self.pixel(x as i32, y as i32) {
            Some(word) => word_to_color(word),
            None => Color::BLACK,
        }
    }

    /// Alpha-composite `c` onto the pixel nearest to (x, y)
    ///
    /// Coordinates are rounded half away from zero. Writes outside the
    /// buffer are silently dropped; clipped lines and circles rely on that.
    pub fn draw_pixel(&mut self, x: f32, y: f32, c: Color) {
        let x = x.round();
        let y = y.round();

        // Negated form also rejects NaN coordinates
        if !(x >= 0.0 && x < self.width as f32 && y >= 0.0 && y < self.height as f32) {
            return;
        }

        let offset = self.pixel_offset(x as u32, y as u32);
        let word = self.read_word(offset);
        self.write_word(offset, blend_word(word, c));
    }

    /// Composite `c` over every pixel (an opaque color clears the buffer)
    pub fn clear(&mut self, c: Color) {
        for chunk in self.memory.chunks_exact_mut(BYTES_PER_PIXEL as usize) {
            let word = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            chunk.copy_from_slice(&blend_word(word, c).to_ne_bytes());
        }
    }

    /// Take a full copy of `src` (dimensions included)
    pub fn copy_from(&mut self, src: &RenderBuffer) {
        self.width = src.width;
        self.height = src.height;
        self.pitch = src.pitch;
        self.memory.clone_from(&src.memory);
    }

    /// Raw memory, bottom row first
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.memory
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1.0 / 255.0 + f32::EPSILON
    }

    #[test]
    fn test_geometry() {
        let buf = RenderBuffer::with_size(7, 3);
        assert_eq!(buf.pitch(), 28);
        assert_eq!(buf.bytes_per_pixel(), 4);
        assert_eq!(buf.as_bytes().len(), 84);
    }

    #[test]
    fn test_size_overflow_is_reported() {
        assert!(RenderBuffer::try_with_size(u32::MAX, u32::MAX).is_none());
        let buf = RenderBuffer::try_with_size(3, 2).unwrap();
        assert_eq!(buf.as_bytes().len(), 24);
        assert_eq!(buf, RenderBuffer::with_size(3, 2));
    }

    #[test]
    fn test_pixel_offsets() {
        let buf = RenderBuffer::with_size(7, 3);
        assert_eq!(buf.pixel_offset(0, 2), 0);
        assert_eq!(buf.pixel_offset(6, 0), 80);
        assert!(!buf.in_bounds(7, 0) && !buf.in_bounds(0, -1));
    }

    #[test]
    fn test_draw_then_read_opaque() {
        let mut buf = RenderBuffer::with_size(8, 8);
        let c = Color::rgba(0.2, 0.4, 0.6, 1.0);
        buf.draw_pixel(3.0, 5.0, c);
        let read = buf.get_color(3.0, 5.0);
        assert!(channel_close(read.r, c.r), "r {}", read.r);
        assert!(channel_close(read.g, c.g), "g {}", read.g);
        assert!(channel_close(read.b, c.b), "b {}", read.b);
        assert_eq!(read.a, 1.0);
        assert_eq!(buf.pixel(3, 5), Some(0x0033_6699));
    }

    #[test]
    fn test_zero_alpha_is_noop() {
        let mut buf = RenderBuffer::with_size(4, 4);
        buf.draw_pixel(1.0, 1.0, Color::rgba(0.3, 0.7, 0.1, 1.0));
        let before = buf.clone();
        for y in 0..4 {
            for x in 0..4 {
                buf.draw_pixel(x as f32, y as f32, Color::rgba(1.0, 1.0, 1.0, 0.0));
            }
        }
        assert_eq!(buf, before);
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut buf = RenderBuffer::with_size(2, 2);
        buf.draw_pixel(0.0, 0.0, Color::rgba(1.0, 0.0, 1.0, 0.5));
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(buf.pixel(0, 0), Some(0x0080_0080));
        buf.draw_pixel(0.0, 0.0, Color::rgba(1.0, 0.0, 1.0, 0.5));
        assert_eq!(buf.pixel(0, 0), Some(0x00C0_00C0));
    }

    #[test]
    fn test_coordinates_are_rounded() {
        let mut buf = RenderBuffer::with_size(4, 4);
        buf.draw_pixel(1.5, 2.49, Color::WHITE);
        assert_eq!(buf.pixel(2, 2), Some(0x00FF_FFFF));
        // Reads truncate instead
        assert_eq!(buf.get_color(2.9, 2.9), Color::WHITE);
    }

    #[test]
    fn test_out_of_bounds_is_silent() {
        let mut buf = RenderBuffer::with_size(4, 4);
        let before = buf.clone();
        buf.draw_pixel(-0.6, 0.0, Color::WHITE);
        buf.draw_pixel(4.0, 0.0, Color::WHITE);
        buf.draw_pixel(0.0, 3.5, Color::WHITE);
        buf.draw_pixel(f32::NAN, 0.0, Color::WHITE);
        assert_eq!(buf, before);
        assert_eq!(buf.get_color(10.0, 10.0), Color::BLACK);
    }

    #[test]
    fn test_vertical_flip() {
        let mut buf = RenderBuffer::with_size(2, 3);
        buf.draw_pixel(1.0, 2.0, Color::WHITE);
        // Top screen row lives at the start of memory
        assert_eq!(&buf.as_bytes()[4..8], &0x00FF_FFFFu32.to_ne_bytes());
        buf.draw_pixel(0.0, 0.0, Color::WHITE);
        let last_row = 2 * buf.pitch();
        assert_eq!(&buf.as_bytes()[last_row..last_row + 4], &0x00FF_FFFFu32.to_ne_bytes());
    }

    #[test]
    fn test_high_byte_untouched_and_clamped() {
        let mut buf = RenderBuffer::with_size(1, 1);
        buf.as_bytes_mut().copy_from_slice(&0xAB00_0000u32.to_ne_bytes());
        buf.draw_pixel(0.0, 0.0, Color::rgba(2.0, -1.0, 0.5, 1.0));
        let word = u32::from_ne_bytes([
            buf.as_bytes()[0],
            buf.as_bytes()[1],
            buf.as_bytes()[2],
            buf.as_bytes()[3],
        ]);
        assert_eq!(word, 0xABFF_0080);
    }

    #[test]
    fn test_clear_and_copy() {
        let mut buf = RenderBuffer::with_size(3, 2);
        buf.clear(Color::WHITE);
        assert!((0..2).all(|y| (0..3).all(|x| buf.pixel(x, y) == Some(0x00FF_FFFF))));

        let mut scratch = RenderBuffer::with_size(1, 1);
        scratch.copy_from(&buf);
        assert_eq!(scratch, buf);

        buf.clear(Color::BLACK);
        assert_eq!(buf.pixel(2, 1), Some(0));
        assert_eq!(scratch.pixel(2, 1), Some(0x00FF_FFFF));
    }
}
