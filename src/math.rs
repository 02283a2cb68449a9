//! 2D Math Utilities for the Rasterizer
//!
//! Value types shared by every drawing routine (points, colors, rectangles)
//! plus the in-place point transforms used to position shapes before they
//! are rasterized.

use std::f32::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

/// 2D point / vector in buffer coordinates (y grows upward)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Snap both coordinates to the pixel grid (half away from zero)
    #[inline]
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Shorthand constructor, reads well in fixture tables
#[inline]
pub const fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

// ============================================================================
// Color
// ============================================================================

/// Floating point RGBA color
///
/// Channels are nominally in [0, 1]; `a` is the blend weight used by
/// `draw_pixel`. Callers don't need to clamp, the blend primitive does.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 0.5);
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 0.5);
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 0.5);
    pub const MAGENTA: Self = Self::rgba(1.0, 0.0, 1.0, 0.5);
    pub const PINK: Self = Self::rgba(0.92, 0.62, 0.96, 0.5);
    pub const YELLOW: Self = Self::rgba(0.9, 0.9, 0.0, 0.5);
    pub const TEAL: Self = Self::rgba(0.0, 1.0, 1.0, 0.5);
    pub const ORANGE: Self = Self::rgba(1.0, 0.5, 0.15, 0.5);
    pub const DARK_GRAY: Self = Self::rgba(0.5, 0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Self = Self::rgba(0.8, 0.8, 0.8, 0.5);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different blend weight
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle: bottom-left origin plus size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from an origin point and a size vector
    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Build from two opposite corners, in any order
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Corners as bottom-left, bottom-right, top-left, top-right
    ///
    /// This is the ordering `draw_rect_pts` expects.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            vec2(self.x, self.y),
            vec2(self.x + self.w, self.y),
            vec2(self.x, self.y + self.h),
            vec2(self.x + self.w, self.y + self.h),
        ]
    }

    /// Corners walked counter-clockwise (for outlines and quads)
    pub fn outline(&self) -> [Vec2; 4] {
        [
            vec2(self.x, self.y),
            vec2(self.x + self.w, self.y),
            vec2(self.x + self.w, self.y + self.h),
            vec2(self.x, self.y + self.h),
        ]
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

// ============================================================================
// Point transforms
// ============================================================================

/// Average of all points (the zero vector for an empty slice)
pub fn calc_center(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::zero();
    }
    let sum = points.iter().fold(Vec2::zero(), |acc, &p| acc + p);
    let n = points.len() as f32;
    vec2(sum.x / n, sum.y / n)
}

/// Move every point by `translation`
pub fn translate(points: &mut [Vec2], translation: Vec2) {
    for p in points.iter_mut() {
        *p = *p + translation;
    }
}

/// Scale every point by `scalar` about `origin`
pub fn scale(points: &mut [Vec2], scalar: f32, origin: Vec2) {
    for p in points.iter_mut() {
        *p = (*p - origin) * scalar + origin;
    }
}

/// Scale every point by `scalar` about the coordinate origin
pub fn scale_pts(points: &mut [Vec2], scalar: f32) {
    scale(points, scalar, Vec2::zero());
}

/// Rotate `p` counter-clockwise by `angle` degrees about `origin`
pub fn rotate_pt(p: Vec2, angle: f32, origin: Vec2) -> Vec2 {
    let (sin, cos) = (angle * PI / 180.0).sin_cos();
    let d = p - origin;
    vec2(d.x * cos - d.y * sin + origin.x, d.x * sin + d.y * cos + origin.y)
}

/// Rotate every point by `angle` degrees about `origin`
pub fn rotate_pts(points: &mut [Vec2], angle: f32, origin: Vec2) {
    for p in points.iter_mut() {
        *p = rotate_pt(*p, angle, origin);
    }
}
