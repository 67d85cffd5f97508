//! Geometry primitives — point, rectangle, and affine transform.
//!
//! Port of the original Pretty Poly `pp_point_t`, `pp_rect_t`, and
//! `pp_mat3_t` (see `pretty-poly.h`), reshaped into idiomatic Rust value
//! types.

use core::ops::{Add, Div, Mul, Sub};

/// Scalar coordinate type used by [`Point`] and [`Transform`].
///
/// Matches the original source's `PP_COORD_TYPE float` default.
pub type Coord = f32;

// ============================================================================
// Point
// ============================================================================

/// A single polygon vertex.
///
/// Port of C `pp_point_t`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Apply an affine transform to this point.
    pub fn transform(self, m: &Transform) -> Point {
        m.apply(self)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Point {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Point {
    type Output = Point;
    fn div(self, rhs: Point) -> Point {
        Point::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Mul<Coord> for Point {
    type Output = Point;
    fn mul(self, s: Coord) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned integer rectangle, stored as origin + extent.
///
/// Port of C `pp_rect_t`. Unlike the teacher's `Rect<T>` (two corners,
/// `x1/y1/x2/y2`), Pretty Poly's rectangle is `(x, y, w, h)` — empty iff
/// `w == 0 || h == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Empty iff width or height is zero (port of `pp_rect_empty`).
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Overlap of two rectangles, or an empty rectangle if they don't
    /// overlap. Port of `pp_rect_intersection`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = (0).max((self.x + self.w).min(other.x + other.w) - x);
        let h = (0).max((self.y + self.h).min(other.y + other.h) - y);
        Rect::new(x, y, w, h)
    }

    /// Smallest rectangle containing both rectangles. Port of
    /// `pp_rect_merge`.
    pub fn merge(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let w = (self.x + self.w).max(other.x + other.w) - x;
        let h = (self.y + self.h).max(other.y + other.h) - y;
        Rect::new(x, y, w, h)
    }

    /// Axis-aligned bound of the four transformed corners.
    ///
    /// The original `pp_rect_transform` truncates the float min/max
    /// corners to `int32_t`, which can lose a pixel of coverage on
    /// rotation (`spec.md` §9, Open Question). This port floors the min
    /// and ceils the max instead.
    pub fn transform(&self, m: &Transform) -> Rect {
        let tl = Point::new(self.x as Coord, self.y as Coord).transform(m);
        let tr = Point::new((self.x + self.w) as Coord, self.y as Coord).transform(m);
        let bl = Point::new(self.x as Coord, (self.y + self.h) as Coord).transform(m);
        let br = Point::new((self.x + self.w) as Coord, (self.y + self.h) as Coord).transform(m);

        let min_x = tl.x.min(tr.x).min(bl.x).min(br.x);
        let min_y = tl.y.min(tr.y).min(bl.y).min(br.y);
        let max_x = tl.x.max(tr.x).max(bl.x).max(br.x);
        let max_y = tl.y.max(tr.y).max(bl.y).max(br.y);

        let x = min_x.floor() as i32;
        let y = min_y.floor() as i32;
        Rect::new(x, y, max_x.ceil() as i32 - x, max_y.ceil() as i32 - y)
    }
}

// ============================================================================
// Transform
// ============================================================================

/// A row-major 3×3 affine transform.
///
/// Port of C `pp_mat3_t`. The bottom row is conceptually always
/// `(0, 0, 1)`; it is stored explicitly so that [`Transform::mul`]
/// matches the original's full 3×3 matrix multiply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub v00: Coord,
    pub v01: Coord,
    pub v02: Coord,
    pub v10: Coord,
    pub v11: Coord,
    pub v12: Coord,
    pub v20: Coord,
    pub v21: Coord,
    pub v22: Coord,
}

impl Transform {
    /// Identity matrix.
    pub fn identity() -> Self {
        Self {
            v00: 1.0,
            v01: 0.0,
            v02: 0.0,
            v10: 0.0,
            v11: 1.0,
            v12: 0.0,
            v20: 0.0,
            v21: 0.0,
            v22: 1.0,
        }
    }

    /// Rotation matrix; `degrees` is the public-API angle, converted to
    /// radians internally (`spec.md` §4.1).
    pub fn rotation(degrees: Coord) -> Self {
        let a = degrees.to_radians();
        let (s, c) = a.sin_cos();
        let mut m = Self::identity();
        m.v00 = c;
        m.v01 = s;
        m.v10 = -s;
        m.v11 = c;
        m
    }

    /// Translation matrix.
    pub fn translation(x: Coord, y: Coord) -> Self {
        let mut m = Self::identity();
        m.v02 = x;
        m.v12 = y;
        m
    }

    /// Non-uniform scale matrix.
    pub fn scale(x: Coord, y: Coord) -> Self {
        let mut m = Self::identity();
        m.v00 = x;
        m.v11 = y;
        m
    }

    /// Standard 3×3 matrix multiply, `self * rhs` (row-vector convention:
    /// `apply(p) = p * self`, so composing `a.mul(&b)` then applying
    /// transforms by `a` first, then `b`, matching the original's
    /// `pp_mat3_mul(m1, m2)`).
    pub fn mul(&self, rhs: &Transform) -> Transform {
        Transform {
            v00: self.v00 * rhs.v00 + self.v01 * rhs.v10 + self.v02 * rhs.v20,
            v01: self.v00 * rhs.v01 + self.v01 * rhs.v11 + self.v02 * rhs.v21,
            v02: self.v00 * rhs.v02 + self.v01 * rhs.v12 + self.v02 * rhs.v22,
            v10: self.v10 * rhs.v00 + self.v11 * rhs.v10 + self.v12 * rhs.v20,
            v11: self.v10 * rhs.v01 + self.v11 * rhs.v11 + self.v12 * rhs.v21,
            v12: self.v10 * rhs.v02 + self.v11 * rhs.v12 + self.v12 * rhs.v22,
            v20: self.v20 * rhs.v00 + self.v21 * rhs.v10 + self.v22 * rhs.v20,
            v21: self.v20 * rhs.v01 + self.v21 * rhs.v11 + self.v22 * rhs.v21,
            v22: self.v20 * rhs.v02 + self.v21 * rhs.v12 + self.v22 * rhs.v22,
        }
    }

    /// Apply this transform to a point: `(v00*x + v01*y + v02, v10*x +
    /// v11*y + v12)`.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.v00 * p.x + self.v01 * p.y + self.v02,
            self.v10 * p.x + self.v11 * p.y + self.v12,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
