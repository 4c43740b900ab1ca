//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! World values (`Meters`) and device values (`Px`) never mix implicitly:
//! the only way across is a [`ChartTransform`](crate::transform::ChartTransform).

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN, infinite, zero and negative values.
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Reject NaN and infinite values.
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

macro_rules! unit_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
        #[repr(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: $name = $name(0.0);

            #[inline]
            pub fn abs(self) -> $name {
                $name(self.0.abs())
            }

            #[inline]
            pub fn min(self, other: $name) -> $name {
                $name(self.0.min(other.0))
            }

            #[inline]
            pub fn max(self, other: $name) -> $name {
                $name(self.0.max(other.0))
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name { $name(self.0 + rhs.0) }
        }
        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name { $name(self.0 - rhs.0) }
        }
        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name { $name(self.0 * rhs) }
        }
        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name { $name(self.0 / rhs) }
        }
        impl Neg for $name {
            type Output = $name;
            fn neg(self) -> $name { $name(-self.0) }
        }
        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) { self.0 += rhs.0; }
        }
        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) { self.0 -= rhs.0; }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

unit_newtype!(
    /// Length or level in world units (meters)
    Meters
);

unit_newtype!(
    /// Device pixels
    Px
);

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self {
        Size { w, h }
    }
}

/// A displacement vector (not an absolute position)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Offset<T> {
    pub fn new(dx: T, dy: T) -> Self {
        Offset { dx, dy }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

/// Convenient aliases
pub type PtW = Point<Meters>;
pub type PtPx = Point<Px>;
pub type BoxW = BBox<Meters>;
pub type BoxPx = BBox<Px>;

pub fn pw(x: f64, y: f64) -> PtW {
    Point::new(Meters(x), Meters(y))
}

pub fn ppx(x: f64, y: f64) -> PtPx {
    Point::new(Px(x), Px(y))
}

macro_rules! bbox_impl {
    ($unit:ident) => {
        impl BBox<$unit> {
            /// Create an empty bounding box (will expand on first point)
            pub fn new() -> Self {
                BBox {
                    min: Point { x: $unit(f64::MAX), y: $unit(f64::MAX) },
                    max: Point { x: $unit(f64::MIN), y: $unit(f64::MIN) },
                }
            }

            /// Box spanning two corners given in any order.
            pub fn from_corners(a: Point<$unit>, b: Point<$unit>) -> Self {
                BBox {
                    min: Point { x: a.x.min(b.x), y: a.y.min(b.y) },
                    max: Point { x: a.x.max(b.x), y: a.y.max(b.y) },
                }
            }

            /// Box with the given top-left corner and size.
            pub fn from_origin_size(origin: Point<$unit>, size: Size<$unit>) -> Self {
                BBox {
                    min: origin,
                    max: Point { x: origin.x + size.w, y: origin.y + size.h },
                }
            }

            /// Check if the bbox is empty (never expanded)
            pub fn is_empty(&self) -> bool {
                self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
            }

            /// Expand to include a point
            pub fn expand_point(&mut self, p: Point<$unit>) {
                self.min.x = self.min.x.min(p.x);
                self.min.y = self.min.y.min(p.y);
                self.max.x = self.max.x.max(p.x);
                self.max.y = self.max.y.max(p.y);
            }

            /// Expand to include another box
            pub fn expand_box(&mut self, other: &BBox<$unit>) {
                if other.is_empty() {
                    return;
                }
                self.expand_point(other.min);
                self.expand_point(other.max);
            }

            pub fn width(&self) -> $unit {
                self.max.x - self.min.x
            }

            pub fn height(&self) -> $unit {
                self.max.y - self.min.y
            }

            pub fn center(&self) -> Point<$unit> {
                Point {
                    x: (self.min.x + self.max.x) / 2.0,
                    y: (self.min.y + self.max.y) / 2.0,
                }
            }

            /// Inclusive containment test.
            pub fn contains(&self, p: Point<$unit>) -> bool {
                p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
            }

            /// Open-interval overlap: boxes that merely touch do not intersect.
            pub fn intersects(&self, other: &BBox<$unit>) -> bool {
                self.min.x < other.max.x
                    && other.min.x < self.max.x
                    && self.min.y < other.max.y
                    && other.min.y < self.max.y
            }
        }

        impl Default for BBox<$unit> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

bbox_impl!(Meters);
bbox_impl!(Px);

/// Add an offset to a point to get a new point
impl<T: Add<Output = T>> Add<Offset<T>> for Point<T> {
    type Output = Point<T>;
    fn add(self, rhs: Offset<T>) -> Point<T> {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

/// Subtract two points to get an offset
impl<T: Sub<Output = T>> Sub<Point<T>> for Point<T> {
    type Output = Offset<T>;
    fn sub(self, rhs: Point<T>) -> Offset<T> {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl PtPx {
    pub fn to_dvec2(self) -> glam::DVec2 {
        glam::dvec2(self.x.0, self.y.0)
    }

    pub fn from_dvec2(v: glam::DVec2) -> Self {
        ppx(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_positive_rejects_bad_values() {
        assert_eq!(check_positive(f64::NAN), Err(NumericError::NaN));
        assert_eq!(check_positive(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(check_positive(0.0), Err(NumericError::Zero));
        assert_eq!(check_positive(-1.0), Err(NumericError::Negative));
        assert_eq!(check_positive(2.5), Ok(2.5));
    }

    #[test]
    fn check_finite_allows_negative() {
        assert_eq!(check_finite(-3.0), Ok(-3.0));
        assert_eq!(check_finite(f64::NEG_INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn meters_arithmetic() {
        let a = Meters(3.0);
        let b = Meters(2.0);

        assert_eq!(a + b, Meters(5.0));
        assert_eq!(a - b, Meters(1.0));
        assert_eq!(a * 2.0, Meters(6.0));
        assert_eq!(a / 2.0, Meters(1.5));
        assert_eq!(-a, Meters(-3.0));
        assert_eq!(a.min(b), b);
        assert_eq!(a.max(b), a);
    }

    #[test]
    fn point_plus_offset_gives_point() {
        let p = ppx(1.0, 2.0);
        let o = Offset::new(Px(3.0), Px(4.0));
        assert_eq!(p + o, ppx(4.0, 6.0));
        assert_eq!(ppx(5.0, 7.0) - ppx(2.0, 3.0), Offset::new(Px(3.0), Px(4.0)));
    }

    #[test]
    fn bbox_new_is_empty() {
        assert!(BoxPx::new().is_empty());
        assert!(BoxW::new().is_empty());
    }

    #[test]
    fn bbox_from_corners_normalizes() {
        let bb = BoxPx::from_corners(ppx(10.0, 2.0), ppx(4.0, 8.0));
        assert_eq!(bb.min, ppx(4.0, 2.0));
        assert_eq!(bb.max, ppx(10.0, 8.0));
        assert_eq!(bb.width(), Px(6.0));
        assert_eq!(bb.height(), Px(6.0));
        assert_eq!(bb.center(), ppx(7.0, 5.0));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = BoxPx::from_corners(ppx(0.0, 0.0), ppx(10.0, 10.0));
        let below = BoxPx::from_corners(ppx(0.0, 10.0), ppx(10.0, 20.0));
        let overlapping = BoxPx::from_corners(ppx(5.0, 5.0), ppx(15.0, 15.0));

        assert!(!a.intersects(&below));
        assert!(a.intersects(&overlapping));
        assert!(a.intersects(&a));
    }

    #[test]
    fn bbox_expand_box_ignores_empty() {
        let mut bb = BoxW::from_corners(pw(0.0, 0.0), pw(1.0, 1.0));
        bb.expand_box(&BoxW::new());
        assert_eq!(bb.max, pw(1.0, 1.0));
        bb.expand_box(&BoxW::from_corners(pw(-1.0, 0.5), pw(0.5, 3.0)));
        assert_eq!(bb.min, pw(-1.0, 0.0));
        assert_eq!(bb.max, pw(1.0, 3.0));
    }
}
