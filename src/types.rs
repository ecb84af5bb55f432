//! Numeric primitives for chart geometry.
//!
//! - Angles are `Degrees`, measured clockwise from 12 o'clock.
//! - Pixel positions are `glam::DVec2` in chart space (origin at the canvas
//!   top-left, Y down).
//! - Anything typed by a user goes through `parse_finite` before it can reach
//!   geometry.

use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Input text was empty
    Empty,
    /// Input text is not a number
    NotANumber,
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Empty => write!(f, "value is empty"),
            NumericError::NotANumber => write!(f, "value is not a number"),
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Parse user-typed text into a finite number.
pub fn parse_finite(text: &str) -> Result<f64, NumericError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NumericError::Empty);
    }
    let val: f64 = text.parse().map_err(|_| NumericError::NotANumber)?;
    finite(val)
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(val: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (val * scale).round() / scale
}

/// An angle in degrees, clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub const ZERO: Degrees = Degrees(0.0);
    pub const FULL_TURN: Degrees = Degrees(360.0);

    /// Radians in standard math convention (0 = 3 o'clock, Y down in SVG),
    /// i.e. rotated by -90° so that 0° points up.
    #[inline]
    pub fn to_screen_radians(self) -> f64 {
        (self.0 - 90.0).to_radians()
    }

    /// Inverse of `to_screen_radians`.
    #[inline]
    pub fn from_screen_radians(rad: f64) -> Degrees {
        Degrees(rad.to_degrees() + 90.0)
    }

    /// Wrap into `[0, 360)`.
    #[inline]
    pub fn normalized(self) -> Degrees {
        Degrees(self.0.rem_euclid(360.0))
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Degrees {
    type Output = Degrees;
    fn add(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Degrees;
    fn sub(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 - rhs.0)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Axis-aligned rectangle in chart space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn from_center_size(center: DVec2, size: DVec2) -> Self {
        let half = size * 0.5;
        Rect {
            min: center - half,
            max: center + half,
        }
    }

    pub fn inflate(self, amount: f64) -> Self {
        Rect {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn parse_finite_accepts_numbers() {
        assert_eq!(parse_finite("42"), Ok(42.0));
        assert_eq!(parse_finite("  -3.5 "), Ok(-3.5));
        assert_eq!(parse_finite("1e2"), Ok(100.0));
    }

    #[test]
    fn parse_finite_rejects_garbage() {
        assert_eq!(parse_finite(""), Err(NumericError::Empty));
        assert_eq!(parse_finite("   "), Err(NumericError::Empty));
        assert_eq!(parse_finite("abc"), Err(NumericError::NotANumber));
        assert_eq!(parse_finite("12px"), Err(NumericError::NotANumber));
    }

    #[test]
    fn parse_finite_rejects_non_finite() {
        assert_eq!(parse_finite("NaN"), Err(NumericError::NaN));
        assert_eq!(parse_finite("inf"), Err(NumericError::Infinite));
        assert_eq!(parse_finite("-infinity"), Err(NumericError::Infinite));
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235001, 2), 1.24);
        assert_eq!(round_to(-0.004, 2), -0.0);
    }

    #[test]
    fn degrees_zero_points_up() {
        let rad = Degrees::ZERO.to_screen_radians();
        assert!((rad.cos()).abs() < 1e-12);
        assert!((rad.sin() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn degrees_screen_radians_roundtrip() {
        for deg in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            let back = Degrees::from_screen_radians(Degrees(deg).to_screen_radians());
            assert!((back.0 - deg).abs() < 1e-9, "{} -> {}", deg, back.0);
        }
    }

    #[test]
    fn degrees_normalized() {
        assert_eq!(Degrees(-90.0).normalized(), Degrees(270.0));
        assert_eq!(Degrees(360.0).normalized(), Degrees(0.0));
        assert_eq!(Degrees(725.0).normalized(), Degrees(5.0));
    }

    #[test]
    fn rect_contains_and_inflate() {
        let r = Rect::from_center_size(dvec2(10.0, 10.0), dvec2(4.0, 2.0));
        assert!(r.contains(dvec2(11.9, 10.9)));
        assert!(!r.contains(dvec2(12.5, 10.0)));
        assert!(r.inflate(1.0).contains(dvec2(12.5, 10.0)));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
        assert_eq!(r.center(), dvec2(10.0, 10.0));
    }
}
