//! Per-axis natural-log remapping applied before bounds and scaling.

use std::ops::BitOrAssign;

use crate::core::{data::Point, error::PlotError};

/// Two-bit flag set over {log-x, log-y}.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Transform(u8);

impl Transform {
    pub const NONE: Self = Self(0);
    pub const LOG_X: Self = Self(0b01);
    pub const LOG_Y: Self = Self(0b10);
    pub const LOG_XY: Self = Self(0b11);

    #[must_use]
    pub fn new(log_x: bool, log_y: bool) -> Self {
        let mut t = Self::NONE;
        if log_x {
            t |= Self::LOG_X;
        }
        if log_y {
            t |= Self::LOG_Y;
        }
        t
    }

    #[inline]
    #[must_use]
    pub const fn log_x(self) -> bool {
        self.0 & Self::LOG_X.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn log_y(self) -> bool {
        self.0 & Self::LOG_Y.0 != 0
    }

    /// Map a raw point into transformed value space.
    ///
    /// Zero stays zero on a log axis so an axis allowed to touch the origin
    /// does not produce `-inf`.
    ///
    /// # Errors
    /// [`PlotError::LogDomain`] when a log axis sees a negative value.
    pub fn apply(self, p: Point) -> Result<Point, PlotError> {
        Ok(Point {
            x: if self.log_x() { log_or_zero(p.x)? } else { p.x },
            y: if self.log_y() { log_or_zero(p.y)? } else { p.y },
        })
    }

    /// Undo the x transform, for reporting bounds in input units.
    #[inline]
    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        if self.log_x() { x.exp() } else { x }
    }

    /// Undo the y transform, for reporting bounds in input units.
    #[inline]
    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        if self.log_y() { y.exp() } else { y }
    }
}

impl BitOrAssign for Transform {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[inline]
fn log_or_zero(v: f64) -> Result<f64, PlotError> {
    if v == 0.0 {
        return Ok(0.0);
    }
    let l = v.ln();
    if l.is_finite() {
        Ok(l)
    } else {
        Err(PlotError::LogDomain(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Point = Point { x: 10.0, y: 100.0 };

    #[test]
    fn flags_from_bools() {
        assert_eq!(Transform::new(false, false), Transform::NONE);
        assert_eq!(Transform::new(true, false), Transform::LOG_X);
        assert_eq!(Transform::new(false, true), Transform::LOG_Y);
        assert_eq!(Transform::new(true, true), Transform::LOG_XY);
    }

    #[test]
    fn applies_each_axis() {
        assert_eq!(Transform::NONE.apply(P).unwrap(), P);
        assert_eq!(
            Transform::LOG_X.apply(P).unwrap(),
            Point { x: 10f64.ln(), y: 100.0 }
        );
        assert_eq!(
            Transform::LOG_Y.apply(P).unwrap(),
            Point { x: 10.0, y: 100f64.ln() }
        );
        assert_eq!(
            Transform::LOG_XY.apply(P).unwrap(),
            Point { x: 10f64.ln(), y: 100f64.ln() }
        );
    }

    #[test]
    fn log_round_trips_through_exp() {
        let out = Transform::LOG_X.apply(P).unwrap();
        assert!((Transform::LOG_X.invert_x(out.x) - P.x).abs() < 1e-9);
    }

    #[test]
    fn zero_stays_zero_on_log_axis() {
        let out = Transform::LOG_XY.apply(Point { x: 0.0, y: 0.0 }).unwrap();
        assert_eq!(out, Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn negative_is_a_domain_error() {
        let err = Transform::LOG_Y.apply(Point { x: 1.0, y: -3.0 }).unwrap_err();
        assert!(matches!(err, PlotError::LogDomain(v) if v == -3.0));
    }
}
