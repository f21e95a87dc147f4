//! Ordinary least-squares line fit in transformed space.

use tracing::debug;

use crate::core::{data::Point, error::PlotError, transform::Transform};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[inline]
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit `y = slope·x + intercept` over the non-empty points of a column.
///
/// Returns `Ok(None)` when there is nothing to fit. Empty points are left
/// out of the means and of both residual sums.
///
/// # Errors
/// [`PlotError::LogDomain`] if a point cannot be transformed.
#[allow(clippy::cast_precision_loss)]
pub fn fit(points: &[Point], t: Transform) -> Result<Option<LinearFit>, PlotError> {
    let tp = points
        .iter()
        .filter(|p| !p.is_empty())
        .map(|&p| t.apply(p))
        .collect::<Result<Vec<_>, _>>()?;
    if tp.is_empty() {
        return Ok(None);
    }

    let n = tp.len() as f64;
    let mx = tp.iter().map(|p| p.x).sum::<f64>() / n;
    let my = tp.iter().map(|p| p.y).sum::<f64>() / n;

    let (num, den) = tp.iter().fold((0.0, 0.0), |(num, den), p| {
        let dx = p.x - mx;
        (dx.mul_add(p.y - my, num), dx.mul_add(dx, den))
    });

    let slope = num / den;
    let f = LinearFit {
        slope,
        intercept: slope.mul_add(-mx, my),
    };
    debug!(slope = f.slope, intercept = f.intercept, "regression");
    Ok(Some(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::EMPTY;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn assert_fit(f: LinearFit, slope: f64, intercept: f64) {
        assert!((f.slope - slope).abs() < 0.001, "slope {}", f.slope);
        assert!(
            (f.intercept - intercept).abs() < 0.001,
            "intercept {}",
            f.intercept
        );
    }

    #[test]
    fn no_points_no_line() {
        assert!(fit(&[], Transform::NONE).unwrap().is_none());
        let only_empty = pts(&[(0.0, EMPTY), (EMPTY, 1.0)]);
        assert!(fit(&only_empty, Transform::NONE).unwrap().is_none());
    }

    #[test]
    fn simple_line() {
        let p = pts(&[(0.0, 10.0), (1.0, 15.0), (2.0, 20.0), (3.0, 25.0), (4.0, 30.0)]);
        assert_fit(fit(&p, Transform::NONE).unwrap().unwrap(), 5.0, 10.0);
    }

    #[test]
    fn off_axis() {
        let p = pts(&[
            (1000.0, 1000.0),
            (1010.0, 1010.0),
            (1020.0, 1020.0),
            (1030.0, 1035.0),
            (1040.0, 1080.0),
        ]);
        assert_fit(fit(&p, Transform::NONE).unwrap().unwrap(), 1.85, -858.0);
    }

    #[test]
    fn through_all_quadrants() {
        let p = pts(&[(-3.0, -2.0), (-2.0, -1.0), (0.0, 1.0), (3.0, 3.0), (9.0, 9.0)]);
        let f = fit(&p, Transform::NONE).unwrap().unwrap();
        assert!((f.slope - 0.901).abs() < 0.001);
        assert!((f.intercept - 0.738_197).abs() < 0.001);
    }

    #[test]
    fn log_x() {
        let p: Vec<_> = (0..5)
            .map(|i| Point::new(f64::from(i).exp(), f64::from(i) + 50.0))
            .collect();
        assert_fit(fit(&p, Transform::LOG_X).unwrap().unwrap(), 1.0, 50.0);
    }

    #[test]
    fn log_y() {
        let p: Vec<_> = (0..5)
            .map(|i| Point::new(f64::from(i), f64::from(i).exp()))
            .collect();
        assert_fit(fit(&p, Transform::LOG_Y).unwrap().unwrap(), 1.0, 0.0);

        let p: Vec<_> = (0..5)
            .map(|i| Point::new(f64::from(i), f64::from(i).exp() + 10.0))
            .collect();
        assert_fit(
            fit(&p, Transform::LOG_Y).unwrap().unwrap(),
            0.440_159,
            2.193_48,
        );
    }

    #[test]
    fn empty_points_do_not_skew_the_fit() {
        let p = pts(&[
            (0.0, 10.0),
            (1.0, EMPTY),
            (1.0, 15.0),
            (EMPTY, 99.0),
            (2.0, 20.0),
        ]);
        assert_fit(fit(&p, Transform::NONE).unwrap().unwrap(), 5.0, 10.0);
    }

    #[test]
    fn evaluates_the_line() {
        let f = LinearFit {
            slope: 2.0,
            intercept: 1.0,
        };
        assert!((f.at(3.0) - 7.0).abs() < f64::EPSILON);
    }
}
