use nalgebra::Vector2;
use serde::Serialize;

use crate::math::curve::curve::ParametricCurve;
use crate::math::point2d::Point2D;

// ─────────────────────────────────────────────
// CubicBezier
// ─────────────────────────────────────────────
//
//   B(t)  = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
//   B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicBezier {
    start: Point2D,
    control1: Point2D,
    control2: Point2D,
    end: Point2D
}

impl CubicBezier {
    pub fn new(start: Point2D, control1: Point2D, control2: Point2D, end: Point2D) -> CubicBezier {
        CubicBezier { start, control1, control2, end }
    }

    pub fn control1(&self) -> Point2D {
        self.control1
    }

    pub fn control2(&self) -> Point2D {
        self.control2
    }

    /// 反向走訪同一條曲線。
    pub fn reversed(&self) -> CubicBezier {
        CubicBezier::new(self.end, self.control2, self.control1, self.start)
    }
}

impl ParametricCurve for CubicBezier {
    fn point_at(&self, t: f64) -> Point2D {
        let u = 1.0 - t;
        let v = self.start.to_vector() * (u * u * u)
            + self.control1.to_vector() * (3.0 * u * u * t)
            + self.control2.to_vector() * (3.0 * u * t * t)
            + self.end.to_vector() * (t * t * t);
        Point2D::from_vector(&v)
    }

    fn derivative_at(&self, t: f64) -> Vector2<f64> {
        let u = 1.0 - t;
        (self.control1 - self.start) * (3.0 * u * u)
            + (self.control2 - self.control1) * (6.0 * u * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }

    fn start(&self) -> Point2D {
        self.start
    }

    fn end(&self) -> Point2D {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sample_curve() -> CubicBezier {
        CubicBezier::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 2.0),
            Point2D::new(3.0, 2.0),
            Point2D::new(4.0, 0.0),
        )
    }

    #[test]
    fn evaluates_endpoints_exactly() {
        let curve = sample_curve();
        assert_eq!(curve.point_at(0.0), Point2D::new(0.0, 0.0));
        assert_eq!(curve.point_at(1.0), Point2D::new(4.0, 0.0));
    }

    #[test]
    fn symmetric_curve_peaks_at_midpoint() {
        let mid = sample_curve().point_at(0.5);
        assert_relative_eq!(mid.x(), 2.0);
        assert_relative_eq!(mid.y(), 1.5);
        assert_relative_eq!(sample_curve().derivative_at(0.5).y, 0.0);
    }

    #[test]
    fn derivative_at_ends_points_at_controls() {
        let curve = sample_curve();
        let d0 = curve.derivative_at(0.0);
        assert_relative_eq!(d0.x, 3.0);
        assert_relative_eq!(d0.y, 6.0);
        let d1 = curve.derivative_at(1.0);
        assert_relative_eq!(d1.x, 3.0);
        assert_relative_eq!(d1.y, -6.0);
    }

    #[test]
    fn reversed_traces_the_same_points_backwards() {
        let curve = sample_curve();
        let reversed = curve.reversed();
        for &t in &[0.0, 0.2, 0.5, 0.9] {
            let a = curve.point_at(t);
            let b = reversed.point_at(1.0 - t);
            assert_relative_eq!(a.x(), b.x(), epsilon = 1e-12);
            assert_relative_eq!(a.y(), b.y(), epsilon = 1e-12);
        }
    }
}
