use nalgebra::Vector2;
use serde::{
    Deserialize,
    Serialize
};
use tracing::{
    debug,
    warn
};

use crate::math::curve::cubicbezier::CubicBezier;
use crate::math::curve::pathspec::PathSpec;
use crate::math::geometryerror::GeometryError;
use crate::math::point2d::Point2D;

// ─────────────────────────────────────────────────────────────────────────────
// ClosedCurveFitter
// ─────────────────────────────────────────────────────────────────────────────
//
// 對環狀點列 P[0..n) 擬合封閉的三次 Bezier 路徑：
//
//   切線估計  T_i = P[i+1] - P[i-1]              （索引取 mod n）
//   單位方向  D_i = T_i / |T_i|
//   入控制點  C⁻_i = P_i - D_i · |P_i - P[i-1]| · tension
//   出控制點  C⁺_i = P_i + D_i · |P[i+1] - P_i| · tension
//
//   第 i 段：P_i → C⁺_i → C⁻_{i+1} → P_{i+1}
//
// 建議 tension 介於 0.3 ~ 0.7；範圍外仍會計算，但曲線可能自我相交。

pub const RECOMMENDED_TENSION_MIN: f64 = 0.3;
pub const RECOMMENDED_TENSION_MAX: f64 = 0.7;

/// 垂直方向的切線拉伸修正。
///
/// 日照地圖的環在上下兩端資料稀疏，切線幾乎垂直且很長時會出現尖角，
/// 把切線的 y 分量放大後再正規化可以壓平這些尖角。
/// 這是針對單一資料集調出來的經驗值，不是通用的幾何規則。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchCorrection {
    distance_threshold: f64,
    vertical_multiplier: f64
}

impl StretchCorrection {
    pub fn new(distance_threshold: f64, vertical_multiplier: f64) -> StretchCorrection {
        StretchCorrection { distance_threshold, vertical_multiplier }
    }

    pub fn distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    pub fn vertical_multiplier(&self) -> f64 {
        self.vertical_multiplier
    }

    pub fn apply(&self, tangent: Vector2<f64>) -> Vector2<f64> {
        let vertical_dominant = tangent.y.abs() > tangent.x.abs();
        if vertical_dominant && tangent.norm() > self.distance_threshold {
            Vector2::new(tangent.x, tangent.y * self.vertical_multiplier)
        } else {
            tangent
        }
    }
}

impl Default for StretchCorrection {
    fn default() -> StretchCorrection {
        StretchCorrection::new(600.0, 6.0)
    }
}

/// 單一節點與其前後控制點。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePointDescriptor {
    point: Point2D,
    control_in: Point2D,
    control_out: Point2D
}

impl CurvePointDescriptor {
    pub fn point(&self) -> Point2D {
        self.point
    }

    pub fn control_in(&self) -> Point2D {
        self.control_in
    }

    pub fn control_out(&self) -> Point2D {
        self.control_out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedCurveFitter {
    tension: f64,
    stretch: Option<StretchCorrection>
}

impl ClosedCurveFitter {
    pub fn new(tension: f64, stretch: Option<StretchCorrection>) -> Result<ClosedCurveFitter, GeometryError> {
        GeometryError::ensure_finite(tension, "tension")?;
        if let Some(s) = &stretch {
            GeometryError::ensure_finite(s.distance_threshold, "stretch distance threshold")?;
            GeometryError::ensure_finite(s.vertical_multiplier, "stretch vertical multiplier")?;
        }
        if !(RECOMMENDED_TENSION_MIN..=RECOMMENDED_TENSION_MAX).contains(&tension) {
            warn!(tension, "tension outside the recommended range, curve may self-intersect");
        }
        Ok(ClosedCurveFitter { tension, stretch })
    }

    /// 不做拉伸修正的擬合器。
    pub fn plain(tension: f64) -> Result<ClosedCurveFitter, GeometryError> {
        ClosedCurveFitter::new(tension, None)
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn stretch(&self) -> Option<StretchCorrection> {
        self.stretch
    }

    pub fn descriptors(&self, points: &[Point2D]) -> Result<Vec<CurvePointDescriptor>, GeometryError> {
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::invalid_input(
                format!("a closed curve needs at least 3 points, got {}", n)));
        }
        for (i, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(GeometryError::invalid_input(format!("point {} is not finite", i)));
            }
        }

        (0..n)
            .map(|i| {
                let prev = points[(i + n - 1) % n];
                let point = points[i];
                let next = points[(i + 1) % n];

                let dist_prev = Point2D::distance(&prev, &point);
                let dist_next = Point2D::distance(&point, &next);
                if dist_next == 0.0 {
                    return Err(GeometryError::DegenerateGeometry { index: i });
                }

                let mut tangent = next - prev;
                if let Some(stretch) = &self.stretch {
                    tangent = stretch.apply(tangent);
                }
                let norm = tangent.norm();
                if norm == 0.0 {
                    return Err(GeometryError::DegenerateGeometry { index: i });
                }
                let direction = tangent / norm;

                Ok(CurvePointDescriptor {
                    point,
                    control_in: point.offset(&direction, -dist_prev * self.tension),
                    control_out: point.offset(&direction, dist_next * self.tension)
                })
            })
            .collect()
    }

    pub fn fit(&self, points: &[Point2D]) -> Result<PathSpec, GeometryError> {
        let descriptors = self.descriptors(points)?;
        let n = descriptors.len();
        let segments = (0..n)
            .map(|i| {
                let from = &descriptors[i];
                let to = &descriptors[(i + 1) % n];
                CubicBezier::new(from.point, from.control_out, to.control_in, to.point)
            })
            .collect();
        debug!(points = n, tension = self.tension, "fitted closed curve");
        Ok(PathSpec::new(segments))
    }
}

/// 以預設拉伸修正（600 單位、6 倍）擬合封閉曲線。
/// 不要修正時改用 `ClosedCurveFitter::plain`。
pub fn fit_closed_curve(points: &[Point2D], tension: f64) -> Result<PathSpec, GeometryError> {
    ClosedCurveFitter::new(tension, Some(StretchCorrection::default()))?.fit(points)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::curve::curve::ParametricCurve;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    #[test]
    fn square_segments_pass_through_corners() {
        let path = fit_closed_curve(&square(), 0.5).unwrap();
        assert_eq!(path.len(), 4);
        let corners = square();
        for (i, segment) in path.segments().iter().enumerate() {
            assert_eq!(segment.point_at(0.0), corners[i]);
            assert_eq!(segment.point_at(1.0), corners[(i + 1) % 4]);
        }
    }

    #[test]
    fn square_controls_follow_diagonal_tangent() {
        let descriptors = ClosedCurveFitter::plain(0.5).unwrap().descriptors(&square()).unwrap();
        let h = 5.0 / 2f64.sqrt();
        // 角 (10, 0) 的切線為 (10,10) - (0,0)
        let corner = descriptors[1];
        assert_relative_eq!(corner.control_out().x(), 10.0 + h, epsilon = 1e-12);
        assert_relative_eq!(corner.control_out().y(), h, epsilon = 1e-12);
        assert_relative_eq!(corner.control_in().x(), 10.0 - h, epsilon = 1e-12);
        assert_relative_eq!(corner.control_in().y(), -h, epsilon = 1e-12);
        let origin = descriptors[0];
        assert_relative_eq!(origin.control_out().x(), h, epsilon = 1e-12);
        assert_relative_eq!(origin.control_out().y(), -h, epsilon = 1e-12);
    }

    #[test]
    fn reversed_winding_traces_the_same_curve() {
        let fitter = ClosedCurveFitter::plain(0.4).unwrap();
        let path = fitter.fit(&square()).unwrap();
        let mut reversed_points = square();
        reversed_points.reverse();
        let reversed = fitter.fit(&reversed_points).unwrap();

        let mut expected_vertices = square();
        expected_vertices.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
        let mut actual_vertices = reversed.vertices();
        actual_vertices.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
        assert_eq!(actual_vertices, expected_vertices);

        for segment in reversed.segments() {
            let original = path.segments().iter()
                .find(|s| s.start() == segment.end() && s.end() == segment.start())
                .unwrap();
            let mirrored = original.reversed();
            assert_relative_eq!(mirrored.control1().x(), segment.control1().x(), epsilon = 1e-12);
            assert_relative_eq!(mirrored.control1().y(), segment.control1().y(), epsilon = 1e-12);
            assert_relative_eq!(mirrored.control2().x(), segment.control2().x(), epsilon = 1e-12);
            assert_relative_eq!(mirrored.control2().y(), segment.control2().y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn fitting_is_repeatable() {
        let points = vec![
            Point2D::new(3.0, 1.0),
            Point2D::new(8.0, 2.5),
            Point2D::new(6.0, 9.0),
            Point2D::new(1.0, 7.0),
            Point2D::new(-2.0, 3.0),
        ];
        let first = fit_closed_curve(&points, 0.6).unwrap();
        let second = fit_closed_curve(&points, 0.6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stretch_applies_only_to_long_vertical_tangents() {
        let stretch = StretchCorrection::default();
        let long_vertical = stretch.apply(Vector2::new(100.0, 700.0));
        assert_relative_eq!(long_vertical.y, 4200.0);
        let short_vertical = stretch.apply(Vector2::new(100.0, 500.0));
        assert_relative_eq!(short_vertical.y, 500.0);
        let long_horizontal = stretch.apply(Vector2::new(900.0, 700.0));
        assert_relative_eq!(long_horizontal.y, 700.0);
    }

    #[test]
    fn stretch_flattens_controls_at_tall_ring_ends() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(200.0, 400.0),
            Point2D::new(-200.0, 800.0),
            Point2D::new(-300.0, 400.0),
        ];
        let plain = ClosedCurveFitter::plain(0.5).unwrap().descriptors(&points).unwrap();
        let stretched = ClosedCurveFitter::new(0.5, Some(StretchCorrection::default()))
            .unwrap()
            .descriptors(&points)
            .unwrap();
        // 右側節點的切線 (-200, 800) 長度超過 600 且以垂直為主
        let plain_dx = (plain[1].control_out().x() - 200.0).abs();
        let stretched_dx = (stretched[1].control_out().x() - 200.0).abs();
        assert!(stretched_dx < plain_dx);
        // 上下兩端的切線為水平，不受影響
        assert_eq!(plain[0], stretched[0]);
    }

    #[test]
    fn free_function_applies_default_stretch() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(200.0, 400.0),
            Point2D::new(-200.0, 800.0),
            Point2D::new(-300.0, 400.0),
        ];
        let fitted = fit_closed_curve(&points, 0.5).unwrap();
        let stretched = ClosedCurveFitter::new(0.5, Some(StretchCorrection::default()))
            .unwrap()
            .fit(&points)
            .unwrap();
        let plain = ClosedCurveFitter::plain(0.5).unwrap().fit(&points).unwrap();
        assert_eq!(fitted, stretched);
        assert_ne!(fitted, plain);
        assert_eq!(fitted.vertices(), plain.vertices());
    }

    #[test]
    fn too_few_points_are_rejected() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
        assert!(matches!(fit_closed_curve(&points, 0.5), Err(GeometryError::InvalidInput(_))));
        assert!(matches!(fit_closed_curve(&[], 0.5), Err(GeometryError::InvalidInput(_))));
    }

    #[test]
    fn coincident_neighbours_are_degenerate() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 0.0),
            Point2D::new(5.0, 0.0),
            Point2D::new(0.0, 5.0),
        ];
        assert_eq!(
            fit_closed_curve(&points, 0.5).unwrap_err(),
            GeometryError::DegenerateGeometry { index: 1 }
        );
    }

    #[test]
    fn collapsed_tangent_is_degenerate() {
        // 第 1 點的前後鄰居重合
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(-4.0, 4.0),
        ];
        assert_eq!(
            fit_closed_curve(&points, 0.5).unwrap_err(),
            GeometryError::DegenerateGeometry { index: 1 }
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut points = square();
        points[2] = Point2D::new(f64::NAN, 1.0);
        assert!(matches!(fit_closed_curve(&points, 0.5), Err(GeometryError::InvalidInput(_))));
        assert!(matches!(fit_closed_curve(&square(), f64::NAN), Err(GeometryError::InvalidInput(_))));
    }
}
