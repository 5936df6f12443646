use nalgebra::Vector2;

use crate::math::point2d::Point2D;

/// 以參數 t ∈ [0, 1] 描述的平面曲線。
pub trait ParametricCurve {
    fn point_at(&self, t: f64) -> Point2D;

    fn derivative_at(&self, t: f64) -> Vector2<f64>;

    fn start(&self) -> Point2D {
        self.point_at(0.0)
    }

    fn end(&self) -> Point2D {
        self.point_at(1.0)
    }
}
