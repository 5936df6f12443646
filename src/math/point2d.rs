use std::ops::{Add, Sub};

use nalgebra::Vector2;
use serde::{
    Deserialize,
    Serialize
};

/// 平面座標點（繪圖座標，y 軸向下）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_vector(v: &Vector2<f64>) -> Point2D {
        Point2D::new(v.x, v.y)
    }

    pub fn distance(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.to_vector() - lhs_pt.to_vector()).norm()
    }

    /// 沿 `direction` 平移 `length` 的距離。
    pub fn offset(&self, direction: &Vector2<f64>, length: f64) -> Point2D {
        *self + direction * length
    }
}

impl Add<Vector2<f64>> for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Vector2<f64>) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Vector2<f64>;

    fn sub(self, rhs: Point2D) -> Vector2<f64> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
