use serde::{
    Deserialize,
    Serialize
};

use crate::math::geometryerror::GeometryError;
use crate::math::point2d::Point2D;
use crate::math::scale::linearscale::LinearScale;

/// 經緯度外框與畫布大小。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBounds {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64
}

fn default_width() -> f64 {
    1280.0
}

fn default_height() -> f64 {
    760.0
}

impl Default for ProjectionBounds {
    /// 美國本土
    fn default() -> ProjectionBounds {
        ProjectionBounds {
            min_longitude: -125.0,
            max_longitude: -66.0,
            min_latitude: 24.0,
            max_latitude: 50.0,
            width: default_width(),
            height: default_height()
        }
    }
}

/// 等距圓柱投影：經度 → x，緯度 → y（北方朝上）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicProjection {
    x_scale: LinearScale,
    y_scale: LinearScale
}

impl GeographicProjection {
    pub fn new(bounds: &ProjectionBounds) -> Result<GeographicProjection, GeometryError> {
        let x_scale = LinearScale::new(
            (bounds.min_longitude, bounds.max_longitude),
            (0.0, bounds.width))?;
        let y_scale = LinearScale::new(
            (bounds.min_latitude, bounds.max_latitude),
            (bounds.height, 0.0))?;
        Ok(GeographicProjection { x_scale, y_scale })
    }

    pub fn project(&self, longitude: f64, latitude: f64) -> Point2D {
        Point2D::new(self.x_scale.scale(longitude), self.y_scale.scale(latitude))
    }

    /// 回傳 (longitude, latitude)。
    pub fn invert(&self, point: &Point2D) -> (f64, f64) {
        (self.x_scale.invert(point.x()), self.y_scale.invert(point.y()))
    }
}
