use tracing::debug;

use crate::math::curve::closedcurve::ClosedCurveFitter;
use crate::math::curve::pathspec::PathSpec;
use crate::math::divider::dividerlocator::DividerLocator;
use crate::math::geometryerror::GeometryError;
use crate::math::point2d::Point2D;
use crate::math::scale::geographicprojection::GeographicProjection;
use crate::sunshine::sunshineseries::SunshineSeries;

pub const DEFAULT_MONTH_SPACING: f64 = 6.0;

/// 月份間距必須為正，否則同一城市的兩個穿越點會疊在一起。
pub fn ensure_month_spacing(month_spacing: f64) -> Result<f64, GeometryError> {
    GeometryError::ensure_finite(month_spacing, "month spacing")?;
    if month_spacing <= 0.0 {
        return Err(GeometryError::invalid_input(
            format!("month spacing must be positive, got {}", month_spacing)));
    }
    Ok(month_spacing)
}

/// 某城市的序列對單一門檻的穿越位置。
#[derive(Debug, Clone, PartialEq)]
pub struct CityDivider {
    city: String,
    longitude: f64,
    latitude: f64,
    sample_count: usize,
    crossings: Vec<f64>
}

impl CityDivider {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn crossings(&self) -> &[f64] {
        &self.crossings
    }

    /// 序列中央的索引，月份偏移以此為零點。
    pub fn centre(&self) -> f64 {
        (self.sample_count as f64 - 1.0) / 2.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SunshineMap
// ─────────────────────────────────────────────────────────────────────────────
//
// 城市依緯度由南到北排列。每個城市在投影座標上以月份為水平軸展開：
//
//   x = project(lon).x + (crossing - centre) · month_spacing
//   y = project(lat).y
//
// 往北走時取每個城市的第一個穿越點，往南回來時取最後一個，
// 圍成的環即日照超過門檻的月份帶。

pub struct SunshineMap {
    series: Vec<SunshineSeries>,
    locator: DividerLocator,
    fitter: ClosedCurveFitter,
    projection: GeographicProjection,
    month_spacing: f64
}

impl SunshineMap {
    pub fn new(mut series: Vec<SunshineSeries>,
               locator: DividerLocator,
               fitter: ClosedCurveFitter,
               projection: GeographicProjection,
               month_spacing: f64) -> Result<SunshineMap, GeometryError> {
        ensure_month_spacing(month_spacing)?;
        for s in &series {
            GeometryError::ensure_finite(s.latitude(), &format!("latitude of {}", s.city()))?;
            GeometryError::ensure_finite(s.longitude(), &format!("longitude of {}", s.city()))?;
        }
        series.sort_by(|a, b| a.latitude().total_cmp(&b.latitude()));
        Ok(SunshineMap { series, locator, fitter, projection, month_spacing })
    }

    /// 由南到北排列的城市序列。
    pub fn series(&self) -> &[SunshineSeries] {
        &self.series
    }

    pub fn dividers(&self, threshold: f64) -> Result<Vec<CityDivider>, GeometryError> {
        self.series
            .iter()
            .map(|s| -> Result<CityDivider, GeometryError> {
                let values = s.values();
                let crossings = self.locator.locate_crossings(&values, threshold, true)?;
                Ok(CityDivider {
                    city: s.city().to_owned(),
                    longitude: s.longitude(),
                    latitude: s.latitude(),
                    sample_count: values.len(),
                    crossings
                })
            })
            .collect()
    }

    fn divider_point(&self, divider: &CityDivider, crossing: f64) -> Point2D {
        let anchor = self.projection.project(divider.longitude, divider.latitude);
        Point2D::new(anchor.x() + (crossing - divider.centre()) * self.month_spacing, anchor.y())
    }

    pub fn band_ring(&self, threshold: f64) -> Result<Vec<Point2D>, GeometryError> {
        let dividers = self.dividers(threshold)?;
        let mut ring = Vec::new();
        for divider in &dividers {
            if let Some(&first) = divider.crossings.first() {
                ring.push(self.divider_point(divider, first));
            }
        }
        for divider in dividers.iter().rev() {
            if divider.crossings.len() > 1 {
                if let Some(&last) = divider.crossings.last() {
                    ring.push(self.divider_point(divider, last));
                }
            }
        }
        debug!(threshold, points = ring.len(), "built band ring");
        Ok(ring)
    }

    pub fn band_path(&self, threshold: f64) -> Result<PathSpec, GeometryError> {
        let ring = self.band_ring(threshold)?;
        self.fitter.fit(&ring)
    }
}
