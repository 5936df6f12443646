use serde::{
    Deserialize,
    Serialize
};

use crate::math::geometryerror::GeometryError;

/// 線性比例尺：把 domain 區間映射到 range 區間，不做 clamp。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64)
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<LinearScale, GeometryError> {
        for v in [domain.0, domain.1, range.0, range.1] {
            GeometryError::ensure_finite(v, "scale bound")?;
        }
        if domain.0 == domain.1 {
            return Err(GeometryError::invalid_input(
                format!("scale domain [{}, {}] is empty", domain.0, domain.1)));
        }
        Ok(LinearScale { domain, range })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn scale(&self, value: f64) -> f64 {
        let ratio = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        f64::mul_add(ratio, self.range.1 - self.range.0, self.range.0)
    }

    /// `range` 退化成單點時回傳 domain 的起點。
    pub fn invert(&self, value: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        if span == 0.0 {
            return self.domain.0;
        }
        let ratio = (value - self.range.0) / span;
        f64::mul_add(ratio, self.domain.1 - self.domain.0, self.domain.0)
    }
}
