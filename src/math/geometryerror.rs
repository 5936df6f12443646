use thiserror::Error;

/// 幾何計算的錯誤。
///
/// 原本的繪圖流程遇到空序列或重合點時會讓 NaN 一路流進 path，
/// 這裡改成明確回傳錯誤。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("degenerate geometry at point {index}: zero-length tangent or coincident neighbour")]
    DegenerateGeometry { index: usize },
}

impl GeometryError {
    pub fn invalid_input(message: impl Into<String>) -> GeometryError {
        GeometryError::InvalidInput(message.into())
    }

    pub fn ensure_finite(value: f64, what: &str) -> Result<f64, GeometryError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GeometryError::InvalidInput(format!("{} must be finite, got {}", what, value)))
        }
    }
}
