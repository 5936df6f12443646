use serde::{
    Deserialize,
    Serialize
};
use tracing::trace;

use crate::math::geometryerror::GeometryError;

// ─────────────────────────────────────────────────────────────────────────────
// DividerLocator
// ─────────────────────────────────────────────────────────────────────────────
//
// 在有序樣本序列中找出門檻值被穿越的位置（小數索引）：
//
//   s[i-1] < threshold < s[i]（或反向）時
//     crossing = (i - 1) + (threshold - s[i-1]) / (s[i] - s[i-1])
//
//   s[i] == threshold 時直接輸出整數索引 i。
//
// 序列不會在內部排序，呼叫端需要自行排好（例如依緯度）。

/// 首尾補界的慣例。
///
/// 歷史上有兩種寫法：舊版用 `index ± 1`，新版用 `index ± 0.5`。
/// 兩者不混用，由呼叫端明確選擇。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPadding {
    /// `-0.5` 與 `len - 0.5`
    #[default]
    HalfStep,
    /// `-1` 與 `len`
    FullStep
}

impl BoundaryPadding {
    fn step(&self) -> f64 {
        match self {
            BoundaryPadding::HalfStep => 0.5,
            BoundaryPadding::FullStep => 1.0
        }
    }

    pub fn leading(&self) -> f64 {
        -self.step()
    }

    pub fn trailing(&self, len: usize) -> f64 {
        len as f64 - 1.0 + self.step()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DividerLocator {
    padding: BoundaryPadding
}

impl DividerLocator {
    pub fn new(padding: BoundaryPadding) -> DividerLocator {
        DividerLocator { padding }
    }

    pub fn padding(&self) -> BoundaryPadding {
        self.padding
    }

    /// 回傳依索引遞增排列的穿越位置。
    ///
    /// `pad_ends` 為真時，若首（尾）樣本嚴格高於門檻，代表高於門檻的區段
    /// 在序列之外才開始（結束），此時補上邊界值讓區段成對。
    pub fn locate_crossings(&self,
                            samples: &[f64],
                            threshold: f64,
                            pad_ends: bool) -> Result<Vec<f64>, GeometryError> {
        if samples.is_empty() {
            return Err(GeometryError::invalid_input("sample sequence is empty"));
        }
        GeometryError::ensure_finite(threshold, "threshold")?;
        for (i, &s) in samples.iter().enumerate() {
            GeometryError::ensure_finite(s, &format!("sample {}", i))?;
        }

        let mut crossings = Vec::new();
        if pad_ends && samples[0] > threshold {
            crossings.push(self.padding.leading());
        }

        for i in 0..samples.len() {
            if i > 0 {
                let lhs = samples[i - 1];
                let rhs = samples[i];
                let strictly_between = (lhs < threshold && threshold < rhs)
                    || (rhs < threshold && threshold < lhs);
                if strictly_between {
                    crossings.push((i - 1) as f64 + (threshold - lhs) / (rhs - lhs));
                }
            }
            if samples[i] == threshold {
                crossings.push(i as f64);
            }
        }

        let last = samples.len() - 1;
        if pad_ends && samples[last] > threshold {
            crossings.push(self.padding.trailing(samples.len()));
        }

        trace!(len = samples.len(), threshold, found = crossings.len(), "located crossings");
        Ok(crossings)
    }
}

/// 以預設的 `HalfStep` 補界慣例尋找穿越位置。
pub fn locate_crossings(samples: &[f64],
                        threshold: f64,
                        pad_ends: bool) -> Result<Vec<f64>, GeometryError> {
    DividerLocator::default().locate_crossings(samples, threshold, pad_ends)
}
