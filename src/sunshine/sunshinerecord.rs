use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use chrono::Month;
use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    IOError(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("{city}: month number {monthnum} is outside 1..=12")]
    MonthOutOfRange { city: String, monthnum: u32 },

    #[error("{city}: month '{month}' does not match month number {monthnum}")]
    MonthMismatch { city: String, month: String, monthnum: u32 },

    #[error("{city}: month number {monthnum} appears more than once")]
    DuplicateMonth { city: String, monthnum: u32 },

    #[error("{city}: expected 12 monthly samples, got {months}")]
    IncompleteSeries { city: String, months: usize }
}

/// 日照資料的一列：某城市某月份的日照時數。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunshineRecord {
    pub city: String,
    pub lon: f64,
    pub lat: f64,
    pub month: String,
    pub monthnum: u32,
    pub sunshine: f64
}

impl SunshineRecord {
    /// 檢查月份名稱（接受 "Jan" 或 "January"）與月份編號一致。
    pub fn validated_month(&self) -> Result<Month, DatasetError> {
        if !(1..=12).contains(&self.monthnum) {
            return Err(DatasetError::MonthOutOfRange {
                city: self.city.clone(),
                monthnum: self.monthnum
            });
        }
        let mismatch = || DatasetError::MonthMismatch {
            city: self.city.clone(),
            month: self.month.clone(),
            monthnum: self.monthnum
        };
        let month = Month::from_str(self.month.trim()).map_err(|_| mismatch())?;
        if month.number_from_month() != self.monthnum {
            return Err(mismatch());
        }
        Ok(month)
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Vec<SunshineRecord>, DatasetError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let records: Vec<SunshineRecord> = serde_json::from_reader(reader)?;
        Ok(records)
    }
}
