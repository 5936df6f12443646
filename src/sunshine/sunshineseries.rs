use chrono::Month;
use tracing::debug;

use crate::sunshine::sunshinerecord::{
    DatasetError,
    SunshineRecord
};

pub const MONTHS_PER_YEAR: usize = 12;

/// 單一城市的逐月日照序列，依月份排序。
#[derive(Debug, Clone, PartialEq)]
pub struct SunshineSeries {
    city: String,
    longitude: f64,
    latitude: f64,
    months: Vec<(Month, f64)>
}

impl SunshineSeries {
    pub fn new(city: String, longitude: f64, latitude: f64) -> SunshineSeries {
        SunshineSeries { city, longitude, latitude, months: Vec::new() }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn months(&self) -> &[(Month, f64)] {
        &self.months
    }

    pub fn values(&self) -> Vec<f64> {
        self.months.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    fn push(&mut self, month: Month, value: f64) -> Result<(), DatasetError> {
        let monthnum = month.number_from_month();
        match self.months.binary_search_by_key(&monthnum, |(m, _)| m.number_from_month()) {
            Ok(_) => Err(DatasetError::DuplicateMonth { city: self.city.clone(), monthnum }),
            Err(pos) => {
                self.months.insert(pos, (month, value));
                Ok(())
            }
        }
    }

    /// 把扁平的資料列依城市分組，城市依首次出現的順序排列。
    /// 城市座標取該城市第一筆資料。每個城市必須有完整的 12 個月。
    pub fn group_records(records: &[SunshineRecord]) -> Result<Vec<SunshineSeries>, DatasetError> {
        let mut grouped: Vec<SunshineSeries> = Vec::new();
        for record in records {
            let month = record.validated_month()?;
            let pos = match grouped.iter().position(|s| s.city == record.city) {
                Some(pos) => pos,
                None => {
                    grouped.push(SunshineSeries::new(record.city.clone(), record.lon, record.lat));
                    grouped.len() - 1
                }
            };
            grouped[pos].push(month, record.sunshine)?;
        }
        if let Some(incomplete) = grouped.iter().find(|s| s.len() != MONTHS_PER_YEAR) {
            return Err(DatasetError::IncompleteSeries {
                city: incomplete.city.clone(),
                months: incomplete.len()
            });
        }
        debug!(records = records.len(), cities = grouped.len(), "grouped sunshine records");
        Ok(grouped)
    }
}
