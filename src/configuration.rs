use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::math::curve::closedcurve::{
    ClosedCurveFitter,
    StretchCorrection
};
use crate::math::divider::dividerlocator::{
    BoundaryPadding,
    DividerLocator
};
use crate::math::scale::geographicprojection::{
    GeographicProjection,
    ProjectionBounds
};
use crate::sunshine::sunshinemap::{
    DEFAULT_MONTH_SPACING,
    SunshineMap,
    ensure_month_spacing
};
use crate::sunshine::sunshineseries::SunshineSeries;

#[derive(Deserialize, Default)]
struct DividerJsonProp {
    #[serde(default)]
    padding: BoundaryPadding
}

#[derive(Deserialize)]
struct CurveFitterJsonProp {
    tension: f64,
    /// 欄位缺省時使用預設修正，明確給 `null` 則關閉
    #[serde(default = "default_stretch")]
    stretch: Option<StretchCorrection>
}

fn default_stretch() -> Option<StretchCorrection> {
    Some(StretchCorrection::default())
}

fn default_month_spacing() -> f64 {
    DEFAULT_MONTH_SPACING
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    divider: DividerJsonProp,
    #[serde(default)]
    curve_fitters: Vec<serde_json::Value>,
    #[serde(default)]
    projection: ProjectionBounds,
    #[serde(default = "default_month_spacing")]
    month_spacing: f64
}

fn get_curve_fitter_from_json(json_value: serde_json::Value) -> Result<ClosedCurveFitter, ManagerError> {
    let json_prop: CurveFitterJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    Ok(ClosedCurveFitter::new(json_prop.tension, json_prop.stretch)?)
}

pub struct Configuration {
    divider_locator: DividerLocator,
    curve_fitter_manager: Manager<ClosedCurveFitter>,
    projection_bounds: ProjectionBounds,
    month_spacing: f64
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            divider_locator: DividerLocator::default(),
            curve_fitter_manager: Manager::new(get_curve_fitter_from_json),
            projection_bounds: ProjectionBounds::default(),
            month_spacing: DEFAULT_MONTH_SPACING
        }
    }

    pub fn divider_locator(&self) -> DividerLocator {
        self.divider_locator
    }

    pub fn curve_fitter_manager(&self) -> &Manager<ClosedCurveFitter> {
        &self.curve_fitter_manager
    }

    pub fn projection_bounds(&self) -> ProjectionBounds {
        self.projection_bounds
    }

    pub fn month_spacing(&self) -> f64 {
        self.month_spacing
    }

    pub fn from_value(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        let mut config = Configuration::new();
        config.divider_locator = DividerLocator::new(json_prop.divider.padding);
        config.curve_fitter_manager.insert_obj_from_json_vec(&json_prop.curve_fitters)?;
        // 提早檢查外框，避免到繪圖時才失敗
        GeographicProjection::new(&json_prop.projection)?;
        config.projection_bounds = json_prop.projection;
        config.month_spacing = ensure_month_spacing(json_prop.month_spacing)?;
        Ok(config)
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        Configuration::from_value(json_value)
    }

    /// 以指定名稱的擬合器組出日照地圖。
    pub fn build_map(&self,
                     series: Vec<SunshineSeries>,
                     fitter_name: &str) -> Result<SunshineMap, ManagerError> {
        let fitter = self.curve_fitter_manager.get(fitter_name)?;
        let projection = GeographicProjection::new(&self.projection_bounds)?;
        Ok(SunshineMap::new(series, self.divider_locator, fitter, projection, self.month_spacing)?)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration::new()
    }
}
