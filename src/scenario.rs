//! Scenario resolution shared by the front-ends: load a file (or fall back to
//! the reference scenario) and apply command-line overrides before validation.

use std::path::Path;

use irsig_config::{ConfigError, ScenarioConfig, load_scenario_configs};
use irsig_params::{Band, EngineMode, Scenario, Weather};

/// Values a front-end may override on top of the scenario file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioOverrides {
    pub band: Option<Band>,
    pub weather: Option<Weather>,
    pub engine_mode: Option<EngineMode>,
    pub altitude_m: Option<f64>,
    pub mach: Option<f64>,
    pub azimuth_deg: Option<f64>,
    pub elevation_deg: Option<f64>,
}

impl ScenarioOverrides {
    pub fn apply(&self, config: &mut ScenarioConfig) {
        if let Some(band) = self.band {
            config.atmosphere.band = band;
        }
        if let Some(weather) = self.weather {
            config.atmosphere.weather = weather;
        }
        if let Some(mode) = self.engine_mode {
            config.target.engine_mode = mode;
        }
        if let Some(altitude) = self.altitude_m {
            config.target.altitude_m = altitude;
        }
        if let Some(mach) = self.mach {
            config.target.mach = mach;
        }
        if let Some(azimuth) = self.azimuth_deg {
            config.query.azimuth_deg = azimuth;
        }
        if let Some(elevation) = self.elevation_deg {
            config.query.elevation_deg = elevation;
        }
    }
}

/// Load the first scenario at `path` (or the reference scenario when `None`),
/// apply `overrides`, and validate the result.
pub fn resolve_scenario(
    path: Option<&Path>,
    overrides: &ScenarioOverrides,
) -> Result<Scenario, ConfigError> {
    let mut config = match path {
        Some(path) => load_scenario_configs(path)?
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::Empty(path.to_path_buf()))?,
        None => ScenarioConfig {
            name: "reference".to_string(),
            ..ScenarioConfig::default()
        },
    };
    overrides.apply(&mut config);
    log::debug!("resolved scenario `{}` with overrides {overrides:?}", config.name);
    config.into_scenario()
}
