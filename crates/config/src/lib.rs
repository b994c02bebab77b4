//! Scenario file models and loaders for the IR signature workspace.
//!
//! Files carry user-facing units (µm for pixel pitch, mK for NETD, ms for
//! integration time). [`ScenarioConfig::into_scenario`] converts them to the SI
//! records of `irsig_params` and validates every field.

use std::fs::File;
use std::path::{Path, PathBuf};

use irsig_core::units::{k_to_mk, m_to_um, mk_to_k, ms_to_s, s_to_ms, um_to_m};
use irsig_params::{
    AtmosphereConditions, Band, EngineMode, ParameterError, QueryAngles, Scenario,
    SensorParameters, TargetParameters, Weather,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aircraft section of a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub gamma: f64,
    pub recovery_factor: f64,
    pub s1_m2: f64,
    pub s2_m2: f64,
    pub s3_m2: f64,
    pub nozzle_radius_m: f64,
    pub plume_length: f64,
    pub wavelength_start_um: f64,
    pub wavelength_end_um: f64,
    pub altitude_m: f64,
    pub mach: f64,
    pub engine_mode: EngineMode,
    pub emissivity_skin: f64,
    pub emissivity_nozzle: f64,
    pub emissivity_plume: f64,
    pub plume_base_temperature_k: f64,
    pub nozzle_normal_temperature_k: f64,
    pub nozzle_afterburner_temperature_k: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        let t = TargetParameters::default();
        Self {
            gamma: t.gama,
            recovery_factor: t.r,
            s1_m2: t.s1,
            s2_m2: t.s2,
            s3_m2: t.s3,
            nozzle_radius_m: t.rp,
            plume_length: t.lwy,
            wavelength_start_um: t.l1,
            wavelength_end_um: t.l2,
            altitude_m: t.altitude_m,
            mach: t.mach,
            engine_mode: t.engine_mode,
            emissivity_skin: t.emissivity_skin,
            emissivity_nozzle: t.emissivity_nozzle,
            emissivity_plume: t.emissivity_plume,
            plume_base_temperature_k: t.plume_base_temperature_k,
            nozzle_normal_temperature_k: t.nozzle_normal_temperature_k,
            nozzle_afterburner_temperature_k: t.nozzle_afterburner_temperature_k,
        }
    }
}

impl From<&TargetConfig> for TargetParameters {
    fn from(c: &TargetConfig) -> Self {
        TargetParameters {
            gama: c.gamma,
            r: c.recovery_factor,
            s1: c.s1_m2,
            s2: c.s2_m2,
            s3: c.s3_m2,
            rp: c.nozzle_radius_m,
            lwy: c.plume_length,
            l1: c.wavelength_start_um,
            l2: c.wavelength_end_um,
            altitude_m: c.altitude_m,
            mach: c.mach,
            engine_mode: c.engine_mode,
            emissivity_skin: c.emissivity_skin,
            emissivity_nozzle: c.emissivity_nozzle,
            emissivity_plume: c.emissivity_plume,
            plume_base_temperature_k: c.plume_base_temperature_k,
            nozzle_normal_temperature_k: c.nozzle_normal_temperature_k,
            nozzle_afterburner_temperature_k: c.nozzle_afterburner_temperature_k,
        }
    }
}

/// Sensor section of a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    pub aperture_m: f64,
    pub f_number: f64,
    pub optical_transmittance: f64,
    pub netd_mk: f64,
    pub bandwidth_hz: f64,
    pub d_star: f64,
    pub pixel_pitch_um: f64,
    pub integration_time_ms: f64,
    pub background_temperature_k: f64,
    pub snr_threshold: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        let s = SensorParameters::default();
        Self {
            aperture_m: s.aperture_m,
            f_number: s.f_number,
            optical_transmittance: s.optical_transmittance,
            netd_mk: k_to_mk(s.netd_k),
            bandwidth_hz: s.bandwidth_hz,
            d_star: s.d_star,
            pixel_pitch_um: m_to_um(s.pixel_pitch_m),
            integration_time_ms: s_to_ms(s.integration_time_s),
            background_temperature_k: s.background_temperature_k,
            snr_threshold: s.snr_threshold,
        }
    }
}

impl From<&SensorConfig> for SensorParameters {
    fn from(c: &SensorConfig) -> Self {
        SensorParameters {
            aperture_m: c.aperture_m,
            f_number: c.f_number,
            optical_transmittance: c.optical_transmittance,
            netd_k: mk_to_k(c.netd_mk),
            bandwidth_hz: c.bandwidth_hz,
            d_star: c.d_star,
            pixel_pitch_m: um_to_m(c.pixel_pitch_um),
            integration_time_s: ms_to_s(c.integration_time_ms),
            background_temperature_k: c.background_temperature_k,
            snr_threshold: c.snr_threshold,
        }
    }
}

/// Atmosphere section of a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtmosphereConfig {
    #[serde(default)]
    pub band: Band,
    #[serde(default)]
    pub weather: Weather,
}

/// Single-angle query section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default = "default_query_deg")]
    pub azimuth_deg: f64,
    #[serde(default = "default_query_deg")]
    pub elevation_deg: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            azimuth_deg: default_query_deg(),
            elevation_deg: default_query_deg(),
        }
    }
}

fn default_query_deg() -> f64 {
    QueryAngles::default().azimuth_deg
}

/// Complete scenario file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: String,
    pub target: TargetConfig,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub atmosphere: AtmosphereConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

impl ScenarioConfig {
    /// Convert to SI records and validate them.
    pub fn into_scenario(self) -> Result<Scenario, ConfigError> {
        let scenario = Scenario {
            target: TargetParameters::from(&self.target),
            sensor: SensorParameters::from(&self.sensor),
            atmosphere: AtmosphereConditions {
                band: self.atmosphere.band,
                weather: self.atmosphere.weather,
            },
            query: QueryAngles {
                azimuth_deg: self.query.azimuth_deg,
                elevation_deg: self.query.elevation_deg,
            },
            name: self.name,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scenario: {0}")]
    Invalid(#[from] ParameterError),
    #[error("no scenario found at {0}")]
    Empty(PathBuf),
}

/// Load scenario files from a YAML file, a TOML file, or a directory of TOML files.
pub fn load_scenario_configs<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

/// Load and validate the first scenario found at `path`.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ConfigError> {
    let path = path.as_ref();
    load_records::<ScenarioConfig, _>(path)?
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::Empty(path.to_path_buf()))?
        .into_scenario()
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        let record: T = serde_yaml::from_reader(reader)?;
        Ok(vec![record])
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
