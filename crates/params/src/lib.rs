//! Typed parameter records shared by every computation in the workspace.
//!
//! Records are plain data with public fields. Anything built outside of the
//! config loader should pass through the matching `validate` method before it
//! is handed to the physics crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine operating mode. Drives both the nozzle and the plume temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    #[default]
    Normal,
    Afterburner,
}

impl EngineMode {
    pub fn label(&self) -> &'static str {
        match self {
            EngineMode::Normal => "normal",
            EngineMode::Afterburner => "afterburner",
        }
    }
}

/// Detection waveband of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// 3–5 µm.
    #[default]
    MidWave,
    /// 8–12 µm.
    LongWave,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::MidWave => "mid-wave",
            Band::LongWave => "long-wave",
        }
    }
}

/// Weather category used by the attenuation surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Overcast,
    Rain,
}

impl Weather {
    pub fn label(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloudy => "cloudy",
            Weather::Overcast => "overcast",
            Weather::Rain => "rain",
        }
    }
}

/// The two orthogonal sweep planes of the signature model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPlane {
    Horizontal,
    Vertical,
}

impl SweepPlane {
    pub const ALL: [SweepPlane; 2] = [SweepPlane::Horizontal, SweepPlane::Vertical];

    pub fn label(&self) -> &'static str {
        match self {
            SweepPlane::Horizontal => "horizontal",
            SweepPlane::Vertical => "vertical",
        }
    }
}

/// Aircraft description for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetParameters {
    /// Ratio of specific heats.
    pub gama: f64,
    /// Temperature recovery factor.
    pub r: f64,
    /// Nose-on reference cross-section (m²).
    pub s1: f64,
    /// Side reference cross-section, horizontal sweep (m²).
    pub s2: f64,
    /// Top reference cross-section, vertical sweep (m²).
    pub s3: f64,
    /// Nozzle radius (m).
    pub rp: f64,
    /// Plume length ratio.
    pub lwy: f64,
    /// Waveband start (µm).
    pub l1: f64,
    /// Waveband end (µm).
    pub l2: f64,
    /// Altitude (m).
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

impl Default for TargetParameters {
    fn default() -> Self {
        Self {
            gama: 1.4,
            r: 0.82,
            s1: 8.3,
            s2: 26.61,
            s3: 96.37,
            rp: 1.0,
            lwy: 5.0,
            l1: 3.0,
            l2: 5.0,
            altitude_m: 12_000.0,
            mach: 2.0,
            engine_mode: EngineMode::Normal,
            emissivity_skin: 0.7,
            emissivity_nozzle: 0.8,
            emissivity_plume: 0.2,
            plume_base_temperature_k: 750.0,
            nozzle_normal_temperature_k: 600.0,
            nozzle_afterburner_temperature_k: 1_000.0,
        }
    }
}

impl TargetParameters {
    /// Span perpendicular to the nose axis for the given sweep plane.
    pub fn perpendicular_span(&self, plane: SweepPlane) -> f64 {
        match plane {
            SweepPlane::Horizontal => self.s2,
            SweepPlane::Vertical => self.s3,
        }
    }

    /// Check every field against its physical domain.
    pub fn validate(&self) -> Result<(), ParameterError> {
        at_least("gama", self.gama, 1.0)?;
        non_negative("r", self.r)?;
        non_negative("s1", self.s1)?;
        non_negative("s2", self.s2)?;
        non_negative("s3", self.s3)?;
        non_negative("rp", self.rp)?;
        positive("lwy", self.lwy)?;
        positive("l1", self.l1)?;
        positive("l2", self.l2)?;
        if self.l1 >= self.l2 {
            return Err(ParameterError::InvalidWaveband {
                start: self.l1,
                end: self.l2,
            });
        }
        non_negative("altitude_m", self.altitude_m)?;
        non_negative("mach", self.mach)?;
        unit_interval("emissivity_skin", self.emissivity_skin)?;
        unit_interval("emissivity_nozzle", self.emissivity_nozzle)?;
        unit_interval("emissivity_plume", self.emissivity_plume)?;
        positive("plume_base_temperature_k", self.plume_base_temperature_k)?;
        positive("nozzle_normal_temperature_k", self.nozzle_normal_temperature_k)?;
        positive(
            "nozzle_afterburner_temperature_k",
            self.nozzle_afterburner_temperature_k,
        )?;
        Ok(())
    }
}

/// Passive IR sensor and optics, all in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorParameters {
    pub aperture_m: f64,
    pub f_number: f64,
    pub optical_transmittance: f64,
    /// Noise-equivalent temperature difference (K).
    pub netd_k: f64,
    pub bandwidth_hz: f64,
    /// Specific detectivity D* (cm·Hz½/W).
    pub d_star: f64,
    pub pixel_pitch_m: f64,
    pub integration_time_s: f64,
    pub background_temperature_k: f64,
    pub snr_threshold: f64,
}

impl Default for SensorParameters {
    fn default() -> Self {
        Self {
            aperture_m: 0.1,
            f_number: 4.0,
            optical_transmittance: 0.85,
            netd_k: 0.020,
            bandwidth_hz: 100.0,
            d_star: 1.0e10,
            pixel_pitch_m: 15.0e-6,
            integration_time_s: 0.010,
            background_temperature_k: 300.0,
            snr_threshold: 5.0,
        }
    }
}

impl SensorParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        positive("aperture_m", self.aperture_m)?;
        positive("f_number", self.f_number)?;
        unit_interval("optical_transmittance", self.optical_transmittance)?;
        positive("netd_k", self.netd_k)?;
        positive("bandwidth_hz", self.bandwidth_hz)?;
        positive("d_star", self.d_star)?;
        positive("pixel_pitch_m", self.pixel_pitch_m)?;
        non_negative("integration_time_s", self.integration_time_s)?;
        positive("background_temperature_k", self.background_temperature_k)?;
        positive("snr_threshold", self.snr_threshold)?;
        Ok(())
    }
}

/// Atmospheric conditions along the line of sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtmosphereConditions {
    pub band: Band,
    pub weather: Weather,
}

/// Rejected parameter values.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },
    #[error("`{field}` must lie in (0, 1], got {value}")]
    OutsideUnitInterval { field: &'static str, value: f64 },
    #[error("waveband start {start} µm must be below end {end} µm")]
    InvalidWaveband { start: f64, end: f64 },
}

fn finite(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ParameterError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ParameterError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative { field, value })
    }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), ParameterError> {
    finite(field, value)?;
    if value >= min {
        Ok(())
    } else {
        Err(ParameterError::BelowMinimum { field, value, min })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ParameterError> {
    finite(field, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ParameterError::OutsideUnitInterval { field, value })
    }
}

/// Aspect angles of the single-angle queries, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryAngles {
    /// Azimuth, looked up in the horizontal sweep.
    pub azimuth_deg: f64,
    /// Elevation, looked up in the vertical sweep.
    pub elevation_deg: f64,
}

impl Default for QueryAngles {
    fn default() -> Self {
        Self {
            azimuth_deg: 75.0,
            elevation_deg: 75.0,
        }
    }
}

impl QueryAngles {
    /// Query angle belonging to a sweep plane.
    pub fn for_plane(&self, plane: SweepPlane) -> f64 {
        match plane {
            SweepPlane::Horizontal => self.azimuth_deg,
            SweepPlane::Vertical => self.elevation_deg,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        finite("azimuth_deg", self.azimuth_deg)?;
        finite("elevation_deg", self.elevation_deg)?;
        Ok(())
    }
}

/// Everything one analysis run needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub target: TargetParameters,
    pub sensor: SensorParameters,
    pub atmosphere: AtmosphereConditions,
    pub query: QueryAngles,
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.target.validate()?;
        self.sensor.validate()?;
        self.query.validate()
    }
}
