//! Standard-atmosphere temperature and a parametric attenuation surrogate.
//!
//! The attenuation coefficient is a fitted approximation keyed on band,
//! altitude and weather. It is not a radiative-transfer code and should not be
//! read as a physical transmittance.

use irsig_core::units::m_to_km;
use irsig_params::{Band, Weather};

/// Tropopause altitude (m).
const TROPOPAUSE_M: f64 = 11_000.0;
/// Top of the isothermal layer (m).
const ISOTHERMAL_TOP_M: f64 = 20_000.0;
/// Top of the upper warming layer (m).
const WARMING_TOP_M: f64 = 32_000.0;
const SEA_LEVEL_K: f64 = 288.2;
const LAPSE_RATE_K_PER_M: f64 = 0.0065;
const STRATOSPHERE_K: f64 = 216.7;
const UPPER_WARMING_K_PER_M: f64 = 0.001;

/// Ambient air temperature `T0(H)` in kelvin.
///
/// Above 32 km the temperature is held at the isothermal value rather than
/// continuing the warming trend.
pub fn ambient_temperature(altitude_m: f64) -> f64 {
    let h = altitude_m.max(0.0);
    if h <= TROPOPAUSE_M {
        SEA_LEVEL_K - LAPSE_RATE_K_PER_M * h
    } else if h <= ISOTHERMAL_TOP_M {
        STRATOSPHERE_K
    } else if h <= WARMING_TOP_M {
        STRATOSPHERE_K + UPPER_WARMING_K_PER_M * (h - ISOTHERMAL_TOP_M)
    } else {
        STRATOSPHERE_K
    }
}

/// Skin temperature from aerodynamic heating:
/// `Tm = T0 · (1 + r·(γ−1)/2 · Ma²)`.
pub fn skin_temperature(ambient_k: f64, recovery_factor: f64, gamma: f64, mach: f64) -> f64 {
    ambient_k * (1.0 + recovery_factor * (gamma - 1.0) / 2.0 * mach * mach)
}

/// Sea-level attenuation coefficient of a band (1/km).
pub fn base_coefficient(band: Band) -> f64 {
    match band {
        Band::MidWave => 0.20,
        Band::LongWave => 0.15,
    }
}

/// Characteristic height of the altitude decay (km).
pub fn characteristic_height_km(band: Band) -> f64 {
    match band {
        Band::MidWave => 10.0,
        Band::LongWave => 8.0,
    }
}

/// Weather multiplier applied to the coefficient.
pub fn weather_multiplier(weather: Weather) -> f64 {
    match weather {
        Weather::Clear => 1.0,
        Weather::Cloudy => 0.8,
        Weather::Overcast => 0.6,
        Weather::Rain => 0.2,
    }
}

/// Attenuation coefficient `k` (1/km) for the band, altitude, and weather.
pub fn attenuation_coefficient(band: Band, altitude_m: f64, weather: Weather) -> f64 {
    let altitude_km = m_to_km(altitude_m.max(0.0));
    let altitude_factor = (-altitude_km / characteristic_height_km(band)).exp();
    let k = base_coefficient(band) * altitude_factor * weather_multiplier(weather);
    log::debug!(
        "attenuation: band={} weather={} H={altitude_km:.3} km -> k={k:.6} /km",
        band.label(),
        weather.label()
    );
    k
}

/// Atmospheric transmittance over `range_km` for coefficient `k`.
#[inline]
pub fn transmittance(k_per_km: f64, range_km: f64) -> f64 {
    (-k_per_km * range_km).exp()
}
