//! Planck-law band radiance for the three emitting surfaces of the target.

pub mod quadrature;

use std::f64::consts::PI;
use std::fmt;

use irsig_atmosphere::{ambient_temperature, skin_temperature};
use irsig_core::constants::{C1, C2};
use irsig_core::units::um_to_m;
use irsig_params::{EngineMode, TargetParameters};
use serde::Serialize;
use thiserror::Error;

use quadrature::{QuadratureError, QuadratureSettings, integrate};

/// Plume temperature scale applied to the base plume temperature.
const PLUME_SCALE_AFTERBURNER: f64 = 0.85;
const PLUME_SCALE_NORMAL: f64 = 0.90;

/// Emitting surfaces of the signature model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Skin,
    Nozzle,
    Plume,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Surface::Skin => "skin",
            Surface::Nozzle => "nozzle",
            Surface::Plume => "plume",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SpectralError {
    #[error("temperature must be positive, got {0} K")]
    InvalidTemperature(f64),
    #[error("waveband [{start}, {end}] µm is not a positive increasing interval")]
    InvalidBand { start: f64, end: f64 },
    #[error("band integration failed: {0}")]
    Integration(#[from] QuadratureError),
    #[error("{surface} radiance: {source}")]
    ForSurface {
        surface: Surface,
        #[source]
        source: Box<SpectralError>,
    },
}

/// Spectral exitance `M(λ)` of a blackbody (W/m²/m) at wavelength `lambda_m`.
#[inline]
pub fn spectral_exitance(lambda_m: f64, temperature_k: f64) -> f64 {
    let denom = (C2 / (lambda_m * temperature_k)).exp_m1();
    if denom.is_infinite() {
        return 0.0;
    }
    C1 / lambda_m.powi(5) / denom
}

/// Lambertian band radiance `ε/π · ∫ M(λ) dλ` over `[l1_um, l2_um]` (W/m²/sr).
pub fn band_radiance(
    temperature_k: f64,
    emissivity: f64,
    l1_um: f64,
    l2_um: f64,
) -> Result<f64, SpectralError> {
    band_radiance_with(
        temperature_k,
        emissivity,
        l1_um,
        l2_um,
        &QuadratureSettings::default(),
    )
}

/// [`band_radiance`] with explicit quadrature stopping rules.
pub fn band_radiance_with(
    temperature_k: f64,
    emissivity: f64,
    l1_um: f64,
    l2_um: f64,
    settings: &QuadratureSettings,
) -> Result<f64, SpectralError> {
    if !(temperature_k.is_finite() && temperature_k > 0.0) {
        return Err(SpectralError::InvalidTemperature(temperature_k));
    }
    if !(l1_um.is_finite() && l2_um.is_finite() && l1_um > 0.0 && l1_um < l2_um) {
        return Err(SpectralError::InvalidBand {
            start: l1_um,
            end: l2_um,
        });
    }
    let q = integrate(
        |lambda| spectral_exitance(lambda, temperature_k),
        um_to_m(l1_um),
        um_to_m(l2_um),
        settings,
    )?;
    Ok(emissivity / PI * q.value)
}

/// Temperatures driving the three surfaces, plus the ambient air.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceTemperatures {
    pub ambient_k: f64,
    pub skin_k: f64,
    pub nozzle_k: f64,
    pub plume_k: f64,
}

impl SurfaceTemperatures {
    pub fn for_target(target: &TargetParameters) -> Self {
        let ambient_k = ambient_temperature(target.altitude_m);
        let skin_k = skin_temperature(ambient_k, target.r, target.gama, target.mach);
        let (nozzle_k, plume_scale) = match target.engine_mode {
            EngineMode::Afterburner => (
                target.nozzle_afterburner_temperature_k,
                PLUME_SCALE_AFTERBURNER,
            ),
            EngineMode::Normal => (target.nozzle_normal_temperature_k, PLUME_SCALE_NORMAL),
        };
        Self {
            ambient_k,
            skin_k,
            nozzle_k,
            plume_k: target.plume_base_temperature_k * plume_scale,
        }
    }
}

/// Band radiances of skin, nozzle, and plume (W/m²/sr).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandRadiances {
    pub temperatures: SurfaceTemperatures,
    pub skin: f64,
    pub nozzle: f64,
    pub plume: f64,
}

impl BandRadiances {
    /// Evaluate the three independent band integrals for `target`.
    pub fn compute(target: &TargetParameters) -> Result<Self, SpectralError> {
        Self::compute_with(target, &QuadratureSettings::default())
    }

    pub fn compute_with(
        target: &TargetParameters,
        settings: &QuadratureSettings,
    ) -> Result<Self, SpectralError> {
        let temperatures = SurfaceTemperatures::for_target(target);
        let eval = |surface: Surface, temperature_k: f64, emissivity: f64| {
            band_radiance_with(temperature_k, emissivity, target.l1, target.l2, settings).map_err(
                |err| SpectralError::ForSurface {
                    surface,
                    source: Box::new(err),
                },
            )
        };

        let skin = eval(Surface::Skin, temperatures.skin_k, target.emissivity_skin)?;
        let nozzle = eval(
            Surface::Nozzle,
            temperatures.nozzle_k,
            target.emissivity_nozzle,
        )?;
        let plume = eval(Surface::Plume, temperatures.plume_k, target.emissivity_plume)?;

        log::debug!(
            "band radiances on [{}, {}] µm: T0={:.2} K Tm={:.2} K Tp={:.1} K Tw={:.1} K -> \
             L_skin={skin:.6} L_nozzle={nozzle:.6} L_plume={plume:.6} W/m²/sr",
            target.l1,
            target.l2,
            temperatures.ambient_k,
            temperatures.skin_k,
            temperatures.nozzle_k,
            temperatures.plume_k,
        );

        Ok(Self {
            temperatures,
            skin,
            nozzle,
            plume,
        })
    }
}
