//! Detection range of a passive IR sensor against a point source.
//!
//! The range follows from the NETD form of the IR range equation. Attenuation
//! depends on the unknown range itself, so the solver starts from the vacuum
//! range and refines it by fixed-point iteration. Five refinement passes are
//! the reference behaviour; [`RefinementMode::Converged`] keeps going after
//! those five until the step size drops below a tolerance.

use std::f64::consts::PI;

use irsig_atmosphere::{attenuation_coefficient, transmittance};
use irsig_core::constants::STEFAN_BOLTZMANN;
use irsig_core::units::m_to_km;
use irsig_params::{AtmosphereConditions, SensorParameters, TargetParameters};
use serde::Serialize;

/// Number of refinement passes in the reference solver.
pub const REFINEMENT_PASSES: usize = 5;

/// How many fixed-point passes the solver runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefinementMode {
    /// Exactly this many passes.
    Fixed(usize),
    /// The reference passes, then continue until `|R_n − R_{n−1}| < tolerance_km`
    /// or `max_iterations` passes in total.
    Converged {
        tolerance_km: f64,
        max_iterations: usize,
    },
}

impl Default for RefinementMode {
    fn default() -> Self {
        RefinementMode::Fixed(REFINEMENT_PASSES)
    }
}

/// Full solver output for one intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSolution {
    pub range_km: f64,
    /// Range without atmospheric attenuation.
    pub vacuum_range_km: f64,
    pub attenuation_per_km: f64,
    /// Atmospheric transmittance at the returned range.
    pub transmittance: f64,
    pub iterations: usize,
    /// The empirical estimate replaced a degenerate range equation.
    pub fallback: bool,
}

/// Sensor-side constants of the range equation that do not depend on range.
#[derive(Debug, Clone, Copy)]
struct RangeEquation {
    /// `τ0·A0·D*·√(A_d·Δf·1e4) / (NETD·√(4F²+1)·dW/dT·SNR)`.
    gain: f64,
    optical_transmittance: f64,
    receiving_area_m2: f64,
}

impl RangeEquation {
    fn new(sensor: &SensorParameters) -> Self {
        let detector_area = sensor.pixel_pitch_m * sensor.pixel_pitch_m;
        let receiving_area = PI * (sensor.aperture_m / 2.0).powi(2);
        let dw_dt = 4.0 * STEFAN_BOLTZMANN * sensor.background_temperature_k.powi(3);
        let numerator = sensor.optical_transmittance
            * receiving_area
            * sensor.d_star
            * (detector_area * sensor.bandwidth_hz * 1.0e4).sqrt();
        let denominator = sensor.netd_k
            * (4.0 * sensor.f_number * sensor.f_number + 1.0).sqrt()
            * dw_dt
            * sensor.snr_threshold;
        Self {
            gain: numerator / denominator,
            optical_transmittance: sensor.optical_transmittance,
            receiving_area_m2: receiving_area,
        }
    }

    /// Range in km for intensity `I` seen through atmospheric transmittance `tau`,
    /// or `None` when the radicand is negative or not finite.
    fn range_km(&self, intensity: f64, tau: f64) -> Option<f64> {
        let radicand = intensity * tau * self.gain;
        if radicand.is_finite() && radicand >= 0.0 {
            Some(m_to_km(radicand.sqrt()))
        } else {
            None
        }
    }

    /// Empirical `√(I·τ0·A0·1e6)/1000`, used when the range equation degenerates.
    fn empirical_km(&self, intensity: f64) -> f64 {
        let radicand = intensity * self.optical_transmittance * self.receiving_area_m2 * 1.0e6;
        let range = m_to_km(radicand.max(0.0).sqrt());
        if range.is_finite() { range } else { 0.0 }
    }
}

/// Detection range (km) of a source of `intensity` W/sr seen at aspect `angle`.
///
/// `angle` only labels diagnostics; the range depends on intensity, sensor,
/// atmosphere, and the target altitude.
pub fn solve_detection_range(
    intensity: f64,
    angle: f64,
    target: &TargetParameters,
    sensor: &SensorParameters,
    atmosphere: &AtmosphereConditions,
) -> f64 {
    solve_detection_range_detailed(
        intensity,
        angle,
        target,
        sensor,
        atmosphere,
        RefinementMode::default(),
    )
    .range_km
}

/// [`solve_detection_range`] with an explicit refinement mode and full output.
pub fn solve_detection_range_detailed(
    intensity: f64,
    angle: f64,
    target: &TargetParameters,
    sensor: &SensorParameters,
    atmosphere: &AtmosphereConditions,
    mode: RefinementMode,
) -> RangeSolution {
    let k = attenuation_coefficient(atmosphere.band, target.altitude_m, atmosphere.weather);
    solve_with_coefficient(intensity, angle, k, &RangeEquation::new(sensor), mode)
}

/// Solver for many intensities sharing one sensor and atmosphere.
#[derive(Debug, Clone, Copy)]
pub struct RangeSolver {
    equation: RangeEquation,
    attenuation_per_km: f64,
    mode: RefinementMode,
}

impl RangeSolver {
    pub fn new(
        target: &TargetParameters,
        sensor: &SensorParameters,
        atmosphere: &AtmosphereConditions,
    ) -> Self {
        Self {
            equation: RangeEquation::new(sensor),
            attenuation_per_km: attenuation_coefficient(
                atmosphere.band,
                target.altitude_m,
                atmosphere.weather,
            ),
            mode: RefinementMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RefinementMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn attenuation_per_km(&self) -> f64 {
        self.attenuation_per_km
    }

    pub fn solve(&self, intensity: f64, angle: f64) -> RangeSolution {
        solve_with_coefficient(
            intensity,
            angle,
            self.attenuation_per_km,
            &self.equation,
            self.mode,
        )
    }
}

fn solve_with_coefficient(
    intensity: f64,
    angle: f64,
    k: f64,
    equation: &RangeEquation,
    mode: RefinementMode,
) -> RangeSolution {
    let Some(vacuum) = equation.range_km(intensity, 1.0) else {
        return fallback(intensity, angle, k, equation);
    };

    let (min_passes, max_passes, tolerance) = match mode {
        RefinementMode::Fixed(n) => (n, n, None),
        RefinementMode::Converged {
            tolerance_km,
            max_iterations,
        } => (
            REFINEMENT_PASSES,
            max_iterations.max(REFINEMENT_PASSES),
            Some(tolerance_km.abs()),
        ),
    };

    let mut previous = vacuum;
    let mut range = vacuum;
    let mut iterations = 0;
    while iterations < max_passes {
        let Some(next) = equation.range_km(intensity, transmittance(k, previous)) else {
            return fallback(intensity, angle, k, equation);
        };
        range = next;
        iterations += 1;
        let step = (range - previous).abs();
        previous = range;
        if iterations >= min_passes && tolerance.is_some_and(|tol| step < tol) {
            break;
        }
    }

    log::trace!(
        "range at beta={angle:.4} rad: I={intensity:.6} W/sr vacuum={vacuum:.4} km \
         -> {range:.4} km after {iterations} passes (k={k:.5}/km)"
    );

    RangeSolution {
        range_km: range,
        vacuum_range_km: vacuum,
        attenuation_per_km: k,
        transmittance: transmittance(k, range),
        iterations,
        fallback: false,
    }
}

fn fallback(intensity: f64, angle: f64, k: f64, equation: &RangeEquation) -> RangeSolution {
    let range = equation.empirical_km(intensity);
    log::warn!(
        "range equation degenerate at beta={angle:.4} rad (I={intensity}); \
         using empirical estimate {range:.4} km"
    );
    RangeSolution {
        range_km: range,
        vacuum_range_km: range,
        attenuation_per_km: k,
        transmittance: transmittance(k, range),
        iterations: 0,
        fallback: true,
    }
}
