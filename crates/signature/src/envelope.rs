//! Detection-range envelope over a sweep plane and its summary statistics.

use irsig_detection::{RangeSolution, RangeSolver};
use irsig_params::{AtmosphereConditions, SensorParameters, SweepPlane, TargetParameters};
use rayon::prelude::*;
use serde::Serialize;

use crate::SignatureError;
use crate::profile::RadiationProfile;

/// Reduction of a range envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopeSummary {
    pub max_range_km: f64,
    /// Angle of the first maximum.
    pub max_range_angle_rad: f64,
    pub min_range_km: f64,
    pub mean_range_km: f64,
}

impl EnvelopeSummary {
    /// Summarize parallel `angles`/`ranges` slices. `None` when empty.
    pub fn from_ranges(angles: &[f64], ranges: &[f64]) -> Option<Self> {
        let count = angles.len().min(ranges.len());
        if count == 0 {
            return None;
        }
        let mut max_idx = 0;
        let mut min_range = ranges[0];
        let mut sum = 0.0;
        for (idx, &range) in ranges[..count].iter().enumerate() {
            if range > ranges[max_idx] {
                max_idx = idx;
            }
            min_range = min_range.min(range);
            sum += range;
        }
        Some(Self {
            max_range_km: ranges[max_idx],
            max_range_angle_rad: angles[max_idx],
            min_range_km: min_range,
            mean_range_km: sum / count as f64,
        })
    }
}

/// Per-angle detection range for one sweep plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEnvelope {
    pub plane: SweepPlane,
    pub angles: Vec<f64>,
    pub intensities: Vec<f64>,
    pub ranges: Vec<f64>,
    pub attenuation_per_km: f64,
    /// Angles whose range came from the empirical fallback.
    pub fallback_count: usize,
    pub summary: EnvelopeSummary,
}

/// Solve the detection range at every angle of `profile`.
///
/// Target and sensor are validated first; out-of-domain records never reach the solver.
pub fn compute_envelope(
    profile: &RadiationProfile,
    target: &TargetParameters,
    sensor: &SensorParameters,
    atmosphere: &AtmosphereConditions,
) -> Result<RangeEnvelope, SignatureError> {
    target.validate()?;
    sensor.validate()?;
    compute_envelope_with(profile, &RangeSolver::new(target, sensor, atmosphere))
}

/// [`compute_envelope`] with a preconfigured solver.
pub fn compute_envelope_with(
    profile: &RadiationProfile,
    solver: &RangeSolver,
) -> Result<RangeEnvelope, SignatureError> {
    let solutions: Vec<RangeSolution> = profile
        .angles
        .par_iter()
        .zip(profile.total.par_iter())
        .map(|(&angle, &intensity)| solver.solve(intensity, angle))
        .collect();

    let ranges: Vec<f64> = solutions.iter().map(|s| s.range_km).collect();
    let fallback_count = solutions.iter().filter(|s| s.fallback).count();
    let summary = EnvelopeSummary::from_ranges(&profile.angles, &ranges)
        .ok_or(SignatureError::EmptyProfile)?;

    log::debug!(
        "{} envelope: max {:.3} km @ {:.1}°, mean {:.3} km, min {:.3} km",
        profile.plane.label(),
        summary.max_range_km,
        summary.max_range_angle_rad.to_degrees(),
        summary.mean_range_km,
        summary.min_range_km
    );

    Ok(RangeEnvelope {
        plane: profile.plane,
        angles: profile.angles.clone(),
        intensities: profile.total.clone(),
        ranges,
        attenuation_per_km: solver.attenuation_per_km(),
        fallback_count,
        summary,
    })
}
