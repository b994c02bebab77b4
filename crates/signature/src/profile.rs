//! Full-circle radiation-intensity sweep for one plane.

use irsig_core::angle::{circular_distance, uniform_sweep, wrap_radians};
use irsig_core::constants::SWEEP_SAMPLES;
use irsig_geometry::Silhouette;
use irsig_params::{SweepPlane, TargetParameters};
use irsig_spectral::BandRadiances;
use rayon::prelude::*;
use serde::Serialize;

use crate::SignatureError;

/// Intensities (W/sr) at one aspect angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSample {
    pub angle_rad: f64,
    pub sector: u8,
    pub total: f64,
    pub skin: f64,
    pub plume: f64,
    pub nozzle: f64,
}

/// Largest value of one intensity component and the first angle it occurs at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentPeak {
    pub value: f64,
    pub angle_rad: f64,
}

/// Per-component maxima of a profile (W/sr).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentPeaks {
    pub total: ComponentPeak,
    pub skin: ComponentPeak,
    pub plume: ComponentPeak,
    pub nozzle: ComponentPeak,
}

/// Angle grid over `[0, 2π)` with four parallel intensity arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiationProfile {
    pub plane: SweepPlane,
    pub radiances: BandRadiances,
    pub angles: Vec<f64>,
    pub sectors: Vec<u8>,
    pub total: Vec<f64>,
    pub skin: Vec<f64>,
    pub plume: Vec<f64>,
    pub nozzle: Vec<f64>,
}

impl RadiationProfile {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn sample(&self, index: usize) -> Option<ProfileSample> {
        Some(ProfileSample {
            angle_rad: *self.angles.get(index)?,
            sector: self.sectors[index],
            total: self.total[index],
            skin: self.skin[index],
            plume: self.plume[index],
            nozzle: self.nozzle[index],
        })
    }

    /// Grid index for an angle in degrees: `round(deg·N/360)`, wrapped onto the grid.
    pub fn index_for_degrees(&self, degrees: f64) -> Option<usize> {
        let n = self.len();
        if n == 0 || !degrees.is_finite() {
            return None;
        }
        let raw = (degrees * n as f64 / 360.0).round() as i64;
        Some(raw.rem_euclid(n as i64) as usize)
    }

    /// Sample used for a single-angle query given in degrees.
    pub fn sample_at_degrees(&self, degrees: f64) -> Option<ProfileSample> {
        self.sample(self.index_for_degrees(degrees)?)
    }

    /// Sample whose angle lies closest to `angle_rad` on the circle.
    pub fn nearest_sample(&self, angle_rad: f64) -> Option<ProfileSample> {
        let target = wrap_radians(angle_rad);
        let index = self
            .angles
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                circular_distance(**a, target).total_cmp(&circular_distance(**b, target))
            })
            .map(|(idx, _)| idx)?;
        self.sample(index)
    }

    /// Sample with the largest total intensity (first one on ties).
    pub fn peak(&self) -> Option<ProfileSample> {
        self.sample(first_max_index(&self.total)?)
    }

    /// Maximum of each intensity component over the sweep. `None` when empty.
    pub fn component_peaks(&self) -> Option<ComponentPeaks> {
        let peak_of = |values: &[f64]| {
            first_max_index(values).map(|idx| ComponentPeak {
                value: values[idx],
                angle_rad: self.angles[idx],
            })
        };
        Some(ComponentPeaks {
            total: peak_of(&self.total)?,
            skin: peak_of(&self.skin)?,
            plume: peak_of(&self.plume)?,
            nozzle: peak_of(&self.nozzle)?,
        })
    }
}

fn first_max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (idx, &value)| match best {
            Some((_, top)) if top >= value => best,
            _ => Some((idx, value)),
        })
        .map(|(idx, _)| idx)
}

/// Sweep `plane` over 360 angles, evaluating the band radiances of `target` first.
pub fn compute_radiation_profile(
    target: &TargetParameters,
    plane: SweepPlane,
) -> Result<RadiationProfile, SignatureError> {
    target.validate()?;
    let radiances = BandRadiances::compute(target)?;
    Ok(sweep(target, plane, &radiances))
}

/// Sweep `plane` with radiances that were already evaluated for `target`.
pub fn sweep(
    target: &TargetParameters,
    plane: SweepPlane,
    radiances: &BandRadiances,
) -> RadiationProfile {
    let silhouette = Silhouette::new(target, plane);
    let samples: Vec<ProfileSample> = uniform_sweep(SWEEP_SAMPLES)
        .into_par_iter()
        .map(|beta| intensity_at(beta, &silhouette, radiances))
        .collect();

    let mut profile = RadiationProfile {
        plane,
        radiances: *radiances,
        angles: Vec::with_capacity(samples.len()),
        sectors: Vec::with_capacity(samples.len()),
        total: Vec::with_capacity(samples.len()),
        skin: Vec::with_capacity(samples.len()),
        plume: Vec::with_capacity(samples.len()),
        nozzle: Vec::with_capacity(samples.len()),
    };
    for sample in samples {
        profile.angles.push(sample.angle_rad);
        profile.sectors.push(sample.sector);
        profile.total.push(sample.total);
        profile.skin.push(sample.skin);
        profile.plume.push(sample.plume);
        profile.nozzle.push(sample.nozzle);
    }

    log::debug!(
        "{} sweep: {} samples, peak total {:.3} W/sr",
        plane.label(),
        profile.len(),
        profile.peak().map(|s| s.total).unwrap_or(0.0)
    );
    profile
}

fn intensity_at(beta: f64, silhouette: &Silhouette, radiances: &BandRadiances) -> ProfileSample {
    let areas = silhouette.projected_areas(beta);
    let skin = areas.skin * radiances.skin;
    let plume = areas.plume * radiances.plume;
    // nozzle area is already zero outside the sectors that expose the exit
    let nozzle = areas.nozzle * radiances.nozzle;
    ProfileSample {
        angle_rad: beta,
        sector: areas.sector,
        total: skin + plume + nozzle,
        skin,
        plume,
        nozzle,
    }
}
