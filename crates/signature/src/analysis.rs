//! One-call analysis of a scenario: both sweep planes, the single-angle
//! queries, and optionally both range envelopes.

use irsig_detection::{RangeSolution, RangeSolver, RefinementMode};
use irsig_params::{Scenario, SweepPlane};
use irsig_spectral::BandRadiances;
use serde::Serialize;

use crate::SignatureError;
use crate::envelope::{RangeEnvelope, compute_envelope_with};
use crate::profile::{ProfileSample, RadiationProfile, sweep};

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub include_envelopes: bool,
    pub refinement: RefinementMode,
}

/// Result of looking up one aspect angle in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleQuery {
    pub requested_deg: f64,
    pub sample: ProfileSample,
    pub range: RangeSolution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneReport {
    pub profile: RadiationProfile,
    pub query: AngleQuery,
    pub envelope: Option<RangeEnvelope>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureReport {
    pub scenario: Scenario,
    pub radiances: BandRadiances,
    pub attenuation_per_km: f64,
    pub horizontal: PlaneReport,
    pub vertical: PlaneReport,
}

impl SignatureReport {
    pub fn plane(&self, plane: SweepPlane) -> &PlaneReport {
        match plane {
            SweepPlane::Horizontal => &self.horizontal,
            SweepPlane::Vertical => &self.vertical,
        }
    }
}

/// Validate `scenario`, evaluate its radiances once, and build both plane reports.
pub fn analyze(
    scenario: &Scenario,
    options: &AnalysisOptions,
) -> Result<SignatureReport, SignatureError> {
    scenario.validate()?;
    let radiances = BandRadiances::compute(&scenario.target)?;
    let solver = RangeSolver::new(&scenario.target, &scenario.sensor, &scenario.atmosphere)
        .with_mode(options.refinement);

    let horizontal = plane_report(scenario, SweepPlane::Horizontal, &radiances, &solver, options)?;
    let vertical = plane_report(scenario, SweepPlane::Vertical, &radiances, &solver, options)?;

    Ok(SignatureReport {
        scenario: scenario.clone(),
        radiances,
        attenuation_per_km: solver.attenuation_per_km(),
        horizontal,
        vertical,
    })
}

fn plane_report(
    scenario: &Scenario,
    plane: SweepPlane,
    radiances: &BandRadiances,
    solver: &RangeSolver,
    options: &AnalysisOptions,
) -> Result<PlaneReport, SignatureError> {
    let profile = sweep(&scenario.target, plane, radiances);
    let requested_deg = scenario.query.for_plane(plane);
    let sample = profile
        .sample_at_degrees(requested_deg)
        .ok_or(SignatureError::EmptyProfile)?;
    let range = solver.solve(sample.total, sample.angle_rad);

    let envelope = if options.include_envelopes {
        Some(compute_envelope_with(&profile, solver)?)
    } else {
        None
    };

    Ok(PlaneReport {
        profile,
        query: AngleQuery {
            requested_deg,
            sample,
            range,
        },
        envelope,
    })
}
