//! Signature façade: radiation sweeps, range envelopes, and scenario analysis.
//!
//! Front-ends only need this crate. It re-exports the parameter records and the
//! physics crates so callers never reach into the lower layers directly.

pub mod analysis;
pub mod envelope;
pub mod profile;

use irsig_params::ParameterError;
use irsig_spectral::SpectralError;
use thiserror::Error;

pub use analysis::{AnalysisOptions, AngleQuery, PlaneReport, SignatureReport, analyze};
pub use envelope::{EnvelopeSummary, RangeEnvelope, compute_envelope, compute_envelope_with};
pub use profile::{
    ComponentPeak, ComponentPeaks, ProfileSample, RadiationProfile, compute_radiation_profile,
    sweep,
};

pub use irsig_detection::{
    REFINEMENT_PASSES, RangeSolution, RangeSolver, RefinementMode, solve_detection_range,
    solve_detection_range_detailed,
};
pub use irsig_params::{
    AtmosphereConditions, Band, EngineMode, QueryAngles, Scenario, SensorParameters, SweepPlane,
    TargetParameters, Weather,
};
pub use irsig_spectral::{BandRadiances, Surface, SurfaceTemperatures};

/// Failures of a single signature query.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
    #[error("radiance evaluation failed: {0}")]
    Radiance(#[from] SpectralError),
    #[error("radiation profile has no samples")]
    EmptyProfile,
}
