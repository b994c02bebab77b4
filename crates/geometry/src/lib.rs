//! Projected areas of the three emitting surfaces as a function of aspect angle.
//!
//! The aspect angle β runs from nose-on (0) through beam (π/2) to tail-on (π)
//! and back. The circle is split into seven sectors; each sector carries the
//! plume-area formula and nozzle visibility that apply inside it. Both sweep
//! planes share the same table and differ only in the perpendicular span.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use irsig_core::angle::wrap_radians;
use irsig_params::{SweepPlane, TargetParameters};
use serde::Serialize;

/// Plume half-angle `arctan(0.2)` (≈11.31°).
pub const PLUME_HALF_ANGLE: f64 = 0.197_395_559_849_880_75;

/// Smallest plume-area denominator `lwy·|sin β|` admitted before clamping.
const MIN_PLUME_DENOMINATOR: f64 = 1.0e-12;

/// What the observer can see inside a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Neither plume nor nozzle.
    Hidden,
    /// Plume without the nozzle exit.
    PlumeOnly,
    /// Plume and nozzle exit.
    PlumeAndNozzle,
}

/// Trigonometry of one aspect angle.
#[derive(Debug, Clone, Copy)]
pub struct Aspect {
    pub beta: f64,
    pub sin: f64,
    pub cos: f64,
}

impl Aspect {
    pub fn new(beta: f64) -> Self {
        let beta = wrap_radians(beta);
        let (sin, cos) = beta.sin_cos();
        Self { beta, sin, cos }
    }
}

type PlumeAreaFn = fn(&Aspect, &Silhouette) -> f64;

/// One row of the sector table: β below `upper_bound` (and above the previous
/// row's bound) falls in this sector.
#[derive(Debug, Clone, Copy)]
pub struct SectorRule {
    pub index: u8,
    pub upper_bound: f64,
    pub visibility: Visibility,
    plume_area: PlumeAreaFn,
}

impl SectorRule {
    pub fn nozzle_visible(&self) -> bool {
        self.visibility == Visibility::PlumeAndNozzle
    }
}

/// Ordered sector table over `[0, 2π)`.
pub const SECTOR_TABLE: [SectorRule; 7] = [
    SectorRule {
        index: 0,
        upper_bound: PLUME_HALF_ANGLE,
        visibility: Visibility::Hidden,
        plume_area: no_plume,
    },
    SectorRule {
        index: 1,
        upper_bound: FRAC_PI_2,
        visibility: Visibility::PlumeOnly,
        plume_area: lateral_plume,
    },
    SectorRule {
        index: 2,
        upper_bound: PI - PLUME_HALF_ANGLE,
        visibility: Visibility::PlumeAndNozzle,
        plume_area: lateral_plume_with_exit,
    },
    SectorRule {
        index: 3,
        upper_bound: PI + PLUME_HALF_ANGLE,
        visibility: Visibility::PlumeAndNozzle,
        plume_area: exit_only,
    },
    SectorRule {
        index: 4,
        upper_bound: 3.0 * FRAC_PI_2,
        visibility: Visibility::PlumeAndNozzle,
        plume_area: lateral_plume_with_exit,
    },
    SectorRule {
        index: 5,
        upper_bound: TAU - PLUME_HALF_ANGLE,
        visibility: Visibility::PlumeOnly,
        plume_area: lateral_plume,
    },
    SectorRule {
        index: 6,
        upper_bound: TAU,
        visibility: Visibility::Hidden,
        plume_area: no_plume,
    },
];

/// Sector rule governing `beta` (radians, any value; wrapped onto `[0, 2π)`).
pub fn classify(beta: f64) -> &'static SectorRule {
    let beta = wrap_radians(beta);
    SECTOR_TABLE
        .iter()
        .find(|rule| beta < rule.upper_bound)
        .unwrap_or(&SECTOR_TABLE[SECTOR_TABLE.len() - 1])
}

/// Plane-specific outline of the target used by the area formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    /// Nose-on cross-section `s1` (m²).
    pub nose_area: f64,
    /// Span perpendicular to the nose axis in the sweep plane (m²).
    pub perpendicular_span: f64,
    /// Plume length ratio `lwy`.
    pub plume_length: f64,
    /// Nozzle exit area `π·Rp²` (m²).
    pub exit_area: f64,
}

impl Silhouette {
    pub fn new(target: &TargetParameters, plane: SweepPlane) -> Self {
        Self {
            nose_area: target.s1,
            perpendicular_span: target.perpendicular_span(plane),
            plume_length: target.lwy,
            exit_area: PI * target.rp * target.rp,
        }
    }

    /// Visible areas of skin, plume, and nozzle at aspect `beta`.
    pub fn projected_areas(&self, beta: f64) -> ProjectedAreas {
        let aspect = Aspect::new(beta);
        let rule = classify(aspect.beta);
        let skin = self.nose_area * aspect.cos.abs() + self.perpendicular_span * aspect.sin.abs();
        let plume = (rule.plume_area)(&aspect, self);
        let nozzle = if rule.nozzle_visible() {
            PI * aspect.cos * aspect.cos
        } else {
            0.0
        };
        ProjectedAreas {
            sector: rule.index,
            skin,
            plume,
            nozzle,
        }
    }
}

/// Per-angle visible areas (m²) and the sector they were evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedAreas {
    pub sector: u8,
    pub skin: f64,
    pub plume: f64,
    pub nozzle: f64,
}

fn no_plume(_: &Aspect, _: &Silhouette) -> f64 {
    0.0
}

/// Side-on plume area `(lwy·|sin β| − |cos β|)² / (lwy·|sin β|)`.
fn lateral_plume(aspect: &Aspect, silhouette: &Silhouette) -> f64 {
    let span = silhouette.plume_length * aspect.sin.abs();
    let denom = if span < MIN_PLUME_DENOMINATOR {
        log::debug!(
            "plume denominator {span:e} clamped at beta={:.6} rad",
            aspect.beta
        );
        MIN_PLUME_DENOMINATOR
    } else {
        span
    };
    let reach = span - aspect.cos.abs();
    reach * reach / denom
}

fn exit_only(aspect: &Aspect, silhouette: &Silhouette) -> f64 {
    silhouette.exit_area * aspect.cos.abs()
}

fn lateral_plume_with_exit(aspect: &Aspect, silhouette: &Silhouette) -> f64 {
    lateral_plume(aspect, silhouette) + exit_only(aspect, silhouette)
}
