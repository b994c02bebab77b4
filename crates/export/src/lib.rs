//! Export helpers for CSV and JSON artifacts.
//!
//! The signature crates never touch the filesystem; front-ends call into this
//! crate when a user asks for the numbers behind a report.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod profile {
    use std::io::Write;

    use irsig_signature::RadiationProfile;
    use serde::Serialize;

    use super::ExportError;

    /// CSV row of a radiation profile.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub angle_deg: f64,
        pub angle_rad: f64,
        pub sector: u8,
        pub total_w_sr: f64,
        pub skin_w_sr: f64,
        pub plume_w_sr: f64,
        pub nozzle_w_sr: f64,
    }

    pub fn records(profile: &RadiationProfile) -> Vec<Record> {
        (0..profile.len())
            .filter_map(|idx| profile.sample(idx))
            .map(|s| Record {
                angle_deg: s.angle_rad.to_degrees(),
                angle_rad: s.angle_rad,
                sector: s.sector,
                total_w_sr: s.total,
                skin_w_sr: s.skin,
                plume_w_sr: s.plume,
                nozzle_w_sr: s.nozzle,
            })
            .collect()
    }

    /// Write one header row and one row per angle.
    pub fn write_csv<W: Write>(writer: W, profile: &RadiationProfile) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in records(profile) {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod envelope {
    use std::io::Write;

    use irsig_signature::RangeEnvelope;
    use serde::Serialize;

    use super::ExportError;

    /// CSV row of a range envelope.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub angle_deg: f64,
        pub angle_rad: f64,
        pub intensity_w_sr: f64,
        pub range_km: f64,
    }

    pub fn write_csv<W: Write>(writer: W, envelope: &RangeEnvelope) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        let rows = envelope
            .angles
            .iter()
            .zip(&envelope.intensities)
            .zip(&envelope.ranges);
        for ((&angle_rad, &intensity_w_sr), &range_km) in rows {
            csv.serialize(Record {
                angle_deg: angle_rad.to_degrees(),
                angle_rad,
                intensity_w_sr,
                range_km,
            })?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod report {
    use std::io::Write;

    use irsig_signature::{
        AngleQuery, BandRadiances, ComponentPeaks, EnvelopeSummary, Scenario, SignatureReport,
        SweepPlane,
    };
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;

    /// JSON summary of one sweep plane. Arrays are left to the CSV exports.
    #[derive(Debug, Serialize)]
    pub struct PlaneSummary {
        pub plane: SweepPlane,
        /// Maxima of total, skin, plume and nozzle intensity.
        pub peaks: Option<ComponentPeaks>,
        pub query: AngleQuery,
        pub envelope: Option<EnvelopeSummary>,
    }

    #[derive(Debug, Serialize)]
    pub struct ReportSummary<'a> {
        pub scenario: &'a Scenario,
        pub radiances: &'a BandRadiances,
        pub attenuation_per_km: f64,
        pub planes: Vec<PlaneSummary>,
    }

    impl<'a> ReportSummary<'a> {
        pub fn from_report(report: &'a SignatureReport) -> Self {
            let planes = SweepPlane::ALL
                .iter()
                .map(|&plane| {
                    let plane_report = report.plane(plane);
                    PlaneSummary {
                        plane,
                        peaks: plane_report.profile.component_peaks(),
                        query: plane_report.query,
                        envelope: plane_report.envelope.as_ref().map(|e| e.summary),
                    }
                })
                .collect();
            Self {
                scenario: &report.scenario,
                radiances: &report.radiances,
                attenuation_per_km: report.attenuation_per_km,
                planes,
            }
        }
    }

    pub fn write_json<W: Write>(mut writer: W, report: &SignatureReport) -> Result<(), ExportError> {
        to_writer_pretty(&mut writer, &ReportSummary::from_report(report))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
