use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ir_signature_calculator::export::{self, writer_for_path};
use ir_signature_calculator::scenario::{ScenarioOverrides, resolve_scenario};
use ir_signature_calculator::signature::{
    AnalysisOptions, Band, EngineMode, PlaneReport, RefinementMode, SignatureReport, SweepPlane,
    Weather, analyze,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aircraft IR signature and passive detection-range report"
)]
struct Cli {
    /// Scenario file (YAML, or TOML by extension). Defaults to the reference scenario.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Detection band override
    #[arg(long, value_enum)]
    band: Option<BandArg>,

    /// Weather override
    #[arg(long, value_enum)]
    weather: Option<WeatherArg>,

    /// Engine mode override
    #[arg(long, value_enum)]
    engine: Option<EngineArg>,

    /// Flight altitude override in metres
    #[arg(long)]
    altitude: Option<f64>,

    /// Mach number override
    #[arg(long)]
    mach: Option<f64>,

    /// Horizontal-plane query angle in degrees
    #[arg(long)]
    azimuth: Option<f64>,

    /// Vertical-plane query angle in degrees
    #[arg(long)]
    elevation: Option<f64>,

    /// Also compute the 360-angle range envelopes
    #[arg(long)]
    envelope: bool,

    /// Keep refining each range until the step is below this tolerance (km)
    #[arg(long, value_name = "TOL_KM")]
    converge: Option<f64>,

    /// Write profile (and envelope) CSV files into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Write a JSON report summary to this path (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum BandArg {
    MidWave,
    LongWave,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum WeatherArg {
    Clear,
    Cloudy,
    Overcast,
    Rain,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum EngineArg {
    Normal,
    Afterburner,
}

impl From<BandArg> for Band {
    fn from(value: BandArg) -> Self {
        match value {
            BandArg::MidWave => Band::MidWave,
            BandArg::LongWave => Band::LongWave,
        }
    }
}

impl From<WeatherArg> for Weather {
    fn from(value: WeatherArg) -> Self {
        match value {
            WeatherArg::Clear => Weather::Clear,
            WeatherArg::Cloudy => Weather::Cloudy,
            WeatherArg::Overcast => Weather::Overcast,
            WeatherArg::Rain => Weather::Rain,
        }
    }
}

impl From<EngineArg> for EngineMode {
    fn from(value: EngineArg) -> Self {
        match value {
            EngineArg::Normal => EngineMode::Normal,
            EngineArg::Afterburner => EngineMode::Afterburner,
        }
    }
}

/// Iteration cap for `--converge`; the five fixed passes always run first.
const CONVERGE_MAX_ITERATIONS: usize = 200;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let overrides = ScenarioOverrides {
        band: cli.band.map(Band::from),
        weather: cli.weather.map(Weather::from),
        engine_mode: cli.engine.map(EngineMode::from),
        altitude_m: cli.altitude,
        mach: cli.mach,
        azimuth_deg: cli.azimuth,
        elevation_deg: cli.elevation,
    };
    let scenario = resolve_scenario(cli.config.as_deref(), &overrides)?;

    let refinement = match cli.converge {
        Some(tolerance_km) if tolerance_km.is_finite() && tolerance_km > 0.0 => {
            RefinementMode::Converged {
                tolerance_km,
                max_iterations: CONVERGE_MAX_ITERATIONS,
            }
        }
        Some(other) => {
            return Err(anyhow::anyhow!(
                "--converge must be a positive tolerance in km, got {other}"
            ));
        }
        None => RefinementMode::default(),
    };
    let options = AnalysisOptions {
        include_envelopes: cli.envelope,
        refinement,
    };

    let report = analyze(&scenario, &options)?;
    print_report(&report);

    if let Some(dir) = &cli.csv_dir {
        write_csv_exports(dir, &report)?;
    }
    if let Some(path) = &cli.json {
        let writer = writer_for_path(path)?;
        export::report::write_json(writer, &report)?;
    }

    Ok(())
}

fn print_report(report: &SignatureReport) {
    let scenario = &report.scenario;
    let target = &scenario.target;
    let sensor = &scenario.sensor;
    let temps = &report.radiances.temperatures;

    println!("=== Scenario: {} ===", display_name(&scenario.name));
    println!(
        "Flight: H = {:.0} m, Ma = {:.2}, engine = {}",
        target.altitude_m,
        target.mach,
        target.engine_mode.label()
    );
    println!(
        "Band: {} ({:.1}-{:.1} um), weather = {}",
        scenario.atmosphere.band.label(),
        target.l1,
        target.l2,
        scenario.atmosphere.weather.label()
    );
    println!(
        "Temperatures: T0 = {:.2} K, Tm = {:.2} K, Tp (nozzle) = {:.2} K, Tw (plume) = {:.2} K",
        temps.ambient_k, temps.skin_k, temps.nozzle_k, temps.plume_k
    );
    println!(
        "Band radiance: skin = {:.4}, nozzle = {:.4}, plume = {:.4} W/(m^2 sr)",
        report.radiances.skin, report.radiances.nozzle, report.radiances.plume
    );
    println!("Attenuation: k = {:.5} 1/km", report.attenuation_per_km);
    println!(
        "Sensor: D = {:.3} m, F/{:.1}, tau0 = {:.2}, NETD = {:.1} mK, SNR = {:.1}",
        sensor.aperture_m,
        sensor.f_number,
        sensor.optical_transmittance,
        sensor.netd_k * 1.0e3,
        sensor.snr_threshold
    );

    for plane in SweepPlane::ALL {
        print_plane(plane, report.plane(plane));
    }
}

fn print_plane(plane: SweepPlane, plane_report: &PlaneReport) {
    let query = &plane_report.query;
    let sample = &query.sample;
    println!();
    println!("--- {} plane ---", plane.label());
    if let Some(peaks) = plane_report.profile.component_peaks() {
        println!(
            "Peak intensity: {:.2} W/sr at {:.1} deg",
            peaks.total.value,
            peaks.total.angle_rad.to_degrees()
        );
        for (name, peak) in [
            ("skin", peaks.skin),
            ("plume", peaks.plume),
            ("nozzle", peaks.nozzle),
        ] {
            println!(
                "  max {name}: {:.2} W/sr at {:.1} deg",
                peak.value,
                peak.angle_rad.to_degrees()
            );
        }
    }
    println!(
        "Query {:.1} deg (sector {}): total = {:.2} W/sr (skin {:.2}, plume {:.2}, nozzle {:.2})",
        query.requested_deg, sample.sector, sample.total, sample.skin, sample.plume, sample.nozzle
    );
    println!(
        "Detection range: {:.3} km (vacuum {:.3} km, tau = {:.3}{})",
        query.range.range_km,
        query.range.vacuum_range_km,
        query.range.transmittance,
        if query.range.fallback { ", fallback" } else { "" }
    );
    if let Some(envelope) = &plane_report.envelope {
        let summary = &envelope.summary;
        println!(
            "Envelope: max = {:.3} km @ {:.1} deg, mean = {:.3} km, min = {:.3} km",
            summary.max_range_km,
            summary.max_range_angle_rad.to_degrees(),
            summary.mean_range_km,
            summary.min_range_km
        );
        if envelope.fallback_count > 0 {
            println!(
                "Envelope fallbacks: {} of {} angles",
                envelope.fallback_count,
                envelope.ranges.len()
            );
        }
    }
}

fn write_csv_exports(dir: &std::path::Path, report: &SignatureReport) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    for plane in SweepPlane::ALL {
        let plane_report = report.plane(plane);
        let profile_path = dir.join(format!("profile_{}.csv", plane.label()));
        export::profile::write_csv(writer_for_path(&profile_path)?, &plane_report.profile)?;
        if let Some(envelope) = &plane_report.envelope {
            let envelope_path = dir.join(format!("envelope_{}.csv", plane.label()));
            export::envelope::write_csv(writer_for_path(&envelope_path)?, envelope)?;
        }
    }
    Ok(())
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "unnamed" } else { name }
}
