use std::fs;
use std::path::PathBuf;

use clap::Parser;
use ir_signature_calculator::scenario::{ScenarioOverrides, resolve_scenario};
use ir_signature_calculator::signature::{
    AnalysisOptions, PlaneReport, ProfileSample, RangeEnvelope, SweepPlane, analyze,
};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render polar IR intensity patterns (and range envelopes) to PNG"
)]
struct Cli {
    /// Scenario file (YAML, or TOML by extension). Defaults to the reference scenario.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "artifacts/signature.png")]
    output: PathBuf,
    /// Add a second row with the detection-range envelopes
    #[arg(long)]
    envelope: bool,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

const TOTAL_COLOR: RGBColor = RGBColor(20, 20, 20);
const SKIN_COLOR: RGBColor = RGBColor(30, 110, 200);
const PLUME_COLOR: RGBColor = RGBColor(210, 100, 20);
const NOZZLE_COLOR: RGBColor = RGBColor(200, 30, 60);
const RANGE_COLOR: RGBColor = RGBColor(40, 150, 70);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type PolarChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let scenario = resolve_scenario(cli.config.as_deref(), &ScenarioOverrides::default())?;
    let options = AnalysisOptions {
        include_envelopes: cli.envelope,
        ..AnalysisOptions::default()
    };
    let report = analyze(&scenario, &options)?;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 20.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);

    let rows = if cli.envelope { 2 } else { 1 };
    let panels = root.split_evenly((rows, SweepPlane::ALL.len()));
    for (col, plane) in SweepPlane::ALL.iter().enumerate() {
        let plane_report = report.plane(*plane);
        draw_intensity_panel(
            &panels[col],
            *plane,
            plane_report,
            &caption_font,
            &label_font,
        )?;
        if let Some(envelope) = &plane_report.envelope {
            draw_envelope_panel(
                &panels[SweepPlane::ALL.len() + col],
                envelope,
                &caption_font,
                &label_font,
            )?;
        }
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn draw_intensity_panel(
    area: &Panel<'_>,
    plane: SweepPlane,
    plane_report: &PlaneReport,
    caption_font: &FontDesc<'_>,
    label_font: &FontDesc<'_>,
) -> anyhow::Result<()> {
    let profile = &plane_report.profile;
    let radius = axis_radius(&profile.total);
    let caption = format!("{} plane intensity (W/sr)", capitalize(plane.label()));
    let mut chart = polar_chart(area, caption, caption_font.clone(), radius)?;
    draw_rings(&mut chart, radius, label_font)?;

    let series: [(&str, &[f64], RGBColor); 4] = [
        ("total", &profile.total, TOTAL_COLOR),
        ("skin", &profile.skin, SKIN_COLOR),
        ("plume", &profile.plume, PLUME_COLOR),
        ("nozzle", &profile.nozzle, NOZZLE_COLOR),
    ];
    for (name, values, color) in series {
        chart
            .draw_series(std::iter::once(PathElement::new(
                closed_polar_path(&profile.angles, values),
                ShapeStyle::from(&color).stroke_width(2),
            )))?
            .label(name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], ShapeStyle::from(&color).stroke_width(2))
            });
    }

    mark_query(&mut chart, &plane_report.query.sample, label_font)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(label_font.clone())
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;
    Ok(())
}

fn draw_envelope_panel(
    area: &Panel<'_>,
    envelope: &RangeEnvelope,
    caption_font: &FontDesc<'_>,
    label_font: &FontDesc<'_>,
) -> anyhow::Result<()> {
    let radius = axis_radius(&envelope.ranges);
    let caption = format!(
        "{} plane detection range (km)",
        capitalize(envelope.plane.label())
    );
    let mut chart = polar_chart(area, caption, caption_font.clone(), radius)?;
    draw_rings(&mut chart, radius, label_font)?;

    chart.draw_series(std::iter::once(PathElement::new(
        closed_polar_path(&envelope.angles, &envelope.ranges),
        ShapeStyle::from(&RANGE_COLOR).stroke_width(2),
    )))?;

    let summary = &envelope.summary;
    let (x, y) = polar_point(summary.max_range_angle_rad, summary.max_range_km);
    chart.draw_series(std::iter::once(Circle::new(
        (x, y),
        5,
        ShapeStyle::from(&PLUME_COLOR).filled(),
    )))?;
    let text = format!(
        "max {:.2} km @ {:.0}°",
        summary.max_range_km,
        summary.max_range_angle_rad.to_degrees()
    );
    chart.draw_series(std::iter::once(Text::new(
        text,
        (x + 0.04 * radius, y + 0.04 * radius),
        label_font.clone().color(&PLUME_COLOR),
    )))?;
    Ok(())
}

fn polar_chart<'a, 'b>(
    area: &'a Panel<'b>,
    caption: String,
    caption_font: FontDesc<'_>,
    radius: f64,
) -> anyhow::Result<PolarChart<'a, 'b>> {
    let extent = radius * 1.1;
    let chart = ChartBuilder::on(area)
        .margin(15)
        .caption(caption, caption_font)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;
    Ok(chart)
}

/// Concentric range rings plus the nose/tail and beam axes.
fn draw_rings(
    chart: &mut PolarChart<'_, '_>,
    radius: f64,
    label_font: &FontDesc<'_>,
) -> anyhow::Result<()> {
    let grid = ShapeStyle::from(&BLACK.mix(0.2)).stroke_width(1);
    for ring in 1..=4 {
        let r = radius * ring as f64 / 4.0;
        let points: Vec<(f64, f64)> = (0..=120)
            .map(|i| polar_point(std::f64::consts::TAU * i as f64 / 120.0, r))
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(points, grid)))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.3}", r),
            (0.02 * radius, r),
            label_font.clone().color(&BLACK.mix(0.5)),
        )))?;
    }
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, -radius), (0.0, radius)],
        grid,
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-radius, 0.0), (radius, 0.0)],
        grid,
    )))?;
    Ok(())
}

fn mark_query(
    chart: &mut PolarChart<'_, '_>,
    sample: &ProfileSample,
    label_font: &FontDesc<'_>,
) -> anyhow::Result<()> {
    let (x, y) = polar_point(sample.angle_rad, sample.total);
    chart.draw_series(std::iter::once(Cross::new(
        (x, y),
        6,
        ShapeStyle::from(&TOTAL_COLOR).stroke_width(2),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("{:.1} W/sr", sample.total),
        (x, y),
        label_font.clone(),
    )))?;
    Ok(())
}

/// Aspect angle 0 (nose-on) points up; angles grow clockwise.
fn polar_point(angle_rad: f64, r: f64) -> (f64, f64) {
    (r * angle_rad.sin(), r * angle_rad.cos())
}

fn closed_polar_path(angles: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = angles
        .iter()
        .zip(values)
        .map(|(&angle, &value)| polar_point(angle, value))
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn axis_radius(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
