use ir_signature_calculator::params::{EngineMode, TargetParameters};
use ir_signature_calculator::spectral::quadrature::{QuadratureError, QuadratureSettings};
use ir_signature_calculator::spectral::{
    BandRadiances, SpectralError, Surface, SurfaceTemperatures, band_radiance, spectral_exitance,
};

// Reference values from an independent 50-digit integration of the same integrand.
const L_SKIN: f64 = 7.989_479_754_898_634;
const L_SKIN_AT_348K: f64 = 5.992_898_327_562_933;
const L_NOZZLE: f64 = 439.073_537_541_631_4;
const L_PLUME: f64 = 214.714_730_294_674;
const L_NOZZLE_AFTERBURNER: f64 = 5_215.878_792_679_894;
const L_PLUME_AFTERBURNER: f64 = 156.373_170_493_367_94;
const L_SKIN_LONG_WAVE: f64 = 53.479_446_578_213_6;

fn assert_rel(actual: f64, expected: f64, tol: f64) {
    let rel = ((actual - expected) / expected).abs();
    assert!(rel < tol, "actual {actual} expected {expected} rel {rel:e}");
}

#[test]
fn reference_scenario_temperatures() {
    let temps = SurfaceTemperatures::for_target(&TargetParameters::default());
    assert!((temps.ambient_k - 216.7).abs() < 1e-12);
    assert!((temps.skin_k - 358.8552).abs() < 1e-9);
    assert_eq!(temps.nozzle_k, 600.0);
    assert!((temps.plume_k - 675.0).abs() < 1e-12);
}

#[test]
fn afterburner_raises_nozzle_and_scales_plume_down() {
    let target = TargetParameters {
        engine_mode: EngineMode::Afterburner,
        ..TargetParameters::default()
    };
    let temps = SurfaceTemperatures::for_target(&target);
    assert_eq!(temps.nozzle_k, 1_000.0);
    assert!((temps.plume_k - 637.5).abs() < 1e-12);
}

#[test]
fn reference_band_radiances_match_high_precision_values() {
    let radiances = BandRadiances::compute(&TargetParameters::default()).expect("radiances");
    assert_rel(radiances.skin, L_SKIN, 1e-8);
    assert_rel(radiances.nozzle, L_NOZZLE, 1e-8);
    assert_rel(radiances.plume, L_PLUME, 1e-8);
}

#[test]
fn skin_radiance_at_tabulated_skin_temperature() {
    // Mach 2 skin temperature over 210.2 K air
    let skin = band_radiance(348.0912, 0.7, 3.0, 5.0).expect("skin radiance");
    assert_rel(skin, L_SKIN_AT_348K, 1e-8);
}

#[test]
fn afterburner_radiances_match_high_precision_values() {
    let target = TargetParameters {
        engine_mode: EngineMode::Afterburner,
        ..TargetParameters::default()
    };
    let radiances = BandRadiances::compute(&target).expect("radiances");
    assert_rel(radiances.nozzle, L_NOZZLE_AFTERBURNER, 1e-8);
    assert_rel(radiances.plume, L_PLUME_AFTERBURNER, 1e-8);
}

#[test]
fn long_wave_band_integrates_the_requested_interval() {
    let skin = band_radiance(348.0912, 0.7, 8.0, 12.0).expect("long-wave radiance");
    assert_rel(skin, L_SKIN_LONG_WAVE, 1e-8);
}

#[test]
fn radiance_scales_linearly_with_emissivity() {
    let half = band_radiance(600.0, 0.4, 3.0, 5.0).expect("radiance");
    let full = band_radiance(600.0, 0.8, 3.0, 5.0).expect("radiance");
    assert_rel(full, 2.0 * half, 1e-12);
    assert_rel(full, L_NOZZLE, 1e-8);
}

#[test]
fn exitance_is_finite_and_vanishes_for_cold_short_wavelengths() {
    assert_eq!(spectral_exitance(1.0e-7, 1.0), 0.0);
    let peak = spectral_exitance(4.0e-6, 1_000.0);
    assert!(peak.is_finite() && peak > 0.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    assert_eq!(
        band_radiance(-5.0, 0.7, 3.0, 5.0),
        Err(SpectralError::InvalidTemperature(-5.0))
    );
    assert!(matches!(
        band_radiance(600.0, 0.7, 5.0, 3.0),
        Err(SpectralError::InvalidBand { .. })
    ));
}

#[test]
fn quadrature_failure_names_the_surface() {
    let settings = QuadratureSettings {
        abs_tolerance: 0.0,
        rel_tolerance: 0.0,
        max_subdivisions: 1,
    };
    let err = BandRadiances::compute_with(&TargetParameters::default(), &settings)
        .expect_err("zero tolerance cannot converge");
    match err {
        SpectralError::ForSurface { surface, source } => {
            assert_eq!(surface, Surface::Skin);
            assert!(matches!(
                *source,
                SpectralError::Integration(QuadratureError::NotConverged { .. })
            ));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
