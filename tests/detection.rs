use ir_signature_calculator::atmosphere::transmittance;
use ir_signature_calculator::detection::{
    REFINEMENT_PASSES, RangeSolver, RefinementMode, solve_detection_range,
    solve_detection_range_detailed,
};
use ir_signature_calculator::params::{
    AtmosphereConditions, Band, SensorParameters, TargetParameters, Weather,
};

fn reference() -> (TargetParameters, SensorParameters, AtmosphereConditions) {
    (
        TargetParameters::default(),
        SensorParameters::default(),
        AtmosphereConditions::default(),
    )
}

#[test]
fn reference_ranges_after_five_passes() {
    let (target, sensor, atmosphere) = reference();
    let cases = [
        (1_000.0, 14.241_911_631_317_498, 10.397_935_467_547_908),
        (1_151.344_972_022_974_6, 15.281_677_178_237_26, 10.962_713_935_566_606),
        (2_120.249_101_203_392, 20.737_754_583_493_288, 13.640_397_202_502_802),
    ];
    for (intensity, vacuum, attenuated) in cases {
        let solution = solve_detection_range_detailed(
            intensity,
            0.0,
            &target,
            &sensor,
            &atmosphere,
            RefinementMode::default(),
        );
        assert!((solution.vacuum_range_km - vacuum).abs() < 1e-9, "{solution:?}");
        assert!((solution.range_km - attenuated).abs() < 1e-9, "{solution:?}");
        assert_eq!(solution.iterations, REFINEMENT_PASSES);
        assert!(!solution.fallback);
        assert!(
            (solution.attenuation_per_km - 0.060_238_842_382_440_43).abs() < 1e-15
        );
    }
}

#[test]
fn range_grows_with_intensity_and_optics_transmittance() {
    let (target, sensor, atmosphere) = reference();
    let mut previous = 0.0;
    for intensity in [10.0, 100.0, 500.0, 1_000.0, 5_000.0] {
        let range = solve_detection_range(intensity, 0.0, &target, &sensor, &atmosphere);
        assert!(range > previous);
        previous = range;
    }

    let clearer = SensorParameters {
        optical_transmittance: 0.95,
        ..SensorParameters::default()
    };
    let base = solve_detection_range(1_000.0, 0.0, &target, &sensor, &atmosphere);
    let better = solve_detection_range(1_000.0, 0.0, &target, &clearer, &atmosphere);
    assert!(better > base);
}

#[test]
fn attenuation_shortens_range_below_vacuum() {
    let (target, sensor, _) = reference();
    let wet = AtmosphereConditions {
        band: Band::MidWave,
        weather: Weather::Rain,
    };
    let clear = solve_detection_range_detailed(
        1_000.0,
        0.0,
        &target,
        &sensor,
        &AtmosphereConditions::default(),
        RefinementMode::default(),
    );
    let rain = solve_detection_range_detailed(
        1_000.0,
        0.0,
        &target,
        &sensor,
        &wet,
        RefinementMode::default(),
    );
    assert!(clear.range_km < clear.vacuum_range_km);
    // the rain multiplier lowers k in this model, so the range is longer
    assert!(rain.attenuation_per_km < clear.attenuation_per_km);
    assert!(rain.range_km > clear.range_km);
    assert_eq!(rain.vacuum_range_km, clear.vacuum_range_km);
}

#[test]
fn zero_intensity_gives_zero_range() {
    let (target, sensor, atmosphere) = reference();
    let solution = solve_detection_range_detailed(
        0.0,
        0.0,
        &target,
        &sensor,
        &atmosphere,
        RefinementMode::default(),
    );
    assert_eq!(solution.range_km, 0.0);
    assert!(!solution.fallback);
}

#[test]
fn negative_intensity_falls_back_without_error() {
    let (target, sensor, atmosphere) = reference();
    let solution = solve_detection_range_detailed(
        -1.0,
        0.0,
        &target,
        &sensor,
        &atmosphere,
        RefinementMode::default(),
    );
    assert!(solution.fallback);
    assert_eq!(solution.range_km, 0.0);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn non_finite_gain_uses_empirical_estimate() {
    let (target, _, atmosphere) = reference();
    let sensor = SensorParameters {
        d_star: f64::INFINITY,
        ..SensorParameters::default()
    };
    let solution = solve_detection_range_detailed(
        1_000.0,
        0.0,
        &target,
        &sensor,
        &atmosphere,
        RefinementMode::default(),
    );
    assert!(solution.fallback);
    // sqrt(I * tau0 * A0 * 1e6) / 1000
    assert!((solution.range_km - 2.583_773_285_115_842).abs() < 1e-9);
}

#[test]
fn converged_mode_lands_on_the_fixed_point() {
    let (target, sensor, atmosphere) = reference();
    let solver = RangeSolver::new(&target, &sensor, &atmosphere).with_mode(
        RefinementMode::Converged {
            tolerance_km: 1e-10,
            max_iterations: 500,
        },
    );
    let fixed = RangeSolver::new(&target, &sensor, &atmosphere).solve(1_000.0, 0.0);
    let converged = solver.solve(1_000.0, 0.0);

    assert!(converged.iterations >= REFINEMENT_PASSES);
    assert!((converged.range_km - 10.409_041_754_783_614).abs() < 1e-8);
    assert!((converged.range_km - fixed.range_km).abs() < 0.05);

    // R = sqrt(I * tau(R) * gain) / 1000 at the fixed point
    let ratio = converged.range_km / converged.vacuum_range_km;
    let tau = transmittance(converged.attenuation_per_km, converged.range_km);
    assert!((ratio * ratio - tau).abs() < 1e-9);
}

#[test]
fn fixed_mode_runs_exactly_the_requested_passes() {
    let (target, sensor, atmosphere) = reference();
    let solver =
        RangeSolver::new(&target, &sensor, &atmosphere).with_mode(RefinementMode::Fixed(0));
    let solution = solver.solve(1_000.0, 0.0);
    assert_eq!(solution.iterations, 0);
    assert_eq!(solution.range_km, solution.vacuum_range_km);
}

#[test]
fn angle_does_not_change_the_range() {
    let (target, sensor, atmosphere) = reference();
    let a = solve_detection_range(750.0, 0.0, &target, &sensor, &atmosphere);
    let b = solve_detection_range(750.0, 2.5, &target, &sensor, &atmosphere);
    assert_eq!(a, b);
}
