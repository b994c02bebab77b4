use ir_signature_calculator::params::{
    AtmosphereConditions, ParameterError, SensorParameters, SweepPlane, TargetParameters,
};
use ir_signature_calculator::signature::{
    EnvelopeSummary, SignatureError, compute_envelope, compute_radiation_profile,
    solve_detection_range,
};

#[test]
fn envelope_follows_the_profile_angle_by_angle() {
    let target = TargetParameters::default();
    let sensor = SensorParameters::default();
    let atmosphere = AtmosphereConditions::default();
    let profile = compute_radiation_profile(&target, SweepPlane::Horizontal).unwrap();
    let envelope = compute_envelope(&profile, &target, &sensor, &atmosphere).unwrap();

    assert_eq!(envelope.plane, SweepPlane::Horizontal);
    assert_eq!(envelope.ranges.len(), profile.len());
    assert_eq!(envelope.angles, profile.angles);
    assert_eq!(envelope.intensities, profile.total);
    assert_eq!(envelope.fallback_count, 0);
    for idx in [0, 75, 180, 300] {
        let expected = solve_detection_range(
            profile.total[idx],
            profile.angles[idx],
            &target,
            &sensor,
            &atmosphere,
        );
        assert_eq!(envelope.ranges[idx], expected);
    }
    assert!((envelope.ranges[0] - 3.318_610_906_251_315).abs() < 1e-9);
}

#[test]
fn summary_is_ordered_and_points_at_the_brightest_angle() {
    let target = TargetParameters::default();
    let profile = compute_radiation_profile(&target, SweepPlane::Vertical).unwrap();
    let envelope = compute_envelope(
        &profile,
        &target,
        &SensorParameters::default(),
        &AtmosphereConditions::default(),
    )
    .unwrap();
    let summary = envelope.summary;

    assert!(summary.max_range_km >= summary.mean_range_km);
    assert!(summary.mean_range_km >= summary.min_range_km);
    assert!(envelope.angles.contains(&summary.max_range_angle_rad));
    // range is monotonic in intensity, so the peaks coincide
    let peak = profile.peak().unwrap();
    assert_eq!(summary.max_range_angle_rad, peak.angle_rad);
}

#[test]
fn summary_of_hand_built_ranges() {
    let angles = [0.0, 1.0, 2.0, 3.0];
    let ranges = [4.0, 9.0, 9.0, 2.0];
    let summary = EnvelopeSummary::from_ranges(&angles, &ranges).unwrap();
    assert_eq!(summary.max_range_km, 9.0);
    // first maximum wins
    assert_eq!(summary.max_range_angle_rad, 1.0);
    assert_eq!(summary.min_range_km, 2.0);
    assert!((summary.mean_range_km - 6.0).abs() < 1e-12);

    assert!(EnvelopeSummary::from_ranges(&[], &[]).is_none());
}

#[test]
fn out_of_domain_sensor_is_rejected_before_solving() {
    let target = TargetParameters::default();
    let profile = compute_radiation_profile(&target, SweepPlane::Horizontal).unwrap();
    let sensor = SensorParameters {
        optical_transmittance: 1.5,
        ..SensorParameters::default()
    };
    let err = compute_envelope(&profile, &target, &sensor, &AtmosphereConditions::default())
        .expect_err("transmittance above 1 must be rejected");
    assert!(matches!(
        err,
        SignatureError::Parameters(ParameterError::OutsideUnitInterval {
            field: "optical_transmittance",
            ..
        })
    ));

    let sensor = SensorParameters {
        aperture_m: -0.1,
        ..SensorParameters::default()
    };
    assert!(matches!(
        compute_envelope(&profile, &target, &sensor, &AtmosphereConditions::default()),
        Err(SignatureError::Parameters(ParameterError::NotPositive {
            field: "aperture_m",
            ..
        }))
    ));
}

#[test]
fn out_of_domain_target_is_rejected_before_solving() {
    let target = TargetParameters::default();
    let profile = compute_radiation_profile(&target, SweepPlane::Vertical).unwrap();
    let broken = TargetParameters {
        emissivity_skin: 0.0,
        ..target
    };
    assert!(matches!(
        compute_envelope(
            &profile,
            &broken,
            &SensorParameters::default(),
            &AtmosphereConditions::default(),
        ),
        Err(SignatureError::Parameters(_))
    ));
}
