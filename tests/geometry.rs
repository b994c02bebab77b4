use std::f64::consts::{FRAC_PI_2, PI, TAU};

use ir_signature_calculator::geometry::{PLUME_HALF_ANGLE, SECTOR_TABLE, Silhouette, classify};
use ir_signature_calculator::params::{SweepPlane, TargetParameters};

fn horizontal() -> Silhouette {
    Silhouette::new(&TargetParameters::default(), SweepPlane::Horizontal)
}

#[test]
fn sector_boundaries_follow_plume_half_angle() {
    let eps = 1e-9;
    let cases = [
        (0.0, 0),
        (PLUME_HALF_ANGLE - eps, 0),
        (PLUME_HALF_ANGLE + eps, 1),
        (FRAC_PI_2 - eps, 1),
        (FRAC_PI_2 + eps, 2),
        (PI - PLUME_HALF_ANGLE - eps, 2),
        (PI - PLUME_HALF_ANGLE + eps, 3),
        (PI, 3),
        (PI + PLUME_HALF_ANGLE - eps, 3),
        (PI + PLUME_HALF_ANGLE + eps, 4),
        (1.5 * PI - eps, 4),
        (1.5 * PI + eps, 5),
        (TAU - PLUME_HALF_ANGLE - eps, 5),
        (TAU - PLUME_HALF_ANGLE + eps, 6),
        (TAU - eps, 6),
        (TAU, 0),
    ];
    for (beta, sector) in cases {
        assert_eq!(classify(beta).index, sector, "beta = {beta}");
    }
}

#[test]
fn classification_wraps_out_of_range_angles() {
    assert_eq!(classify(-0.1).index, 6);
    assert_eq!(classify(TAU + 0.1).index, 0);
    assert_eq!(classify(3.0 * PI).index, 3);
}

#[test]
fn nozzle_only_visible_from_the_rear_half() {
    let visible: Vec<u8> = SECTOR_TABLE
        .iter()
        .filter(|rule| rule.nozzle_visible())
        .map(|rule| rule.index)
        .collect();
    assert_eq!(visible, vec![2, 3, 4]);

    let silhouette = horizontal();
    for deg in [0.0, 5.0, 30.0, 60.0, 85.0, 275.0, 300.0, 355.0] {
        let areas = silhouette.projected_areas(f64::to_radians(deg));
        assert_eq!(areas.nozzle, 0.0, "deg = {deg}");
    }
}

#[test]
fn nose_on_shows_only_the_skin() {
    let areas = horizontal().projected_areas(0.0);
    assert_eq!(areas.sector, 0);
    assert!((areas.skin - 8.3).abs() < 1e-12);
    assert_eq!(areas.plume, 0.0);
    assert_eq!(areas.nozzle, 0.0);
}

#[test]
fn tail_on_shows_exit_disc_and_nozzle() {
    let areas = horizontal().projected_areas(PI);
    assert_eq!(areas.sector, 3);
    assert!((areas.skin - 8.3).abs() < 1e-9);
    assert!((areas.plume - PI).abs() < 1e-12);
    assert!((areas.nozzle - PI).abs() < 1e-12);
}

#[test]
fn lateral_plume_area_at_75_degrees() {
    let beta = 75f64.to_radians();
    let areas = horizontal().projected_areas(beta);
    let span = 5.0 * beta.sin();
    let expected = (span - beta.cos()).powi(2) / span;
    assert_eq!(areas.sector, 1);
    assert!((areas.plume - expected).abs() < 1e-12);
    assert!((areas.skin - (8.3 * beta.cos() + 26.61 * beta.sin())).abs() < 1e-12);
}

#[test]
fn areas_are_finite_and_non_negative_over_the_circle() {
    for plane in SweepPlane::ALL {
        let silhouette = Silhouette::new(&TargetParameters::default(), plane);
        for i in 0..3_600 {
            let beta = TAU * i as f64 / 3_600.0;
            let areas = silhouette.projected_areas(beta);
            for value in [areas.skin, areas.plume, areas.nozzle] {
                assert!(value.is_finite() && value >= 0.0, "beta = {beta}: {areas:?}");
            }
        }
    }
}

#[test]
fn pattern_is_mirror_symmetric_about_the_nose_axis() {
    let silhouette = horizontal();
    for deg in [20.0, 45.0, 100.0, 135.0, 170.0] {
        let left = silhouette.projected_areas(f64::to_radians(deg));
        let right = silhouette.projected_areas(f64::to_radians(360.0 - deg));
        assert!((left.skin - right.skin).abs() < 1e-9);
        assert!((left.plume - right.plume).abs() < 1e-9);
        assert!((left.nozzle - right.nozzle).abs() < 1e-9);
    }
}

#[test]
fn vertical_plane_uses_top_span() {
    let target = TargetParameters::default();
    let beta = FRAC_PI_2 - 0.2;
    let h = Silhouette::new(&target, SweepPlane::Horizontal).projected_areas(beta);
    let v = Silhouette::new(&target, SweepPlane::Vertical).projected_areas(beta);
    assert!(v.skin > h.skin);
    assert_eq!(v.plume, h.plume);
}
