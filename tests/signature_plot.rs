use assert_cmd::Command;
use std::fs;

#[test]
fn signature_plot_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("plots").join("signature.png");

    Command::cargo_bin("signature_plot")
        .expect("signature_plot bin")
        .args([
            "--config",
            "configs/reference.yaml",
            "--output",
            png_path.to_str().unwrap(),
            "--envelope",
            "--width",
            "800",
            "--height",
            "800",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn signature_plot_marks_off_grid_query_angles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = fs::read_to_string("configs/reference.yaml").unwrap();
    let config_path = dir.path().join("off_grid.yaml");
    fs::write(
        &config_path,
        source
            .replace("azimuth_deg: 75.0", "azimuth_deg: 359.7")
            .replace("elevation_deg: 75.0", "elevation_deg: -90.4"),
    )
    .unwrap();
    let png_path = dir.path().join("off_grid.png");

    Command::cargo_bin("signature_plot")
        .expect("signature_plot bin")
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(fs::metadata(png_path).expect("png metadata").len() > 0);
}

#[test]
fn signature_plot_rejects_invalid_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("bad.yaml");
    let reference = fs::read_to_string("configs/reference.yaml").unwrap();
    fs::write(&config, reference.replace("emissivity_skin: 0.7", "emissivity_skin: 0.0")).unwrap();

    Command::cargo_bin("signature_plot")
        .expect("signature_plot bin")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output",
            dir.path().join("out.png").to_str().unwrap(),
        ])
        .assert()
        .failure();
}
