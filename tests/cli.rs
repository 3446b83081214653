mod common;

use assert_cmd::Command;
use common::Fixture;

fn badkit() -> Command {
    let mut cmd = Command::cargo_bin("badkit").unwrap();
    cmd.env_remove("BADKIT_LOG");
    cmd
}

#[test]
fn build_writes_archive_under_project() {
    let fx = Fixture::new();
    let assert = badkit()
        .arg("--project")
        .arg(fx.root())
        .arg("build")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("SHA256"));
    assert!(fx.build_dir().join("test-addon.zip").is_file());
}

#[test]
fn build_honours_output_flag() {
    let fx = Fixture::new();
    badkit()
        .arg("--project")
        .arg(fx.root())
        .args(["build", "--output", "dist"])
        .assert()
        .success();
    assert!(fx.root().join("dist").join("test-addon.zip").is_file());
}

#[test]
fn check_lists_classes_and_writes_nothing() {
    let fx = Fixture::new();
    let assert = badkit()
        .arg("--project")
        .arg(fx.root())
        .arg("check")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("VIEW3D_PT_material_marshall"));
    assert!(!fx.build_dir().exists());
}

#[test]
fn missing_manifest_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let assert = badkit()
        .arg("--project")
        .arg(dir.path())
        .arg("build")
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("manifest not found"));
}

#[test]
fn init_then_build() {
    let dir = tempfile::tempdir().unwrap();
    badkit()
        .arg("--project")
        .arg(dir.path())
        .args(["init", "--yes", "--name", "Scaffold Test", "--operator", "bake_maps"])
        .assert()
        .success();
    assert!(dir.path().join("src/bake_maps/operator.py").is_file());

    badkit()
        .arg("--project")
        .arg(dir.path())
        .arg("build")
        .assert()
        .success();
    assert!(dir.path().join("build/scaffold-test.zip").is_file());
}
