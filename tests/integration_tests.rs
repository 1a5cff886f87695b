mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::{create_empty_file, create_test_image, dimensions_of};
use predicates::prelude::*;
use std::fs;

fn img_shrink() -> Command {
    let mut cmd = Command::cargo_bin("img-shrink").unwrap();
    cmd.env_remove("IMG_SHRINK_QUALITY")
        .env_remove("IMG_SHRINK_MAX_WIDTH")
        .env_remove("IMG_SHRINK_MAX_HEIGHT");
    cmd
}

#[test]
fn test_cli_help() {
    img_shrink()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-width"));
}

#[test]
fn test_missing_args() {
    img_shrink().assert().failure();
    img_shrink().arg("only-input").assert().failure();
}

#[test]
fn test_invalid_quality_rejected() {
    let temp = TempDir::new().unwrap();
    let output = temp.child("out");

    img_shrink()
        .arg(temp.path())
        .arg(output.path())
        .args(["--quality", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality value: 0"));

    img_shrink()
        .arg(temp.path())
        .arg(output.path())
        .args(["--quality", "101"])
        .assert()
        .failure();
}

#[test]
fn test_zero_width_rejected() {
    let temp = TempDir::new().unwrap();

    img_shrink()
        .arg(temp.path())
        .arg(temp.child("out").path())
        .args(["--max-width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn test_quality_from_environment() {
    let temp = TempDir::new().unwrap();

    img_shrink()
        .env("IMG_SHRINK_QUALITY", "0")
        .arg(temp.path())
        .arg(temp.child("out").path())
        .assert()
        .failure();
}

#[test]
fn test_nonexistent_input_directory() {
    let temp = TempDir::new().unwrap();

    img_shrink()
        .arg(temp.child("missing").path())
        .arg(temp.child("out").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a readable directory"));
}

#[test]
fn test_width_limited_png() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "a.png", 2000, 1000);

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .args(["-q", "50", "-w", "1024", "-H", "768"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressed and saved:"))
        .stdout(predicate::str::contains("a.png"));

    output.child("a.png").assert(predicate::path::is_file());
    assert_eq!(dimensions_of(&output.path().join("a.png")), (1024, 512));
}

#[test]
fn test_non_image_files_are_ignored() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    input.child("b.txt").write_str("not an image").unwrap();
    let output = root.child("out");

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressed and saved").not())
        .stderr(predicate::str::contains("Failed to process").not());

    output.assert(predicate::path::is_dir());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_zero_byte_image_reports_failure() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_empty_file(input.path(), "c.jpg");

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to process"))
        .stderr(predicate::str::contains("c.jpg"));

    output.child("c.jpg").assert(predicate::path::missing());
}

#[test]
fn test_nested_output_directory_is_created() {
    let input = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    create_test_image(input.path(), "d.jpg", 64, 64);
    let output = root.child("x/y/z");

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success();

    output.child("d.jpg").assert(predicate::path::is_file());
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "one.png", 120, 80);
    create_test_image(input.path(), "two.jpg", 120, 80);
    create_test_image(input.path(), "three.webp", 120, 80);
    input.child("broken.png").write_str("garbage").unwrap();

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .args(["-w", "60"])
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.png"));

    for name in ["one.png", "two.jpg", "three.webp"] {
        output.child(name).assert(predicate::path::is_file());
        assert_eq!(dimensions_of(&output.path().join(name)), (60, 40));
    }
    output.child("broken.png").assert(predicate::path::missing());
}

#[test]
fn test_uppercase_extension_is_processed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "PHOTO.JPG", 40, 30);

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success();

    output.child("PHOTO.JPG").assert(predicate::path::is_file());
}

#[test]
fn test_no_bounds_keeps_dimensions() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "big.jpg", 1500, 900);

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .args(["-q", "30"])
        .assert()
        .success();

    assert_eq!(dimensions_of(&output.path().join("big.jpg")), (1500, 900));
}

#[test]
fn test_rerun_produces_identical_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "same.jpg", 300, 200);

    let run = || {
        img_shrink()
            .arg(input.path())
            .arg(output.path())
            .args(["-q", "40", "-H", "100"])
            .assert()
            .success();
        fs::read(output.path().join("same.jpg")).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_quiet_mode_hides_success_lines() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    create_test_image(input.path(), "q.png", 20, 20);
    create_empty_file(input.path(), "bad.png");

    img_shrink()
        .arg(input.path())
        .arg(output.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to process"));

    output.child("q.png").assert(predicate::path::is_file());
}
