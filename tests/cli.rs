use png2icns::{Image, PixelFormat};
use std::fs::{self, File};
use std::process::{Command, Output};
use tempfile::TempDir;

fn png2icns(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_png2icns"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run png2icns")
}

#[test]
fn no_arguments_prints_usage() {
    let output = png2icns(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {}", stdout);
}

#[test]
fn help_succeeds() {
    assert_eq!(png2icns(&["--help"]).status.code(), Some(0));
}

#[test]
fn convert_then_inspect() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("logo.png");
    let image = Image::new(PixelFormat::RGBA, 32, 32);
    image.write_png(File::create(&input).unwrap()).unwrap();
    let input = input.to_str().unwrap();

    let output = png2icns(&["convert", input]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added: icp4 (16x16)"));
    assert!(stdout.contains("Added: icp5 (32x32)"));
    assert!(stdout.contains("Total sizes: 2"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quality may be reduced"), "stderr was: {}", stderr);

    let icns = dir.path().join("logo.icns");
    assert!(icns.exists());
    let output = png2icns(&["inspect", "--verify", icns.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("icp4: 16x16 - "));
    assert!(stdout.contains("Total entries: 2"));
}

#[test]
fn convert_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.png");
    let output = png2icns(&["convert", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found"), "stderr was: {}", stderr);
}

#[test]
fn inspect_garbage_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.icns");
    fs::write(&path, b"this is not an icon file").unwrap();
    let output = png2icns(&["inspect", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wrong magic literal"), "stderr was: {}", stderr);
}
