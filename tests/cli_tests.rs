use serial_test::serial;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const TEST_DIR: &str = "test_cli_tiles";
const TEST_STORAGE: &str = "test_cli_tiles/3.tiles";

fn reset_dir() {
    fs::remove_dir_all(TEST_DIR).ok();
    fs::create_dir_all(TEST_DIR).expect("Failed to create test dir");
}

fn run_cli(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .env("FORCE_NO_TTY", "1")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute process")
}

#[test]
#[serial]
fn test_write_and_read() {
    reset_dir();
    let tile_file = format!("{TEST_DIR}/tile.png");
    fs::write(&tile_file, b"\x89PNG fake tile").unwrap();

    let output = run_cli(&[TEST_STORAGE, "write", "2", "5", &tile_file]);
    assert!(output.status.success(), "Write command failed: {:?}", output);

    let output = run_cli(&[TEST_STORAGE, "read", "2", "5"]);
    assert!(output.status.success(), "Read command failed: {:?}", output);
    assert_eq!(output.stdout, b"\x89PNG fake tile");

    let out_file = format!("{TEST_DIR}/out.png");
    let output = run_cli(&[TEST_STORAGE, "read", "2", "5", "--output", &out_file]);
    assert!(output.status.success(), "Read --output failed: {:?}", output);
    assert_eq!(fs::read(&out_file).unwrap(), b"\x89PNG fake tile");

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_write_from_stdin() {
    reset_dir();

    let mut child = Command::new("cargo")
        .args(["run", "--quiet", "--", TEST_STORAGE, "write", "7", "7"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn process");
    child
        .stdin
        .take()
        .expect("Failed to open stdin")
        .write_all(b"piped tile bytes")
        .expect("Failed to write to stdin");
    let output = child.wait_with_output().expect("Failed to wait on child");
    assert!(output.status.success(), "Piped write failed: {:?}", output);

    let output = run_cli(&[TEST_STORAGE, "read", "7", "7"]);
    assert_eq!(output.stdout, b"piped tile bytes");

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_write_without_tile_data() {
    reset_dir();

    let output = run_cli(&[TEST_STORAGE, "write", "1", "1"]);
    assert!(!output.status.success(), "Expected failure on missing tile data");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No tile data provided"),
        "Unexpected error message: {:?}",
        stderr
    );

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_read_missing_tile() {
    reset_dir();
    let tile_file = format!("{TEST_DIR}/tile.png");
    fs::write(&tile_file, b"x").unwrap();
    assert!(run_cli(&[TEST_STORAGE, "write", "0", "0", &tile_file]).status.success());

    let output = run_cli(&[TEST_STORAGE, "read", "1", "0"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "Unexpected error message: {:?}", stderr);

    let output = run_cli(&[TEST_STORAGE, "read", "8", "0"]);
    assert!(!output.status.success(), "Coordinate outside zoom 3 grid should fail");

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_zoom_flag_and_inference() {
    reset_dir();
    let tile_file = format!("{TEST_DIR}/tile.png");
    fs::write(&tile_file, b"zoomed").unwrap();

    let unnamed = format!("{TEST_DIR}/world.tiles");
    let output = run_cli(&[&unnamed, "write", "0", "0", &tile_file]);
    assert!(!output.status.success(), "Zoom cannot be inferred from 'world'");

    let output = run_cli(&[&unnamed, "--zoom", "4", "write", "15", "15", &tile_file]);
    assert!(output.status.success(), "Write with --zoom failed: {:?}", output);

    let output = run_cli(&[&unnamed, "--zoom", "4", "read", "15", "15"]);
    assert_eq!(output.stdout, b"zoomed");

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_info() {
    reset_dir();
    let tile_file = format!("{TEST_DIR}/tile.png");
    fs::write(&tile_file, vec![1u8; 2048]).unwrap();
    run_cli(&[TEST_STORAGE, "write", "1", "2", &tile_file]);
    run_cli(&[TEST_STORAGE, "write", "3", "4", &tile_file]);

    let output = run_cli(&[TEST_STORAGE, "info"]);
    assert!(output.status.success(), "Info command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TILE FILE INFO"), "{stdout}");
    assert!(stdout.contains("8 x 8"), "{stdout}");
    assert!(stdout.contains("WRITTEN SLOTS:"), "{stdout}");
    // Each `write` is its own session with an empty dedup index, so both copies are stored.
    assert!(stdout.contains("4.00 KB"), "Data region should hold two copies: {stdout}");
    assert!(stdout.contains("WRITTEN SLOTS:            2"), "{stdout}");

    fs::remove_dir_all(TEST_DIR).ok();
}

#[test]
#[serial]
fn test_create_pyramid() {
    reset_dir();

    let output = run_cli(&[TEST_DIR, "create", "0-4"]);
    assert!(output.status.success(), "Create command failed: {:?}", output);
    for zoom in 0..=4 {
        assert!(
            fs::metadata(format!("{TEST_DIR}/{zoom}.tiles")).is_ok(),
            "Missing {zoom}.tiles"
        );
    }

    let output = run_cli(&[TEST_DIR, "create", "5-2"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid zoom range"), "{stderr}");

    fs::remove_dir_all(TEST_DIR).ok();
}
