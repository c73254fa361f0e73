//! Generate command tests against real files.

use std::fs;

use pretty_assertions::assert_eq;
use wavegen_cli::commands::generate::{execute, GenerateArgs};
use wavegen_cli::commands::{EXIT_INVALID_INPUT, EXIT_IO};

fn args(output: &str, rate: i64, bits: i64, rest: &[&str]) -> GenerateArgs {
    GenerateArgs {
        output: output.to_string(),
        sample_rate: rate,
        bits_per_sample: bits,
        rest: rest.iter().map(|s| s.to_string()).collect(),
        duration: None,
        write_header: true,
        json: false,
    }
}

#[test]
fn test_writes_square_wave_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sq.wav");
    let status = execute(&args(path.to_str().unwrap(), 8000, 8, &["4", "sq(t*1000)"])).unwrap();

    assert_eq!(status, 0);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 48);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(bytes[44..].to_vec(), vec![255u8, 255, 255, 255]);
}

#[test]
fn test_no_header_writes_raw_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.pcm");
    let mut run = args(path.to_str().unwrap(), 8000, 16, &["3", "0", "1"]);
    run.write_header = false;

    assert_eq!(execute(&run).unwrap(), 0);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes, vec![0, 0, 0xFF, 0x7F, 0, 0, 0xFF, 0x7F, 0, 0, 0xFF, 0x7F]);
}

#[test]
fn test_duration_sets_sample_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dur.wav");
    let mut run = args(path.to_str().unwrap(), 1000, 8, &["sin(t)"]);
    run.duration = Some(0.25);

    assert_eq!(execute(&run).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap().len(), 44 + 250);
}

#[test]
fn test_invalid_rate_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.wav");
    let status = execute(&args(path.to_str().unwrap(), 0, 8, &["4", "t"])).unwrap();

    assert_eq!(status, EXIT_INVALID_INPUT);
    assert!(!path.exists());
}

#[test]
fn test_bad_expression_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.wav");
    let status = execute(&args(path.to_str().unwrap(), 8000, 8, &["4", "t +"])).unwrap();

    assert_eq!(status, EXIT_INVALID_INPUT);
    assert!(!path.exists());
}

#[test]
fn test_bad_expression_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.wav");
    fs::write(&path, b"previous").unwrap();
    let status = execute(&args(path.to_str().unwrap(), 8000, 8, &["4", "nope(t)"])).unwrap();

    assert_eq!(status, EXIT_INVALID_INPUT);
    assert_eq!(fs::read(&path).unwrap(), b"previous".to_vec());
}

#[test]
fn test_non_integer_samples_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.wav");
    let status = execute(&args(path.to_str().unwrap(), 8000, 8, &["4.5", "t"])).unwrap();

    assert_eq!(status, EXIT_INVALID_INPUT);
    assert!(!path.exists());
}

#[test]
fn test_unwritable_output_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.wav");
    let status = execute(&args(path.to_str().unwrap(), 8000, 8, &["4", "t"])).unwrap();

    assert_eq!(status, EXIT_IO);
}

#[test]
fn test_json_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("j.wav");
    let mut run = args(path.to_str().unwrap(), 22050, 24, &["100", "sin(t*1000)", "saw(t*50)"]);
    run.json = true;

    assert_eq!(execute(&run).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap().len(), 44 + 100 * 2 * 3);
}

#[test]
fn test_oversized_header_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fast.wav");
    let rate = i64::from(u32::MAX);
    let status = execute(&args(path.to_str().unwrap(), rate, 16, &["2", "0", "0"])).unwrap();
    assert_eq!(status, EXIT_INVALID_INPUT);
    assert!(!path.exists());

    let mut raw = args(path.to_str().unwrap(), rate, 16, &["2", "0", "0"]);
    raw.write_header = false;
    assert_eq!(execute(&raw).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap(), vec![0u8; 8]);
}

#[test]
fn test_wide_bit_depth_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.wav");
    let status = execute(&args(path.to_str().unwrap(), 8000, 65, &["1", "1"])).unwrap();

    assert_eq!(status, 0);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[34..36], &65u16.to_le_bytes());
    assert_eq!(bytes.len(), 44 + 9);
    assert_eq!(bytes[52], 0x7F);
}
