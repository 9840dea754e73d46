// e2e/cli_integration.rs: CLI integration tests
//
// Tests the `zx5` binary as a black-box CLI tool using std::process::Command.
// Covers argument parsing, compress/decompress dispatch, format flags,
// dictionaries, batch mode, overwrite policy, timestamps and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use filetime::FileTime;
use tempfile::TempDir;

/// Locate the `zx5` binary produced by Cargo.
fn zx5_bin() -> PathBuf {
    // CARGO_BIN_EXE_zx5 is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_zx5") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("zx5");
    p
}

/// Create a TempDir containing a level-data-like file of ~3 KB.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("level.bin");
    let mut content = Vec::new();
    for row in 0..96u32 {
        content.extend_from_slice(b"\x01\x01\x01\x02\x00\x00\x00\x00\x00\x00\x03\x01");
        content.extend_from_slice(&row.to_le_bytes());
        content.extend_from_slice(b"##..##..##..####");
    }
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(zx5_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run zx5")
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("level.bin.zx5");
    let roundtrip = dir.path().join("roundtrip.bin");

    let output = run(dir.path(), &[path_str(&input)]);
    assert!(output.status.success(), "compress step should exit 0");
    assert!(compressed.exists(), "default output name is <input>.zx5");
    assert!(fs::metadata(&compressed).unwrap().len() < original.len() as u64);

    let output = run(
        dir.path(),
        &["-d", path_str(&compressed), path_str(&roundtrip)],
    );
    assert!(output.status.success(), "decompress step should exit 0");
    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

#[test]
fn test_cli_reports_sizes() {
    let (dir, input) = make_temp_input();
    let output = run(dir.path(), &[path_str(&input)]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("File compressed from 3072 to"),
        "compress should report sizes; got: {stderr}"
    );
    assert!(stderr.contains("(delta "), "delta should be reported; got: {stderr}");
}

#[test]
fn test_cli_silent() {
    let (dir, input) = make_temp_input();
    let output = run(dir.path(), &["-s", path_str(&input)]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "-s should print nothing on success");
}

// ── 2. Format flags ──────────────────────────────────────────────────────────

#[test]
fn test_cli_format_flags_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    for flag in ["-b", "-c", "-q"] {
        let packed = dir.path().join(format!("packed{flag}.zx5"));
        let unpacked = dir.path().join(format!("unpacked{flag}.bin"));
        let output = run(dir.path(), &[flag, path_str(&input), path_str(&packed)]);
        assert!(output.status.success(), "{flag} compress should exit 0");

        // quick mode changes the search only, not the stream format
        let decode_flag = if flag == "-q" { "-s" } else { flag };
        let output = run(
            dir.path(),
            &["-d", decode_flag, path_str(&packed), path_str(&unpacked)],
        );
        assert!(output.status.success(), "{flag} decompress should exit 0");
        assert_eq!(fs::read(&unpacked).unwrap(), original, "{flag} roundtrip");
    }
}

#[test]
fn test_cli_backwards_differs_from_forward() {
    let (dir, input) = make_temp_input();
    let forward = dir.path().join("forward.zx5");
    let backwards = dir.path().join("backwards.zx5");
    run(dir.path(), &[path_str(&input), path_str(&forward)]);
    run(dir.path(), &["-b", path_str(&input), path_str(&backwards)]);
    assert_ne!(fs::read(&forward).unwrap(), fs::read(&backwards).unwrap());
}

// ── 3. Dictionary and skip ───────────────────────────────────────────────────

#[test]
fn test_cli_dictionary_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let dict = dir.path().join("common.dict");
    fs::write(&dict, &original[..256]).unwrap();

    let plain = dir.path().join("plain.zx5");
    let primed = dir.path().join("primed.zx5");
    let unpacked = dir.path().join("unpacked.bin");

    run(dir.path(), &[path_str(&input), path_str(&plain)]);
    let output = run(
        dir.path(),
        &["-D", path_str(&dict), path_str(&input), path_str(&primed)],
    );
    assert!(output.status.success(), "-D compress should exit 0");
    assert!(fs::metadata(&primed).unwrap().len() <= fs::metadata(&plain).unwrap().len());

    let output = run(
        dir.path(),
        &["-d", "-D", path_str(&dict), path_str(&primed), path_str(&unpacked)],
    );
    assert!(output.status.success(), "-D decompress should exit 0");
    assert_eq!(fs::read(&unpacked).unwrap(), original);
}

#[test]
fn test_cli_missing_dictionary() {
    let (dir, input) = make_temp_input();
    let output = run(dir.path(), &["-D", "absent.dict", path_str(&input)]);
    assert!(!output.status.success(), "missing dictionary should fail");
}

#[test]
fn test_cli_skip_drops_prefix() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let packed = dir.path().join("tail.zx5");
    let prefix = dir.path().join("prefix.bin");
    let unpacked = dir.path().join("tail.bin");
    fs::write(&prefix, &original[..100]).unwrap();

    let output = run(
        dir.path(),
        &["--skip", "100", path_str(&input), path_str(&packed)],
    );
    assert!(output.status.success(), "--skip compress should exit 0");

    // the skipped bytes act as a dictionary on the way back
    let output = run(
        dir.path(),
        &["-d", "-D", path_str(&prefix), path_str(&packed), path_str(&unpacked)],
    );
    assert!(output.status.success());
    assert_eq!(fs::read(&unpacked).unwrap(), &original[100..]);
}

#[test]
fn test_cli_skip_with_decompress_is_bad_usage() {
    let (dir, input) = make_temp_input();
    let output = run(dir.path(), &["-d", "--skip", "4", path_str(&input), "out.bin"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad usage"), "got: {stderr}");
}

// ── 4. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_existing_output() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("level.bin.zx5");
    fs::write(&compressed, b"precious").unwrap();

    let output = run(dir.path(), &[path_str(&input)]);
    assert!(!output.status.success(), "existing output without -f should fail");
    assert_eq!(fs::read(&compressed).unwrap(), b"precious");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already existing output file"), "got: {stderr}");

    let output = run(dir.path(), &["-f", path_str(&input)]);
    assert!(output.status.success(), "-f should overwrite");
    assert_ne!(fs::read(&compressed).unwrap(), b"precious");
}

// ── 5. Timestamps ────────────────────────────────────────────────────────────

#[test]
fn test_cli_preserves_mtime() {
    let (dir, input) = make_temp_input();
    let mtime = FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(&input, mtime).unwrap();

    let compressed = dir.path().join("level.bin.zx5");
    let output = run(dir.path(), &[path_str(&input)]);
    assert!(output.status.success());

    let meta = fs::metadata(&compressed).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), mtime);
}

// ── 6. Batch mode ────────────────────────────────────────────────────────────

#[test]
fn test_cli_multiple_files() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let names: Vec<PathBuf> = (0..4)
        .map(|i| {
            let p = dir.path().join(format!("room{i}.bin"));
            let mut body = original.clone();
            body.push(i as u8);
            fs::write(&p, body).unwrap();
            p
        })
        .collect();

    let mut args = vec!["-m", "-T", "2"];
    args.extend(names.iter().map(|p| path_str(p)));
    let output = run(dir.path(), &args);
    assert!(output.status.success(), "batch compress should exit 0");

    let packed: Vec<PathBuf> = names
        .iter()
        .map(|p| PathBuf::from(format!("{}.zx5", path_str(p))))
        .collect();
    for (p, q) in names.iter().zip(&packed) {
        assert!(q.exists());
        fs::remove_file(p).unwrap();
    }

    let mut args = vec!["-d", "-m"];
    args.extend(packed.iter().map(|p| path_str(p)));
    let output = run(dir.path(), &args);
    assert!(output.status.success(), "batch decompress should exit 0");
    for (i, p) in names.iter().enumerate() {
        let body = fs::read(p).unwrap();
        assert_eq!(body.len(), original.len() + 1);
        assert_eq!(body[original.len()], i as u8);
    }
}

#[test]
fn test_cli_multiple_reports_missed_files() {
    let (dir, input) = make_temp_input();
    let output = run(
        dir.path(),
        &["-m", path_str(&input), "absent1.bin", "absent2.bin"],
    );
    assert_eq!(output.status.code(), Some(2), "exit code counts missed files");
}

// ── 7. Identity and usage ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = run(Path::new("."), &["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "--version stdout should contain the version; got: {stdout}"
    );
}

#[test]
fn test_cli_help() {
    let output = run(Path::new("."), &["--help"]);
    assert!(output.status.success(), "--help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.to_lowercase().contains("usage"), "got: {stdout}");
    assert!(stdout.contains("--backwards"), "got: {stdout}");
}

#[test]
fn test_cli_no_input_is_error() {
    let output = run(Path::new("."), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["/nonexistent_path_abc123_zx5test"]);
    assert!(!output.status.success(), "nonexistent input should exit non-zero");
}

#[test]
fn test_cli_corrupt_input() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("corrupt.zx5");
    fs::write(&corrupt, [0xE5, 0x41]).unwrap();
    let output = run(dir.path(), &["-d", path_str(&corrupt)]);
    assert!(!output.status.success(), "truncated stream should exit non-zero");
    assert!(!dir.path().join("corrupt").exists(), "no output on failure");
}
