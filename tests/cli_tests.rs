//! End-to-end tests for the `clipper` binary

use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn clipper(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clipper").unwrap();
    cmd.current_dir(work_dir)
        .env_remove("RUST_LOG")
        .env_remove("CLIPBATCH_FFMPEG")
        .env_remove("CLIPBATCH_BACKUP")
        .env_remove("CLIPBATCH_LOG_LEVEL")
        .env_remove("CLIPBATCH_LOG_FORMAT");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn read_manifest(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_lists_commands_and_example_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output = clipper(temp_dir.path()).arg("--help").output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["add", "clip", "validate"] {
        assert!(text.contains(command), "missing {} in help", command);
    }
    assert!(text.contains("Example manifest file"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    clipper(temp_dir.path()).assert().failure();
}

#[test]
fn test_add_creates_manifest_and_appends() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("clips.json");

    for (start, end) in [("00:05:00", "00:06:20"), ("00:10:00", "00:11:00")] {
        clipper(temp_dir.path())
            .args(["add", "--manifest"])
            .arg(&manifest)
            .args(["--filename", "videoA.mp4", "--start", start, "--end", end])
            .assert()
            .success();
    }

    let json = read_manifest(&manifest);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["original"], "videoA.mp4");
    let clips = entries[0]["clips"].as_array().unwrap();
    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0]["start"], "00:05:00");
    assert_eq!(clips[1]["end"], "00:11:00");
    assert!(clips[0].get("sha256_checksum").is_none());

    // Second add rewrote an existing manifest, so a backup sits next to it
    assert!(temp_dir.path().join("clips.json.backup").exists());
}

#[test]
fn test_add_rejects_bad_timecode_without_touching_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("clips.json");
    std::fs::write(&manifest, "[]\n").unwrap();

    clipper(temp_dir.path())
        .args(["add", "--manifest"])
        .arg(&manifest)
        .args(["--filename", "videoA.mp4", "--start", "5:00", "--end", "00:06:20"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "[]\n");
}

#[test]
fn test_validate_exit_codes() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("originals");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::write(input_dir.join("videoA.mp4"), b"video").unwrap();

    let manifest = temp_dir.path().join("clips.json");
    std::fs::write(
        &manifest,
        r#"[{ "original": "videoA.mp4", "clips": [{ "start": "00:00:01", "end": "00:00:02" }] }]"#,
    )
    .unwrap();

    let output = clipper(temp_dir.path())
        .args(["validate", "--manifest"])
        .arg(&manifest)
        .arg("--input-dir")
        .arg(&input_dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("OK"));

    std::fs::remove_file(input_dir.join("videoA.mp4")).unwrap();
    let output = clipper(temp_dir.path())
        .args(["validate", "--manifest"])
        .arg(&manifest)
        .arg("--input-dir")
        .arg(&input_dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stdout(&output).contains("INVALID"));
}

#[test]
fn test_validate_malformed_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("clips.json");
    std::fs::write(&manifest, "{ not json").unwrap();

    let output = clipper(temp_dir.path())
        .args(["validate", "--manifest"])
        .arg(&manifest)
        .args(["--input-dir", "."])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse"));
}

#[test]
fn test_clip_with_missing_transcoder_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("originals");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::write(input_dir.join("videoA.mp4"), b"video").unwrap();

    let manifest = temp_dir.path().join("clips.json");
    let content =
        r#"[{ "original": "videoA.mp4", "clips": [{ "start": "00:00:01", "end": "00:00:02" }] }]"#;
    std::fs::write(&manifest, content).unwrap();

    clipper(temp_dir.path())
        .args(["--ffmpeg", "/nonexistent/ffmpeg-binary", "clip", "--manifest"])
        .arg(&manifest)
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(temp_dir.path().join("clips"))
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), content);
}

#[cfg(unix)]
mod with_fake_ffmpeg {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Answers `-version` and copies the `-i` input to the last argument
    const FAKE_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version fake"
    exit 0
fi
input=""
prev=""
last=""
for arg in "$@"; do
    if [ "$prev" = "-i" ]; then
        input="$arg"
    fi
    prev="$arg"
    last="$arg"
done
cp "$input" "$last"
"#;

    #[test]
    fn test_clip_then_validate_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let ffmpeg = temp_dir.path().join("fake-ffmpeg");
        std::fs::write(&ffmpeg, FAKE_FFMPEG).unwrap();
        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

        let input_dir = temp_dir.path().join("originals");
        let output_dir = temp_dir.path().join("clips");
        std::fs::create_dir_all(&input_dir).unwrap();
        std::fs::write(input_dir.join("videoA.mp4"), b"pretend video").unwrap();

        let manifest = temp_dir.path().join("clips.json");
        clipper(temp_dir.path())
            .args(["add", "--manifest"])
            .arg(&manifest)
            .args(["--filename", "videoA.mp4", "--start", "00:05:00", "--end", "00:06:20"])
            .assert()
            .success();

        let output = clipper(temp_dir.path())
            .arg("--ffmpeg")
            .arg(&ffmpeg)
            .args(["clip", "--no-backup", "--manifest"])
            .arg(&manifest)
            .arg("--input-dir")
            .arg(&input_dir)
            .arg("--output-dir")
            .arg(&output_dir)
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", stdout(&output));
        assert!(stdout(&output).contains("generated"));

        let clip = output_dir.join("videoA_0.mp4");
        assert_eq!(std::fs::read(&clip).unwrap(), b"pretend video");
        let checksum = read_manifest(&manifest)[0]["clips"][0]["sha256_checksum"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(checksum.len(), 64);

        let output = clipper(temp_dir.path())
            .args(["validate", "--manifest"])
            .arg(&manifest)
            .arg("--input-dir")
            .arg(&input_dir)
            .arg("--output-dir")
            .arg(&output_dir)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(stdout(&output).contains("PASS"));

        std::fs::write(&clip, b"tampered").unwrap();
        let output = clipper(temp_dir.path())
            .args(["validate", "--manifest"])
            .arg(&manifest)
            .arg("--input-dir")
            .arg(&input_dir)
            .arg("--output-dir")
            .arg(&output_dir)
            .output()
            .unwrap();
        assert!(!output.status.success());
        assert!(stdout(&output).contains("FAIL"));
        assert_eq!(std::fs::read(&clip).unwrap(), b"tampered");
    }
}
