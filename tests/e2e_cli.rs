//! CLI end-to-end tests
//!
//! Tests for the motionphoto command-line interface. Metadata writing goes
//! through a fake exiftool script configured via `--config`.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00";
const MP4: &[u8] = b"\x00\x00\x00\x18ftypmp42 not really a video";

/// Get a command for the motionphoto binary
#[allow(deprecated)]
fn motionphoto_cmd() -> Command {
    Command::cargo_bin("motionphoto").unwrap()
}

/// Inputs plus a config pointing at a fake exiftool.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
    log: PathBuf,
}

impl Workspace {
    fn new(exit_code: i32) -> Self {
        let dir = tempdir().unwrap();
        let log = dir.path().join("exiftool.log");
        let tool = dir.path().join("fake-exiftool");
        fs::write(
            &tool,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\necho 'exiftool said no' >&2\nexit {}\n",
                log.display(),
                exit_code
            ),
        )
        .unwrap();
        make_executable(&tool);

        let config = dir.path().join("motionphoto.toml");
        fs::write(
            &config,
            format!("[tools]\nexiftool_path = \"{}\"\n", tool.display()),
        )
        .unwrap();

        fs::write(dir.path().join("image.jpg"), JPEG).unwrap();
        fs::write(dir.path().join("video.mp4"), MP4).unwrap();

        Self { dir, config, log }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn create(&self, motion: &Path) -> Command {
        let mut cmd = motionphoto_cmd();
        cmd.arg("--config")
            .arg(&self.config)
            .arg("-i")
            .arg(self.path("image.jpg"))
            .arg("-v")
            .arg(self.path("video.mp4"))
            .arg("-m")
            .arg(motion);
        cmd
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

#[test]
fn test_cli_no_args_shows_usage() {
    let mut cmd = motionphoto_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = motionphoto_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--timestamp_us"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = motionphoto_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("motionphoto"));
}

#[test]
fn test_cli_batch_help() {
    let mut cmd = motionphoto_cmd();
    cmd.args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pair images and videos"));
}

#[test]
fn test_cli_bad_name() {
    let ws = Workspace::new(0);
    let motion = ws.path("photo.jpg");
    ws.create(&motion)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with 'MV'"));
    assert!(!motion.exists());
}

#[test]
fn test_cli_missing_video() {
    let ws = Workspace::new(0);
    let mut cmd = motionphoto_cmd();
    cmd.arg("-i")
        .arg(ws.path("image.jpg"))
        .arg("-v")
        .arg(ws.path("missing.mp4"))
        .arg("-m")
        .arg(ws.path("MV1.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_image_must_be_jpeg() {
    let ws = Workspace::new(0);
    fs::write(ws.path("image.jpg"), b"\x89PNG\r\n\x1a\n").unwrap();
    ws.create(&ws.path("MV1.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be JPEG"));
}

#[test]
fn test_cli_oversized_video_writes_nothing() {
    let ws = Workspace::new(0);
    fs::File::create(ws.path("video.mp4"))
        .unwrap()
        .set_len(motionphoto_sef::MAX_VIDEO_LEN + 1)
        .unwrap();
    let motion = ws.path("out/MV1.jpg");

    ws.create(&motion)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed 2147483647 bytes"));
    assert!(!motion.exists());
    assert!(!ws.path("out").exists());
    assert!(!ws.log.exists());
}

#[test]
fn test_cli_directory_inputs_rejected() {
    let ws = Workspace::new(0);
    let motion = ws.path("MV1.jpg");

    let mut cmd = motionphoto_cmd();
    cmd.arg("-i")
        .arg(ws.dir.path())
        .arg("-v")
        .arg(ws.path("video.mp4"))
        .arg("-m")
        .arg(&motion)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input image path is not a file"));

    let mut cmd = motionphoto_cmd();
    cmd.arg("-i")
        .arg(ws.path("image.jpg"))
        .arg("-v")
        .arg(ws.dir.path())
        .arg("-m")
        .arg(&motion)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input video path is not a file"));
    assert!(!motion.exists());
}

#[test]
fn test_cli_negative_timestamp_rejected() {
    let ws = Workspace::new(0);
    ws.create(&ws.path("MV1.jpg"))
        .args(["-t_us", "-5"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_cli_create_writes_tags() {
    let ws = Workspace::new(0);
    let motion = ws.path("MV1.jpg");
    ws.create(&motion)
        .args(["-t_us", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created motion photo"));

    let data = fs::read(&motion).unwrap();
    assert!(data.starts_with(JPEG));
    assert!(data.ends_with(b"SEFT"));

    let log = fs::read_to_string(&ws.log).unwrap();
    let calls: Vec<&str> = log.lines().collect();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("-MotionPhoto=1"));
    assert!(calls[0].contains("-MotionPhotoPresentationTimestampUs=1500"));
    assert!(calls[1].contains("-MicroVideo=1"));
    assert!(calls[1].contains("-MicroVideoPresentationTimestampUs=1500"));
}

#[cfg(unix)]
#[test]
fn test_cli_output_exists_hint() {
    let ws = Workspace::new(0);
    let motion = ws.path("MV1.jpg");
    ws.create(&motion).assert().success();
    let first = fs::read(&motion).unwrap();

    ws.create(&motion)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("try using --overwrite"));
    assert_eq!(fs::read(&motion).unwrap(), first);

    ws.create(&motion).arg("--overwrite").assert().success();
    assert_eq!(fs::read(&motion).unwrap(), first);
}

#[cfg(unix)]
#[test]
fn test_cli_exiftool_failure() {
    let ws = Workspace::new(1);
    ws.create(&ws.path("MV1.jpg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exiftool said no"));
}

#[cfg(unix)]
#[test]
fn test_cli_batch() {
    let ws = Workspace::new(0);
    let photos = ws.path("photos");
    fs::create_dir(&photos).unwrap();
    fs::write(photos.join("IMG_1.jpg"), JPEG).unwrap();
    fs::write(photos.join("IMG_1.mp4"), MP4).unwrap();
    fs::write(photos.join("IMG_2.jpg"), JPEG).unwrap();

    let mut cmd = motionphoto_cmd();
    cmd.arg("batch")
        .arg(&photos)
        .arg("--output")
        .arg(ws.path("out"))
        .arg("--config")
        .arg(&ws.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 1 motion photos"))
        .stdout(predicate::str::contains("IMG_2.jpg"));

    assert!(ws.path("out/MVIMG_1.jpg").is_file());
}

#[test]
fn test_cli_validate_config() {
    let ws = Workspace::new(0);
    let mut cmd = motionphoto_cmd();
    cmd.arg("validate")
        .arg(&ws.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_cli_probe_nonexistent_file() {
    let mut cmd = motionphoto_cmd();
    cmd.args(["probe", "/nonexistent/path/MV1.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
