use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const STROKES: &str = r#"[
  {
    "color": "black",
    "dotSize": 0,
    "minWidth": 0.5,
    "maxWidth": 2.5,
    "velocityFilterWeight": 0.7,
    "points": [
      {"x": 20, "y": 40, "time": 0, "pressure": 0.5},
      {"x": 60, "y": 70, "time": 20, "pressure": 0.5},
      {"x": 110, "y": 60, "time": 40, "pressure": 0.5},
      {"x": 160, "y": 90, "time": 60, "pressure": 0.5}
    ]
  },
  {
    "penColor": "red",
    "minWidth": 1,
    "maxWidth": 3,
    "velocityFilterWeight": 0.7,
    "points": [{"x": 240, "y": 30, "time": 500}]
  }
]"#;

fn inkpad_cmd() -> Command {
    Command::cargo_bin("inkpad").expect("binary exists")
}

/// Writes the sample strokes and an empty config home into a temp dir.
fn fixture() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("strokes.json");
    std::fs::write(&input, STROKES).unwrap();
    (temp, input)
}

#[test]
fn help_prints_usage() {
    inkpad_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replay and export captured signature strokes",
        ));
}

#[test]
fn subcommand_is_required() {
    inkpad_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn info_counts_groups_and_points() {
    let (temp, input) = fixture();
    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("groups: 2"))
        .stdout(predicate::str::contains("points: 5"))
        .stdout(predicate::str::contains("color red"));
}

#[test]
fn render_svg_prints_data_url() {
    let (temp, input) = fixture();
    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["render", "--format", "svg"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/svg+xml;base64,"));
}

#[test]
fn render_png_writes_file() {
    let (temp, input) = fixture();
    let output = temp.path().join("signature.png");
    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("render")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--width", "400", "--height", "200", "--ratio", "2"])
        .assert()
        .success();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn render_svg_file_uses_background_from_config() {
    let (temp, input) = fixture();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[pad]\nbackground_color = \"#fcc\"\n").unwrap();
    let output = temp.path().join("signature.svg");

    inkpad_cmd()
        .arg("--config")
        .arg(&config)
        .args(["render", "--format", "svg", "--background"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r##"fill="#fcc""##));
    assert!(svg.contains(r#"fill="red""#));
}

#[test]
fn missing_input_fails() {
    let temp = TempDir::new().unwrap();
    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["render", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn malformed_strokes_fail() {
    let (temp, input) = fixture();
    std::fs::write(&input, "{\"not\": \"groups\"}").unwrap();
    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("render")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load strokes"));
}

#[test]
fn invalid_config_is_reported() {
    let (temp, input) = fixture();
    let config_dir = temp.path().join("inkpad");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[pad\n").unwrap();

    inkpad_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("render")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn schema_dump_describes_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pad\""))
        .stdout(predicate::str::contains("velocity_filter_weight"));
}
