use assert_cmd::Command;
use tempfile::TempDir;

use geomark::model::io_json::read_project_json;

fn geomark() -> Command {
    let mut cmd = Command::cargo_bin("geomark").unwrap();
    cmd.env_remove("GEOMARK_SETTINGS");
    cmd
}

#[test]
fn runs() {
    geomark().assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = geomark();
    cmd.arg("-V");
    cmd.assert().success().stdout("geomark 0.1.0\n");
}

// Validate subcommand tests

#[test]
fn validate_valid_project_succeeds() {
    let mut cmd = geomark();
    cmd.args(["validate", "tests/fixtures/sample_valid.geomark.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Validation passed"));
}

#[test]
fn validate_invalid_project_fails() {
    let mut cmd = geomark();
    cmd.args(["validate", "tests/fixtures/sample_invalid.geomark.json"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("3 error(s)"))
        .stdout(predicates::str::contains("LatitudeOutOfRange"))
        .stdout(predicates::str::contains("InvalidColor"))
        .stdout(predicates::str::contains("TooFewVertices"));
}

#[test]
fn validate_json_output_format() {
    let mut cmd = geomark();
    cmd.args([
        "validate",
        "tests/fixtures/sample_invalid.geomark.json",
        "--output",
        "json",
    ]);
    let output = cmd.assert().failure().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["error_count"], 3);
    assert_eq!(value["warning_count"], 1);
    assert_eq!(value["issues"][0]["context"]["kind"], "camera");
}

#[test]
fn validate_strict_fails_on_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero_res.json");
    std::fs::write(&path, r#"{"Camera":{"Resolution":0}}"#).unwrap();

    let mut cmd = geomark();
    cmd.arg("validate").arg(&path);
    cmd.assert().success();

    let mut cmd = geomark();
    cmd.arg("validate").arg(&path).arg("--strict");
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("InvalidResolution"));
}

#[test]
fn validate_missing_file_fails() {
    let mut cmd = geomark();
    cmd.args(["validate", "tests/fixtures/does_not_exist.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Error"));
}

// Inspect subcommand tests

#[test]
fn inspect_lists_points_and_areas() {
    let mut cmd = geomark();
    cmd.args(["inspect", "tests/fixtures/sample_valid.geomark.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Points: 2"))
        .stdout(predicates::str::contains("Harbour"))
        .stdout(predicates::str::contains("(unnamed)"))
        .stdout(predicates::str::contains("Triangle (3 points)"));
}

// Editing subcommands

#[test]
fn click_adds_then_removes_point() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");

    let mut cmd = geomark();
    cmd.arg("click")
        .arg(&project)
        .args(["--lat", "-33.86", "--lon", "151.21", "--name", "Sydney"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Added point Sydney"));

    let saved = read_project_json(&project).unwrap();
    assert_eq!(saved.points.len(), 1);
    assert_eq!(saved.points[0].name, "Sydney");
    assert_eq!(saved.points[0].latitude, -33.86);

    let mut cmd = geomark();
    cmd.arg("click")
        .arg(&project)
        .args(["--lat", "-33.86", "--lon", "151.21"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Removed point"));
    assert!(read_project_json(&project).unwrap().points.is_empty());
}

#[test]
fn click_decline_keeps_project_unchanged() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");

    let mut cmd = geomark();
    cmd.arg("click")
        .arg(&project)
        .args(["--lat", "10", "--lon", "10", "--decline"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Cancelled"));
    assert!(read_project_json(&project).unwrap().points.is_empty());
}

#[test]
fn click_outside_map_fails() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");

    let mut cmd = geomark();
    cmd.arg("click")
        .arg(&project)
        .args(["--lat", "88", "--lon", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("outside the map"));
    assert!(!project.exists());
}

#[test]
fn add_area_saves_polygon() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");

    let mut cmd = geomark();
    cmd.arg("add-area").arg(&project).args([
        "--vertex",
        "0,0",
        "--vertex",
        "-1,0",
        "--vertex",
        "0,-1",
        "--name",
        "Corner",
        "--fill",
        "#4000FF00",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Added area Corner (3 points)"));

    let saved = read_project_json(&project).unwrap();
    assert_eq!(saved.areas.len(), 1);
    assert_eq!(saved.areas[0].fill_color, "#4000FF00");
    assert_eq!(saved.areas[0].points[1].latitude, -1.0);
}

#[test]
fn add_area_with_two_vertices_fails() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");

    let mut cmd = geomark();
    cmd.arg("add-area")
        .arg(&project)
        .args(["--vertex", "0,0", "--vertex", "1,1"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("at least 3 vertices"));
    assert!(!project.exists());
}

#[test]
fn remove_area_by_index() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");
    std::fs::copy("tests/fixtures/sample_valid.geomark.json", &project).unwrap();

    let mut cmd = geomark();
    cmd.arg("remove-area").arg(&project).arg("0");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Removed area Triangle"));

    let saved = read_project_json(&project).unwrap();
    assert!(saved.areas.is_empty());
    assert_eq!(saved.points.len(), 2);
}

#[test]
fn remove_point_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");
    std::fs::copy("tests/fixtures/sample_valid.geomark.json", &project).unwrap();

    let mut cmd = geomark();
    cmd.arg("remove-point").arg(&project).arg("5");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("No point at index 5"));
}

// Commands that write back must not lose data they could not read

const TRAILING_COMMA: &str = r##"{"Points":[
    {"Longitude":1.0,"Latitude":1.0,"Name":"keep1","Color":"#FFFF0000","Size":1.0},
    {"Longitude":2.0,"Latitude":2.0,"Name":"keep2","Color":"#FFFF0000","Size":1.0},
]}"##;

const ONE_BAD_COLOR: &str = r##"{"Points":[
    {"Longitude":1.0,"Latitude":1.0,"Name":"a","Color":"#FFFF0000","Size":1.0},
    {"Longitude":2.0,"Latitude":2.0,"Name":"b","Color":"#12345","Size":1.0}
]}"##;

#[test]
fn click_on_unparseable_project_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("p.json");
    std::fs::write(&project, TRAILING_COMMA).unwrap();

    let mut cmd = geomark();
    cmd.arg("click").arg(&project).args(["--lat", "50", "--lon", "50"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse project JSON"));

    assert_eq!(std::fs::read_to_string(&project).unwrap(), TRAILING_COMMA);
}

#[test]
fn remove_point_refuses_to_drop_invalid_entries() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("p.json");
    std::fs::write(&project, ONE_BAD_COLOR).unwrap();

    let mut cmd = geomark();
    cmd.arg("remove-point").arg(&project).arg("0");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("1 invalid entries"))
        .stderr(predicates::str::contains("--force"));

    let text = std::fs::read_to_string(&project).unwrap();
    assert_eq!(text, ONE_BAD_COLOR);
    assert!(text.contains("\"b\""));
}

#[test]
fn force_drops_invalid_entries_and_saves() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("p.json");
    std::fs::write(&project, ONE_BAD_COLOR).unwrap();

    let mut cmd = geomark();
    cmd.arg("remove-point").arg(&project).args(["0", "--force"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Removed point a"))
        .stderr(predicates::str::contains("dropping 1 invalid entry"));

    assert!(read_project_json(&project).unwrap().points.is_empty());
}

#[test]
fn frame_area_updates_saved_camera() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("map.json");
    std::fs::copy("tests/fixtures/sample_valid.geomark.json", &project).unwrap();

    let mut cmd = geomark();
    cmd.arg("frame").arg(&project).args(["--area", "0"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Camera:"));

    let camera = read_project_json(&project).unwrap().camera;
    // 1 degree box centred near (0.5, 0.5)
    assert!((camera.center_x - 55_659.7).abs() < 1.0);
    assert!(camera.resolution < 1200.0);
}

#[test]
fn frame_requires_a_target() {
    let mut cmd = geomark();
    cmd.args(["frame", "tests/fixtures/sample_valid.geomark.json"]);
    cmd.assert().failure();
}

// Theme subcommand

#[test]
fn theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("nested").join("settings.json");

    let mut cmd = geomark();
    cmd.arg("--settings").arg(&settings).args(["theme"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Theme: Light"));
    assert!(!settings.exists());

    let mut cmd = geomark();
    cmd.env("GEOMARK_SETTINGS", &settings).args(["theme", "toggle"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Theme: Dark"));

    let saved = std::fs::read_to_string(&settings).unwrap();
    assert!(saved.contains("\"Theme\": \"Dark\""));
}
