//! Loading run configuration from disk and running with it.

use std::fs;
use std::path::PathBuf;

use lanehop::{ConfigError, Direction, LaneRunner, RunnerConfig};

/// Writes `contents` to a file unique to this test process.
fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lanehop-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("temp dir is writable");
    path
}

#[test]
fn loaded_config_drives_the_runner() {
    let path = write_config(
        "tuned",
        "spawn_distance = 15\nmove_duration = 0.2\nseed = 31\nobstacle_density = 0.0\n",
    );
    let config = RunnerConfig::load(&path).expect("config loads");
    fs::remove_file(&path).ok();

    let mut runner = LaneRunner::headless(config).expect("config is valid");
    assert_eq!(runner.seed(), 31);
    assert_eq!(runner.terrain().active_range(), Some(0..15));

    runner.try_move(Direction::Up).expect("open field");
    runner.tick(0.1, 0.1);
    assert!(runner.character().world_position.y > 0.0, "still mid-hop");
    runner.tick(0.1, 0.1);
    assert_eq!(runner.terrain().active_range(), Some(0..15));
    assert_eq!(runner.character().grid_position.y, 0);
}

#[test]
fn invalid_file_is_rejected_before_running() {
    let path = write_config("short", "spawn_distance = 8\n");
    let result = RunnerConfig::load(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(
        result,
        Err(ConfigError::SpawnDistanceTooShort { value: 8, .. })
    ));
}

#[test]
fn malformed_file_reports_parse_error() {
    let path = write_config("broken", "spawn_distance = \"far\"\n");
    let result = RunnerConfig::load(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
