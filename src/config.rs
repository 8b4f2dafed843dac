//! Run configuration.
//!
//! All values are constant for the duration of a run and are supplied when the
//! [`crate::LaneRunner`] is constructed. Defaults match the shipped mobile
//! tuning. Configuration can be loaded from TOML; missing keys
//! fall back to their defaults.
//!
//! ```toml
//! move_duration = 0.1
//! spawn_distance = 20
//! seed = 7
//! camera_offset = [2.0, 6.0, -5.0]
//! ```

use std::fs;
use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::FALL_BEHIND_LIMIT;

/// Errors raised while loading or validating a [`RunnerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text was not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A duration was zero, negative or not finite.
    #[error("{field} must be a positive, finite number of seconds (got {value})")]
    NonPositiveDuration {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// The spawn distance would let the character's own lane be evicted.
    #[error("spawn_distance must exceed the fall-behind limit of {limit} lanes (got {value})")]
    SpawnDistanceTooShort {
        /// Minimum exclusive bound.
        limit: i32,
        /// Value supplied.
        value: i32,
    },
    /// A lower bound exceeded its upper bound.
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    InvertedBounds {
        /// Name of the lower bound field.
        lower: &'static str,
        /// Lower bound value.
        lower_value: f32,
        /// Name of the upper bound field.
        upper: &'static str,
        /// Upper bound value.
        upper_value: f32,
    },
    /// A value fell outside its permitted range.
    #[error("{field} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
        /// Inclusive minimum.
        min: f32,
        /// Inclusive maximum.
        max: f32,
    },
}

/// Tuning values for one run of the simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Seconds taken by one hop between cells.
    pub move_duration: f32,
    /// Lanes kept materialised on either side of the character.
    pub spawn_distance: i32,
    /// Seconds of unscaled time the death shake lasts.
    pub shake_duration: f32,
    /// Radius of the random shake offset.
    pub shake_magnitude: f32,
    /// Left edge of the camera's lateral dead-zone, relative to the camera.
    pub dead_zone_left: f32,
    /// Right edge of the camera's lateral dead-zone, relative to the camera.
    pub dead_zone_right: f32,
    /// Smallest lateral camera offset.
    pub min_cam_offset: f32,
    /// Largest lateral camera offset.
    pub max_cam_offset: f32,
    /// Amount the forward-offset accumulator grows per forward move.
    pub forward_follow_strength: f32,
    /// Cap on the forward-offset accumulator.
    pub max_forward_offset: f32,
    /// Camera offset from the character at the start of a run. The `z`
    /// component is also the fixed depth lag applied every tick.
    pub camera_offset: Vec3,
    /// Downward tilt of the camera in degrees.
    pub camera_pitch_degrees: f32,
    /// Rotation of the camera about the vertical axis in degrees.
    pub camera_yaw_degrees: f32,
    /// Fraction of grass cells filled with obstacles by the default placer.
    pub obstacle_density: f32,
    /// Seed for lane generation and shake jitter. `None` draws a fresh seed.
    pub seed: Option<u64>,
    /// Seconds during which intents are ignored after a restart.
    pub input_lock_duration: f32,
    /// Minimum swipe length, in screen pixels, that counts as a swipe rather
    /// than a tap.
    pub swipe_threshold: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            move_duration: 0.1,
            spawn_distance: 20,
            shake_duration: 0.15,
            shake_magnitude: 0.15,
            dead_zone_left: -0.5,
            dead_zone_right: 0.5,
            min_cam_offset: -3.0,
            max_cam_offset: 6.0,
            forward_follow_strength: 0.15,
            max_forward_offset: 3.0,
            camera_offset: Vec3::new(2.0, 6.0, -5.0),
            camera_pitch_degrees: 50.0,
            camera_yaw_degrees: 0.0,
            obstacle_density: 0.25,
            seed: None,
            input_lock_duration: 0.2,
            swipe_threshold: 60.0,
        }
    }
}

impl RunnerConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, or a
    /// validation error from [`RunnerConfig::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lanehop::RunnerConfig;
    ///
    /// let config = RunnerConfig::from_toml_str("spawn_distance = 30").unwrap();
    /// assert_eq!(config.spawn_distance, 30);
    /// assert_eq!(config.move_duration, RunnerConfig::default().move_duration);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`RunnerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the invariants the simulation relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("move_duration", self.move_duration),
            ("shake_duration", self.shake_duration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { field, value });
            }
        }
        if self.spawn_distance <= FALL_BEHIND_LIMIT {
            return Err(ConfigError::SpawnDistanceTooShort {
                limit: FALL_BEHIND_LIMIT,
                value: self.spawn_distance,
            });
        }
        ordered(
            ("dead_zone_left", self.dead_zone_left),
            ("dead_zone_right", self.dead_zone_right),
        )?;
        ordered(
            ("min_cam_offset", self.min_cam_offset),
            ("max_cam_offset", self.max_cam_offset),
        )?;
        within("obstacle_density", self.obstacle_density, 0.0, 1.0)?;
        within("shake_magnitude", self.shake_magnitude, 0.0, f32::MAX)?;
        within(
            "forward_follow_strength",
            self.forward_follow_strength,
            0.0,
            f32::MAX,
        )?;
        within("max_forward_offset", self.max_forward_offset, 0.0, f32::MAX)?;
        within("input_lock_duration", self.input_lock_duration, 0.0, f32::MAX)?;
        within("swipe_threshold", self.swipe_threshold, 0.0, f32::MAX)?;
        Ok(())
    }

    /// Orientation of the camera derived from the configured pitch and yaw.
    #[must_use]
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.camera_yaw_degrees.to_radians(),
            self.camera_pitch_degrees.to_radians(),
            0.0,
        )
    }
}

fn ordered(lower: (&'static str, f32), upper: (&'static str, f32)) -> Result<(), ConfigError> {
    if lower.1 <= upper.1 {
        Ok(())
    } else {
        Err(ConfigError::InvertedBounds {
            lower: lower.0,
            lower_value: lower.1,
            upper: upper.0,
            upper_value: upper.1,
        })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RunnerConfig::from_toml_str(
            "move_duration = 0.25\ncamera_offset = [1.0, 5.0, -4.0]\nseed = 9",
        )
        .expect("config should parse");
        assert!((config.move_duration - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.camera_offset, Vec3::new(1.0, 5.0, -4.0));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.spawn_distance, 20);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunnerConfig::from_toml_str("spawn_distanse = 20").expect_err("typo");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case::zero_move("move_duration = 0.0")]
    #[case::negative_shake("shake_duration = -1.0")]
    fn non_positive_durations_are_rejected(#[case] text: &str) {
        let err = RunnerConfig::from_toml_str(text).expect_err("invalid duration");
        assert!(matches!(err, ConfigError::NonPositiveDuration { .. }));
    }

    #[rstest]
    #[case::at_limit(FALL_BEHIND_LIMIT)]
    #[case::below_limit(3)]
    fn short_spawn_distance_is_rejected(#[case] distance: i32) {
        let config = RunnerConfig {
            spawn_distance: distance,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnDistanceTooShort { .. })
        ));
    }

    #[test]
    fn inverted_dead_zone_is_rejected() {
        let config = RunnerConfig {
            dead_zone_left: 1.0,
            dead_zone_right: -1.0,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                lower: "dead_zone_left",
                ..
            })
        ));
    }

    #[test]
    fn density_must_be_a_fraction() {
        let config = RunnerConfig {
            obstacle_density: 1.5,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "obstacle_density",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RunnerConfig::load("/nonexistent/lanehop.toml").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/lanehop.toml"));
    }
}
