//! Camera framing for the lane runner.
//!
//! The camera follows the character laterally with a dead-zone and a clamped
//! offset, tracks it rigidly in depth with a fixed lag, and shakes briefly
//! when the character dies. The camera's orientation never changes during a
//! run; only its position moves.
//!
//! World convention: `+X` is right, `+Y` is up and `+Z` is forward, away from
//! the start region. A camera with identity rotation looks along `+Z`. This
//! frame is left-handed, whereas Bevy and most `glam` users are right-handed
//! with cameras looking along `-Z`; renderers should go through
//! [`CameraRig::to_right_handed`] rather than use the rig's fields directly.

mod shake;

pub use shake::ScreenShake;

use glam::{Quat, Vec3};
use rand_chacha::ChaCha8Rng;

use crate::config::RunnerConfig;
use crate::vector_math::{flatten_to_ground, project_onto};

/// Position and orientation of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Framed position, persisted between ticks and free of shake.
    pub base_position: Vec3,
    /// Position the camera renders from this tick, including any shake.
    pub position: Vec3,
    /// Fixed orientation of the camera.
    pub rotation: Quat,
}

impl CameraRig {
    /// Places a camera at `position` with the given orientation.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            base_position: position,
            position,
            rotation,
        }
    }

    /// Camera right vector projected onto the ground plane.
    #[must_use]
    pub fn right_axis(&self) -> Vec3 {
        flatten_to_ground(self.rotation * Vec3::X)
    }

    /// Direction the camera looks along.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Camera up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rendered position and orientation mirrored into a right-handed frame
    /// (world `z` negated), where the camera looks along its local `-Z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::{Quat, Vec3};
    /// use lanehop::CameraRig;
    ///
    /// let rig = CameraRig::new(Vec3::new(1.0, 6.0, -6.0), Quat::IDENTITY);
    /// let (position, rotation) = rig.to_right_handed();
    /// assert_eq!(position, Vec3::new(1.0, 6.0, 6.0));
    /// assert_eq!(rotation * Vec3::NEG_Z, Vec3::NEG_Z);
    /// ```
    #[must_use]
    pub fn to_right_handed(&self) -> (Vec3, Quat) {
        let q = self.rotation;
        (
            mirror_z(self.position),
            Quat::from_xyzw(-q.x, -q.y, q.z, q.w),
        )
    }
}

const fn mirror_z(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, -v.z)
}

/// Framing parameters for [`CameraTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingSettings {
    /// Left edge of the lateral dead-zone.
    pub dead_zone_left: f32,
    /// Right edge of the lateral dead-zone.
    pub dead_zone_right: f32,
    /// Smallest lateral offset of the camera.
    pub min_cam_offset: f32,
    /// Largest lateral offset of the camera.
    pub max_cam_offset: f32,
    /// Offset from the character; `z` is the fixed depth lag.
    pub camera_offset: Vec3,
    /// Growth of the forward-offset accumulator per forward move.
    pub forward_follow_strength: f32,
    /// Cap on the forward-offset accumulator.
    pub max_forward_offset: f32,
}

impl From<&RunnerConfig> for FramingSettings {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            dead_zone_left: config.dead_zone_left,
            dead_zone_right: config.dead_zone_right,
            min_cam_offset: config.min_cam_offset,
            max_cam_offset: config.max_cam_offset,
            camera_offset: config.camera_offset,
            forward_follow_strength: config.forward_follow_strength,
            max_forward_offset: config.max_forward_offset,
        }
    }
}

/// Owns the camera rig and updates it once per tick.
#[derive(Debug, Clone)]
pub struct CameraTracker {
    rig: CameraRig,
    settings: FramingSettings,
    forward_offset: f32,
    shake: ScreenShake,
}

impl CameraTracker {
    /// Creates a tracker framing `character`.
    #[must_use]
    pub fn new(
        settings: FramingSettings,
        rotation: Quat,
        shake: ScreenShake,
        character: Vec3,
    ) -> Self {
        let mut tracker = Self {
            rig: CameraRig::new(character + settings.camera_offset, rotation),
            settings,
            forward_offset: 0.0,
            shake,
        };
        tracker.reset(character);
        tracker
    }

    /// Builds a tracker from run configuration, seeding the shake with `rng`.
    #[must_use]
    pub fn from_config(config: &RunnerConfig, rng: ChaCha8Rng, character: Vec3) -> Self {
        Self::new(
            FramingSettings::from(config),
            config.camera_rotation(),
            ScreenShake::new(config.shake_duration, config.shake_magnitude, rng),
            character,
        )
    }

    /// Current rig state.
    #[must_use]
    pub const fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Current value of the forward-offset accumulator.
    #[must_use]
    pub const fn forward_offset(&self) -> f32 {
        self.forward_offset
    }

    /// Returns `true` while the death shake is playing.
    #[must_use]
    pub const fn is_shaking(&self) -> bool {
        self.shake.is_active()
    }

    /// Grows the forward-offset accumulator after a forward move.
    pub fn push_forward(&mut self) {
        self.forward_offset = (self.forward_offset + self.settings.forward_follow_strength)
            .min(self.settings.max_forward_offset);
    }

    /// Starts the death shake. A shake already in progress is not restarted.
    pub fn start_shake(&mut self) -> bool {
        self.shake.start()
    }

    /// Updates the rig for one tick.
    ///
    /// When `frozen` the framing holds its last position; the shake, driven by
    /// `unscaled_delta`, keeps playing either way.
    pub fn tick(&mut self, character: Vec3, frozen: bool, unscaled_delta: f32) {
        if !frozen {
            self.follow(character);
        }
        self.rig.position = self.shake.advance(unscaled_delta, self.rig.base_position);
    }

    /// Resolves the framed position for a character at `character` and
    /// persists it as the new base.
    pub fn follow(&mut self, character: Vec3) {
        let right = self.rig.right_axis();
        let mut position = self.rig.base_position;

        let delta = (character - position).dot(right);
        if delta < self.settings.dead_zone_left {
            position += right * (delta - self.settings.dead_zone_left);
        } else if delta > self.settings.dead_zone_right {
            position += right * (delta - self.settings.dead_zone_right);
        }

        let lateral = position
            .dot(right)
            .clamp(self.settings.min_cam_offset, self.settings.max_cam_offset);
        position = right * lateral
            + project_onto(position, self.rig.forward())
            + project_onto(position, self.rig.up());

        position.z = character.z + self.settings.camera_offset.z;

        self.rig.base_position = position;
    }

    /// Frames a fresh run: offsets the camera from `character`, centres it
    /// laterally on the character and clears the accumulator and shake.
    pub fn reset(&mut self, character: Vec3) {
        let right = self.rig.right_axis();
        let mut position = character + self.settings.camera_offset;
        position += right * (character.dot(right) - position.dot(right));

        self.rig.base_position = position;
        self.rig.position = position;
        self.forward_offset = 0.0;
        self.shake.cancel();
    }
}
