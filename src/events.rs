//! One-way notifications emitted by the simulation core.
//!
//! Rendering, audio, particles and UI text live outside the core. They observe
//! the simulation through a [`RunnerEvents`] implementation injected into the
//! [`crate::LaneRunner`]; no notification returns a value.

use glam::Vec3;
use log::{debug, info};

use crate::terrain::Lane;

/// Where and how the death effect should play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEffect {
    /// Point of contact between the character and whatever killed it.
    pub contact_point: Vec3,
    /// Unit direction the particles should face: from the contact point
    /// towards a point one unit above the character.
    pub emit_direction: Vec3,
}

impl DeathEffect {
    /// Builds the effect for a character standing at `character` that was hit
    /// at `contact_point`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use lanehop::events::DeathEffect;
    ///
    /// let effect = DeathEffect::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
    /// assert!((effect.emit_direction.length() - 1.0).abs() < 1e-6);
    /// assert!(effect.emit_direction.y > 0.0);
    /// ```
    #[must_use]
    pub fn new(contact_point: Vec3, character: Vec3) -> Self {
        let emit_direction = (character + Vec3::Y - contact_point).normalize_or(Vec3::Y);
        Self {
            contact_point,
            emit_direction,
        }
    }
}

/// Receiver of simulation notifications.
#[cfg_attr(test, mockall::automock)]
pub trait RunnerEvents: Send + Sync {
    /// The character model should be hidden.
    fn on_character_hidden(&mut self);

    /// Death particles and sound should play.
    fn on_death_effects_requested(&mut self, effect: DeathEffect);

    /// The displayed score changed.
    fn on_score_changed(&mut self, score: i32);

    /// A lane entered the active window.
    fn on_lane_spawned(&mut self, lane: &Lane);

    /// A lane left the active window and its handle was released.
    fn on_lane_evicted(&mut self, lane: &Lane);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvents;

impl RunnerEvents for NullEvents {
    fn on_character_hidden(&mut self) {}

    fn on_death_effects_requested(&mut self, _effect: DeathEffect) {}

    fn on_score_changed(&mut self, _score: i32) {}

    fn on_lane_spawned(&mut self, _lane: &Lane) {}

    fn on_lane_evicted(&mut self, _lane: &Lane) {}
}

/// Writes every notification to the log.
///
/// Gameplay milestones go to `info`; lane churn goes to `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEvents;

impl RunnerEvents for LogEvents {
    fn on_character_hidden(&mut self) {
        debug!("character hidden");
    }

    fn on_death_effects_requested(&mut self, effect: DeathEffect) {
        info!(
            "death effects at {:?} facing {:?}",
            effect.contact_point, effect.emit_direction
        );
    }

    fn on_score_changed(&mut self, score: i32) {
        info!("score {score}");
    }

    fn on_lane_spawned(&mut self, lane: &Lane) {
        debug!(
            "lane {} ({:?}) in view with {} obstacles",
            lane.y,
            lane.kind,
            lane.occupied_cells.len()
        );
    }

    fn on_lane_evicted(&mut self, lane: &Lane) {
        debug!("lane {} out of view", lane.y);
    }
}
