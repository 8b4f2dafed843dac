//! Bevy adapter hosting a [`LaneRunner`] inside an `App`.
//!
//! The plugin stores the runner as a resource and drives it once per frame
//! from Bevy's clocks: scaled [`Time`] animates hops while [`Time<Real>`]
//! drives the camera shake and the post-restart input lock. Input systems,
//! physics and rendering push [`RunnerCommand`]s into [`RunnerCommands`];
//! the plugin applies them before ticking.

use std::sync::{Mutex, PoisonError};

use bevy::prelude::*;
use bevy::time::Real;
use log::{error, info};

use crate::grid::Direction;
use crate::intent::{classify_swipe, InputLock};
use crate::movement::MoveState;
use crate::runner::LaneRunner;

/// The simulation hosted by the app.
#[derive(Resource, Debug)]
pub struct LaneRunnerState(pub LaneRunner);

/// Something the host wants the runner to do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunnerCommand {
    /// A normalized move intent.
    Move(Direction),
    /// A completed touch gesture in screen space, `+y` up the screen.
    /// Classified against the configured swipe threshold.
    Swipe(Vec2),
    /// The character overlapped a hazard at the given point.
    Collision(Vec3),
    /// Start a new level.
    Restart,
}

/// Commands queued for the next update, applied in order.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct RunnerCommands {
    queue: Vec<RunnerCommand>,
}

impl RunnerCommands {
    /// Queues a command.
    pub fn push(&mut self, command: RunnerCommand) {
        self.queue.push(command);
    }

    /// Number of queued commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Runtime behaviour of the adapter.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use lanehop::plugin::LaneRunnerSettings;
///
/// let mut app = App::new();
/// app.insert_resource(LaneRunnerSettings {
///     restart_on_input_when_dead: false,
///     ..LaneRunnerSettings::default()
/// });
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LaneRunnerSettings {
    /// Any move intent received while dead starts a new level, mirroring a
    /// tap-to-restart screen.
    pub restart_on_input_when_dead: bool,
    /// Seconds during which intents are dropped after a restart.
    pub input_lock_duration: f32,
}

impl Default for LaneRunnerSettings {
    fn default() -> Self {
        Self {
            restart_on_input_when_dead: true,
            input_lock_duration: 0.2,
        }
    }
}

/// Post-restart input lock shared between frames.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct RunnerInputLock(pub InputLock);

/// Applies queued commands to the runner.
///
/// Move intents and swipes are dropped while the input lock is engaged. When
/// the character is dead and restart-on-input is enabled, a move intent
/// restarts the level instead of moving.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_runner_commands_system(
    settings: Res<LaneRunnerSettings>,
    mut commands: ResMut<RunnerCommands>,
    mut lock: ResMut<RunnerInputLock>,
    mut state: ResMut<LaneRunnerState>,
) {
    let runner = &mut state.0;
    for command in commands.queue.drain(..) {
        let intent = match command {
            RunnerCommand::Move(direction) => direction,
            RunnerCommand::Swipe(delta) => classify_swipe(delta, runner.config().swipe_threshold),
            RunnerCommand::Collision(contact) => {
                runner.notify_collision(contact);
                continue;
            }
            RunnerCommand::Restart => {
                restart(runner, &mut lock.0, settings.input_lock_duration);
                continue;
            }
        };
        apply_intent(runner, &mut lock.0, &settings, intent);
    }
}

fn apply_intent(
    runner: &mut LaneRunner,
    lock: &mut InputLock,
    settings: &LaneRunnerSettings,
    direction: Direction,
) {
    if lock.is_locked() {
        return;
    }
    if runner.state() == MoveState::Dead {
        if settings.restart_on_input_when_dead && direction != Direction::Zero {
            restart(runner, lock, settings.input_lock_duration);
        }
        return;
    }
    if let Err(e) = runner.try_move(direction) {
        error!("terrain window out of step with the character: {e}");
    }
}

/// Advances the runner and the input lock by one frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn tick_runner_system(
    time: Res<Time>,
    real: Res<Time<Real>>,
    mut lock: ResMut<RunnerInputLock>,
    mut state: ResMut<LaneRunnerState>,
) {
    lock.0.tick(real.delta_secs());
    state.0.tick(time.delta_secs(), real.delta_secs());
}

fn restart(runner: &mut LaneRunner, lock: &mut InputLock, duration: f32) {
    info!("restarting after reaching score {}", runner.score());
    runner.reset();
    lock.engage(duration);
}

/// Plugin hosting a lane runner.
///
/// The runner is moved into the app when the plugin is built, so the plugin
/// can only be added once.
///
/// # Examples
///
/// ```no_run
/// use bevy::prelude::*;
/// use lanehop::{LaneRunner, LaneRunnerPlugin, RunnerConfig};
///
/// let runner = LaneRunner::headless(RunnerConfig::default()).unwrap();
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(LaneRunnerPlugin::new(runner))
///     .run();
/// ```
#[derive(Debug)]
pub struct LaneRunnerPlugin {
    runner: Mutex<Option<LaneRunner>>,
}

impl LaneRunnerPlugin {
    /// Wraps `runner` for installation into an app.
    #[must_use]
    pub const fn new(runner: LaneRunner) -> Self {
        Self {
            runner: Mutex::new(Some(runner)),
        }
    }
}

impl Plugin for LaneRunnerPlugin {
    fn build(&self, app: &mut App) {
        let taken = self
            .runner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(runner) = taken else {
            error!("LaneRunnerPlugin was added more than once; ignoring");
            return;
        };

        // Settings inserted before the plugin win over the runner's config.
        if !app.world().contains_resource::<LaneRunnerSettings>() {
            app.insert_resource(LaneRunnerSettings {
                input_lock_duration: runner.config().input_lock_duration,
                ..LaneRunnerSettings::default()
            });
        }
        app.insert_resource(LaneRunnerState(runner));
        app.init_resource::<RunnerCommands>();
        app.init_resource::<RunnerInputLock>();
        app.add_systems(
            Update,
            (apply_runner_commands_system, tick_runner_system).chain(),
        );
    }
}
