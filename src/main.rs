//! Headless driver for the lane runner.
//!
//! Runs the simulation inside a minimal Bevy app on a fixed frame clock with
//! a random autopilot standing in for the player, then logs how the run went.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use lanehop::logging::init_with_filter;
use lanehop::plugin::apply_runner_commands_system;
use lanehop::{
    init_logging, Direction, LaneKind, LaneRunner, LaneRunnerPlugin, LaneRunnerState, MoveState,
    RunnerCommand, RunnerCommands, RunnerConfig,
};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Simulate an endless lane-crossing run without rendering
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Explicit log filter such as `lanehop=debug`; replaces `--verbose`
    #[arg(long)]
    log_filter: Option<String>,
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for terrain, shake and autopilot; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
}

/// Random player: mostly hops forward and occasionally meets a vehicle on
/// road lanes.
#[derive(Resource)]
struct Autopilot {
    rng: ChaCha8Rng,
    hazard_chance: f32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(2);
        Self {
            rng,
            hazard_chance: 0.05,
        }
    }

    fn next_command(&mut self, runner: &LaneRunner) -> RunnerCommand {
        let character = runner.character();
        let on_road = runner
            .terrain()
            .lane(character.grid_position.y)
            .is_some_and(|lane| lane.kind == LaneKind::Road);
        if on_road && self.rng.gen::<f32>() < self.hazard_chance {
            return RunnerCommand::Collision(character.world_position + Vec3::new(0.0, 0.2, 0.0));
        }

        let roll = self.rng.gen::<f32>();
        let direction = if roll < 0.7 {
            Direction::Up
        } else if roll < 0.8 {
            Direction::Left
        } else if roll < 0.9 {
            Direction::Right
        } else {
            Direction::Down
        };
        RunnerCommand::Move(direction)
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn autopilot_system(
    mut pilot: ResMut<Autopilot>,
    state: Res<LaneRunnerState>,
    mut commands: ResMut<RunnerCommands>,
) {
    let runner = &state.0;
    match runner.state() {
        MoveState::Moving => {}
        MoveState::Dead => commands.push(RunnerCommand::Move(Direction::Up)),
        MoveState::Ready => commands.push(pilot.next_command(runner)),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.log_filter
        .as_deref()
        .map_or_else(|| init_logging(args.verbose), init_with_filter);

    let mut config = args
        .config
        .as_deref()
        .map(|path| {
            RunnerConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))
        })
        .transpose()?
        .unwrap_or_default();
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let runner = LaneRunner::headless(config).context("building lane runner")?;
    let seed = runner.seed();
    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .insert_resource(Autopilot::new(seed))
        .add_plugins(LaneRunnerPlugin::new(runner))
        .add_systems(
            Update,
            autopilot_system.before(apply_runner_commands_system),
        );

    let mut best = 0;
    let mut deaths = 0_u32;
    let mut previous = MoveState::Ready;
    for _ in 0..args.frames {
        app.update();
        let runner = &app.world().resource::<LaneRunnerState>().0;
        best = best.max(runner.score());
        if runner.state() == MoveState::Dead && previous != MoveState::Dead {
            deaths += 1;
        }
        previous = runner.state();
    }

    let runner = &app.world().resource::<LaneRunnerState>().0;
    info!(
        "seed {seed}: {} frames, best score {best}, {deaths} deaths, finished at {:?} with score {}",
        args.frames,
        runner.character().grid_position,
        runner.score()
    );
    Ok(())
}
