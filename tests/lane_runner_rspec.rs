//! Behavioural test: a run from the start region to death and back.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lanehop::{Character, DeathCause, Direction, MoveState};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::Harness;

/// Shared runner for the scenarios below.
#[derive(Debug, Clone)]
struct RunFixture {
    harness: Arc<Mutex<Harness>>,
}

impl RunFixture {
    fn bootstrap() -> Self {
        Self {
            harness: Arc::new(Mutex::new(Harness::open(2024))),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Harness> {
        self.harness.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new level and forgets earlier notifications.
    fn fresh_level(&self) {
        let mut harness = self.guard();
        harness.runner.reset();
        harness.events.clear();
    }

    fn hop_n(&self, direction: Direction, count: usize) {
        self.guard().hop_n(direction, count);
    }
}

fn forward_progress(scenario: &mut Scenario<RunFixture>) {
    scenario.when("the character hops forward five times", |ctx| {
        ctx.before_each(|state| {
            state.fresh_level();
            state.hop_n(Direction::Up, 5);
        });

        ctx.then("the score is five", |state| {
            assert_eq!(state.guard().runner.score(), 5);
        });

        ctx.then("the character stands on lane four", |state| {
            assert_eq!(state.guard().runner.character().grid_position.y, 4);
        });

        ctx.then("lanes are held twenty ahead of the character", |state| {
            assert_eq!(state.guard().runner.terrain().active_range(), Some(0..24));
        });
    });
}

fn falling_behind(scenario: &mut Scenario<RunFixture>) {
    scenario.when("the character retreats eleven lanes from its best", |ctx| {
        ctx.before_each(|state| {
            state.fresh_level();
            state.hop_n(Direction::Up, 14);
            state.hop_n(Direction::Down, 10);
        });

        ctx.then("the character is dead", |state| {
            let harness = state.guard();
            assert_eq!(harness.runner.state(), MoveState::Dead);
            assert_eq!(harness.runner.death_cause(), Some(DeathCause::FellBehind));
        });

        ctx.then("one death effect was requested", |state| {
            let harness = state.guard();
            assert_eq!(harness.events.hides(), 1);
            assert_eq!(harness.events.death_effects().len(), 1);
        });

        ctx.then("further intents are ignored", |state| {
            let mut harness = state.guard();
            let before = *harness.runner.character();
            harness.hop(Direction::Up);
            assert_eq!(harness.runner.character(), &before);
        });
    });
}

fn collision_mid_hop(scenario: &mut Scenario<RunFixture>) {
    scenario.when("a vehicle hits the character mid-hop", |ctx| {
        ctx.before_each(|state| {
            state.fresh_level();
            let mut harness = state.guard();
            harness.hop(Direction::Up);
            harness
                .runner
                .try_move(Direction::Up)
                .unwrap_or_else(|e| panic!("terrain consistency error: {e}"));
            let contact = harness.runner.character().world_position;
            harness.runner.notify_collision(contact);
        });

        ctx.then("the hop lands but the character stays dead", |state| {
            let mut harness = state.guard();
            harness.runner.tick(0.1, 0.1);
            assert!(harness.runner.character().world_position.z > 0.99);
            assert_eq!(harness.runner.state(), MoveState::Dead);
        });

        ctx.then("the camera shakes", |state| {
            assert!(state.guard().runner.camera().is_shaking());
        });

        ctx.then("resetting restores a fresh run", |state| {
            let mut harness = state.guard();
            harness.runner.reset();
            assert_eq!(harness.runner.character(), &Character::at_start());
            assert_eq!(harness.runner.score(), 0);
            assert!(!harness.runner.camera().is_shaking());
        });
    });
}

#[test]
fn lane_runner_behaviour() {
    let fixture = RunFixture::bootstrap();

    run_serial(&rspec::given(
        "a lane runner over open terrain",
        fixture,
        |scenario: &mut Scenario<RunFixture>| {
            forward_progress(scenario);
            falling_behind(scenario);
            collision_mid_hop(scenario);
        },
    ));
}
