//! End-to-end scenarios for the lane runner driven through its public API.

use lanehop::{Character, DeathCause, Direction, GridCell, MoveOutcome, MoveState};
use rstest::{fixture, rstest};
use test_utils::{FixedObstacles, Harness, Notification};

#[fixture]
fn harness() -> Harness {
    Harness::open(9)
}

#[rstest]
fn fifteen_forward_hops_advance_window(mut harness: Harness) {
    harness.hop_n(Direction::Up, 15);

    let runner = &harness.runner;
    assert_eq!(runner.character().grid_position, GridCell::new(0, 14));
    assert_eq!(runner.score(), 15);
    // The window spans [14 - 20, 14 + 20); lanes below 0 belong to the start
    // region and never exist.
    assert_eq!(runner.terrain().active_range(), Some(0..34));
    assert_eq!(runner.terrain().spawn_location(), 34);
}

#[rstest]
#[case::up(Direction::Up)]
#[case::down(Direction::Down)]
#[case::left(Direction::Left)]
#[case::right(Direction::Right)]
fn move_while_moving_is_a_no_op(mut harness: Harness, #[case] direction: Direction) {
    let first = harness.runner.try_move(Direction::Up).expect("open field");
    assert!(first.is_accepted());
    let before = *harness.runner.character();
    let score = harness.runner.score();

    assert_eq!(harness.runner.try_move(direction), Ok(MoveOutcome::Ignored));
    assert_eq!(harness.runner.character(), &before);
    assert_eq!(harness.runner.score(), score);
}

#[rstest]
#[case::up(Direction::Up)]
#[case::left(Direction::Left)]
fn move_while_dead_is_a_no_op(mut harness: Harness, #[case] direction: Direction) {
    harness.hop(Direction::Up);
    assert!(harness.runner.notify_collision(glam::Vec3::ZERO));
    let before = *harness.runner.character();

    assert_eq!(harness.runner.try_move(direction), Ok(MoveOutcome::Ignored));
    assert_eq!(harness.runner.character(), &before);
    assert_eq!(harness.runner.state(), MoveState::Dead);
}

#[rstest]
fn retreating_past_limit_dies_exactly_once(mut harness: Harness) {
    harness.hop_n(Direction::Up, 14);
    assert_eq!(harness.runner.score(), 14);
    harness.events.clear();

    harness.hop_n(Direction::Down, 9);
    assert_eq!(harness.runner.character().grid_position.y, 4);
    assert_eq!(harness.runner.state(), MoveState::Ready);

    harness.hop(Direction::Down);
    assert_eq!(harness.runner.character().grid_position.y, 3);
    assert_eq!(harness.runner.state(), MoveState::Dead);
    assert_eq!(harness.runner.death_cause(), Some(DeathCause::FellBehind));

    // Later collision reports are ignored.
    harness.runner.notify_collision(glam::Vec3::ZERO);
    harness.hop(Direction::Down);
    assert_eq!(harness.events.hides(), 1);
    let effects = harness.events.death_effects();
    assert_eq!(effects.len(), 1);

    // The contact sits just ahead of where the fatal hop took off.
    let contact = effects.first().expect("one effect").contact_point;
    assert!(contact.x.abs() < 1e-5);
    assert!((contact.z - 4.5).abs() < 1e-5);
}

#[rstest]
fn hidden_precedes_death_effects(mut harness: Harness) {
    harness.hop(Direction::Up);
    harness.events.clear();
    harness.runner.notify_collision(glam::Vec3::new(0.3, 0.2, 0.4));

    let log = harness.events.snapshot();
    assert!(matches!(
        log.as_slice(),
        [Notification::CharacterHidden, Notification::DeathEffects(_)]
    ));
}

#[rstest]
fn score_tracks_furthest_lane(mut harness: Harness) {
    let path = [
        Direction::Up,
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::Up,
        Direction::Right,
        Direction::Up,
    ];
    let mut best = harness.runner.score();
    for direction in path {
        let before = harness.runner.score();
        if let MoveOutcome::Accepted { to, .. } = harness.hop(direction) {
            best = best.max(to.y + 1);
        }
        assert!(harness.runner.score() >= before);
        assert_eq!(harness.runner.score(), best);
    }
    assert_eq!(harness.events.scores(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn obstacles_block_moves_without_side_effects() {
    let placer = FixedObstacles::new().block(0, [0]).block(1, [-1, 1]);
    let mut harness = Harness::new(test_utils::seeded_config(4), placer);

    assert_eq!(harness.hop(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(harness.runner.character(), &Character::at_start());
    assert_eq!(harness.runner.score(), 0);

    assert!(harness.hop(Direction::Right).is_accepted());
    assert!(harness.hop(Direction::Up).is_accepted());
    assert_eq!(harness.hop(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(harness.runner.character().grid_position, GridCell::new(1, 0));
}

#[rstest]
#[case::right(Direction::Right, 5)]
#[case::left(Direction::Left, -5)]
fn lanes_are_walled_at_their_edges(#[case] direction: Direction, #[case] edge: i32) {
    let mut harness = Harness::new(
        test_utils::seeded_config(6),
        lanehop::ScatteredObstacles::new(0.0),
    );
    harness.hop(Direction::Up);

    let accepted = (0..50)
        .filter(|_| harness.hop(direction).is_accepted())
        .count();
    assert_eq!(accepted, 5);
    assert_eq!(harness.runner.character().grid_position, GridCell::new(edge, 0));
    assert_eq!(harness.hop(direction), MoveOutcome::Blocked);
    assert_eq!(harness.runner.state(), MoveState::Ready);
}

#[rstest]
#[case::no_moves(0)]
#[case::after_a_run(25)]
fn reset_reproduces_initial_state(mut harness: Harness, #[case] hops: usize) {
    harness.hop_n(Direction::Up, hops);
    harness.runner.notify_collision(glam::Vec3::ZERO);
    harness.runner.reset();
    let spawn_distance = harness.runner.config().spawn_distance;

    let runner = &harness.runner;
    assert_eq!(runner.character(), &Character::at_start());
    assert_eq!(runner.character().grid_position, GridCell::new(0, -1));
    assert_eq!(runner.score(), 0);
    assert_eq!(runner.state(), MoveState::Ready);
    assert_eq!(runner.terrain().active_range(), Some(0..spawn_distance));
    assert_eq!(runner.terrain().lanes().count(), 20);
    assert_eq!(harness.host.live_lanes(), (0..spawn_distance).collect::<Vec<_>>());
    assert!(harness.host.stray_releases().is_empty());
    assert!(runner.is_character_visible());
}

#[test]
fn same_seed_reproduces_run() {
    let run = || {
        let mut harness = Harness::new(
            test_utils::seeded_config(77),
            lanehop::ScatteredObstacles::new(0.3),
        );
        for direction in [Direction::Up, Direction::Left, Direction::Up, Direction::Up] {
            harness.hop(direction);
        }
        harness
            .runner
            .terrain()
            .lanes()
            .map(|lane| (lane.y, lane.kind, lane.occupied_cells.len()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
