use pacman_core::entity::mover::Mover;
use pacman_core::map::builder::{TraversalFlags, World};
use pacman_core::map::direction::Direction;
use pacman_core::map::tile::Tile;
use pacman_core::steering::{best_direction, SafeCornerFlight, Steering};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const HUNTING: TraversalFlags = TraversalFlags::GHOST.union(TraversalFlags::ONE_WAY);

#[test]
fn test_equal_distances_prefer_up_left_down_right() {
    let world = World::arcade().unwrap();
    // (6,5) opens in all four directions; a target on the tile itself ties every neighbor
    let tile = Tile::new(6, 5);

    assert_eq!(best_direction(&world, tile, Direction::Right, tile, HUNTING, false), Direction::Up);
    assert_eq!(best_direction(&world, tile, Direction::Down, tile, HUNTING, false), Direction::Left);
    assert_eq!(best_direction(&world, tile, Direction::Up, tile, HUNTING, false), Direction::Up);
}

#[test]
fn test_one_way_tiles_block_hunters_going_up() {
    let world = World::arcade().unwrap();
    let tile = Tile::new(12, 11);
    let above = Tile::new(12, 0);

    assert_eq!(best_direction(&world, tile, Direction::Left, above, HUNTING, false), Direction::Left);
    assert_eq!(best_direction(&world, tile, Direction::Left, above, TraversalFlags::GHOST, false), Direction::Up);
}

#[test]
fn test_portal_round_trip() {
    let world = World::arcade().unwrap();
    let mut mover = Mover::new(Tile::new(3, 14), Direction::Left);

    let mut ticks = 0;
    while mover.tile() != Tile::new(25, 14) && ticks < 100 {
        mover.travel(&world, 1.25, TraversalFlags::PACMAN, None, |_| Direction::Left);
        ticks += 1;
    }
    assert_eq!(mover.tile(), Tile::new(25, 14));
    assert_eq!(mover.move_dir(), Direction::Left);
    assert_that(&ticks).is_less_than(100);

    ticks = 0;
    while mover.tile() != Tile::new(3, 14) && ticks < 100 {
        mover.travel(&world, 1.25, TraversalFlags::PACMAN, None, |_| Direction::Right);
        ticks += 1;
    }
    assert_eq!(mover.tile(), Tile::new(3, 14));
    assert_eq!(mover.move_dir(), Direction::Right);
}

#[test]
fn test_safe_corner_avoids_the_attacker() {
    let world = World::arcade().unwrap();
    let corners = world.corners();
    let flight = SafeCornerFlight::new(false);

    let (safe_point, path) = flight
        .choose_safe_point(&world, Tile::new(13, 11), corners[0], TraversalFlags::GHOST)
        .unwrap();

    assert_that(&corners.contains(&safe_point)).is_true();
    assert_ne!(safe_point, corners[0]);
    assert_eq!(path.first(), Some(&Tile::new(13, 11)));
    assert_eq!(path.last(), Some(&safe_point));
}

#[test]
fn test_random_wander_is_replayable() {
    use pacman_core::entity::ghost::GhostState;
    use pacman_core::events::GameEvent;
    use pacman_core::steering::Steering;

    let mut first = common::Harness::arcade();
    let mut second = common::Harness::arcade();
    let walk = |harness: &mut common::Harness| {
        let mut ghost = harness.ghost(pacman_core::entity::ghost::GhostKind::Inky);
        ghost.set_steering(GhostState::Frightened, Steering::RandomWander);
        ghost.mover_mut().place_at(Tile::new(6, 5), Direction::Right);
        ghost.set_state(GhostState::Scattering);
        ghost.on_event(GameEvent::PacManGainsPower, &mut harness.ctx());
        assert_eq!(ghost.state(), GhostState::Frightened);
        let mut tiles = Vec::new();
        for _ in 0..200 {
            ghost.update(&mut harness.ctx());
            tiles.push(ghost.tile());
        }
        tiles
    };

    assert_eq!(walk(&mut first), walk(&mut second));
}

#[test]
fn test_follow_input_prefers_the_latest_input() {
    let mut harness = common::Harness::arcade();
    let mut mover = Mover::new(Tile::new(6, 5), Direction::Right);
    mover.set_wish_dir(Direction::Down);
    let mut steering = Steering::FollowInput;

    let mut ctx = harness.ctx();
    ctx.input = Some(Direction::Up);
    assert_eq!(steering.steer(&mover, &mut ctx, TraversalFlags::PACMAN), Direction::Up);

    // Without new input the last wish stays in effect
    ctx.input = None;
    assert_eq!(steering.steer(&mover, &mut ctx, TraversalFlags::PACMAN), Direction::Down);
    assert_that(&steering.target()).is_none();
}
