//! The arcade's target-tile direction algorithm.

use smallvec::SmallVec;

use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// Picks the direction that brings an actor on `tile`, heading `move_dir`,
/// closest to `target`.
///
/// Turning around is never a candidate. Neighbors are compared by squared
/// euclidean distance to the target; ties go to the earlier direction in
/// Up, Left, Down, Right order. With no legal candidate the actor keeps
/// `move_dir`, unless `allow_reverse` is set and reversing is the only way out.
pub fn best_direction(
    world: &World,
    tile: Tile,
    move_dir: Direction,
    target: Tile,
    flags: TraversalFlags,
    allow_reverse: bool,
) -> Direction {
    let reverse = move_dir.opposite();
    let mut candidates: SmallVec<[(i32, Direction); 4]> = Direction::DIRECTIONS
        .into_iter()
        .filter(|&dir| dir != reverse)
        .filter(|&dir| world.can_move(tile, dir, flags))
        .map(|dir| (world.neighbor(tile, dir).distance_squared(target), dir))
        .collect();

    // Stable sort on the distance alone keeps the priority order for ties
    candidates.sort_by_key(|&(distance, _)| distance);

    match candidates.first() {
        Some(&(_, dir)) => dir,
        None if allow_reverse && world.can_move(tile, reverse, flags) => reverse,
        None => move_dir,
    }
}

/// Replays [`best_direction`] along a hypothetical walk without moving anyone.
///
/// The returned path starts at `tile` and ends at the target, before the walk
/// would leave the board, before it would revisit a tile, or where it gets stuck.
pub fn preview_path(world: &World, tile: Tile, move_dir: Direction, target: Tile, flags: TraversalFlags) -> Vec<Tile> {
    let mut path = vec![tile];
    let mut current = tile;
    let mut dir = move_dir;

    while current != target {
        let next_dir = best_direction(world, current, dir, target, flags, false);
        if !world.can_move(current, next_dir, flags) {
            break;
        }
        let next = world.neighbor(current, next_dir);
        if !world.in_bounds(next) || path.contains(&next) {
            break;
        }
        path.push(next);
        current = next;
        dir = next_dir;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::builder::MazeLayout;

    // A plus-shaped crossing at (3,3), every arm two tiles long
    const CROSS: [&str; 7] = [
        "#######", //
        "###.###", //
        "###.###", //
        "#..P..#", //
        "###.###", //
        "###.###", //
        "#######",
    ];

    fn world() -> World {
        World::new(MazeLayout {
            board: &CROSS,
            beds: &[],
            one_way_tiles: &[],
            bonus_tile: Tile::new(3, 3),
        })
        .unwrap()
    }

    const FLAGS: TraversalFlags = TraversalFlags::GHOST;

    #[test]
    fn test_closest_neighbor_wins() {
        let world = world();
        let center = Tile::new(3, 3);
        assert_eq!(best_direction(&world, center, Direction::Up, Tile::new(3, 0), FLAGS, false), Direction::Up);
        assert_eq!(best_direction(&world, center, Direction::Up, Tile::new(6, 3), FLAGS, false), Direction::Right);
        assert_eq!(best_direction(&world, center, Direction::Left, Tile::new(3, 6), FLAGS, false), Direction::Down);
    }

    #[test]
    fn test_ties_follow_priority_order() {
        let world = world();
        let center = Tile::new(3, 3);
        // The target is the crossing itself: every neighbor is equally far
        assert_eq!(best_direction(&world, center, Direction::Up, center, FLAGS, false), Direction::Up);
        // Up excluded as the reverse of Down
        assert_eq!(best_direction(&world, center, Direction::Down, center, FLAGS, false), Direction::Left);
        // Diagonal target: Up and Right tie, Up wins
        assert_eq!(best_direction(&world, center, Direction::Right, Tile::new(5, 1), FLAGS, false), Direction::Up);
        // Diagonal target: Down and Right tie, Down wins
        assert_eq!(best_direction(&world, center, Direction::Right, Tile::new(5, 5), FLAGS, false), Direction::Down);
    }

    #[test]
    fn test_never_reverses() {
        let world = world();
        let center = Tile::new(3, 3);
        // The target is straight behind, yet the reverse is not taken
        let dir = best_direction(&world, center, Direction::Right, Tile::new(0, 3), FLAGS, false);
        assert_ne!(dir, Direction::Left);
        assert_eq!(dir, Direction::Up);
    }

    #[test]
    fn test_dead_end() {
        let world = world();
        let end = Tile::new(1, 3);
        assert_eq!(best_direction(&world, end, Direction::Left, Tile::new(6, 3), FLAGS, false), Direction::Left);
        assert_eq!(best_direction(&world, end, Direction::Left, Tile::new(6, 3), FLAGS, true), Direction::Right);
    }

    #[test]
    fn test_preview_path_reaches_target() {
        let world = world();
        let path = preview_path(&world, Tile::new(1, 3), Direction::Right, Tile::new(3, 1), FLAGS);
        assert_eq!(path, vec![Tile::new(1, 3), Tile::new(2, 3), Tile::new(3, 3), Tile::new(3, 2), Tile::new(3, 1)]);
    }

    #[test]
    fn test_preview_path_stops_when_stuck() {
        let world = world();
        // The target lies off the board above the upper arm
        let path = preview_path(&world, Tile::new(3, 3), Direction::Up, Tile::new(3, -5), FLAGS);
        assert_eq!(path, vec![Tile::new(3, 3), Tile::new(3, 2), Tile::new(3, 1)]);
    }
}
