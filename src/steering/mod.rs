//! Steering strategies: how an actor picks its next direction.
//!
//! Every strategy is a variant of [`Steering`] and is driven through the single
//! [`Steering::steer`] entry point, which the actor calls whenever it stands on
//! a tile center (or when steering was forced).

pub mod flee;
pub mod path;
pub mod target;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::ghost::GhostKind;
use crate::entity::mover::{Mover, BOB_LIMIT};
use crate::game::context::TickContext;
use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

pub use flee::SafeCornerFlight;
pub use path::{FixedPath, PathFollower};
pub use target::{best_direction, preview_path};

/// Where a target-seeking strategy wants to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Tile(Tile),
    PacMan,
    /// The chase target of a ghost personality.
    Chase(GhostKind),
    /// The scatter corner of a ghost; Blinky keeps chasing there as Elroy.
    Scatter(GhostKind),
    /// The closest tile still holding food.
    NearestFood,
}

impl Goal {
    pub fn resolve(&self, mover: &Mover, ctx: &TickContext<'_>, flags: TraversalFlags) -> Option<Tile> {
        match *self {
            Goal::Tile(tile) => Some(tile),
            Goal::PacMan => Some(ctx.pacman_tile),
            Goal::Chase(kind) => Some(kind.chase_target(mover.tile(), ctx.pacman_tile, ctx.pacman_dir, ctx.blinky_tile)),
            Goal::Scatter(GhostKind::Blinky) if ctx.elroy > 0 => Some(ctx.pacman_tile),
            Goal::Scatter(kind) => Some(kind.scatter_target()),
            Goal::NearestFood => path::path_to_nearest_food(ctx.world, mover.tile(), flags).and_then(|p| p.last().copied()),
        }
    }
}

/// The walk between a bed and the tile outside the house door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseTransit {
    /// First tile outside the door.
    pub entry: Tile,
    /// The door tile ghosts pass through.
    pub door: Tile,
    /// Direction from the room through the door to the outside.
    pub exit_dir: Direction,
    /// Where the walk inside ends.
    pub bed: Tile,
}

impl HouseTransit {
    /// Describes the transit between `bed` and the main door of the house it belongs to.
    pub fn new(world: &World, bed: Tile) -> Option<Self> {
        let house = world.houses().iter().find(|house| house.beds.iter().any(|b| b.tile == bed))?;
        let door = house.doors.first()?;
        Some(Self {
            entry: door.entry(),
            door: door.tiles[0],
            exit_dir: door.exit_dir,
            bed,
        })
    }

    /// Line up with the door, then walk out through it.
    pub fn leave_direction(&self, tile: Tile) -> Option<Direction> {
        if tile == self.entry {
            return None;
        }
        let misaligned = if self.exit_dir.is_horizontal() {
            tile.row != self.door.row
        } else {
            tile.col != self.door.col
        };
        if misaligned {
            let aim = if self.exit_dir.is_horizontal() {
                Tile::new(tile.col, self.door.row)
            } else {
                Tile::new(self.door.col, tile.row)
            };
            tile.heading_to(aim)
        } else {
            Some(self.exit_dir)
        }
    }

    /// Walk in through the door down to the bed's row (or column), then along it to the bed.
    pub fn enter_direction(&self, tile: Tile) -> Option<Direction> {
        if tile == self.bed {
            return None;
        }
        let depth = if self.exit_dir.is_horizontal() {
            Tile::new(self.bed.col, tile.row)
        } else {
            Tile::new(tile.col, self.bed.row)
        };
        if depth != tile {
            tile.heading_to(depth)
        } else {
            tile.heading_to(self.bed)
        }
    }
}

/// A strategy for choosing an actor's next direction.
#[derive(Debug, Clone, PartialEq)]
pub enum Steering {
    /// The arcade target-tile algorithm, never reversing.
    HeadFor { goal: Goal, target: Option<Tile> },
    /// Breadth-first shortest path to the goal.
    FollowPath {
        goal: Goal,
        target: Option<Tile>,
        follower: PathFollower,
    },
    FleeToSafeCorner(SafeCornerFlight),
    /// A random legal direction on every tile, never reversing.
    RandomWander,
    FixedPath(FixedPath),
    /// The direction supplied from outside, e.g. the keyboard.
    FollowInput,
    /// Bobbing up and down in place.
    Bounce,
    LeaveHouse(HouseTransit),
    EnterHouse(HouseTransit),
}

impl Steering {
    pub fn head_for(goal: Goal) -> Self {
        Steering::HeadFor { goal, target: None }
    }

    pub fn follow_path(goal: Goal) -> Self {
        Steering::FollowPath {
            goal,
            target: None,
            follower: PathFollower::new(),
        }
    }

    pub fn flee(include_portals: bool) -> Self {
        Steering::FleeToSafeCorner(SafeCornerFlight::new(include_portals))
    }

    pub fn fixed_path(tiles: Vec<Tile>) -> Self {
        Steering::FixedPath(FixedPath::new(tiles))
    }

    /// Picks the next direction for `mover`.
    ///
    /// Strategies that find no useful answer keep the current heading.
    pub fn steer(&mut self, mover: &Mover, ctx: &mut TickContext<'_>, flags: TraversalFlags) -> Direction {
        let tile = mover.tile();
        let dir = mover.move_dir();
        match self {
            Steering::HeadFor { goal, target } => {
                *target = goal.resolve(mover, ctx, flags);
                match *target {
                    Some(goal_tile) => best_direction(ctx.world, tile, dir, goal_tile, flags, mover.is_stuck()),
                    None => dir,
                }
            }
            Steering::FollowPath { goal, target, follower } => {
                *target = goal.resolve(mover, ctx, flags);
                target
                    .and_then(|goal_tile| follower.next_direction(ctx.world, tile, goal_tile, flags))
                    .unwrap_or(dir)
            }
            Steering::FleeToSafeCorner(flight) => flight
                .next_direction(ctx.world, tile, ctx.pacman_tile, flags)
                .unwrap_or(dir),
            Steering::RandomWander => random_direction(ctx.world, &mut *ctx.rng, tile, dir, flags, mover.is_stuck()),
            Steering::FixedPath(path) => path.next_direction(ctx.world, tile).unwrap_or(dir),
            Steering::FollowInput => ctx.input.unwrap_or(mover.wish_dir()),
            Steering::Bounce => bounce_direction(mover),
            Steering::LeaveHouse(transit) => transit.leave_direction(tile).unwrap_or(dir),
            Steering::EnterHouse(transit) => transit.enter_direction(tile).unwrap_or(dir),
        }
    }

    /// The tile this strategy is heading for, if it has one.
    pub fn target(&self) -> Option<Tile> {
        match self {
            Steering::HeadFor { target, .. } | Steering::FollowPath { target, .. } => *target,
            Steering::FleeToSafeCorner(flight) => flight.safe_point(),
            Steering::FixedPath(path) => path.tiles().last().copied(),
            Steering::LeaveHouse(transit) => Some(transit.entry),
            Steering::EnterHouse(transit) => Some(transit.bed),
            Steering::RandomWander | Steering::FollowInput | Steering::Bounce => None,
        }
    }

    /// The planned path of path-based strategies.
    pub fn path(&self) -> Option<&[Tile]> {
        match self {
            Steering::FollowPath { follower, .. } => Some(follower.path()),
            Steering::FleeToSafeCorner(flight) => Some(flight.path()),
            Steering::FixedPath(path) => Some(path.tiles()),
            _ => None,
        }
    }

    /// Forgets cached targets and paths.
    pub fn reset(&mut self) {
        match self {
            Steering::HeadFor { target, .. } => *target = None,
            Steering::FollowPath { target, follower, .. } => {
                *target = None;
                follower.clear();
            }
            Steering::FleeToSafeCorner(flight) => flight.clear(),
            Steering::FixedPath(path) => *path = FixedPath::new(path.tiles().to_vec()),
            _ => {}
        }
    }
}

/// Shuffles the four directions and takes the first legal one that does not reverse.
pub fn random_direction<R: Rng + ?Sized>(
    world: &World,
    rng: &mut R,
    tile: Tile,
    move_dir: Direction,
    flags: TraversalFlags,
    allow_reverse: bool,
) -> Direction {
    let mut directions = Direction::DIRECTIONS;
    directions.shuffle(rng);
    let reverse = move_dir.opposite();
    directions
        .into_iter()
        .find(|&dir| dir != reverse && world.can_move(tile, dir, flags))
        .unwrap_or(if allow_reverse && world.can_move(tile, reverse, flags) {
            reverse
        } else {
            move_dir
        })
}

fn bounce_direction(mover: &Mover) -> Direction {
    match mover.move_dir() {
        Direction::Up if mover.bob() <= -BOB_LIMIT => Direction::Down,
        Direction::Down if mover.bob() >= BOB_LIMIT => Direction::Up,
        Direction::Up | Direction::Down => mover.move_dir(),
        _ => Direction::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_direction_never_reverses() {
        let world = World::arcade().unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        // A straight corridor: the only non-reversing choice is straight on
        let tile = Tile::new(3, 5);
        for _ in 0..32 {
            let dir = random_direction(&world, &mut rng, tile, Direction::Right, TraversalFlags::GHOST, false);
            assert_eq!(dir, Direction::Right);
        }
    }

    #[test]
    fn test_random_direction_is_seeded() {
        let world = World::arcade().unwrap();
        let tile = Tile::new(6, 5);
        let picks = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..16)
                .map(|_| random_direction(&world, &mut rng, tile, Direction::Up, TraversalFlags::GHOST, false))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
        assert!(picks(42).iter().all(|&dir| dir != Direction::Down));
    }

    #[test]
    fn test_house_transit() {
        let world = World::arcade().unwrap();
        let transit = HouseTransit::new(&world, Tile::new(16, 14)).unwrap();
        assert_eq!(transit.entry, Tile::new(13, 11));
        assert_eq!(transit.exit_dir, Direction::Up);

        assert_eq!(transit.leave_direction(Tile::new(16, 14)), Some(Direction::Left));
        assert_eq!(transit.leave_direction(Tile::new(13, 14)), Some(Direction::Up));
        assert_eq!(transit.leave_direction(Tile::new(13, 11)), None);

        assert_eq!(transit.enter_direction(Tile::new(13, 11)), Some(Direction::Down));
        assert_eq!(transit.enter_direction(Tile::new(13, 14)), Some(Direction::Right));
        assert_eq!(transit.enter_direction(Tile::new(16, 14)), None);
    }

    #[test]
    fn test_bounce_turns_at_limits() {
        let mut mover = Mover::new(Tile::new(13, 14), Direction::Up);
        assert_eq!(bounce_direction(&mover), Direction::Up);
        mover.bob_by(BOB_LIMIT);
        assert_eq!(bounce_direction(&mover), Direction::Down);

        let mover = Mover::new(Tile::new(13, 14), Direction::Left);
        assert_eq!(bounce_direction(&mover), Direction::Up);
    }
}
