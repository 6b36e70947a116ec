//! Steering along explicit tile paths.

use pathfinding::prelude::bfs;
use smallvec::SmallVec;
use tracing::trace;

use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// Follows the shortest path to a moving target, recomputing it only when needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathFollower {
    path: Vec<Tile>,
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached path, starting at the tile the actor was last steered on.
    pub fn path(&self) -> &[Tile] {
        &self.path
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Returns the direction of the next step from `tile` towards `target`.
    ///
    /// The cached path is reused while the actor stays on it and the target
    /// has not moved; otherwise a new breadth-first search runs.
    pub fn next_direction(&mut self, world: &World, tile: Tile, target: Tile, flags: TraversalFlags) -> Option<Direction> {
        let on_path = self.path.iter().position(|&t| t == tile);
        match on_path {
            Some(index) if self.path.last() == Some(&target) => {
                self.path.drain(..index);
            }
            _ => {
                self.path = world.shortest_path_with(tile, target, flags).unwrap_or_default();
                trace!(from = %tile, to = %target, length = self.path.len(), "Path recomputed");
            }
        }

        match self.path.as_slice() {
            [from, to, ..] => world.direction_between(*from, *to),
            _ => None,
        }
    }
}

/// Walks a literal tile sequence, for scripted demonstrations.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPath {
    tiles: Vec<Tile>,
    cursor: usize,
}

impl FixedPath {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles, cursor: 0 }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns `true` once the actor has reached the last tile.
    pub fn is_complete(&self) -> bool {
        self.tiles.is_empty() || self.cursor + 1 >= self.tiles.len()
    }

    pub fn next_direction(&mut self, world: &World, tile: Tile) -> Option<Direction> {
        // Look ahead from the cursor so paths that cross themselves are walked in order
        let offset = self.tiles.get(self.cursor..)?.iter().position(|&t| t == tile)?;
        self.cursor += offset;
        let next = self.tiles.get(self.cursor + 1)?;
        world.direction_between(tile, *next)
    }
}

/// The shortest walk from `from` to the closest tile still holding food.
pub fn path_to_nearest_food(world: &World, from: Tile, flags: TraversalFlags) -> Option<Vec<Tile>> {
    bfs(
        &from,
        |&tile| {
            Direction::DIRECTIONS
                .into_iter()
                .filter(move |&dir| world.can_move(tile, dir, flags))
                .map(move |dir| world.neighbor(tile, dir))
                .collect::<SmallVec<[Tile; 4]>>()
        },
        |&tile| world.has_food(tile),
    )
}
