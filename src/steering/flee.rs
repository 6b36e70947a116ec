//! Fleeing from an attacker towards the safest corner of the maze.

use tracing::debug;

use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// Runs towards the safe point whose path keeps the most distance to the attacker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafeCornerFlight {
    /// Also consider the tiles in front of portals as safe points.
    pub include_portals: bool,
    safe_point: Option<Tile>,
    path: Vec<Tile>,
}

impl SafeCornerFlight {
    pub fn new(include_portals: bool) -> Self {
        Self {
            include_portals,
            ..Self::default()
        }
    }

    pub fn safe_point(&self) -> Option<Tile> {
        self.safe_point
    }

    pub fn path(&self) -> &[Tile] {
        &self.path
    }

    pub fn clear(&mut self) {
        self.safe_point = None;
        self.path.clear();
    }

    /// Candidate safe points: the corners in NW, NE, SW, SE order, then the
    /// tiles in front of each portal.
    fn candidates(&self, world: &World) -> Vec<Tile> {
        let mut candidates = world.corners().to_vec();
        if self.include_portals {
            for portal in world.portals() {
                candidates.push(portal.left.offset(Direction::Right));
                candidates.push(portal.right.offset(Direction::Left));
            }
        }
        candidates
    }

    /// Picks the safest point for an actor on `tile`.
    ///
    /// A candidate scores the smallest manhattan distance to the attacker found
    /// along the shortest path to it, the actor's own tile excluded. The highest
    /// score wins; equal scores keep the earlier candidate. The actor's own tile
    /// is never a candidate.
    pub fn choose_safe_point(&self, world: &World, tile: Tile, attacker: Tile, flags: TraversalFlags) -> Option<(Tile, Vec<Tile>)> {
        let mut best: Option<(i32, Tile, Vec<Tile>)> = None;
        for candidate in self.candidates(world) {
            if candidate == tile {
                continue;
            }
            let Some(path) = world.shortest_path_with(tile, candidate, flags) else {
                continue;
            };
            let Some(score) = path.iter().skip(1).map(|t| t.manhattan_distance(attacker)).min() else {
                continue;
            };
            if best.as_ref().is_none_or(|(best_score, _, _)| score > *best_score) {
                best = Some((score, candidate, path));
            }
        }
        best.map(|(_, candidate, path)| (candidate, path))
    }

    /// Returns the direction of the next step away from the attacker.
    ///
    /// A new safe point is chosen when there is none yet, when the current one
    /// has been reached, or when the actor has been pushed off its path.
    pub fn next_direction(&mut self, world: &World, tile: Tile, attacker: Tile, flags: TraversalFlags) -> Option<Direction> {
        let index = self.path.iter().position(|&t| t == tile);
        let reached = self.safe_point == Some(tile);

        match index {
            Some(index) if !reached && self.safe_point.is_some() => {
                self.path.drain(..index);
            }
            _ => {
                let (safe_point, path) = self.choose_safe_point(world, tile, attacker, flags)?;
                debug!(from = %tile, safe_point = %safe_point, attacker = %attacker, "Fleeing to safe point");
                self.safe_point = Some(safe_point);
                self.path = path;
            }
        }

        match self.path.as_slice() {
            [from, to, ..] => world.direction_between(*from, *to),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::builder::MazeLayout;

    const ROOM: [&str; 7] = [
        "#######", //
        "#.....#", //
        "#.#.#.#", //
        "#..P..#", //
        "#.#.#.#", //
        "#.....#", //
        "#######",
    ];

    fn world() -> World {
        World::new(MazeLayout {
            board: &ROOM,
            beds: &[],
            one_way_tiles: &[],
            bonus_tile: Tile::new(3, 3),
        })
        .unwrap()
    }

    #[test]
    fn test_flees_to_far_corner() {
        let world = world();
        let flight = SafeCornerFlight::new(false);
        // Attacker sits in the south-east corner, actor in the middle
        let (safe, path) = flight
            .choose_safe_point(&world, Tile::new(3, 3), Tile::new(5, 5), TraversalFlags::GHOST)
            .unwrap();
        assert_eq!(safe, Tile::new(1, 1));
        assert_eq!(path.first(), Some(&Tile::new(3, 3)));
        assert_eq!(path.last(), Some(&Tile::new(1, 1)));
    }

    #[test]
    fn test_current_tile_is_excluded() {
        let world = world();
        let flight = SafeCornerFlight::new(false);
        let (safe, _) = flight
            .choose_safe_point(&world, Tile::new(1, 1), Tile::new(5, 5), TraversalFlags::GHOST)
            .unwrap();
        assert_ne!(safe, Tile::new(1, 1));
    }

    #[test]
    fn test_ties_keep_corner_order() {
        let world = world();
        let flight = SafeCornerFlight::new(false);
        // An attacker on the center row is equally far from both western corners
        let (safe, _) = flight
            .choose_safe_point(&world, Tile::new(1, 3), Tile::new(5, 3), TraversalFlags::GHOST)
            .unwrap();
        assert_eq!(safe, Tile::new(1, 1));
    }

    #[test]
    fn test_keeps_safe_point_until_reached() {
        let world = world();
        let mut flight = SafeCornerFlight::new(false);
        let flags = TraversalFlags::GHOST;

        let dir = flight.next_direction(&world, Tile::new(3, 3), Tile::new(5, 5), flags);
        assert!(dir.is_some());
        assert_eq!(flight.safe_point(), Some(Tile::new(1, 1)));

        // The attacker moves next to the safe point, but the flight goes on
        let next = world.neighbor(Tile::new(3, 3), dir.unwrap());
        flight.next_direction(&world, next, Tile::new(1, 2), flags);
        assert_eq!(flight.safe_point(), Some(Tile::new(1, 1)));
    }
}
