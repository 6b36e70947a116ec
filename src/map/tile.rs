use std::fmt;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;
use crate::map::direction::Direction;

/// A single grid cell, addressed by column and row.
///
/// Tiles outside the board are valid values: portals deliberately address the
/// cells one step beyond the left and right edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
}

impl Tile {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The tile one step away in the given direction, without any portal handling.
    pub fn offset(self, dir: Direction) -> Tile {
        self.translate(dir.as_ivec2())
    }

    /// The tile `n` steps away in the given direction.
    pub fn ahead(self, dir: Direction, n: i32) -> Tile {
        self.translate(dir.as_ivec2() * n)
    }

    pub fn translate(self, delta: IVec2) -> Tile {
        (self.as_ivec2() + delta).into()
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.col, self.row)
    }

    /// Manhattan distance in tiles.
    pub fn manhattan_distance(self, other: Tile) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }

    /// Squared Euclidean distance in tiles. Exact, so it is used for tie-breaking.
    pub fn distance_squared(self, other: Tile) -> i32 {
        let delta = self.as_ivec2() - other.as_ivec2();
        delta.dot(delta)
    }

    /// Euclidean distance in tiles.
    pub fn distance(self, other: Tile) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }

    /// The direction leading from this tile to an orthogonally adjacent one.
    pub fn direction_to(self, other: Tile) -> Option<Direction> {
        Direction::from_ivec2(other.as_ivec2() - self.as_ivec2())
    }

    /// The direction leading from this tile towards another one in the same row or column.
    pub fn heading_to(self, other: Tile) -> Option<Direction> {
        Direction::from_ivec2((other.as_ivec2() - self.as_ivec2()).signum())
    }

    /// The pixel position of this tile's center.
    pub fn center(self) -> Vec2 {
        self.as_ivec2().as_vec2() * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
    }
}

impl From<IVec2> for Tile {
    fn from(v: IVec2) -> Self {
        Tile::new(v.x, v.y)
    }
}

impl From<Tile> for IVec2 {
    fn from(tile: Tile) -> Self {
        tile.as_ivec2()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_offsets() {
        let tile = Tile::new(5, 5);
        assert_eq!(tile.offset(Direction::Up), Tile::new(5, 4));
        assert_eq!(tile.offset(Direction::Down), Tile::new(5, 6));
        assert_eq!(tile.offset(Direction::Left), Tile::new(4, 5));
        assert_eq!(tile.offset(Direction::Right), Tile::new(6, 5));
        assert_eq!(tile.ahead(Direction::Up, 4), Tile::new(5, 1));
    }

    #[test]
    fn test_tile_distances() {
        let a = Tile::new(0, 0);
        let b = Tile::new(3, 4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_tile_direction_to() {
        let a = Tile::new(2, 2);
        assert_eq!(a.direction_to(Tile::new(2, 1)), Some(Direction::Up));
        assert_eq!(a.direction_to(Tile::new(3, 2)), Some(Direction::Right));
        assert_eq!(a.direction_to(Tile::new(4, 2)), None);
        assert_eq!(a.direction_to(a), None);
    }

    #[test]
    fn test_tile_center() {
        assert_eq!(Tile::new(0, 0).center(), Vec2::new(4.0, 4.0));
        assert_eq!(Tile::new(2, 1).center(), Vec2::new(20.0, 12.0));
    }
}
