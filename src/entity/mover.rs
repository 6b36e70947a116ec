//! Tile-to-tile movement shared by Pac-Man and the ghosts.

use glam::Vec2;

use crate::constants::TILE_SIZE;
use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// How far a ghost bobs up and down in its bed, in pixels.
pub const BOB_LIMIT: f32 = TILE_SIZE / 4.0;

/// Position and heading of an actor moving through the maze.
///
/// An actor is either exactly on the center of `tile`, or somewhere on the way
/// from that center to the center of `ahead`. Direction decisions are only taken
/// on a tile center, where the actor is grid-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    tile: Tile,
    ahead: Tile,
    /// Pixels travelled from the center of `tile` towards `ahead`.
    progress: f32,
    move_dir: Direction,
    wish_dir: Direction,
    /// Vertical displacement while bobbing in place, used in the ghost house only.
    bob: f32,
    forced: bool,
    stuck: bool,
    entered_new_tile: bool,
}

impl Mover {
    pub fn new(tile: Tile, dir: Direction) -> Self {
        Self {
            tile,
            ahead: tile,
            progress: 0.0,
            move_dir: dir,
            wish_dir: dir,
            bob: 0.0,
            forced: false,
            stuck: false,
            entered_new_tile: false,
        }
    }

    /// Puts the actor on the center of a tile, facing `dir`.
    pub fn place_at(&mut self, tile: Tile, dir: Direction) {
        *self = Self::new(tile, dir);
    }

    /// The tile the actor is mostly on.
    pub fn tile(&self) -> Tile {
        if self.progress >= TILE_SIZE / 2.0 {
            self.ahead
        } else {
            self.tile
        }
    }

    /// Pixel offset from the center of [`Mover::tile`], for the render collaborator.
    pub fn offset(&self) -> Vec2 {
        let along = self.move_dir.as_ivec2().as_vec2();
        let travelled = if self.progress >= TILE_SIZE / 2.0 {
            self.progress - TILE_SIZE
        } else {
            self.progress
        };
        along * travelled + Vec2::new(0.0, self.bob)
    }

    pub fn move_dir(&self) -> Direction {
        self.move_dir
    }

    pub fn wish_dir(&self) -> Direction {
        self.wish_dir
    }

    pub fn set_wish_dir(&mut self, dir: Direction) {
        self.wish_dir = dir;
    }

    /// Changes heading without moving. Only meaningful on a tile center.
    pub fn set_move_dir(&mut self, dir: Direction) {
        self.move_dir = dir;
        self.wish_dir = dir;
    }

    /// Returns `true` when the actor stands exactly on a tile center.
    pub fn at_center(&self) -> bool {
        self.progress == 0.0
    }

    /// Returns `true` if the last step ran into a wall.
    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Returns `true` if the last [`Mover::travel`] reached a new tile center.
    pub fn entered_new_tile(&self) -> bool {
        self.entered_new_tile
    }

    pub fn bob(&self) -> f32 {
        self.bob
    }

    /// Requests a steering decision on the next move even if not on a tile center.
    pub fn force_steering(&mut self) {
        self.forced = true;
    }

    /// Turns around on the spot, keeping the exact pixel position.
    pub fn reverse(&mut self) {
        if self.progress > 0.0 {
            std::mem::swap(&mut self.tile, &mut self.ahead);
            self.progress = TILE_SIZE - self.progress;
        }
        self.move_dir = self.move_dir.opposite();
        self.wish_dir = self.move_dir;
        self.stuck = false;
    }

    /// Bobs up or down in place by `distance` pixels, staying within [`BOB_LIMIT`].
    pub fn bob_by(&mut self, distance: f32) {
        let sign = match self.move_dir {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
            _ => 0.0,
        };
        self.bob = (self.bob + sign * distance).clamp(-BOB_LIMIT, BOB_LIMIT);
    }

    /// Moves along the maze until `distance` pixels are used up or the way is blocked.
    ///
    /// `decide` is consulted for a new wish direction on every tile center reached
    /// (and once immediately when steering was forced). A wish that reverses the
    /// current heading is applied at once; any other wish waits for a tile center.
    /// Reaching the center of `stop_at` ends the move early.
    pub fn travel<F>(&mut self, world: &World, distance: f32, flags: TraversalFlags, stop_at: Option<Tile>, mut decide: F)
    where
        F: FnMut(&Mover) -> Direction,
    {
        self.entered_new_tile = false;
        self.bob = 0.0;
        let mut distance = distance;
        while distance > 0.0 {
            if self.at_center() || std::mem::take(&mut self.forced) {
                self.wish_dir = decide(self);
            }
            distance = self.step(world, distance, flags);
            if self.stuck || (self.at_center() && stop_at == Some(self.tile)) {
                break;
            }
        }
    }

    /// Moves at most to the next tile center and returns the distance left over.
    fn step(&mut self, world: &World, distance: f32, flags: TraversalFlags) -> f32 {
        if self.progress > 0.0 && self.wish_dir == self.move_dir.opposite() {
            self.reverse();
        }

        if self.at_center() {
            if self.wish_dir != self.move_dir && world.can_move(self.tile, self.wish_dir, flags) {
                self.move_dir = self.wish_dir;
            }
            if !world.can_move(self.tile, self.move_dir, flags) {
                self.stuck = true;
                return 0.0;
            }
            self.ahead = world.neighbor(self.tile, self.move_dir);
        }
        self.stuck = false;

        let remaining = TILE_SIZE - self.progress;
        if distance < remaining {
            self.progress += distance;
            return 0.0;
        }

        self.tile = self.ahead;
        self.progress = 0.0;
        self.entered_new_tile = true;
        distance - remaining
    }
}
