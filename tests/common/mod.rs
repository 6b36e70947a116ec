#![allow(dead_code)]

use pacman_core::entity::ghost::{Ghost, GhostKind, GhostState};
use pacman_core::events::{EventQueue, GameEvent};
use pacman_core::game::context::TickContext;
use pacman_core::level::level_params;
use pacman_core::map::builder::World;
use pacman_core::map::direction::Direction;
use pacman_core::map::tile::Tile;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Owns everything a [`TickContext`] borrows, so actors can be driven without a full game.
pub struct Harness {
    pub world: World,
    pub rng: SmallRng,
    pub events: EventQueue,
    pub level_number: u32,
    pub pacman_tile: Tile,
    pub pacman_dir: Direction,
    pub blinky_tile: Tile,
    pub hunting: GhostState,
    pub elroy: u8,
}

impl Harness {
    pub fn arcade() -> Self {
        let world = World::arcade().unwrap();
        Self {
            pacman_tile: world.pacman_start(),
            world,
            rng: SmallRng::seed_from_u64(42),
            events: EventQueue::new(),
            level_number: 1,
            pacman_dir: Direction::Left,
            blinky_tile: Tile::new(13, 11),
            hunting: GhostState::Scattering,
            elroy: 0,
        }
    }

    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            world: &self.world,
            level: level_params(self.level_number),
            level_number: self.level_number,
            tick_rate: 60,
            rng: &mut self.rng,
            events: &mut self.events,
            pacman_tile: self.pacman_tile,
            pacman_dir: self.pacman_dir,
            blinky_tile: self.blinky_tile,
            hunting: self.hunting,
            elroy: self.elroy,
            input: None,
        }
    }

    /// All four ghosts, locked in their beds.
    pub fn ghosts(&self) -> Vec<Ghost> {
        GhostKind::ALL.into_iter().map(|kind| Ghost::new(kind, &self.world).unwrap()).collect()
    }

    pub fn ghost(&self, kind: GhostKind) -> Ghost {
        Ghost::new(kind, &self.world).unwrap()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::iter::from_fn(|| self.events.pop()).collect()
    }
}
