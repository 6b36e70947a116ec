use rand::rngs::SmallRng;

use crate::entity::ghost::GhostState;
use crate::events::EventQueue;
use crate::level::LevelParams;
use crate::map::builder::World;
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// Everything an actor may look at or touch during one update.
///
/// Built fresh by the game for every tick (and for every event dispatch), so
/// actors never hold references into the game between calls.
pub struct TickContext<'a> {
    pub world: &'a World,
    pub level: &'a LevelParams,
    pub level_number: u32,
    pub tick_rate: u32,
    pub rng: &'a mut SmallRng,
    pub events: &'a mut EventQueue,
    /// Pac-Man's tile and heading when the context was built.
    pub pacman_tile: Tile,
    pub pacman_dir: Direction,
    pub blinky_tile: Tile,
    /// What ghosts out hunting do in the current attack wave.
    pub hunting: GhostState,
    /// Blinky's "Cruise Elroy" stage, 0 when inactive.
    pub elroy: u8,
    /// The direction the player last asked for.
    pub input: Option<Direction>,
}
