use std::collections::VecDeque;

use crate::entity::ghost::GhostKind;
use crate::map::direction::Direction;
use crate::map::food::Food;
use crate::map::tile::Tile;

/// Commands pushed into the core by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// The direction the player wants Pac-Man to take next.
    MovePlayer(Direction),
    TogglePause,
    /// Jump to a level, restarting it.
    SelectLevel(u32),
    /// Start a fresh game at the configured level.
    Restart,
}

/// Typed game events, produced by actors and controllers during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FoodFound { tile: Tile, food: Food },
    BonusFound { value: u32 },
    PacManGainsPower,
    PacManLostPower,
    PacManGhostCollision(GhostKind),
    GhostKilled { ghost: GhostKind, bounty: u32 },
    PacManKilled(GhostKind),
    GhostUnlocked(GhostKind),
    GhostLeftHouse(GhostKind),
    GhostEnteredHouse(GhostKind),
    StartScattering,
    StartChasing,
    LevelCompleted,
}

/// First-in first-out queue of events owned by the game loop.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
