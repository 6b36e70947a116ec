use strum_macros::AsRefStr;

use crate::entity::ghost::GhostKind;

/// The stages a game moves through; actors only move while [`GameStage::Playing`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, AsRefStr)]
pub enum GameStage {
    /// "READY!" is shown, nothing moves.
    GettingReady { remaining_ticks: u32 },
    /// The main gameplay loop is active.
    Playing,
    /// Short freeze after Pac-Man eats a ghost to display the bounty
    GhostDying { remaining_ticks: u32, ghost: GhostKind },
    /// Pac-Man was caught; runs until his dying animation has collapsed.
    PacManDying,
    /// All food is eaten; the next level starts after a pause.
    LevelCompleted { remaining_ticks: u32 },
    /// The game has ended.
    GameOver,
}

impl GameStage {
    /// Counts down a timed stage, returning `true` once its time is up.
    ///
    /// Untimed stages never expire.
    pub fn countdown(&mut self) -> bool {
        match self {
            GameStage::GettingReady { remaining_ticks }
            | GameStage::GhostDying { remaining_ticks, .. }
            | GameStage::LevelCompleted { remaining_ticks } => {
                *remaining_ticks = remaining_ticks.saturating_sub(1);
                *remaining_ticks == 0
            }
            GameStage::Playing | GameStage::PacManDying | GameStage::GameOver => false,
        }
    }
}
