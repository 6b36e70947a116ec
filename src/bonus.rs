//! The bonus fruit: appears for a while, can be eaten once, then shows its value.

use rand::Rng;
use strum_macros::{AsRefStr, Display};
use tracing::debug;

use crate::constants::ticks;
use crate::constants::timing::{BONUS_ACTIVE_SECONDS, BONUS_CONSUMED_SECONDS};
use crate::level::BonusSymbol;
use crate::map::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display)]
pub enum BonusState {
    /// No bonus on the board.
    #[default]
    Inactive,
    /// Edible.
    Active,
    /// Eaten; its value is shown for a moment.
    Consumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub symbol: BonusSymbol,
    pub value: u32,
    pub tile: Tile,
}

/// Owns the bonus while it exists and runs its timers.
#[derive(Debug, Clone, Default)]
pub struct BonusControl {
    state: BonusState,
    bonus: Option<Bonus>,
    timer: u32,
}

impl BonusControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BonusState {
        self.state
    }

    /// The bonus on the board; `None` while inactive.
    pub fn bonus(&self) -> Option<&Bonus> {
        self.bonus.as_ref()
    }

    /// Ticks left in the current state.
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Puts a bonus on the board for nine to ten seconds.
    pub fn activate<R: Rng + ?Sized>(&mut self, bonus: Bonus, rng: &mut R, tick_rate: u32) {
        let tick_rate = tick_rate.max(1);
        self.timer = ticks(BONUS_ACTIVE_SECONDS, tick_rate) + rng.random_range(0..tick_rate);
        debug!(symbol = %bonus.symbol, value = bonus.value, tile = %bonus.tile, ticks = self.timer, "Bonus activated");
        self.bonus = Some(bonus);
        self.state = BonusState::Active;
    }

    /// Eats the bonus if it is active and lies on `tile`, returning its value.
    pub fn try_consume(&mut self, tile: Tile, tick_rate: u32) -> Option<u32> {
        if self.state != BonusState::Active {
            return None;
        }
        let bonus = self.bonus.filter(|bonus| bonus.tile == tile)?;
        self.state = BonusState::Consumed;
        self.timer = ticks(BONUS_CONSUMED_SECONDS, tick_rate);
        debug!(symbol = %bonus.symbol, value = bonus.value, "Bonus consumed");
        Some(bonus.value)
    }

    pub fn update(&mut self) {
        if self.state == BonusState::Inactive {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            debug!(from = %self.state, "Bonus gone");
            self.reset();
        }
    }

    /// Removes the bonus at once.
    pub fn reset(&mut self) {
        self.state = BonusState::Inactive;
        self.bonus = None;
        self.timer = 0;
    }
}
