//! The scatter/chase timetable ("attack waves") of a level.

use tracing::debug;

use crate::constants::ticks;
use crate::entity::ghost::GhostState;
use crate::events::GameEvent;

/// Alternating scatter and chase durations in seconds, starting with scatter.
/// The phase after the last entry lasts forever.
const LEVEL_1: [f32; 7] = [7.0, 20.0, 7.0, 20.0, 5.0, 20.0, 5.0];
const LEVELS_2_TO_4: [f32; 7] = [7.0, 20.0, 7.0, 20.0, 5.0, 1033.0, 1.0 / 60.0];
const LEVELS_5_ON: [f32; 7] = [5.0, 20.0, 5.0, 20.0, 5.0, 1037.0, 1.0 / 60.0];

fn timetable(level: u32) -> &'static [f32; 7] {
    match level {
        0 | 1 => &LEVEL_1,
        2..=4 => &LEVELS_2_TO_4,
        _ => &LEVELS_5_ON,
    }
}

#[derive(Debug, Clone)]
pub struct AttackWaves {
    durations: Vec<u32>,
    phase: usize,
    remaining: u32,
}

impl AttackWaves {
    pub fn new(level: u32, tick_rate: u32) -> Self {
        let durations: Vec<u32> = timetable(level).iter().map(|&s| ticks(s, tick_rate).max(1)).collect();
        let remaining = durations[0];
        Self {
            durations,
            phase: 0,
            remaining,
        }
    }

    /// Zero-based index of the current wave phase.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Ticks left in the current phase; `None` once chasing goes on forever.
    pub fn remaining(&self) -> Option<u32> {
        (self.phase < self.durations.len()).then_some(self.remaining)
    }

    /// What hunting ghosts do during the current phase.
    pub fn mode(&self) -> GhostState {
        if self.phase % 2 == 0 {
            GhostState::Scattering
        } else {
            GhostState::Chasing
        }
    }

    /// Counts down one tick unless `suspended`, returning the event of a phase change.
    pub fn update(&mut self, suspended: bool) -> Option<GameEvent> {
        if suspended || self.phase >= self.durations.len() {
            return None;
        }

        self.remaining -= 1;
        if self.remaining > 0 {
            return None;
        }

        self.phase += 1;
        self.remaining = self.durations.get(self.phase).copied().unwrap_or(0);
        debug!(phase = self.phase, mode = %self.mode(), "Attack wave changed");
        Some(match self.mode() {
            GhostState::Scattering => GameEvent::StartScattering,
            _ => GameEvent::StartChasing,
        })
    }
}
