//! The door man: decides when locked ghosts may leave the house.
//!
//! Ghosts are released in a fixed order (Blinky, Pinky, Inky, Clyde). The
//! first locked ghost in that order is the "preferred" one. It leaves when its
//! personal dot counter reaches its limit, or, after Pac-Man has lost a life,
//! when the global dot counter does. If Pac-Man stops eating for too long the
//! preferred ghost is let out anyway.

use std::collections::HashSet;

use strum::EnumCount;
use tracing::debug;

use crate::constants::ticks;
use crate::entity::ghost::{Ghost, GhostKind, GhostState};
use crate::game::context::TickContext;
use crate::map::builder::World;
use crate::map::tile::Tile;

/// Global counter value at which the global counter switches itself off while Clyde is still locked.
const GLOBAL_COUNTER_CUTOFF: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseReason {
    Always,
    PersonalCounter,
    GlobalCounter,
    Starving,
}

#[derive(Debug, Clone)]
pub struct DoorMan {
    level: u32,
    tick_rate: u32,
    global_counter: u32,
    global_enabled: bool,
    personal: [u32; GhostKind::COUNT],
    starving_ticks: u32,
    open_doors: HashSet<Tile>,
}

impl DoorMan {
    pub fn new(level: u32, tick_rate: u32) -> Self {
        Self {
            level,
            tick_rate,
            global_counter: 0,
            global_enabled: false,
            personal: [0; GhostKind::COUNT],
            starving_ticks: 0,
            open_doors: HashSet::new(),
        }
    }

    /// Clears every counter for the start of a level.
    pub fn reset_for_level(&mut self, level: u32) {
        *self = Self::new(level, self.tick_rate);
    }

    /// After a life is lost the global counter takes over from the personal ones.
    pub fn on_life_lost(&mut self) {
        debug!(level = self.level, "Global dot counter enabled");
        self.global_enabled = true;
        self.global_counter = 0;
        self.starving_ticks = 0;
        self.open_doors.clear();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn global_counter(&self) -> u32 {
        self.global_counter
    }

    pub fn is_global_counter_enabled(&self) -> bool {
        self.global_enabled
    }

    pub fn personal_counter(&self, kind: GhostKind) -> u32 {
        self.personal[kind.index()]
    }

    /// Sets a personal counter directly, for scripted scenarios.
    pub fn set_personal_counter(&mut self, kind: GhostKind, value: u32) {
        self.personal[kind.index()] = value;
    }

    pub fn starving_ticks(&self) -> u32 {
        self.starving_ticks
    }

    /// Dots a ghost's personal counter must reach on the current level.
    pub fn personal_limit(&self, kind: GhostKind) -> u32 {
        match (kind, self.level) {
            (GhostKind::Inky, 1) => 30,
            (GhostKind::Clyde, 1) => 60,
            (GhostKind::Clyde, 2) => 50,
            _ => 0,
        }
    }

    /// Dots the global counter must reach for a ghost to leave.
    pub fn global_limit(kind: GhostKind) -> u32 {
        match kind {
            GhostKind::Blinky => 0,
            GhostKind::Pinky => 7,
            GhostKind::Inky => 17,
            GhostKind::Clyde => 32,
        }
    }

    /// Ticks without eating after which a ghost is let out regardless of counters.
    pub fn starving_limit(&self) -> u32 {
        let seconds = if self.level < 5 { 4.0 } else { 3.0 };
        ticks(seconds, self.tick_rate)
    }

    /// The first locked ghost in release order.
    pub fn preferred_locked_ghost(ghosts: &[Ghost]) -> Option<GhostKind> {
        GhostKind::ALL
            .into_iter()
            .find(|&kind| ghosts.iter().any(|g| g.kind() == kind && g.state() == GhostState::Locked))
    }

    /// Counts a piece of food eaten by Pac-Man.
    pub fn on_food_eaten(&mut self, ghosts: &[Ghost]) {
        self.starving_ticks = 0;

        if self.global_enabled {
            self.global_counter += 1;
            let clyde_locked = ghosts
                .iter()
                .any(|g| g.kind() == GhostKind::Clyde && g.state() == GhostState::Locked);
            if self.global_counter == GLOBAL_COUNTER_CUTOFF && clyde_locked {
                debug!("Global dot counter disabled");
                self.global_enabled = false;
                self.global_counter = 0;
            }
        } else if let Some(kind) = Self::preferred_locked_ghost(ghosts) {
            self.personal[kind.index()] += 1;
        }
    }

    fn release_reason(&self, kind: GhostKind) -> Option<ReleaseReason> {
        if kind == GhostKind::Blinky {
            Some(ReleaseReason::Always)
        } else if self.global_enabled && self.global_counter >= Self::global_limit(kind) {
            Some(ReleaseReason::GlobalCounter)
        } else if !self.global_enabled && self.personal[kind.index()] >= self.personal_limit(kind) {
            Some(ReleaseReason::PersonalCounter)
        } else if self.starving_ticks >= self.starving_limit() {
            Some(ReleaseReason::Starving)
        } else {
            None
        }
    }

    /// Runs once per tick before the ghosts move; unlocks at most one ghost.
    pub fn update(&mut self, ghosts: &mut [Ghost], ctx: &mut TickContext<'_>) -> Option<GhostKind> {
        self.starving_ticks += 1;

        let kind = Self::preferred_locked_ghost(ghosts)?;
        let reason = self.release_reason(kind)?;
        let ghost = ghosts.iter_mut().find(|g| g.kind() == kind)?;
        if !ghost.unlock(ctx) {
            return None;
        }

        debug!(ghost = %kind, ?reason, starving = self.starving_ticks, "Ghost released");
        self.starving_ticks = 0;
        Some(kind)
    }

    /// Opens the doors ghosts are passing through and closes the others.
    pub fn update_doors(&mut self, world: &World, ghosts: &[Ghost]) {
        self.open_doors.clear();
        for ghost in ghosts {
            if !matches!(ghost.state(), GhostState::LeavingHouse | GhostState::EnteringHouse) {
                continue;
            }
            let door = world
                .houses()
                .iter()
                .flat_map(|house| house.doors.iter())
                .find(|door| door.contains(ghost.door()));
            if let Some(door) = door {
                self.open_doors.extend(door.tiles.iter().copied());
            }
        }
    }

    pub fn is_door_open(&self, tile: Tile) -> bool {
        self.open_doors.contains(&tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_by_level() {
        let first = DoorMan::new(1, 60);
        assert_eq!(first.personal_limit(GhostKind::Pinky), 0);
        assert_eq!(first.personal_limit(GhostKind::Inky), 30);
        assert_eq!(first.personal_limit(GhostKind::Clyde), 60);
        assert_eq!(first.starving_limit(), 240);

        let second = DoorMan::new(2, 60);
        assert_eq!(second.personal_limit(GhostKind::Inky), 0);
        assert_eq!(second.personal_limit(GhostKind::Clyde), 50);

        let fifth = DoorMan::new(5, 60);
        assert_eq!(fifth.personal_limit(GhostKind::Clyde), 0);
        assert_eq!(fifth.starving_limit(), 180);
    }

    #[test]
    fn test_global_limits() {
        assert_eq!(DoorMan::global_limit(GhostKind::Pinky), 7);
        assert_eq!(DoorMan::global_limit(GhostKind::Inky), 17);
        assert_eq!(DoorMan::global_limit(GhostKind::Clyde), 32);
    }

    #[test]
    fn test_life_lost_enables_global_counter() {
        let mut door_man = DoorMan::new(3, 60);
        assert!(!door_man.is_global_counter_enabled());
        door_man.on_life_lost();
        assert!(door_man.is_global_counter_enabled());
        door_man.reset_for_level(4);
        assert!(!door_man.is_global_counter_enabled());
        assert_eq!(door_man.level(), 4);
    }
}
