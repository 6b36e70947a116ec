//! Ghost personalities and the ghost state machine.

use strum::EnumCount;
use strum_macros::{AsRefStr, Display, EnumCount as EnumCountMacro, EnumIter};
use tracing::{debug, trace};

use crate::constants::speed::{BASE_SPEED, DEAD_SPEED, HOUSE_SPEED};
use crate::constants::timing::FLASH_TICKS;
use crate::constants::{ticks, SCATTER_TARGETS};
use crate::entity::mover::Mover;
use crate::error::{GameResult, MapError};
use crate::events::GameEvent;
use crate::game::context::TickContext;
use crate::map::builder::{Bed, TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::steering::{preview_path, Goal, HouseTransit, Steering};

/// The four ghost personalities.
///
/// The declaration order is the house release priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumIter, EnumCountMacro)]
pub enum GhostKind {
    Blinky, // Red - Shadow
    Pinky,  // Pink - Speedy
    Inky,   // Cyan - Bashful
    Clyde,  // Orange - Pokey
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [GhostKind::Blinky, GhostKind::Pinky, GhostKind::Inky, GhostKind::Clyde];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// This ghost's home corner for scatter mode, outside the board.
    pub fn scatter_target(self) -> Tile {
        SCATTER_TARGETS[self.index()]
    }

    /// The tile this ghost aims for while chasing.
    ///
    /// `own_tile` matters only to Clyde, `blinky_tile` only to Inky.
    pub fn chase_target(self, own_tile: Tile, pacman_tile: Tile, pacman_dir: Direction, blinky_tile: Tile) -> Tile {
        match self {
            GhostKind::Blinky => pacman_tile,
            GhostKind::Pinky => tiles_ahead(pacman_tile, pacman_dir, 4),
            GhostKind::Inky => {
                let pivot = tiles_ahead(pacman_tile, pacman_dir, 2);
                pivot.translate(pivot.as_ivec2() - blinky_tile.as_ivec2())
            }
            GhostKind::Clyde => {
                if own_tile.distance_squared(pacman_tile) >= 8 * 8 {
                    pacman_tile
                } else {
                    self.scatter_target()
                }
            }
        }
    }
}

/// `n` tiles ahead of an actor. Facing up, the arcade also shifts the point `n` tiles left.
fn tiles_ahead(tile: Tile, dir: Direction, n: i32) -> Tile {
    let ahead = tile.ahead(dir, n);
    if dir == Direction::Up {
        ahead.ahead(Direction::Left, n)
    } else {
        ahead
    }
}

/// The ghost state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumCountMacro)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GhostState {
    /// Waiting in bed for the door man.
    Locked,
    LeavingHouse,
    Scattering,
    Chasing,
    /// Blue and edible, after Pac-Man ate an energizer.
    Frightened,
    /// Eaten; the eyes head back home.
    Dead,
    EnteringHouse,
}

impl GhostState {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Scattering or chasing: dangerous to Pac-Man.
    pub fn is_hunting(self) -> bool {
        matches!(self, GhostState::Scattering | GhostState::Chasing)
    }

    pub fn in_house(self) -> bool {
        matches!(self, GhostState::Locked | GhostState::LeavingHouse | GhostState::EnteringHouse)
    }
}

/// A ghost: position, state and the steering bound to each state.
#[derive(Debug, Clone)]
pub struct Ghost {
    kind: GhostKind,
    mover: Mover,
    state: GhostState,
    bed: Bed,
    /// Where the ghost is put after being eaten; differs from `bed` for Blinky.
    revival: Bed,
    entry: Tile,
    door: Tile,
    frightened_ticks: u32,
    /// Remaining frightened ticks at which flashing starts.
    flash_ticks: u32,
    bounty: u32,
    steerings: [Option<Steering>; GhostState::COUNT],
}

impl Ghost {
    /// Creates a ghost in its bed with the arcade steering for every state.
    ///
    /// # Errors
    ///
    /// Fails if the world has no bed for this ghost or the bed's house has no door.
    pub fn new(kind: GhostKind, world: &World) -> GameResult<Ghost> {
        let bed = world
            .bed(kind.index())
            .ok_or_else(|| MapError::InvalidConfig(format!("no bed for {kind}")))?;
        let revival = match kind {
            GhostKind::Blinky => world.bed(GhostKind::Pinky.index()).unwrap_or(bed),
            _ => bed,
        };
        let leave = HouseTransit::new(world, bed.tile)
            .ok_or_else(|| MapError::InvalidConfig(format!("bed of {kind} is not in a house with a door")))?;
        let enter = HouseTransit::new(world, revival.tile)
            .ok_or_else(|| MapError::InvalidConfig(format!("revival bed of {kind} is not in a house with a door")))?;

        let mut steerings: [Option<Steering>; GhostState::COUNT] = Default::default();
        steerings[GhostState::Locked.index()] = Some(Steering::Bounce);
        steerings[GhostState::LeavingHouse.index()] = Some(Steering::LeaveHouse(leave));
        steerings[GhostState::Scattering.index()] = Some(Steering::head_for(Goal::Scatter(kind)));
        steerings[GhostState::Chasing.index()] = Some(Steering::head_for(Goal::Chase(kind)));
        steerings[GhostState::Frightened.index()] = Some(Steering::RandomWander);
        steerings[GhostState::Dead.index()] = Some(Steering::head_for(Goal::Tile(leave.entry)));
        steerings[GhostState::EnteringHouse.index()] = Some(Steering::EnterHouse(enter));

        Ok(Ghost {
            kind,
            mover: Mover::new(bed.tile, bed.dir),
            state: GhostState::Locked,
            bed,
            revival,
            entry: leave.entry,
            door: leave.door,
            frightened_ticks: 0,
            flash_ticks: 0,
            bounty: 0,
            steerings,
        })
    }

    /// Binds a steering strategy to a state.
    pub fn set_steering(&mut self, state: GhostState, steering: Steering) {
        self.steerings[state.index()] = Some(steering);
    }

    /// Removes the steering of a state. Updating the ghost in that state panics.
    pub fn clear_steering(&mut self, state: GhostState) {
        self.steerings[state.index()] = None;
    }

    pub fn steering(&self, state: GhostState) -> Option<&Steering> {
        self.steerings[state.index()].as_ref()
    }

    /// Puts the ghost back into its bed, locked, as at the start of a level or life.
    pub fn reset(&mut self) {
        self.mover.place_at(self.bed.tile, self.bed.dir);
        self.state = GhostState::Locked;
        self.frightened_ticks = 0;
        self.flash_ticks = 0;
        self.bounty = 0;
        for steering in self.steerings.iter_mut().flatten() {
            steering.reset();
        }
    }

    pub fn kind(&self) -> GhostKind {
        self.kind
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Direct access to the position, for scripted scenarios.
    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn tile(&self) -> Tile {
        self.mover.tile()
    }

    pub fn move_dir(&self) -> Direction {
        self.mover.move_dir()
    }

    pub fn wish_dir(&self) -> Direction {
        self.mover.wish_dir()
    }

    pub fn bed(&self) -> Bed {
        self.bed
    }

    /// The door tile this ghost passes when leaving or entering its house.
    pub fn door(&self) -> Tile {
        self.door
    }

    /// Points awarded for the last time this ghost was eaten.
    pub fn bounty(&self) -> u32 {
        self.bounty
    }

    pub fn frightened_ticks(&self) -> u32 {
        self.frightened_ticks
    }

    /// The tile the current steering heads for, if any.
    pub fn target_tile(&self) -> Option<Tile> {
        self.steering(self.state).and_then(Steering::target)
    }

    /// Where the current steering would lead, for debug overlays.
    pub fn preview_path(&self, world: &World) -> Vec<Tile> {
        match self.steering(self.state) {
            Some(Steering::HeadFor {
                target: Some(target), ..
            }) => preview_path(world, self.tile(), self.move_dir(), *target, self.traversal_flags()),
            Some(steering) => steering.path().map(<[Tile]>::to_vec).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Returns `true` during the last flashes of frightened mode.
    pub fn is_flashing(&self) -> bool {
        self.state == GhostState::Frightened && self.frightened_ticks <= self.flash_ticks
    }

    /// While flashing, whether the ghost currently shows white instead of blue.
    pub fn flash_white(&self) -> bool {
        self.is_flashing() && (self.frightened_ticks / (FLASH_TICKS / 2)) % 2 == 1
    }

    /// What the ghost may walk through in its current state.
    pub fn traversal_flags(&self) -> TraversalFlags {
        match self.state {
            GhostState::Scattering | GhostState::Chasing => TraversalFlags::GHOST | TraversalFlags::ONE_WAY,
            GhostState::Frightened | GhostState::Dead => TraversalFlags::GHOST,
            GhostState::Locked | GhostState::LeavingHouse | GhostState::EnteringHouse => {
                TraversalFlags::GHOST | TraversalFlags::HOUSE
            }
        }
    }

    /// Speed in pixels per tick.
    pub fn speed(&self, ctx: &TickContext<'_>) -> f32 {
        let level = ctx.level;
        let in_tunnel = ctx.world.is_tunnel(self.tile());
        let factor = match self.state {
            GhostState::Locked | GhostState::LeavingHouse => HOUSE_SPEED,
            GhostState::Dead | GhostState::EnteringHouse => DEAD_SPEED,
            GhostState::Frightened if in_tunnel => level.ghost_tunnel_speed,
            GhostState::Frightened => level.ghost_frightened_speed,
            _ if in_tunnel => level.ghost_tunnel_speed,
            _ if self.kind == GhostKind::Blinky && ctx.elroy >= 2 => level.elroy2_speed,
            _ if self.kind == GhostKind::Blinky && ctx.elroy == 1 => level.elroy1_speed,
            _ => level.ghost_speed,
        };
        factor * BASE_SPEED
    }

    /// Switches state directly, without the event that would normally cause it.
    pub fn set_state(&mut self, state: GhostState) {
        if self.state == state {
            return;
        }
        debug!(ghost = %self.kind, from = %self.state, to = %state, tile = %self.tile(), "Ghost state changed");
        self.state = state;
        if let Some(steering) = self.steerings[state.index()].as_mut() {
            steering.reset();
        }
    }

    /// Lets a locked ghost out of its bed.
    ///
    /// Returns `false` if the ghost was not locked.
    pub fn unlock(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if self.state != GhostState::Locked {
            return false;
        }
        self.mover.place_at(self.mover.tile(), self.mover.move_dir());
        self.set_state(GhostState::LeavingHouse);
        ctx.events.push(GameEvent::GhostUnlocked(self.kind));
        true
    }

    /// Reacts to a game event.
    pub fn on_event(&mut self, event: GameEvent, ctx: &mut TickContext<'_>) {
        match (self.state, event) {
            (GhostState::Scattering | GhostState::Chasing, GameEvent::StartScattering) => {
                self.set_state(GhostState::Scattering);
                self.mover.reverse();
            }
            (GhostState::Scattering | GhostState::Chasing, GameEvent::StartChasing) => {
                self.set_state(GhostState::Chasing);
                self.mover.reverse();
            }
            (GhostState::Scattering | GhostState::Chasing, GameEvent::PacManGainsPower) => {
                self.mover.reverse();
                if self.restart_fright(ctx) {
                    self.set_state(GhostState::Frightened);
                }
            }
            // Another energizer only prolongs the fright
            (GhostState::Frightened, GameEvent::PacManGainsPower) => {
                self.restart_fright(ctx);
            }
            (GhostState::Frightened, GameEvent::PacManLostPower) => {
                self.set_state(ctx.hunting);
                self.mover.force_steering();
            }
            (GhostState::Frightened, GameEvent::GhostKilled { ghost, bounty }) if ghost == self.kind => {
                self.bounty = bounty;
                self.frightened_ticks = 0;
                self.set_state(GhostState::Dead);
                self.mover.force_steering();
            }
            _ => {}
        }
    }

    /// Advances the ghost by one tick.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        match self.state {
            GhostState::Locked => self.bounce(ctx),
            GhostState::LeavingHouse => {
                if self.mover.at_center() && self.tile() == self.entry {
                    self.mover.set_move_dir(Direction::Left);
                    self.set_state(ctx.hunting);
                    ctx.events.push(GameEvent::GhostLeftHouse(self.kind));
                } else {
                    self.walk(ctx);
                }
            }
            GhostState::Scattering | GhostState::Chasing => self.walk(ctx),
            GhostState::Frightened => {
                if self.frightened_ticks == 0 {
                    self.set_state(ctx.hunting);
                    self.mover.force_steering();
                    self.walk(ctx);
                } else {
                    self.frightened_ticks -= 1;
                    self.walk(ctx);
                }
            }
            GhostState::Dead => {
                if self.mover.at_center() && self.tile() == self.entry {
                    self.set_state(GhostState::EnteringHouse);
                } else {
                    self.walk(ctx);
                }
            }
            GhostState::EnteringHouse => {
                if self.mover.at_center() && self.tile() == self.revival.tile {
                    self.mover.place_at(self.revival.tile, self.revival.dir);
                    self.set_state(GhostState::Locked);
                    ctx.events.push(GameEvent::GhostEnteredHouse(self.kind));
                } else {
                    self.walk(ctx);
                }
            }
        }
    }

    /// Starts the frightened timers for this level, returning `false` when the level grants no power.
    fn restart_fright(&mut self, ctx: &TickContext<'_>) -> bool {
        let duration = ticks(ctx.level.power_seconds, ctx.tick_rate);
        if duration == 0 {
            return false;
        }
        self.frightened_ticks = duration;
        self.flash_ticks = ctx.level.flashes * FLASH_TICKS;
        true
    }

    fn steering_mut(&mut self) -> &mut Steering {
        let (kind, state) = (self.kind, self.state);
        self.steerings[state.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("{kind} has no steering bound for state {state}"))
    }

    fn bounce(&mut self, ctx: &mut TickContext<'_>) {
        let flags = self.traversal_flags();
        let speed = self.speed(ctx);
        let mover = self.mover.clone();
        let dir = self.steering_mut().steer(&mover, ctx, flags);
        self.mover.set_move_dir(dir);
        self.mover.bob_by(speed);
    }

    fn walk(&mut self, ctx: &mut TickContext<'_>) {
        let flags = self.traversal_flags();
        let speed = self.speed(ctx);
        let world = ctx.world;
        let (kind, state) = (self.kind, self.state);
        let destination = match state {
            GhostState::LeavingHouse | GhostState::Dead => Some(self.entry),
            GhostState::EnteringHouse => Some(self.revival.tile),
            _ => None,
        };
        let steering = self.steerings[state.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("{kind} has no steering bound for state {state}"));
        self.mover
            .travel(world, speed, flags, destination, |mover| steering.steer(mover, ctx, flags));
        trace!(ghost = %kind, tile = %self.mover.tile(), dir = ?self.mover.move_dir(), "Ghost moved");
    }
}
