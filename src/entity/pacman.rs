//! The Pac-Man state machine.

use strum::EnumCount;
use strum_macros::{AsRefStr, Display, EnumCount as EnumCountMacro, EnumIter};
use tracing::{debug, trace};

use crate::constants::speed::BASE_SPEED;
use crate::constants::ticks;
use crate::constants::timing::{DIGESTION_TICKS, PACMAN_DYING_SECONDS};
use crate::entity::mover::Mover;
use crate::events::GameEvent;
use crate::game::context::TickContext;
use crate::map::builder::{TraversalFlags, World};
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::steering::Steering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumCountMacro)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PacManState {
    /// Placed on the start tile, not yet playing.
    InBed,
    Sleeping,
    Awake,
    /// Has eaten an energizer and can eat ghosts.
    Powerful,
    Dead,
    /// The death animation is over; waiting for a restart.
    Collapsing,
}

impl PacManState {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// States in which Pac-Man moves through the maze.
    pub fn is_mobile(self) -> bool {
        matches!(self, PacManState::Awake | PacManState::Powerful)
    }
}

#[derive(Debug, Clone)]
pub struct PacMan {
    mover: Mover,
    start: Tile,
    state: PacManState,
    /// Ticks left in the current timed state (power or dying).
    timer: u32,
    /// Movement ticks still to skip after eating.
    weight: u32,
    steerings: [Option<Steering>; PacManState::COUNT],
}

impl PacMan {
    /// Creates Pac-Man on the world's start tile, steered by external input.
    pub fn new(world: &World) -> Self {
        let mut steerings: [Option<Steering>; PacManState::COUNT] = Default::default();
        steerings[PacManState::Awake.index()] = Some(Steering::FollowInput);
        steerings[PacManState::Powerful.index()] = Some(Steering::FollowInput);

        let start = world.pacman_start();
        Self {
            mover: Mover::new(start, Direction::Left),
            start,
            state: PacManState::InBed,
            timer: 0,
            weight: 0,
            steerings,
        }
    }

    /// Binds the same steering to both mobile states.
    pub fn set_steering(&mut self, steering: Steering) {
        self.steerings[PacManState::Awake.index()] = Some(steering.clone());
        self.steerings[PacManState::Powerful.index()] = Some(steering);
    }

    pub fn steering(&self, state: PacManState) -> Option<&Steering> {
        self.steerings[state.index()].as_ref()
    }

    /// Back on the start tile, in bed.
    pub fn reset(&mut self) {
        self.mover.place_at(self.start, Direction::Left);
        self.state = PacManState::InBed;
        self.timer = 0;
        self.weight = 0;
        for steering in self.steerings.iter_mut().flatten() {
            steering.reset();
        }
    }

    pub fn state(&self) -> PacManState {
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

    /// Ticks left in the power or dying state.
    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_powerful(&self) -> bool {
        self.state == PacManState::Powerful
    }

    /// Target of the current steering, for debug overlays.
    pub fn target_tile(&self) -> Option<Tile> {
        self.steering(self.state).and_then(Steering::target)
    }

    fn set_state(&mut self, state: PacManState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, tile = %self.tile(), "Pac-Man state changed");
            self.state = state;
        }
    }

    pub fn wake_up(&mut self) {
        if matches!(self.state, PacManState::InBed | PacManState::Sleeping) {
            self.set_state(PacManState::Awake);
        }
    }

    pub fn fall_asleep(&mut self) {
        if matches!(self.state, PacManState::InBed | PacManState::Awake) {
            self.set_state(PacManState::Sleeping);
        }
    }

    /// Speed in pixels per tick; zero whenever Pac-Man cannot move.
    pub fn speed(&self, ctx: &TickContext<'_>) -> f32 {
        let factor = match self.state {
            PacManState::Awake => ctx.level.pacman_speed,
            PacManState::Powerful => ctx.level.pacman_power_speed,
            _ => 0.0,
        };
        factor * BASE_SPEED
    }

    pub fn on_event(&mut self, event: GameEvent, ctx: &mut TickContext<'_>) {
        match (self.state, event) {
            (PacManState::Awake | PacManState::Powerful, GameEvent::PacManGainsPower) => {
                let duration = ticks(ctx.level.power_seconds, ctx.tick_rate);
                if duration > 0 {
                    self.timer = duration;
                    self.set_state(PacManState::Powerful);
                }
            }
            (PacManState::Awake | PacManState::Powerful, GameEvent::PacManKilled(ghost)) => {
                debug!(killer = %ghost, tile = %self.tile(), "Pac-Man killed");
                self.timer = ticks(PACMAN_DYING_SECONDS, ctx.tick_rate);
                self.set_state(PacManState::Dead);
            }
            (_, GameEvent::FoodFound { .. }) => {
                self.weight += DIGESTION_TICKS;
            }
            _ => {}
        }
    }

    /// Advances Pac-Man by one tick, raising [`GameEvent::FoodFound`] when he lands on food.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        match self.state {
            PacManState::InBed | PacManState::Sleeping | PacManState::Collapsing => {}
            PacManState::Dead => {
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.set_state(PacManState::Collapsing);
                }
            }
            PacManState::Powerful => {
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.set_state(PacManState::Awake);
                    ctx.events.push(GameEvent::PacManLostPower);
                }
                self.walk(ctx);
            }
            PacManState::Awake => self.walk(ctx),
        }
    }

    fn walk(&mut self, ctx: &mut TickContext<'_>) {
        if self.weight > 0 {
            self.weight -= 1;
            return;
        }

        let speed = self.speed(ctx);
        let world = ctx.world;
        let state = self.state;
        let steering = self.steerings[state.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("Pac-Man has no steering bound for state {state}"));
        self.mover
            .travel(world, speed, TraversalFlags::PACMAN, None, |mover| {
                steering.steer(mover, ctx, TraversalFlags::PACMAN)
            });

        let tile = self.mover.tile();
        if let Some(food) = world.food_at(tile) {
            trace!(tile = %tile, ?food, "Pac-Man found food");
            ctx.events.push(GameEvent::FoodFound { tile, food });
        }
    }
}
