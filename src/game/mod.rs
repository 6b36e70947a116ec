//! The game loop: owns every actor and controller and advances them tick by tick.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::bonus::{Bonus, BonusControl};
use crate::config::{Autopilot, FrightenedBehavior, Settings};
use crate::constants::score::{ENERGIZER, FIRST_GHOST_BOUNTY, PELLET};
use crate::constants::ticks;
use crate::constants::timing::{BONUS_PELLET_COUNTS, GET_READY_SECONDS, GHOST_DYING_SECONDS, LEVEL_COMPLETE_SECONDS};
use crate::entity::ghost::{Ghost, GhostKind, GhostState};
use crate::entity::pacman::{PacMan, PacManState};
use crate::error::GameResult;
use crate::events::{EventQueue, GameCommand, GameEvent};
use crate::formatter;
use crate::house::DoorMan;
use crate::level::{level_params, LevelParams};
use crate::map::builder::World;
use crate::map::direction::Direction;
use crate::map::food::Food;
use crate::steering::{Goal, Steering};

pub mod context;
pub mod stage;
pub mod waves;

use context::TickContext;
use stage::GameStage;
use waves::AttackWaves;

/// Most doublings of the ghost bounty during one energizer: 200, 400, 800, 1600.
const MAX_BOUNTY_SHIFT: u32 = 3;

pub struct Game {
    settings: Settings,
    world: World,
    level_number: u32,
    level: &'static LevelParams,
    pacman: PacMan,
    ghosts: Vec<Ghost>,
    door_man: DoorMan,
    bonus: BonusControl,
    waves: AttackWaves,
    events: EventQueue,
    commands: VecDeque<GameCommand>,
    rng: SmallRng,
    stage: GameStage,
    paused: bool,
    input: Option<Direction>,
    score: u32,
    high_score: u32,
    lives: u32,
    extra_life_awarded: bool,
    ghosts_killed_by_power: u32,
    /// Set when a life is lost; Elroy waits until Clyde is out again.
    elroy_suspended: bool,
    tick: u64,
    /// Events handled during the last tick, in order.
    handled: Vec<GameEvent>,
}

impl Game {
    /// Creates a game on the arcade maze.
    pub fn new(settings: Settings) -> GameResult<Game> {
        Self::with_world(settings, World::arcade()?)
    }

    /// Creates a game on any world that has a bed for every ghost.
    pub fn with_world(settings: Settings, world: World) -> GameResult<Game> {
        let ghosts = GhostKind::ALL
            .into_iter()
            .map(|kind| Ghost::new(kind, &world))
            .collect::<GameResult<Vec<_>>>()?;
        let pacman = PacMan::new(&world);
        let level_number = settings.start_level.max(1);

        let mut game = Game {
            world,
            level_number,
            level: level_params(level_number),
            pacman,
            ghosts,
            door_man: DoorMan::new(level_number, settings.tick_rate),
            bonus: BonusControl::new(),
            waves: AttackWaves::new(level_number, settings.tick_rate),
            events: EventQueue::new(),
            commands: VecDeque::new(),
            rng: SmallRng::seed_from_u64(settings.seed),
            stage: GameStage::GameOver,
            paused: false,
            input: None,
            score: 0,
            high_score: 0,
            lives: settings.lives,
            extra_life_awarded: false,
            ghosts_killed_by_power: 0,
            elroy_suspended: false,
            tick: 0,
            handled: Vec::new(),
            settings,
        };
        game.bind_steerings();
        game.start_level(level_number);
        Ok(game)
    }

    fn bind_steerings(&mut self) {
        if self.settings.frightened == FrightenedBehavior::FleeToSafeCorner {
            for ghost in &mut self.ghosts {
                ghost.set_steering(GhostState::Frightened, Steering::flee(self.settings.portals_are_safe));
            }
        }
        match self.settings.autopilot {
            Autopilot::Off => {}
            Autopilot::RandomWander => self.pacman.set_steering(Steering::RandomWander),
            Autopilot::NearestFood => self.pacman.set_steering(Steering::follow_path(Goal::NearestFood)),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn level(&self) -> &LevelParams {
        self.level
    }

    pub fn pacman(&self) -> &PacMan {
        &self.pacman
    }

    /// Pac-Man, for scripted scenarios.
    pub fn pacman_mut(&mut self) -> &mut PacMan {
        &mut self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, kind: GhostKind) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.kind() == kind)
    }

    /// A ghost, for scripted scenarios.
    pub fn ghost_mut(&mut self, kind: GhostKind) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|g| g.kind() == kind)
    }

    pub fn door_man(&self) -> &DoorMan {
        &self.door_man
    }

    pub fn bonus(&self) -> &BonusControl {
        &self.bonus
    }

    pub fn waves(&self) -> &AttackWaves {
        &self.waves
    }

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Events handled during the last tick, in the order they were raised.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.handled
    }

    /// Queues a command; commands are applied at the start of the next tick.
    pub fn push_command(&mut self, command: GameCommand) {
        self.commands.push_back(command);
    }

    /// Blinky's "Cruise Elroy" stage for the food left on the board.
    pub fn elroy(&self) -> u8 {
        if self.elroy_suspended {
            return 0;
        }
        let left = self.world.food_remaining();
        if left <= self.level.elroy2_dots_left {
            2
        } else if left <= self.level.elroy1_dots_left {
            1
        } else {
            0
        }
    }

    /// Builds the context for one update pass, alongside the actors it is passed to.
    fn split(&mut self) -> (TickContext<'_>, &mut PacMan, &mut [Ghost], &mut DoorMan) {
        let pacman_tile = self.pacman.tile();
        let pacman_dir = self.pacman.move_dir();
        let blinky_tile = self.ghost(GhostKind::Blinky).map_or(pacman_tile, Ghost::tile);
        let hunting = self.waves.mode();
        let elroy = self.elroy();

        let ctx = TickContext {
            world: &self.world,
            level: self.level,
            level_number: self.level_number,
            tick_rate: self.settings.tick_rate,
            rng: &mut self.rng,
            events: &mut self.events,
            pacman_tile,
            pacman_dir,
            blinky_tile,
            hunting,
            elroy,
            input: self.input,
        };
        (ctx, &mut self.pacman, &mut self.ghosts, &mut self.door_man)
    }

    /// Advances the game by one tick.
    pub fn update(&mut self) {
        self.tick += 1;
        formatter::set_tick_count(self.tick);
        self.handled.clear();

        self.handle_commands();
        if self.paused {
            return;
        }

        match self.stage {
            GameStage::GettingReady { .. } => {
                if self.stage.countdown() {
                    self.pacman.wake_up();
                    self.set_stage(GameStage::Playing);
                }
            }
            GameStage::Playing => self.play_tick(),
            GameStage::GhostDying { .. } => {
                if self.stage.countdown() {
                    self.set_stage(GameStage::Playing);
                }
            }
            GameStage::PacManDying => {
                let (mut ctx, pacman, ..) = self.split();
                pacman.update(&mut ctx);
                if self.pacman.state() == PacManState::Collapsing {
                    self.lose_life();
                }
            }
            GameStage::LevelCompleted { .. } => {
                if self.stage.countdown() {
                    self.start_level(self.level_number + 1);
                }
            }
            GameStage::GameOver => {}
        }
    }

    fn set_stage(&mut self, stage: GameStage) {
        debug!(from = self.stage.as_ref(), to = stage.as_ref(), "Game stage changed");
        self.stage = stage;
    }

    fn handle_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            debug!(?command, "Handling command");
            match command {
                GameCommand::MovePlayer(dir) => self.input = Some(dir),
                GameCommand::TogglePause => {
                    self.paused = !self.paused;
                    info!(paused = self.paused, "Pause toggled");
                }
                GameCommand::SelectLevel(level) => self.start_level(level),
                GameCommand::Restart => self.restart(),
            }
        }
    }

    fn play_tick(&mut self) {
        if let Some(event) = self.waves.update(self.pacman.is_powerful()) {
            self.events.push(event);
        }

        {
            let (mut ctx, pacman, ..) = self.split();
            pacman.update(&mut ctx);
        }
        self.dispatch_events();
        if self.stage != GameStage::Playing {
            return;
        }

        {
            let (mut ctx, _, ghosts, door_man) = self.split();
            door_man.update(ghosts, &mut ctx);
        }
        self.dispatch_events();

        {
            let (mut ctx, _, ghosts, _) = self.split();
            for ghost in ghosts.iter_mut() {
                ghost.update(&mut ctx);
            }
        }
        self.check_collisions();
        self.dispatch_events();
        if self.stage != GameStage::Playing {
            return;
        }

        self.bonus.update();
        if let Some(value) = self.bonus.try_consume(self.pacman.tile(), self.settings.tick_rate) {
            self.events.push(GameEvent::BonusFound { value });
        }
        self.dispatch_events();

        self.door_man.update_doors(&self.world, &self.ghosts);
    }

    fn check_collisions(&mut self) {
        if !self.pacman.state().is_mobile() {
            return;
        }
        let tile = self.pacman.tile();
        for ghost in &self.ghosts {
            let dangerous = ghost.state().is_hunting() || ghost.state() == GhostState::Frightened;
            if dangerous && ghost.tile() == tile {
                self.events.push(GameEvent::PacManGhostCollision(ghost.kind()));
            }
        }
    }

    fn dispatch_events(&mut self) {
        while let Some(event) = self.events.pop() {
            self.handle_event(event);
            self.handled.push(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::FoodFound { tile, food } => {
                if let Err(e) = self.world.eat_food(tile) {
                    warn!(error = %e, "Food vanished before it was eaten");
                    return;
                }
                self.on_food_eaten(food);
            }
            GameEvent::BonusFound { value } => self.add_score(value),
            GameEvent::PacManGhostCollision(kind) => self.on_collision(kind),
            GameEvent::GhostKilled { ghost, bounty } => {
                self.add_score(bounty);
                let remaining_ticks = ticks(GHOST_DYING_SECONDS, self.settings.tick_rate);
                self.set_stage(GameStage::GhostDying { remaining_ticks, ghost });
            }
            GameEvent::PacManKilled(ghost) => {
                info!(killer = %ghost, lives = self.lives, "Pac-Man was caught");
                self.set_stage(GameStage::PacManDying);
            }
            GameEvent::GhostLeftHouse(GhostKind::Clyde) if self.elroy_suspended => {
                debug!("Elroy resumed");
                self.elroy_suspended = false;
            }
            GameEvent::LevelCompleted => {
                info!(level = self.level_number, score = self.score, "Level completed");
                let remaining_ticks = ticks(LEVEL_COMPLETE_SECONDS, self.settings.tick_rate);
                self.set_stage(GameStage::LevelCompleted { remaining_ticks });
            }
            _ => {}
        }

        let (mut ctx, pacman, ghosts, _) = self.split();
        pacman.on_event(event, &mut ctx);
        for ghost in ghosts.iter_mut() {
            ghost.on_event(event, &mut ctx);
        }
    }

    fn on_food_eaten(&mut self, food: Food) {
        match food {
            Food::Pellet => self.add_score(PELLET),
            Food::Energizer => {
                self.add_score(ENERGIZER);
                self.ghosts_killed_by_power = 0;
                self.events.push(GameEvent::PacManGainsPower);
            }
        }
        self.door_man.on_food_eaten(&self.ghosts);

        let eaten = self.world.food().eaten();
        if BONUS_PELLET_COUNTS.contains(&eaten) {
            let bonus = Bonus {
                symbol: self.level.bonus_symbol,
                value: self.level.bonus_value,
                tile: self.world.bonus_tile(),
            };
            self.bonus.activate(bonus, &mut self.rng, self.settings.tick_rate);
        }

        if self.world.food_remaining() == 0 {
            self.events.push(GameEvent::LevelCompleted);
        }
    }

    fn on_collision(&mut self, kind: GhostKind) {
        if self.stage == GameStage::PacManDying {
            return;
        }
        let Some(state) = self.ghost(kind).map(Ghost::state) else {
            return;
        };
        if state == GhostState::Frightened {
            let bounty = FIRST_GHOST_BOUNTY << self.ghosts_killed_by_power.min(MAX_BOUNTY_SHIFT);
            self.ghosts_killed_by_power += 1;
            info!(ghost = %kind, bounty, "Ghost eaten");
            self.events.push(GameEvent::GhostKilled { ghost: kind, bounty });
        } else if state.is_hunting() && !self.settings.pacman_immortal {
            self.events.push(GameEvent::PacManKilled(kind));
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
        if !self.extra_life_awarded && self.score >= self.settings.extra_life_score {
            self.extra_life_awarded = true;
            self.lives += 1;
            info!(score = self.score, lives = self.lives, "Extra life");
        }
    }

    fn reset_actors(&mut self) {
        self.pacman.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.input = None;
        self.events.clear();
        self.bonus.reset();
        self.waves = AttackWaves::new(self.level_number, self.settings.tick_rate);
        self.ghosts_killed_by_power = 0;
        let remaining_ticks = ticks(GET_READY_SECONDS, self.settings.tick_rate);
        self.set_stage(GameStage::GettingReady { remaining_ticks });
    }

    /// Starts a level from scratch with a full board.
    pub fn start_level(&mut self, level: u32) {
        self.level_number = level.max(1);
        self.level = level_params(self.level_number);
        self.world.restore_food();
        self.door_man.reset_for_level(self.level_number);
        self.elroy_suspended = false;
        self.reset_actors();
        info!(level = self.level_number, food = self.world.food_remaining(), "Level started");
    }

    /// A fresh game at the configured level.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.settings.lives;
        self.extra_life_awarded = false;
        self.paused = false;
        self.start_level(self.settings.start_level);
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            info!(score = self.score, high_score = self.high_score, "Game over");
            self.set_stage(GameStage::GameOver);
            return;
        }
        info!(lives = self.lives, "Life lost");
        self.door_man.on_life_lost();
        self.elroy_suspended = true;
        self.reset_actors();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tile::Tile;

    fn game() -> Game {
        Game::new(Settings::default()).unwrap()
    }

    fn run_until_playing(game: &mut Game) {
        while game.stage() != GameStage::Playing {
            game.update();
        }
    }

    #[test]
    fn test_getting_ready_then_playing() {
        let mut game = game();
        assert_eq!(game.stage(), GameStage::GettingReady { remaining_ticks: 120 });
        assert_eq!(game.pacman().state(), PacManState::InBed);
        for _ in 0..120 {
            game.update();
        }
        assert_eq!(game.stage(), GameStage::Playing);
        assert_eq!(game.pacman().state(), PacManState::Awake);
    }

    #[test]
    fn test_blinky_leaves_at_once() {
        let mut game = game();
        run_until_playing(&mut game);
        game.update();
        let blinky = game.ghost(GhostKind::Blinky).unwrap();
        assert!(blinky.state() != GhostState::Locked);
        assert!(game.last_events().contains(&GameEvent::GhostUnlocked(GhostKind::Blinky)));
    }

    #[test]
    fn test_eating_scores_and_counts() {
        let mut game = game();
        run_until_playing(&mut game);
        game.push_command(GameCommand::MovePlayer(Direction::Left));
        let total = game.world().food_remaining();
        for _ in 0..60 {
            game.update();
        }
        let eaten = total - game.world().food_remaining();
        assert!(eaten > 0);
        assert_eq!(game.score(), eaten * PELLET);
        assert_eq!(game.door_man().personal_counter(GhostKind::Pinky), 0);
    }

    #[test]
    fn test_bounty_doubles_and_caps() {
        let mut game = game();
        run_until_playing(&mut game);
        for kind in GhostKind::ALL {
            game.ghost_mut(kind).unwrap().set_state(GhostState::Frightened);
        }
        let mut bounties = Vec::new();
        for kind in [GhostKind::Blinky, GhostKind::Pinky, GhostKind::Inky, GhostKind::Clyde] {
            game.stage = GameStage::Playing;
            game.on_collision(kind);
            while let Some(event) = game.events.pop() {
                if let GameEvent::GhostKilled { bounty, .. } = event {
                    bounties.push(bounty);
                }
            }
        }
        assert_eq!(bounties, vec![200, 400, 800, 1600]);
    }

    #[test]
    fn test_energizer_resets_bounty() {
        let mut game = game();
        game.ghosts_killed_by_power = 3;
        game.on_food_eaten(Food::Energizer);
        assert_eq!(game.ghosts_killed_by_power, 0);
        assert_eq!(game.score(), ENERGIZER);
        assert_eq!(game.events.pop(), Some(GameEvent::PacManGainsPower));
    }

    #[test]
    fn test_extra_life_once() {
        let mut game = game();
        game.add_score(9_990);
        assert_eq!(game.lives(), 3);
        game.add_score(10);
        assert_eq!(game.lives(), 4);
        game.add_score(10_000);
        assert_eq!(game.lives(), 4);
        assert_eq!(game.high_score(), 20_000);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut game = game();
        game.push_command(GameCommand::TogglePause);
        for _ in 0..500 {
            game.update();
        }
        assert!(game.is_paused());
        assert_eq!(game.stage(), GameStage::GettingReady { remaining_ticks: 120 });
    }

    #[test]
    fn test_elroy_stages() {
        let mut game = game();
        assert_eq!(game.elroy(), 0);
        let food: Vec<Tile> = game.world().food().iter().map(|(tile, _)| tile).collect();
        let keep = game.level().elroy1_dots_left as usize;
        for tile in &food[keep..] {
            game.world.eat_food(*tile).unwrap();
        }
        assert_eq!(game.elroy(), 1);
        game.elroy_suspended = true;
        assert_eq!(game.elroy(), 0);
    }
}
