//! Headless simulation: plays a game without a window and logs what happens.
//!
//! Settings come from `PACMAN_`-prefixed environment variables; with no
//! autopilot configured Pac-Man is steered by a random wanderer.

use anyhow::{Context, Result};
use tracing::info;

use pacman_core::config::{Autopilot, Settings};
use pacman_core::game::stage::GameStage;
use pacman_core::game::Game;
use pacman_core::logging::setup_logging;

/// Ten simulated minutes at the default rate.
const DEFAULT_TICKS: u64 = 60 * 60 * 10;

fn main() -> Result<()> {
    setup_logging("pacman_core=info,pacman_sim=info");

    let mut settings = Settings::load().context("Could not load settings")?;
    if settings.autopilot == Autopilot::Off {
        settings.autopilot = Autopilot::RandomWander;
    }
    let max_ticks = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>().with_context(|| format!("Invalid tick count {arg:?}"))?,
        None => DEFAULT_TICKS,
    };

    info!(?settings, max_ticks, "Starting simulation");
    let mut game = Game::new(settings).context("Could not create game")?;

    while game.tick() < max_ticks && game.stage() != GameStage::GameOver {
        game.update();
    }

    info!(
        ticks = game.tick(),
        level = game.level_number(),
        score = game.score(),
        lives = game.lives(),
        stage = game.stage().as_ref(),
        "Simulation finished"
    );
    Ok(())
}
