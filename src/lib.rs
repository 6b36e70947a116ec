//! Deterministic actor AI and maze navigation for a Pac-Man clone.
//!
//! The core is headless: a [`game::Game`] is driven one tick at a time and
//! exposes its actors for any renderer or input layer to read.

pub mod bonus;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod house;
pub mod level;
pub mod logging;
pub mod map;
pub mod steering;
