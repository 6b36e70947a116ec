//! This module defines the game maze and provides functions for navigating it.

pub mod builder;
pub mod direction;
pub mod food;
pub mod parser;
pub mod tile;
