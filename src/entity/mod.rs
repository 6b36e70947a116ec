//! The actors of the game: Pac-Man, the ghosts, and the movement they share.

pub mod ghost;
pub mod mover;
pub mod pacman;
