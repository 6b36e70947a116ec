//! This module contains all the constants used by the simulation.

use glam::UVec2;

use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// The logical tick rate the simulation is tuned for.
pub const TICKS_PER_SECOND: u32 = 60;

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 8.0;
/// The size of the default game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);

/// Converts seconds into whole ticks at the given tick rate.
pub fn ticks(seconds: f32, tick_rate: u32) -> u32 {
    (seconds * tick_rate as f32).round() as u32
}

pub mod speed {
    /// Pixels per tick at a speed factor of 100%.
    pub const BASE_SPEED: f32 = 1.25;
    /// Speed factor of ghosts walking inside the house or bouncing in bed.
    pub const HOUSE_SPEED: f32 = 0.5;
    /// Speed factor of a dead ghost's eyes heading home.
    pub const DEAD_SPEED: f32 = 1.5;
}

pub mod score {
    pub const PELLET: u32 = 10;
    pub const ENERGIZER: u32 = 50;
    /// Bounty for the first ghost eaten during one energizer activation; it doubles per kill.
    pub const FIRST_GHOST_BOUNTY: u32 = 200;
    pub const EXTRA_LIFE: u32 = 10_000;
}

pub mod timing {
    /// Length of one blue/white frightened flash.
    pub const FLASH_TICKS: u32 = 28;
    /// How long Pac-Man stays dead before collapsing, in seconds.
    pub const PACMAN_DYING_SECONDS: f32 = 2.5;
    /// Movement ticks skipped after eating any food.
    pub const DIGESTION_TICKS: u32 = 1;
    pub const BONUS_ACTIVE_SECONDS: f32 = 9.0;
    pub const BONUS_CONSUMED_SECONDS: f32 = 3.0;
    pub const GET_READY_SECONDS: f32 = 2.0;
    pub const GHOST_DYING_SECONDS: f32 = 1.0;
    pub const LEVEL_COMPLETE_SECONDS: f32 = 2.0;
    /// Pellets eaten at which a bonus appears.
    pub const BONUS_PELLET_COUNTS: [u32; 2] = [70, 170];
}

/// An enum representing the different types of tiles on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty, walkable tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    Energizer,
    /// A tunnel tile: walkable, slows ghosts down.
    Tunnel,
    /// A ghost house door.
    Door,
    /// The inside of a ghost house.
    Room,
}

/// The raw layout of the default game board, as a 2D array of characters.
///
/// `P` marks Pac-Man's starting tile.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #------# ##.######",
    "TTTTTT.   #------#   .TTTTTT",
    "######.## #------# ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Ghost beds of the default board, in Blinky, Pinky, Inky, Clyde order.
///
/// Blinky's bed sits just outside the house, above the door.
pub const BEDS: [(Tile, Direction); 4] = [
    (Tile::new(13, 11), Direction::Left),
    (Tile::new(13, 14), Direction::Down),
    (Tile::new(11, 14), Direction::Up),
    (Tile::new(16, 14), Direction::Up),
];

/// Tiles hunting ghosts may not leave upwards.
pub const ONE_WAY_TILES: [(Tile, Direction); 4] = [
    (Tile::new(12, 11), Direction::Down),
    (Tile::new(15, 11), Direction::Down),
    (Tile::new(12, 23), Direction::Down),
    (Tile::new(15, 23), Direction::Down),
];

/// Where bonus fruit appears on the default board.
pub const BONUS_TILE: Tile = Tile::new(13, 17);

/// Scatter targets, outside the board, in Blinky, Pinky, Inky, Clyde order.
pub const SCATTER_TARGETS: [Tile; 4] = [Tile::new(25, -3), Tile::new(2, -3), Tile::new(27, 32), Tile::new(0, 32)];
