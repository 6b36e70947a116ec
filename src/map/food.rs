//! Per-tile food bookkeeping owned by the world.

use bitflags::bitflags;

use crate::error::MapError;
use crate::map::tile::Tile;

bitflags! {
    /// What a tile holds, and whether it has been eaten this level.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FoodFlags: u8 {
        const PELLET = 1 << 0;
        const ENERGIZER = 1 << 1;
        const EATEN = 1 << 2;
    }
}

/// The kind of food found on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Food {
    Pellet,
    Energizer,
}

/// Food layout of a board, stored row-major alongside the terrain.
#[derive(Debug, Clone)]
pub struct FoodMap {
    width: usize,
    height: usize,
    cells: Vec<FoodFlags>,
    total: u32,
    eaten: u32,
}

impl FoodMap {
    pub fn new(width: usize, height: usize, cells: Vec<FoodFlags>) -> Self {
        let total = cells
            .iter()
            .filter(|f| f.intersects(FoodFlags::PELLET | FoodFlags::ENERGIZER))
            .count() as u32;
        Self {
            width,
            height,
            cells,
            total,
            eaten: 0,
        }
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        if tile.col < 0 || tile.row < 0 || tile.col as usize >= self.width || tile.row as usize >= self.height {
            return None;
        }
        Some(tile.row as usize * self.width + tile.col as usize)
    }

    /// Returns the uneaten food at a tile. Tiles outside the board never hold food.
    pub fn food_at(&self, tile: Tile) -> Option<Food> {
        let flags = self.cells[self.index(tile)?];
        if flags.contains(FoodFlags::EATEN) {
            None
        } else if flags.contains(FoodFlags::ENERGIZER) {
            Some(Food::Energizer)
        } else if flags.contains(FoodFlags::PELLET) {
            Some(Food::Pellet)
        } else {
            None
        }
    }

    /// Marks the food at `tile` as eaten.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NoFood`] if there is nothing left to eat there; callers
    /// are expected to check [`FoodMap::food_at`] first.
    pub fn eat(&mut self, tile: Tile) -> Result<Food, MapError> {
        let food = self.food_at(tile).ok_or(MapError::NoFood(tile))?;
        if let Some(index) = self.index(tile) {
            self.cells[index].insert(FoodFlags::EATEN);
        }
        self.eaten += 1;
        Ok(food)
    }

    /// Puts every piece of food back, as at the start of a level.
    pub fn restore(&mut self) {
        for cell in &mut self.cells {
            cell.remove(FoodFlags::EATEN);
        }
        self.eaten = 0;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn remaining(&self) -> u32 {
        self.total - self.eaten
    }

    /// Iterates over all tiles still holding food, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Food)> + '_ {
        (0..self.cells.len()).filter_map(move |index| {
            let tile = Tile::new((index % self.width) as i32, (index / self.width) as i32);
            self.food_at(tile).map(|food| (tile, food))
        })
    }
}
