//! World construction and the navigation queries every actor relies on.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use glam::Vec2;
use pathfinding::prelude::{bfs, bfs_reach};
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{MapTile, BEDS, BONUS_TILE, ONE_WAY_TILES, RAW_BOARD};
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::food::{Food, FoodFlags, FoodMap};
use crate::map::parser::{MapTileParser, ParsedMap};
use crate::map::tile::Tile;

bitflags! {
    /// Defines what kind of mover is asking to cross a tile boundary.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TraversalFlags: u8 {
        const PACMAN = 1 << 0;
        const GHOST = 1 << 1;
        /// May cross house doors and walk inside a house.
        const HOUSE = 1 << 2;
        /// Must respect one-way tiles.
        const ONE_WAY = 1 << 3;
    }
}

/// A pair of exterior cells joined through the board edge.
///
/// Moving left out of `left` lands on `right` and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    pub left: Tile,
    pub right: Tile,
}

/// Resting place of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bed {
    pub tile: Tile,
    /// The direction a ghost faces when it is put to bed.
    pub dir: Direction,
}

impl Bed {
    pub fn center(&self) -> Vec2 {
        self.tile.center()
    }
}

/// One or more adjacent door tiles of a house.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub tiles: SmallVec<[Tile; 2]>,
    /// The direction leading from the house room through the door to the outside.
    pub exit_dir: Direction,
}

impl Door {
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// The first tile outside the house in front of this door.
    pub fn entry(&self) -> Tile {
        self.tiles[0].offset(self.exit_dir)
    }
}

/// A ghost house: a walled room reachable only through its doors.
#[derive(Debug, Clone)]
pub struct House {
    pub room: HashSet<Tile>,
    pub doors: Vec<Door>,
    pub beds: Vec<Bed>,
}

impl House {
    /// Returns `true` for room and door tiles.
    pub fn contains(&self, tile: Tile) -> bool {
        self.room.contains(&tile) || self.doors.iter().any(|door| door.contains(tile))
    }

    /// The tile outside the main door that ghosts leave to and return to.
    pub fn entry(&self) -> Tile {
        self.doors[0].entry()
    }
}

/// Everything needed to build a world besides the character grid.
#[derive(Debug, Clone, Copy)]
pub struct MazeLayout<'a> {
    pub board: &'a [&'a str],
    /// Ghost beds in Blinky, Pinky, Inky, Clyde order.
    pub beds: &'a [(Tile, Direction)],
    pub one_way_tiles: &'a [(Tile, Direction)],
    pub bonus_tile: Tile,
}

impl MazeLayout<'static> {
    /// The classic arcade maze.
    pub fn arcade() -> Self {
        Self {
            board: &RAW_BOARD,
            beds: &BEDS,
            one_way_tiles: &ONE_WAY_TILES,
            bonus_tile: BONUS_TILE,
        }
    }
}

/// The maze of one level: immutable terrain plus the food still on it.
#[derive(Debug, Clone)]
pub struct World {
    width: i32,
    height: i32,
    terrain: ParsedMap,
    walkable: HashSet<Tile>,
    food: FoodMap,
    intersections: HashSet<Tile>,
    portals: Vec<Portal>,
    one_way_tiles: HashMap<Tile, Direction>,
    houses: Vec<House>,
    corners: [Tile; 4],
    bonus_tile: Tile,
}

impl World {
    /// Builds the classic arcade world.
    pub fn arcade() -> GameResult<World> {
        Self::new(MazeLayout::arcade())
    }

    /// Builds a world from a layout.
    ///
    /// # Errors
    ///
    /// Fails when the board cannot be parsed, a bed lies outside the walkable
    /// area, a house has no door, or no walkable tile exists to anchor corners.
    pub fn new(layout: MazeLayout<'_>) -> GameResult<World> {
        let terrain = MapTileParser::parse_board(layout.board)?;
        let width = terrain.width as i32;
        let height = terrain.height as i32;

        let food_cells = terrain
            .tiles
            .iter()
            .map(|tile| match tile {
                MapTile::Pellet => FoodFlags::PELLET,
                MapTile::Energizer => FoodFlags::ENERGIZER,
                _ => FoodFlags::empty(),
            })
            .collect();
        let food = FoodMap::new(terrain.width, terrain.height, food_cells);

        // Only what Pac-Man can reach (plus the houses behind their doors) is part of the maze
        let walkable: HashSet<Tile> = bfs_reach(terrain.pacman_start, |&tile| {
            Direction::DIRECTIONS
                .into_iter()
                .map(move |dir| tile.offset(dir))
                .filter(|&next| terrain.get(next).is_some_and(|t| t != MapTile::Wall))
                .collect::<SmallVec<[Tile; 4]>>()
        })
        .collect();

        let portals = (0..height)
            .filter(|&row| walkable.contains(&Tile::new(0, row)) && walkable.contains(&Tile::new(width - 1, row)))
            .map(|row| Portal {
                left: Tile::new(-1, row),
                right: Tile::new(width, row),
            })
            .collect::<Vec<_>>();

        let mut world = World {
            width,
            height,
            terrain,
            walkable,
            food,
            intersections: HashSet::new(),
            portals,
            one_way_tiles: layout.one_way_tiles.iter().copied().collect(),
            houses: Vec::new(),
            corners: [Tile::default(); 4],
            bonus_tile: layout.bonus_tile,
        };

        world.houses = world.build_houses(layout.beds)?;
        // Intersections must see the final house geometry, house tiles do not count as exits.
        world.intersections = world.find_intersections();
        world.corners = world.find_corners()?;

        debug!(
            width,
            height,
            food = world.food.total(),
            intersections = world.intersections.len(),
            portals = world.portals.len(),
            houses = world.houses.len(),
            "World built"
        );

        Ok(world)
    }

    fn build_houses(&self, beds: &[(Tile, Direction)]) -> Result<Vec<House>, MapError> {
        let mut houses = Vec::new();
        let mut seen = HashSet::new();

        for (tile, kind) in self.terrain.iter() {
            if kind != MapTile::Room || seen.contains(&tile) {
                continue;
            }

            // Flood fill the room this tile belongs to
            let mut room = HashSet::new();
            let mut stack = vec![tile];
            while let Some(current) = stack.pop() {
                if !room.insert(current) {
                    continue;
                }
                for dir in Direction::DIRECTIONS {
                    let next = current.offset(dir);
                    if self.terrain.get(next) == Some(MapTile::Room) && !room.contains(&next) {
                        stack.push(next);
                    }
                }
            }
            seen.extend(room.iter().copied());

            let doors = self.find_doors(&room);
            if doors.is_empty() {
                return Err(MapError::InvalidConfig(format!("house at {tile} has no door")));
            }

            houses.push(House {
                room,
                doors,
                beds: Vec::new(),
            });
        }

        for &(tile, dir) in beds {
            if !self.is_accessible(tile) {
                return Err(MapError::InvalidConfig(format!("bed {tile} is not walkable")));
            }
            // A bed belongs to the house whose entry is closest; Blinky's bed lies outside.
            let house = houses
                .iter_mut()
                .min_by_key(|house| house.entry().manhattan_distance(tile))
                .ok_or_else(|| MapError::InvalidConfig("beds defined but the board has no house".to_string()))?;
            house.beds.push(Bed { tile, dir });
        }

        Ok(houses)
    }

    fn find_doors(&self, room: &HashSet<Tile>) -> Vec<Door> {
        let mut doors: Vec<Door> = Vec::new();
        // Scan in row-major order so door tiles come out left to right
        for (tile, kind) in self.terrain.iter() {
            if kind != MapTile::Door {
                continue;
            }
            let Some(exit_dir) = Direction::DIRECTIONS
                .into_iter()
                .find(|dir| room.contains(&tile.offset(dir.opposite())))
            else {
                continue;
            };

            match doors
                .iter_mut()
                .find(|door| door.exit_dir == exit_dir && door.tiles.iter().any(|t| t.manhattan_distance(tile) == 1))
            {
                Some(door) => door.tiles.push(tile),
                None => doors.push(Door {
                    tiles: SmallVec::from_slice(&[tile]),
                    exit_dir,
                }),
            }
        }
        doors
    }

    fn find_intersections(&self) -> HashSet<Tile> {
        self.terrain
            .iter()
            .map(|(tile, _)| tile)
            .filter(|&tile| self.is_accessible(tile) && !self.inside_house(tile) && !self.is_door(tile))
            .filter(|&tile| {
                Direction::DIRECTIONS
                    .iter()
                    .filter(|&&dir| {
                        let next = self.neighbor(tile, dir);
                        self.is_accessible(next) && !self.inside_house(next) && !self.is_door(next)
                    })
                    .count()
                    > 2
            })
            .collect()
    }

    /// The walkable tile nearest to each board corner, in NW, NE, SW, SE order.
    fn find_corners(&self) -> Result<[Tile; 4], MapError> {
        let anchors = [
            Tile::new(0, 0),
            Tile::new(self.width - 1, 0),
            Tile::new(0, self.height - 1),
            Tile::new(self.width - 1, self.height - 1),
        ];
        let mut corners = [Tile::default(); 4];
        for (corner, anchor) in corners.iter_mut().zip(anchors) {
            // Row-major scan with a strict comparison keeps the first of equally near tiles
            *corner = self
                .terrain
                .iter()
                .map(|(tile, _)| tile)
                .filter(|&tile| self.is_accessible(tile) && !self.inside_house(tile) && !self.is_door(tile))
                .min_by_key(|tile| tile.manhattan_distance(anchor))
                .ok_or_else(|| MapError::InvalidConfig("board has no walkable tile".to_string()))?;
        }
        Ok(corners)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if the tile lies on the board proper.
    pub fn in_bounds(&self, tile: Tile) -> bool {
        (0..self.width).contains(&tile.col) && (0..self.height).contains(&tile.row)
    }

    /// The terrain at a tile; `None` outside the board.
    pub fn map_tile(&self, tile: Tile) -> Option<MapTile> {
        self.terrain.get(tile)
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn is_portal(&self, tile: Tile) -> bool {
        self.portals.iter().any(|p| p.left == tile || p.right == tile)
    }

    /// Whether anything may ever stand on the tile.
    ///
    /// Outside the board only portal cells are accessible; walled-off pockets
    /// of the board are not.
    pub fn is_accessible(&self, tile: Tile) -> bool {
        self.walkable.contains(&tile) || self.is_portal(tile)
    }

    pub fn is_intersection(&self, tile: Tile) -> bool {
        self.intersections.contains(&tile)
    }

    /// Tunnel tiles slow ghosts down; portal cells count as tunnel.
    pub fn is_tunnel(&self, tile: Tile) -> bool {
        self.terrain.get(tile) == Some(MapTile::Tunnel) || self.is_portal(tile)
    }

    pub fn is_door(&self, tile: Tile) -> bool {
        self.terrain.get(tile) == Some(MapTile::Door)
    }

    /// Returns `true` for tiles inside a house room (doors excluded).
    pub fn inside_house(&self, tile: Tile) -> bool {
        self.terrain.get(tile) == Some(MapTile::Room)
    }

    /// The direction a one-way tile restricts travel to, if any.
    pub fn one_way(&self, tile: Tile) -> Option<Direction> {
        self.one_way_tiles.get(&tile).copied()
    }

    /// The tile one step away, following portals transparently.
    pub fn neighbor(&self, tile: Tile, dir: Direction) -> Tile {
        for portal in &self.portals {
            if tile == portal.left && dir == Direction::Left {
                return portal.right;
            }
            if tile == portal.right && dir == Direction::Right {
                return portal.left;
            }
        }
        tile.offset(dir)
    }

    /// Whether a mover with the given permissions may step from `from` in direction `dir`.
    pub fn can_move(&self, from: Tile, dir: Direction, flags: TraversalFlags) -> bool {
        let to = self.neighbor(from, dir);
        if !self.is_accessible(to) {
            return false;
        }
        if (self.is_door(to) || self.inside_house(to)) && !flags.contains(TraversalFlags::HOUSE) {
            return false;
        }
        if flags.contains(TraversalFlags::ONE_WAY) {
            if let Some(allowed) = self.one_way(from) {
                if dir == allowed.opposite() {
                    return false;
                }
            }
        }
        true
    }

    /// Whether a mover may step between two adjacent tiles (portal pairs included).
    pub fn can_move_between(&self, from: Tile, to: Tile, flags: TraversalFlags) -> bool {
        self.direction_between(from, to)
            .is_some_and(|dir| self.can_move(from, dir, flags))
    }

    /// The direction leading from `from` to an adjacent `to`, portals included.
    pub fn direction_between(&self, from: Tile, to: Tile) -> Option<Direction> {
        Direction::DIRECTIONS
            .into_iter()
            .find(|&dir| self.neighbor(from, dir) == to)
    }

    /// Shortest walk between two tiles outside the houses, both ends included.
    pub fn shortest_path(&self, from: Tile, to: Tile) -> Option<Vec<Tile>> {
        self.shortest_path_with(from, to, TraversalFlags::GHOST)
    }

    /// Breadth-first shortest walk for a mover with the given permissions.
    ///
    /// Neighbors are expanded in direction priority order, so the result is
    /// deterministic for a given world.
    pub fn shortest_path_with(&self, from: Tile, to: Tile, flags: TraversalFlags) -> Option<Vec<Tile>> {
        bfs(
            &from,
            |&tile| {
                Direction::DIRECTIONS
                    .into_iter()
                    .filter(move |&dir| self.can_move(tile, dir, flags))
                    .map(move |dir| self.neighbor(tile, dir))
                    .collect::<SmallVec<[Tile; 4]>>()
            },
            |&tile| tile == to,
        )
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// The house a room or door tile belongs to.
    pub fn house_at(&self, tile: Tile) -> Option<&House> {
        self.houses.iter().find(|house| house.contains(tile))
    }

    /// Ghost bed `index` across all houses, in layout order.
    pub fn bed(&self, index: usize) -> Option<Bed> {
        self.houses.iter().flat_map(|house| house.beds.iter()).nth(index).copied()
    }

    /// The house a bed belongs to.
    pub fn house_of_bed(&self, bed: Bed) -> Option<&House> {
        self.houses.iter().find(|house| house.beds.contains(&bed))
    }

    /// The walkable tiles nearest to the board corners, in NW, NE, SW, SE order.
    pub fn corners(&self) -> [Tile; 4] {
        self.corners
    }

    pub fn bonus_tile(&self) -> Tile {
        self.bonus_tile
    }

    pub fn pacman_start(&self) -> Tile {
        self.terrain.pacman_start
    }

    pub fn food(&self) -> &FoodMap {
        &self.food
    }

    pub fn has_food(&self, tile: Tile) -> bool {
        self.food.food_at(tile).is_some()
    }

    pub fn food_at(&self, tile: Tile) -> Option<Food> {
        self.food.food_at(tile)
    }

    /// Eats the food at `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NoFood`] if the tile holds nothing; check [`World::has_food`] first.
    pub fn eat_food(&mut self, tile: Tile) -> Result<Food, MapError> {
        self.food.eat(tile)
    }

    pub fn restore_food(&mut self) {
        self.food.restore();
    }

    pub fn food_remaining(&self) -> u32 {
        self.food.remaining()
    }
}
