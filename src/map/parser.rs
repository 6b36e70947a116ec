//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::map::tile::Tile;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub width: usize,
    pub height: usize,
    /// The parsed tile layout, row-major.
    pub tiles: Vec<MapTile>,
    /// Pac-Man's starting position.
    pub pacman_start: Tile,
}

impl ParsedMap {
    /// Returns the tile at a board position, or `None` outside the board.
    pub fn get(&self, tile: Tile) -> Option<MapTile> {
        if tile.col < 0 || tile.row < 0 || tile.col as usize >= self.width || tile.row as usize >= self.height {
            return None;
        }
        Some(self.tiles[tile.row as usize * self.width + tile.col as usize])
    }

    /// Iterates over every board position with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, MapTile)> + '_ {
        self.tiles.iter().enumerate().map(|(index, tile)| {
            let position = Tile::new((index % self.width) as i32, (index / self.width) as i32);
            (position, *tile)
        })
    }
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::Energizer),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            'P' => Ok(MapTile::Empty), // Pac-Man's starting position, treated as empty
            '=' => Ok(MapTile::Door),
            '-' => Ok(MapTile::Room),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or ragged, contains unknown
    /// characters, or does not define exactly one Pac-Man start.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().map(|row| row.chars().count()).ok_or(ParseError::Empty)?;
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    width: row_width,
                    expected: width,
                });
            }

            for (x, character) in line.chars().enumerate() {
                tiles.push(Self::parse_character(character)?);
                if character == 'P' {
                    starts.push(Tile::new(x as i32, y as i32));
                }
            }
        }

        let pacman_start = match starts.as_slice() {
            [] => return Err(ParseError::MissingPacManStart),
            [start] => *start,
            many => return Err(ParseError::DuplicatePacManStart(many.len())),
        };

        Ok(ParsedMap {
            width,
            height: raw_board.len(),
            tiles,
            pacman_start,
        })
    }
}
