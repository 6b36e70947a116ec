//! Per-level difficulty table of the arcade game.

use strum_macros::{AsRefStr, Display, EnumIter};

/// Bonus fruit (and non-fruit) symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BonusSymbol {
    Cherries,
    Strawberry,
    Peach,
    Apple,
    Grapes,
    Galaxian,
    Bell,
    Key,
}

/// The difficulty parameters of one level.
///
/// Speeds are factors of the base speed; `power_seconds` of zero means an
/// energizer only makes the ghosts turn around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub bonus_symbol: BonusSymbol,
    pub bonus_value: u32,
    pub pacman_speed: f32,
    pub pacman_power_speed: f32,
    pub ghost_speed: f32,
    pub ghost_tunnel_speed: f32,
    pub ghost_frightened_speed: f32,
    /// Blinky becomes "Cruise Elroy" when at most this much food is left.
    pub elroy1_dots_left: u32,
    pub elroy1_speed: f32,
    pub elroy2_dots_left: u32,
    pub elroy2_speed: f32,
    pub power_seconds: f32,
    pub flashes: u32,
}

const fn row(
    bonus_symbol: BonusSymbol,
    bonus_value: u32,
    pacman: u8,
    ghost: u8,
    tunnel: u8,
    elroy1_dots_left: u32,
    elroy1: u8,
    elroy2_dots_left: u32,
    elroy2: u8,
    pacman_power: u8,
    frightened: u8,
    power_seconds: u8,
    flashes: u32,
) -> LevelParams {
    LevelParams {
        bonus_symbol,
        bonus_value,
        pacman_speed: pacman as f32 / 100.0,
        pacman_power_speed: pacman_power as f32 / 100.0,
        ghost_speed: ghost as f32 / 100.0,
        ghost_tunnel_speed: tunnel as f32 / 100.0,
        ghost_frightened_speed: frightened as f32 / 100.0,
        elroy1_dots_left,
        elroy1_speed: elroy1 as f32 / 100.0,
        elroy2_dots_left,
        elroy2_speed: elroy2 as f32 / 100.0,
        power_seconds: power_seconds as f32,
        flashes,
    }
}

use BonusSymbol::*;

/// Levels 1 through 21; every later level plays like level 21.
#[rustfmt::skip]
pub const LEVELS: [LevelParams; 21] = [
    //   bonus        pts  pac ghst tnl  e1  e1%  e2  e2% pwr% frt sec fl
    row(Cherries,    100,  80,  75, 40,  20,  80, 10,  85,  90, 50,  6, 5),
    row(Strawberry,  300,  90,  85, 45,  30,  90, 15,  95,  95, 55,  5, 5),
    row(Peach,       500,  90,  85, 45,  40,  90, 20,  95,  95, 55,  4, 5),
    row(Peach,       500,  90,  85, 45,  40,  90, 20,  95,  95, 55,  3, 5),
    row(Apple,       700, 100,  95, 50,  40, 100, 20, 105, 100, 60,  2, 5),
    row(Apple,       700, 100,  95, 50,  50, 100, 25, 105, 100, 60,  5, 5),
    row(Grapes,     1000, 100,  95, 50,  50, 100, 25, 105, 100, 60,  2, 5),
    row(Grapes,     1000, 100,  95, 50,  50, 100, 25, 105, 100, 60,  2, 5),
    row(Galaxian,   2000, 100,  95, 50,  60, 100, 30, 105, 100, 60,  1, 3),
    row(Galaxian,   2000, 100,  95, 50,  60, 100, 30, 105, 100, 60,  5, 5),
    row(Bell,       3000, 100,  95, 50,  60, 100, 30, 105, 100, 60,  2, 5),
    row(Bell,       3000, 100,  95, 50,  80, 100, 40, 105, 100, 60,  1, 3),
    row(Key,        5000, 100,  95, 50,  80, 100, 40, 105, 100, 60,  1, 3),
    row(Key,        5000, 100,  95, 50,  80, 100, 40, 105, 100, 60,  3, 5),
    row(Key,        5000, 100,  95, 50, 100, 100, 50, 105, 100, 60,  1, 3),
    row(Key,        5000, 100,  95, 50, 100, 100, 50, 105, 100, 60,  1, 3),
    row(Key,        5000, 100,  95, 50, 100, 100, 50, 105, 100,  0,  0, 0),
    row(Key,        5000, 100,  95, 50, 100, 100, 50, 105, 100, 60,  1, 3),
    row(Key,        5000, 100,  95, 50, 120, 100, 60, 105, 100,  0,  0, 0),
    row(Key,        5000, 100,  95, 50, 120, 100, 60, 105, 100,  0,  0, 0),
    row(Key,        5000,  90,  95, 50, 120, 100, 60, 105,  90,  0,  0, 0),
];

/// Returns the parameters of a 1-based level number.
///
/// Levels past the end of the table use its last row; level 0 is treated as level 1.
pub fn level_params(level: u32) -> &'static LevelParams {
    let index = (level.max(1) as usize - 1).min(LEVELS.len() - 1);
    &LEVELS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_level() {
        let params = level_params(1);
        assert_eq!(params.bonus_symbol, BonusSymbol::Cherries);
        assert_eq!(params.bonus_value, 100);
        assert_eq!(params.pacman_speed, 0.8);
        assert_eq!(params.ghost_speed, 0.75);
        assert_eq!(params.power_seconds, 6.0);
        assert_eq!(params.flashes, 5);
    }

    #[test]
    fn test_levels_clamp_to_last_row() {
        assert_eq!(level_params(25), level_params(21));
        assert_eq!(level_params(u32::MAX), &LEVELS[20]);
        assert_eq!(level_params(0), level_params(1));
    }

    #[test]
    fn test_elroy_thresholds_are_ordered() {
        for params in LEVELS.iter() {
            assert!(params.elroy2_dots_left < params.elroy1_dots_left);
        }
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(BonusSymbol::Galaxian.as_ref(), "galaxian");
        assert_eq!(BonusSymbol::Key.to_string(), "key");
    }
}
