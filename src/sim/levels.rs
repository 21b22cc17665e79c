//! The ten authored layouts: nine mazes and the open boss arena
//!
//! All layouts are 25x19 cells; `#` is wall, `.` is open floor.

use rand::Rng;

use super::grid::Grid;
use super::level::Level;
use super::spawn::{enemy_count_for_level, generate_edge_enemy_spawns};
use crate::consts::MIN_SPAWN_DISTANCE;

/// Number of levels in a full run
pub const LEVEL_COUNT: u32 = 10;

/// Layout size in cells
pub const LEVEL_WIDTH: i32 = 25;
pub const LEVEL_HEIGHT: i32 = 19;

/// Display names, indexed by 0-based level
pub const LEVEL_NAMES: [&str; LEVEL_COUNT as usize] = [
    "Corridors",
    "Crossroads",
    "Switchbacks",
    "Thicket",
    "Lattice",
    "Dead Ends",
    "Labyrinth",
    "Bramble",
    "Gauntlet",
    "Boss Arena",
];

const LAYOUTS: [&[&str]; LEVEL_COUNT as usize] = [
    LEVEL_1, LEVEL_2, LEVEL_3, LEVEL_4, LEVEL_5, LEVEL_6, LEVEL_7, LEVEL_8, LEVEL_9, LEVEL_10,
];

/// Wall grid for a 0-based level index (clamped to the last level)
pub fn level_grid(index: u32) -> Grid {
    let index = index.min(LEVEL_COUNT - 1) as usize;
    Grid::from_layout(LEVEL_WIDTH, LEVEL_HEIGHT, LAYOUTS[index])
}

/// Build a fresh level: grid, safe center spawn and a new set of edge enemies
pub fn build_level<R: Rng + ?Sized>(index: u32, rng: &mut R) -> Level {
    let index = index.min(LEVEL_COUNT - 1);
    let level = Level::new(level_grid(index));
    let spawns = generate_edge_enemy_spawns(
        &level,
        enemy_count_for_level(index),
        MIN_SPAWN_DISTANCE,
        rng,
    );
    log::info!(
        "Level {} ({}): {} enemies",
        index + 1,
        LEVEL_NAMES[index as usize],
        spawns.len()
    );
    level.with_enemy_spawns(spawns)
}

/// True for the last level of the run
pub fn is_final_level(index: u32) -> bool {
    index + 1 >= LEVEL_COUNT
}

const LEVEL_1: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.###.#####.#####.#####.#",
    "#.......................#",
    "#.#####.###.###.#####.#.#",
    "#.......................#",
    "#.###.#####.#####.###.#.#",
    "#.......................#",
    "#.#.#####.###.#####.#.#.#",
    "#.......................#",
    "#.###.#####.#####.###.#.#",
    "#.......................#",
    "#.#####.###.###.#####.#.#",
    "#.......................#",
    "#.###.#####.#####.###.#.#",
    "#.......................#",
    "#.#####.###.###.#####.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_2: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.###.###.#.###.###.###.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#.###.#.###.###.#.#.#.#.#",
    "#.......................#",
    "#.#.#.#.#.#.#.#.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#.###.#.###.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#.###.###.#.###.###.###.#",
    "#.......................#",
    "#########################",
];

const LEVEL_3: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.###.#.###.#.###.#.###.#",
    "#.......................#",
    "#.#.###.#.###.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.#.###.#.###.#",
    "#.......................#",
    "#.#.#.#.#.###.#.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#########################",
];

const LEVEL_4: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.#.###.#.###.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#.#.#.#.#.#.#.#.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#.###.#.###.#.###.#.#.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_5: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.#.#.###.#.###.#.###.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.#.###.#",
    "#.......................#",
    "#.#.#.#.###.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_6: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.###.#.#.###.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#.#.#.#.#.#.#.#.#.#.#.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_7: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.#.#.#.###.###.#.#.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.#.#.#.###.###.#.#.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_8: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.###.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#.#.#.#.#.#.#.#.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.###.#.###.#",
    "#.......................#",
    "#.###.#.###.#.###.#.#.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_9: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.#.#.#.#.###.#.#.#.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.#.#.#.#.#.###.#.#",
    "#.......................#",
    "#.#.#.###.#.###.#.#.#.#.#",
    "#.......................#",
    "#.#.###.#.#.#.#.###.#.#.#",
    "#.......................#",
    "#.###.#.###.###.#.###.#.#",
    "#.......................#",
    "#########################",
];

const LEVEL_10: &[&str] = &[
    "#########################",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#.......................#",
    "#########################",
];
