//! A live level: wall grid plus spawn data and the spatial queries built on it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EnemyKind;
use super::grid::{Grid, RayEnd};
use crate::cell_to_pixel;
use crate::consts::*;

/// Last-chance spawn candidates: four corner interiors, then the map center
pub const FALLBACK_SPAWNS: [Vec2; 5] = [
    Vec2::new(64.0, 64.0),
    Vec2::new(64.0, 544.0),
    Vec2::new(704.0, 64.0),
    Vec2::new(704.0, 544.0),
    Vec2::new(384.0, 288.0),
];

/// Where one enemy enters the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    player_spawn: Vec2,
    enemy_spawns: Vec<EnemySpawn>,
}

impl Level {
    /// Wrap a grid; the player spawn is the safe center spawn, no enemies yet
    pub fn new(grid: Grid) -> Self {
        let mut level = Self {
            grid,
            player_spawn: Vec2::ZERO,
            enemy_spawns: Vec::new(),
        };
        level.player_spawn = level.safe_player_spawn();
        level
    }

    pub fn with_enemy_spawns(mut self, spawns: Vec<EnemySpawn>) -> Self {
        self.enemy_spawns = spawns;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub fn enemy_spawns(&self) -> &[EnemySpawn] {
        &self.enemy_spawns
    }

    pub fn is_wall(&self, cell_x: i32, cell_y: i32) -> bool {
        self.grid.is_wall(cell_x, cell_y)
    }

    pub fn is_position_safe(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.grid.is_position_safe(x, y, w, h)
    }

    /// Grid-center cell in pixels
    pub fn map_center(&self) -> Vec2 {
        cell_to_pixel(self.grid.width() / 2, self.grid.height() / 2)
    }

    /// Safe spot as close to the map center as the layout allows
    pub fn center_spawn(&self) -> Vec2 {
        let center = self.map_center();
        if !self.is_position_safe(center.x, center.y, ENTITY_SIZE, ENTITY_SIZE) {
            log::debug!(
                "Map center ({}, {}) is blocked, searching nearby",
                center.x,
                center.y
            );
        }
        self.find_safe_spawn_position(center, ENTITY_SIZE)
    }

    /// The player always starts at the (validated) map center
    pub fn safe_player_spawn(&self) -> Vec2 {
        self.center_spawn()
    }

    /// Find a box position near `intended` that overlaps no wall.
    ///
    /// Search order: the intended point, then square rings of 1..=5 cells
    /// (perimeter only), then [`FALLBACK_SPAWNS`]. If everything is blocked
    /// the intended point comes back unchanged and may overlap a wall.
    pub fn find_safe_spawn_position(&self, intended: Vec2, size: f32) -> Vec2 {
        if self.is_position_safe(intended.x, intended.y, size, size) {
            return intended;
        }

        let map_w = self.grid.width() as f32 * CELL_SIZE;
        let map_h = self.grid.height() as f32 * CELL_SIZE;

        for radius in 1..=SAFE_SPAWN_MAX_RADIUS {
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }

                    let test = intended + Vec2::new(dx as f32, dy as f32) * CELL_SIZE;
                    let inside = test.x >= 0.0
                        && test.y >= 0.0
                        && test.x + size <= map_w
                        && test.y + size <= map_h;
                    if inside && self.is_position_safe(test.x, test.y, size, size) {
                        log::debug!(
                            "Safe spawn at ({}, {}) replaces blocked ({}, {})",
                            test.x,
                            test.y,
                            intended.x,
                            intended.y
                        );
                        return test;
                    }
                }
            }
        }

        for fallback in FALLBACK_SPAWNS {
            if self.is_position_safe(fallback.x, fallback.y, size, size) {
                log::warn!(
                    "Using fallback spawn ({}, {}), ({}, {}) was unsafe",
                    fallback.x,
                    fallback.y,
                    intended.x,
                    intended.y
                );
                return fallback;
            }
        }

        log::warn!(
            "No safe spawn found, keeping ({}, {}) which may overlap a wall",
            intended.x,
            intended.y
        );
        intended
    }

    /// Safe cells on the ring one step in from the border, corners skipped.
    ///
    /// Order: top row, bottom row, left column, right column.
    pub fn edge_spawn_positions(&self) -> Vec<Vec2> {
        let w = self.grid.width();
        let h = self.grid.height();

        let top = (2..w - 2).map(|x| (x, 1));
        let bottom = (2..w - 2).map(|x| (x, h - 2));
        let left = (2..h - 2).map(|y| (1, y));
        let right = (2..h - 2).map(|y| (w - 2, y));

        top.chain(bottom)
            .chain(left)
            .chain(right)
            .map(|(x, y)| cell_to_pixel(x, y))
            .filter(|p| self.is_position_safe(p.x, p.y, ENTITY_SIZE, ENTITY_SIZE))
            .collect()
    }

    /// 16px sampled sight check between two points, endpoints not sampled
    pub fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        self.grid.ray_clear(from, to, PURSUIT_STEP, RayEnd::Exclusive)
    }
}
