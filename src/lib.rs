//! Maze Archer - A top-down tile-grid maze shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, motion, targeting, game state)
//! - `audio`: Sound trigger boundary (tones, mute, backend dispatch)
//! - `settings`: Player-facing configuration loaded from JSON

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, LogBackend, SoundEffect};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step the host feeds to `tick` (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions in pixels
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Side of one grid cell in pixels
    pub const CELL_SIZE: f32 = 32.0;

    /// Player and enemy collision box side
    pub const ENTITY_SIZE: f32 = 32.0;
    /// Player speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 150.0;

    /// Arrow defaults
    pub const PROJECTILE_SPEED: f32 = 400.0;
    pub const PROJECTILE_SIZE: f32 = 4.0;
    /// Seconds between auto-fire attempts
    pub const FIRE_COOLDOWN: f32 = 0.5;

    /// Enemy detection radius, center to center
    pub const DETECTION_RANGE: f32 = 300.0;
    /// Sample spacing for the free-angle sight ray
    pub const SIGHT_STEP: f32 = 8.0;
    /// Sample spacing for the cardinal fire scan
    pub const CARDINAL_STEP: f32 = 16.0;
    /// How close an enemy center must be to a cardinal sample to count as a hit
    pub const CARDINAL_HIT_RADIUS: f32 = 20.0;

    /// Sample spacing for enemy pursuit rays
    pub const PURSUIT_STEP: f32 = 16.0;
    /// Seconds between enemy target re-acquisitions
    pub const RETARGET_INTERVAL: f32 = 0.2;
    /// Enemies stop short of their target inside this distance
    pub const ARRIVE_DISTANCE: f32 = 5.0;

    /// Spawn generation
    pub const MIN_SPAWN_DISTANCE: f32 = 128.0;
    pub const SPAWN_ATTEMPTS: u32 = 50;
    pub const BASE_ENEMY_COUNT: usize = 3;
    pub const ENEMIES_PER_LEVEL: usize = 2;
    pub const MAX_ENEMY_COUNT: usize = 25;
    /// Ring search radius in cells
    pub const SAFE_SPAWN_MAX_RADIUS: i32 = 5;

    /// Scoring
    pub const KILL_SCORE: u64 = 10;
    pub const LEVEL_BONUS: u64 = 100;
    /// Pause between a cleared level and the next one (seconds)
    pub const LEVEL_COMPLETE_DELAY: f32 = 2.0;
}

/// Pixel coordinate to grid cell index (floor division, negative-safe)
#[inline]
pub fn cell_of(px: f32) -> i32 {
    (px / consts::CELL_SIZE).floor() as i32
}

/// Grid cell to its top-left pixel coordinate
#[inline]
pub fn cell_to_pixel(cell_x: i32, cell_y: i32) -> Vec2 {
    Vec2::new(cell_x as f32, cell_y as f32) * consts::CELL_SIZE
}

/// Center of a 32x32 entity box whose top-left corner is `pos`
#[inline]
pub fn box_center(pos: Vec2) -> Vec2 {
    pos + Vec2::splat(consts::ENTITY_SIZE / 2.0)
}

/// True if a point lies inside the world rectangle (right/bottom edge exclusive)
#[inline]
pub fn in_world(point: Vec2) -> bool {
    point.x >= 0.0 && point.x < consts::WORLD_WIDTH && point.y >= 0.0 && point.y < consts::WORLD_HEIGHT
}
