//! Player, enemy and arrow entities and the shared grid-motion rule

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, RayEnd};
use super::level::Level;
use crate::consts::*;
use crate::in_world;

/// Move a square box toward `candidate`, one axis at a time.
///
/// X is accepted only if the box is safe at (new x, old y); Y is then
/// accepted only if the box is safe at (current x, new y). Testing the axes
/// separately lets a diagonal move into a wall slide along it.
pub fn slide_move(grid: &Grid, pos: Vec2, candidate: Vec2, size: f32) -> Vec2 {
    let mut moved = pos;
    if grid.is_position_safe(candidate.x, pos.y, size, size) {
        moved.x = candidate.x;
    }
    if grid.is_position_safe(moved.x, candidate.y, size, size) {
        moved.y = candidate.y;
    }
    moved
}

/// Enemy species; fixes speed and appearance only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Panther,
    Primate,
    Bear,
}

impl EnemyKind {
    pub const ALL: [Self; 3] = [Self::Panther, Self::Primate, Self::Bear];

    /// Movement speed in pixels per second
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Panther => 120.0,
            EnemyKind::Primate => 80.0,
            EnemyKind::Bear => 60.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Panther => "panther",
            EnemyKind::Primate => "primate",
            EnemyKind::Bear => "bear",
        }
    }
}

/// The archer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
        }
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos)
    }

    /// Input-driven movement; `direction` need not be normalized
    pub fn update(&mut self, dt: f32, direction: Vec2, grid: &Grid) {
        let step = direction.normalize_or_zero() * self.speed * dt;
        if step == Vec2::ZERO {
            return;
        }

        let max = Vec2::new(WORLD_WIDTH - ENTITY_SIZE, WORLD_HEIGHT - ENTITY_SIZE);
        let candidate = (self.pos + step).clamp(Vec2::ZERO, max);
        self.pos = slide_move(grid, self.pos, candidate, ENTITY_SIZE);
    }
}

/// A roaming enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Cached pursuit point, refreshed every [`RETARGET_INTERVAL`]
    pub target: Vec2,
    /// Seconds until the next re-acquisition
    pub retarget_timer: f32,
}

impl Enemy {
    /// Place an enemy at the nearest safe spot to `spawn`
    pub fn new(id: u32, kind: EnemyKind, spawn: Vec2, level: &Level) -> Self {
        Self {
            id,
            kind,
            pos: level.find_safe_spawn_position(spawn, ENTITY_SIZE),
            target: spawn,
            retarget_timer: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos)
    }

    pub fn update(&mut self, dt: f32, player_pos: Vec2, grid: &Grid) {
        self.retarget_timer -= dt;
        if self.retarget_timer <= 0.0 {
            self.target = self.find_path_to_player(player_pos, grid);
            self.retarget_timer = RETARGET_INTERVAL;
        }

        let delta = self.target - self.pos;
        let distance = delta.length();
        if distance <= ARRIVE_DISTANCE {
            return;
        }

        let candidate = self.pos + delta / distance * self.kind.speed() * dt;
        self.pos = slide_move(grid, self.pos, candidate, ENTITY_SIZE);
    }

    /// Straight at the player if the line is clear, else the best neighbour cell
    pub fn find_path_to_player(&self, player_pos: Vec2, grid: &Grid) -> Vec2 {
        if self.pos == player_pos {
            return self.pos;
        }
        if grid.ray_clear(self.pos, player_pos, PURSUIT_STEP, RayEnd::Inclusive) {
            return player_pos;
        }
        self.find_alternative_path(player_pos, grid)
    }

    /// Greedy one-cell step: the open cardinal neighbour nearest the player.
    ///
    /// Can stall in pockets; there is no global search behind it.
    fn find_alternative_path(&self, player_pos: Vec2, grid: &Grid) -> Vec2 {
        const NEIGHBOURS: [Vec2; 4] = [
            Vec2::new(0.0, -CELL_SIZE),
            Vec2::new(CELL_SIZE, 0.0),
            Vec2::new(0.0, CELL_SIZE),
            Vec2::new(-CELL_SIZE, 0.0),
        ];

        let mut best = None;
        let mut best_distance = f32::INFINITY;
        for offset in NEIGHBOURS {
            let next = self.pos + offset;
            if grid.is_wall_at(next) || !in_world(next) {
                continue;
            }
            let distance = next.distance(player_pos);
            if distance < best_distance {
                best_distance = distance;
                best = Some(next);
            }
        }
        best.unwrap_or(self.pos)
    }
}

/// An arrow in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Cardinal unit vector
    pub dir: Vec2,
}

impl Projectile {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * PROJECTILE_SPEED * dt;
    }

    /// Left the world or flew into a wall
    pub fn is_spent(&self, grid: &Grid) -> bool {
        let out = self.pos.x < 0.0
            || self.pos.x > WORLD_WIDTH
            || self.pos.y < 0.0
            || self.pos.y > WORLD_HEIGHT;
        out || grid.is_wall_at(self.pos)
    }
}
