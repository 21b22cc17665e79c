//! Line-of-sight detection and cardinal auto-targeting
//!
//! Two separate checks run each frame:
//! - a free-angle sight ray that drives the "in sight" indicator and gates firing
//! - a stricter cardinal scan that picks what (and which way) to shoot

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Enemy;
use super::grid::{Grid, RayEnd};
use crate::consts::*;
use crate::in_world;

/// One of the four shooting directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    Up,
    Down,
    Left,
    Right,
}

impl Cardinal {
    /// Dominant-axis direction of an offset; ties go horizontal.
    ///
    /// `None` only for a zero offset.
    pub fn from_offset(dx: f32, dy: f32) -> Option<Self> {
        let (ax, ay) = (dx.abs(), dy.abs());
        if ax >= ay && ax > 0.0 {
            Some(if dx > 0.0 { Cardinal::Right } else { Cardinal::Left })
        } else if ay > ax {
            Some(if dy > 0.0 { Cardinal::Down } else { Cardinal::Up })
        } else {
            None
        }
    }

    pub fn unit_vector(&self) -> Vec2 {
        match self {
            Cardinal::Up => Vec2::new(0.0, -1.0),
            Cardinal::Down => Vec2::new(0.0, 1.0),
            Cardinal::Left => Vec2::new(-1.0, 0.0),
            Cardinal::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Cardinal::Left | Cardinal::Right)
    }

    /// Distance along this axis only; the other axis is ignored
    pub fn axis_distance(&self, from: Vec2, to: Vec2) -> f32 {
        if self.is_horizontal() {
            (to.x - from.x).abs()
        } else {
            (to.y - from.y).abs()
        }
    }
}

/// The enemy auto-fire should shoot at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireTarget {
    pub enemy_id: u32,
    pub direction: Cardinal,
    pub distance: f32,
}

/// True if any enemy within [`DETECTION_RANGE`] has an unobstructed 8px ray
/// from the player's center. Always false with no enemies.
pub fn has_line_of_sight(grid: &Grid, player_center: Vec2, enemies: &[Enemy]) -> bool {
    enemies.iter().any(|enemy| {
        let enemy_center = enemy.center();
        player_center.distance(enemy_center) <= DETECTION_RANGE
            && grid.ray_clear(player_center, enemy_center, SIGHT_STEP, RayEnd::Exclusive)
    })
}

/// Walk from `origin` in `direction` and report whether some enemy center
/// sits within [`CARDINAL_HIT_RADIUS`] of a sample before a wall or the
/// world edge is reached.
pub fn cardinal_line_clear(grid: &Grid, origin: Vec2, direction: Cardinal, enemies: &[Enemy]) -> bool {
    let step = direction.unit_vector() * CARDINAL_STEP;
    let max_steps = (DETECTION_RANGE / CARDINAL_STEP).floor() as u32;

    for i in 1..=max_steps {
        let point = origin + step * i as f32;
        if !in_world(point) || grid.is_wall_at(point) {
            return false;
        }
        if enemies
            .iter()
            .any(|e| e.center().distance(point) <= CARDINAL_HIT_RADIUS)
        {
            return true;
        }
    }
    false
}

/// Nearest enemy (by axis distance, within range) with a clear cardinal shot
pub fn find_fire_target(grid: &Grid, player_center: Vec2, enemies: &[Enemy]) -> Option<FireTarget> {
    let mut best: Option<FireTarget> = None;

    for enemy in enemies {
        let offset = enemy.center() - player_center;
        let Some(direction) = Cardinal::from_offset(offset.x, offset.y) else {
            continue;
        };
        if !cardinal_line_clear(grid, player_center, direction, enemies) {
            continue;
        }

        let distance = direction.axis_distance(player_center, enemy.center());
        let nearer = best.is_none_or(|b| distance < b.distance);
        if nearer && distance <= DETECTION_RANGE {
            best = Some(FireTarget {
                enemy_id: enemy.id,
                direction,
                distance,
            });
        }
    }

    best
}
