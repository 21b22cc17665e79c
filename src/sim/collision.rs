//! Axis-aligned box collision between entities
//!
//! Walls are handled by the grid; this module only resolves entity vs entity
//! contact: the player touching an enemy and arrows striking enemies.

use glam::Vec2;

use super::entity::{Enemy, Player, Projectile};
use crate::consts::*;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// 32x32 entity box
    pub fn entity(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(ENTITY_SIZE))
    }

    /// 4x4 arrow box
    pub fn projectile(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(PROJECTILE_SIZE))
    }

    /// Strict overlap; boxes that only share an edge don't collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// An arrow that struck an enemy this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile_id: u32,
    pub enemy_id: u32,
}

/// Id of the first enemy touching the player, if any
pub fn player_enemy_contact(player: &Player, enemies: &[Enemy]) -> Option<u32> {
    let player_box = Rect::entity(player.pos);
    enemies
        .iter()
        .find(|e| player_box.overlaps(&Rect::entity(e.pos)))
        .map(|e| e.id)
}

/// Resolve arrow strikes, removing struck enemies and spent arrows.
///
/// Each arrow kills at most one enemy; an enemy removed by an earlier arrow
/// can't absorb a later one.
pub fn resolve_projectile_hits(projectiles: &mut Vec<Projectile>, enemies: &mut Vec<Enemy>) -> Vec<Hit> {
    let mut hits = Vec::new();

    projectiles.retain(|arrow| {
        let arrow_box = Rect::projectile(arrow.pos);
        let struck = enemies
            .iter()
            .position(|e| arrow_box.overlaps(&Rect::entity(e.pos)));

        match struck {
            Some(index) => {
                let enemy = enemies.swap_remove(index);
                hits.push(Hit {
                    projectile_id: arrow.id,
                    enemy_id: enemy.id,
                });
                false
            }
            None => true,
        }
    });

    hits
}
