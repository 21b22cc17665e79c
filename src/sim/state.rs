//! Game state and core simulation types
//!
//! Everything a run needs to continue deterministically lives here,
//! including the RNG, so a serialized snapshot resumes exactly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Player, Projectile};
use super::grid::Grid;
use super::level::Level;
use super::levels::build_level;
use crate::audio::SoundEffect;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start; level 1 is already loaded
    Menu,
    /// Active gameplay
    Playing,
    /// Short pause before the next level is built
    LevelComplete,
    /// An enemy reached the player
    GameOver,
    /// Final level cleared
    Victory,
}

impl GamePhase {
    /// Nothing moves until `restart`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Notifications for the host (UI and audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    /// 1-based level number
    LevelChanged(u32),
    ScoreChanged(u64),
    /// Live enemy count
    EnemiesChanged(usize),
    Sound(SoundEffect),
}

/// Borrowed snapshot handed to a renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub level_number: u32,
    pub score: u64,
    pub grid: &'a Grid,
    pub player: Vec2,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub has_line_of_sight: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Every random draw goes through this
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (0-based)
    pub level_index: u32,
    pub score: u64,
    pub level: Level,
    pub player: Player,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Arrows in flight (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Result of this frame's sight check
    pub has_line_of_sight: bool,
    /// Seconds until auto-fire may try again
    pub fire_cooldown: f32,
    /// Seconds left in the LevelComplete pause
    pub transition_timer: f32,
    /// Gates `GameEvent::Sound`
    pub sound_enabled: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, parked in the menu
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = build_level(0, &mut rng);
        let player = Player::new(level.player_spawn());

        let mut state = Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            level_index: 0,
            score: 0,
            level,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            has_line_of_sight: false,
            fire_cooldown: 0.0,
            transition_timer: 0.0,
            sound_enabled: true,
            next_id: 1,
        };
        state.populate_level();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Level number as shown to the player
    pub fn level_number(&self) -> u32 {
        self.level_index + 1
    }

    /// Replace the live level and reset everything that belongs to it.
    ///
    /// Phase, score and level index are left alone.
    pub fn install_level(&mut self, level: Level) {
        self.level = level;
        self.populate_level();
    }

    fn populate_level(&mut self) {
        self.player = Player::new(self.level.player_spawn());
        self.projectiles.clear();
        self.has_line_of_sight = false;
        self.fire_cooldown = 0.0;
        self.transition_timer = 0.0;

        let spawns = self.level.enemy_spawns().to_vec();
        let mut enemies = Vec::with_capacity(spawns.len());
        for spawn in spawns {
            let id = self.next_entity_id();
            enemies.push(Enemy::new(id, spawn.kind, spawn.pos, &self.level));
        }
        self.enemies = enemies;
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            level_number: self.level_number(),
            score: self.score,
            grid: self.level.grid(),
            player: self.player.pos,
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            has_line_of_sight: self.has_line_of_sight,
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyKind;
    use crate::sim::level::EnemySpawn;
    use crate::sim::spawn::enemy_count_for_level;

    #[test]
    fn test_new_state_waits_in_menu_with_level_one() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level_number(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), enemy_count_for_level(0));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.pos, state.level.player_spawn());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.push(state.next_entity_id());
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_install_level_resets_level_state() {
        let mut state = GameState::new(5);
        state.fire_cooldown = 0.3;
        state.has_line_of_sight = true;
        state.projectiles.push(Projectile {
            id: 99,
            pos: Vec2::new(10.0, 10.0),
            dir: Vec2::X,
        });
        state.score = 40;

        let level = Level::new(Grid::open(25, 19)).with_enemy_spawns(vec![EnemySpawn {
            pos: Vec2::new(64.0, 64.0),
            kind: EnemyKind::Panther,
        }]);
        state.install_level(level);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyKind::Panther);
        assert!(state.projectiles.is_empty());
        assert!(!state.has_line_of_sight);
        assert_eq!(state.fire_cooldown, 0.0);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_view_borrows_live_state() {
        let state = GameState::new(8);
        let view = state.view();
        assert_eq!(view.enemies.len(), state.enemies.len());
        assert_eq!(view.player, state.player.pos);
        assert_eq!(view.grid.width(), 25);
        assert!(!view.has_line_of_sight);
    }

    #[test]
    fn test_normalize_order() {
        let mut state = GameState::new(2);
        state.enemies.reverse();
        state.normalize_order();
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(GamePhase::GameOver.is_terminal());
        assert!(GamePhase::Victory.is_terminal());
        assert!(!GamePhase::LevelComplete.is_terminal());
        assert!(!GamePhase::Menu.is_terminal());
    }
}
