//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{player_enemy_contact, resolve_projectile_hits};
use super::entity::Projectile;
use super::levels::{build_level, is_final_level};
use super::state::{GameEvent, GamePhase, GameState};
use super::targeting::{find_fire_target, has_line_of_sight};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Held movement keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Un-normalized movement direction; opposite keys cancel
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Advance the game state by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Playing => tick_playing(state, input, dt, &mut events),
        GamePhase::LevelComplete => {
            state.transition_timer -= dt;
            if state.transition_timer <= 0.0 {
                state.level_index += 1;
                begin_level(state, &mut events);
            }
        }
        GamePhase::Menu | GamePhase::GameOver | GamePhase::Victory => {}
    }

    events
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    state
        .player
        .update(dt, input.direction(), state.level.grid());

    let player_center = state.player.center();
    state.has_line_of_sight = has_line_of_sight(state.level.grid(), player_center, &state.enemies);

    // Auto-fire. The cooldown restarts on every attempt, hit or miss.
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    if state.fire_cooldown <= 0.0 && state.has_line_of_sight {
        state.fire_cooldown = FIRE_COOLDOWN;
        if let Some(target) = find_fire_target(state.level.grid(), player_center, &state.enemies) {
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: player_center,
                dir: target.direction.unit_vector(),
            });
            log::debug!("Arrow {} fired {:?} at enemy {}", id, target.direction, target.enemy_id);
            push_sound(state, events, SoundEffect::ArrowFired);
        }
    }

    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.update(dt, player_pos, state.level.grid());
    }

    for arrow in &mut state.projectiles {
        arrow.advance(dt);
    }
    let grid = state.level.grid();
    state.projectiles.retain(|arrow| !arrow.is_spent(grid));

    if let Some(enemy_id) = player_enemy_contact(&state.player, &state.enemies) {
        log::info!("Enemy {} caught the player on level {}", enemy_id, state.level_number());
        game_over(state, events);
        return;
    }

    let hits = resolve_projectile_hits(&mut state.projectiles, &mut state.enemies);
    if !hits.is_empty() {
        state.normalize_order();
        for hit in &hits {
            log::debug!("Arrow {} hit enemy {}", hit.projectile_id, hit.enemy_id);
            state.score += KILL_SCORE;
            push_sound(state, events, SoundEffect::EnemyHit);
        }
        events.push(GameEvent::ScoreChanged(state.score));
        events.push(GameEvent::EnemiesChanged(state.enemies.len()));
    }

    if state.enemies.is_empty() {
        complete_level(state, events);
    }
}

/// Leave the menu and play the preloaded first level
pub fn start(state: &mut GameState) -> Vec<GameEvent> {
    if state.phase != GamePhase::Menu {
        log::debug!("Ignoring start in {:?}", state.phase);
        return Vec::new();
    }

    let mut events = Vec::new();
    state.phase = GamePhase::Playing;
    events.push(GameEvent::LevelChanged(state.level_number()));
    events.push(GameEvent::ScoreChanged(state.score));
    events.push(GameEvent::EnemiesChanged(state.enemies.len()));
    events.push(GameEvent::PhaseChanged(GamePhase::Playing));
    log::info!("Game started");
    events
}

/// Back to level 1 with a zero score, from any phase
pub fn restart(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.level_index = 0;
    state.score = 0;
    events.push(GameEvent::ScoreChanged(0));
    begin_level(state, &mut events);
    log::info!("Game restarted");
    events
}

pub fn set_sound_enabled(state: &mut GameState, enabled: bool) {
    state.sound_enabled = enabled;
}

/// Build a fresh copy of the current level and enter Playing
fn begin_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let level = build_level(state.level_index, &mut state.rng);
    state.install_level(level);
    state.phase = GamePhase::Playing;

    events.push(GameEvent::LevelChanged(state.level_number()));
    events.push(GameEvent::EnemiesChanged(state.enemies.len()));
    events.push(GameEvent::PhaseChanged(GamePhase::Playing));
}

fn complete_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.score += LEVEL_BONUS * u64::from(state.level_number());
    events.push(GameEvent::ScoreChanged(state.score));

    if is_final_level(state.level_index) {
        state.phase = GamePhase::Victory;
        log::info!("Victory! Final score {}", state.score);
        push_sound(state, events, SoundEffect::Victory);
    } else {
        state.phase = GamePhase::LevelComplete;
        state.transition_timer = LEVEL_COMPLETE_DELAY;
        log::info!("Level {} complete, score {}", state.level_number(), state.score);
    }
    events.push(GameEvent::PhaseChanged(state.phase));
}

fn game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    push_sound(state, events, SoundEffect::GameOver);
    events.push(GameEvent::PhaseChanged(GamePhase::GameOver));
}

fn push_sound(state: &GameState, events: &mut Vec<GameEvent>, effect: SoundEffect) {
    if state.sound_enabled {
        events.push(GameEvent::Sound(effect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyKind;
    use crate::sim::grid::Grid;
    use crate::sim::level::{EnemySpawn, Level};
    use crate::sim::spawn::enemy_count_for_level;

    fn playing_state(level: Level, level_index: u32) -> GameState {
        let mut state = GameState::new(7);
        state.level_index = level_index;
        state.install_level(level);
        state.phase = GamePhase::Playing;
        state
    }

    fn single_enemy(pos: Vec2) -> Level {
        Level::new(Grid::open(25, 19)).with_enemy_spawns(vec![EnemySpawn {
            pos,
            kind: EnemyKind::Bear,
        }])
    }

    /// Arrow parked inside the only enemy, so the next tick kills it
    fn arrow_in_enemy(state: &mut GameState) {
        let id = state.next_entity_id();
        let pos = state.enemies[0].pos + Vec2::new(10.0, 10.0);
        state.projectiles.push(Projectile { id, pos, dir: Vec2::X });
    }

    fn has_sound(events: &[GameEvent], effect: SoundEffect) -> bool {
        events.contains(&GameEvent::Sound(effect))
    }

    #[test]
    fn test_input_direction() {
        let input = TickInput {
            up: true,
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));
        assert_eq!(TickInput::default().direction(), Vec2::ZERO);
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut state = GameState::new(12345);
        assert!(tick(&mut state, &TickInput::default(), SIM_DT).is_empty());
        assert_eq!(state.phase, GamePhase::Menu);

        let events = start(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::LevelChanged(1)));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));

        assert!(start(&mut state).is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_sealed_enemy_is_never_fired_at() {
        // Enemy walled into cell (16, 9); nothing can see it
        let mut rows = vec![".".repeat(25); 19];
        rows[8] = format!("{}###{}", ".".repeat(15), ".".repeat(7));
        rows[9] = format!("{}#.#{}", ".".repeat(15), ".".repeat(7));
        rows[10] = rows[8].clone();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let level = Level::new(Grid::from_rows(&refs)).with_enemy_spawns(vec![EnemySpawn {
            pos: Vec2::new(512.0, 288.0),
            kind: EnemyKind::Panther,
        }]);
        let mut state = playing_state(level, 0);
        assert_eq!(state.player.pos, Vec2::new(384.0, 288.0));

        for frame in 0..300 {
            let input = TickInput {
                right: frame < 100,
                up: (100..200).contains(&frame),
                ..Default::default()
            };
            let events = tick(&mut state, &input, SIM_DT);
            assert!(!state.has_line_of_sight, "frame {frame}");
            assert!(state.projectiles.is_empty(), "frame {frame}");
            assert!(!has_sound(&events, SoundEffect::ArrowFired));
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies[0].pos, Vec2::new(512.0, 288.0));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = playing_state(single_enemy(Vec2::new(640.0, 288.0)), 0);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.has_line_of_sight);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].dir, Vec2::X);
        assert!(has_sound(&events, SoundEffect::ArrowFired));

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_attempt_without_target_still_restarts_cooldown() {
        // Visible but off every firing line
        let mut state = playing_state(single_enemy(Vec2::new(484.0, 348.0)), 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.has_line_of_sight);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.fire_cooldown, FIRE_COOLDOWN);
    }

    #[test]
    fn test_arrow_hit_scores_and_completes_level() {
        // Level 3 of 10
        let mut state = playing_state(single_enemy(Vec2::new(608.0, 288.0)), 2);
        arrow_in_enemy(&mut state);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, KILL_SCORE + 300);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(has_sound(&events, SoundEffect::EnemyHit));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::LevelComplete)));

        // Still waiting after one second
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::LevelComplete);

        let events = tick(&mut state, &TickInput::default(), 1.1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_number(), 4);
        assert_eq!(state.enemies.len(), enemy_count_for_level(3));
        assert_eq!(state.score, 310);
        assert!(events.contains(&GameEvent::LevelChanged(4)));
    }

    #[test]
    fn test_final_level_ends_in_victory() {
        let mut state = playing_state(single_enemy(Vec2::new(608.0, 288.0)), 9);
        arrow_in_enemy(&mut state);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.score, KILL_SCORE + 1000);
        assert!(has_sound(&events, SoundEffect::Victory));
        assert!(!events.contains(&GameEvent::PhaseChanged(GamePhase::LevelComplete)));

        // Terminal: time passes, nothing changes
        assert!(tick(&mut state, &TickInput::default(), 5.0).is_empty());
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_empty_level_completes_immediately() {
        let mut state = playing_state(Level::new(Grid::open(25, 19)), 0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.score, LEVEL_BONUS);
    }

    #[test]
    fn test_contact_is_game_over_then_restart() {
        let mut state = playing_state(single_enemy(Vec2::new(394.0, 298.0)), 4);
        state.score = 120;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(has_sound(&events, SoundEffect::GameOver));
        assert!(tick(&mut state, &TickInput::default(), SIM_DT).is_empty());

        let events = restart(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_number(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), enemy_count_for_level(0));
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
    }

    #[test]
    fn test_sound_disabled_suppresses_sound_events() {
        let mut state = playing_state(single_enemy(Vec2::new(394.0, 298.0)), 0);
        set_sound_enabled(&mut state, false);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Sound(_))));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start(&mut state1);
        start(&mut state2);

        for frame in 0..600u32 {
            let input = TickInput {
                up: frame % 90 < 30,
                right: frame % 120 < 50,
                down: frame % 70 > 40,
                left: frame % 200 > 150,
            };
            let a = tick(&mut state1, &input, SIM_DT);
            let b = tick(&mut state2, &input, SIM_DT);
            assert_eq!(a, b);
        }

        let snap1 = serde_json::to_string(&state1).expect("serialize");
        let snap2 = serde_json::to_string(&state2).expect("serialize");
        assert_eq!(snap1, snap2);
    }
}
