//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod grid;
pub mod level;
pub mod levels;
pub mod spawn;
pub mod state;
pub mod targeting;
pub mod tick;

pub use collision::{Hit, Rect, player_enemy_contact, resolve_projectile_hits};
pub use entity::{Enemy, EnemyKind, Player, Projectile, slide_move};
pub use grid::{Grid, RayEnd};
pub use level::{EnemySpawn, FALLBACK_SPAWNS, Level};
pub use levels::{LEVEL_COUNT, LEVEL_NAMES, build_level, is_final_level, level_grid};
pub use spawn::{enemy_count_for_level, generate_edge_enemy_spawns};
pub use state::{FrameView, GameEvent, GamePhase, GameState};
pub use targeting::{Cardinal, FireTarget, cardinal_line_clear, find_fire_target, has_line_of_sight};
pub use tick::{TickInput, restart, set_sound_enabled, start, tick};
