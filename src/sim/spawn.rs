//! Enemy spawn generation along the level edges

use std::collections::HashSet;

use rand::Rng;

use super::entity::EnemyKind;
use super::level::{EnemySpawn, Level};
use crate::consts::*;

/// Target enemy count for a 0-based level index
pub fn enemy_count_for_level(level_index: u32) -> usize {
    (BASE_ENEMY_COUNT + ENEMIES_PER_LEVEL * level_index as usize).min(MAX_ENEMY_COUNT)
}

/// Pick up to `count` distinct edge cells at least `min_distance` from the
/// map center and give each a random archetype.
///
/// Each slot gets [`SPAWN_ATTEMPTS`] draws to find an unused cell; slots that
/// run out are skipped, so an under-supplied level yields fewer enemies.
pub fn generate_edge_enemy_spawns<R: Rng + ?Sized>(
    level: &Level,
    count: usize,
    min_distance: f32,
    rng: &mut R,
) -> Vec<EnemySpawn> {
    let center = level.map_center();
    let candidates: Vec<_> = level
        .edge_spawn_positions()
        .into_iter()
        .filter(|pos| pos.distance(center) >= min_distance)
        .collect();

    if candidates.is_empty() {
        log::warn!("No valid edge positions found for enemy spawning");
        return Vec::new();
    }

    let mut used = HashSet::new();
    let mut spawns = Vec::with_capacity(count.min(candidates.len()));

    for _ in 0..count {
        if used.len() == candidates.len() {
            break;
        }

        let picked = (0..SPAWN_ATTEMPTS)
            .map(|_| rng.random_range(0..candidates.len()))
            .find(|&i| used.insert(i));

        if let Some(index) = picked {
            let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
            spawns.push(EnemySpawn {
                pos: candidates[index],
                kind,
            });
        }
    }

    log::info!(
        "Generated {} edge enemy spawns out of {} requested",
        spawns.len(),
        count
    );
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Grid;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_count_scaling() {
        assert_eq!(enemy_count_for_level(0), 3);
        assert_eq!(enemy_count_for_level(1), 5);
        assert_eq!(enemy_count_for_level(9), 21);
        assert_eq!(enemy_count_for_level(20), 25);
    }

    #[test]
    fn test_small_level_yields_no_spawns() {
        let level = Level::new(Grid::from_layout(8, 8, &[
            "########",
            "#......#",
            "#......#",
            "#......#",
            "#......#",
            "#......#",
            "#......#",
            "########",
        ]));
        let mut rng = Pcg32::seed_from_u64(7);
        let spawns = generate_edge_enemy_spawns(&level, 5, MIN_SPAWN_DISTANCE, &mut rng);
        assert!(spawns.is_empty());
    }

    #[test]
    fn test_spawns_are_unique_and_far() {
        let level = Level::new(Grid::open(25, 19));
        let mut rng = Pcg32::seed_from_u64(42);
        let spawns = generate_edge_enemy_spawns(&level, 21, MIN_SPAWN_DISTANCE, &mut rng);
        assert_eq!(spawns.len(), 21);

        let cells: HashSet<_> = spawns
            .iter()
            .map(|s| (s.pos.x as i32, s.pos.y as i32))
            .collect();
        assert_eq!(cells.len(), spawns.len(), "no two enemies share a cell");

        let center = level.map_center();
        for spawn in &spawns {
            assert!(spawn.pos.distance(center) >= MIN_SPAWN_DISTANCE);
            assert!(level.is_position_safe(spawn.pos.x, spawn.pos.y, 32.0, 32.0));
        }
    }

    #[test]
    fn test_under_supplied_returns_what_it_can() {
        // Only the top edge row has open cells far enough from the center
        let level = Level::new(Grid::from_rows(&[
            "###########",
            "#.........#",
            "###########",
            "###########",
            "###########",
            "###.....###",
            "###########",
            "###########",
            "###########",
            "###########",
        ]));
        let mut rng = Pcg32::seed_from_u64(3);
        let spawns = generate_edge_enemy_spawns(&level, 25, MIN_SPAWN_DISTANCE, &mut rng);
        let available = level
            .edge_spawn_positions()
            .into_iter()
            .filter(|p| p.distance(level.map_center()) >= MIN_SPAWN_DISTANCE)
            .count();
        assert!(available > 0);
        assert!(spawns.len() <= available);
        assert!(!spawns.is_empty());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let level = Level::new(Grid::open(25, 19));
        let a = generate_edge_enemy_spawns(&level, 9, MIN_SPAWN_DISTANCE, &mut Pcg32::seed_from_u64(11));
        let b = generate_edge_enemy_spawns(&level, 9, MIN_SPAWN_DISTANCE, &mut Pcg32::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
