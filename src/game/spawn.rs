//! Spawning policy: where rocks appear, how many per level, and when
//! saucers show up.

use rand::Rng;

use crate::game::asteroid::Asteroid;
use crate::game::ufo::Ufo;
use crate::game::Game;
use crate::geometry::{Bounds, Vec2};

/// Cap on accept/reject resamples. On any sane viewport the loop ends in a
/// handful of tries; the cap only matters for pathological bounds smaller
/// than the exclusion disk.
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Rocks fielded at the start of a level: 3, 5, 7, ...
pub fn asteroid_count(level: u32) -> usize {
    (3 + (level.saturating_sub(1)) * 2) as usize
}

/// Place `count` size-3 asteroids uniformly at random, resampling any
/// position that lands inside the exclusion disk around the ship.
pub fn place_asteroids(game: &mut Game, bounds: Bounds, count: usize) {
    for _ in 0..count {
        let pos = sample_clear_position(game, bounds);
        let rock = Asteroid::new(&mut game.rng, pos, 3, &game.tuning);
        game.asteroids.push(rock);
    }
}

fn sample_clear_position(game: &mut Game, bounds: Bounds) -> Vec2 {
    let mut pos = Vec2::ZERO;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        pos = Vec2::new(
            game.rng.gen::<f32>() * bounds.width,
            game.rng.gen::<f32>() * bounds.height,
        );
        if pos.distance(game.ship.pos) >= game.tuning.spawn_exclusion_radius {
            return pos;
        }
    }
    pos
}

/// Chance the next saucer is the small kind: 30% at zero score, rising
/// linearly to a 70% cap.
pub fn small_ufo_chance(score: u32) -> f64 {
    (0.3 + score as f64 / 100_000.0).min(0.7)
}

pub fn spawn_ufo(game: &mut Game, bounds: Bounds) {
    let is_small = game.rng.gen_bool(small_ufo_chance(game.score));
    let saucer = Ufo::new(&mut game.rng, bounds, is_small, &game.tuning);
    game.ufos.push(saucer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    #[test]
    fn level_counts_follow_the_formula() {
        assert_eq!(asteroid_count(1), 3);
        assert_eq!(asteroid_count(2), 5);
        assert_eq!(asteroid_count(3), 7);
        assert_eq!(asteroid_count(10), 21);
    }

    #[test]
    fn small_chance_ramps_and_caps() {
        assert!((small_ufo_chance(0) - 0.3).abs() < 1e-9);
        assert!((small_ufo_chance(10_000) - 0.4).abs() < 1e-9);
        assert_eq!(small_ufo_chance(40_000), 0.7);
        assert_eq!(small_ufo_chance(1_000_000), 0.7);
    }

    #[test]
    fn placement_rejects_the_exclusion_disk() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut game = Game::with_seed(Tuning::default(), bounds, 42);
        game.asteroids.clear();
        place_asteroids(&mut game, bounds, 50);
        for rock in &game.asteroids {
            assert!(rock.pos.distance(game.ship.pos) >= game.tuning.spawn_exclusion_radius);
            assert_eq!(rock.size, 3);
        }
    }

    #[test]
    fn placement_terminates_on_tiny_bounds() {
        // Bounds smaller than the exclusion disk: the cap must kick in.
        let bounds = Bounds::new(40.0, 40.0);
        let mut game = Game::with_seed(Tuning::default(), bounds, 7);
        game.asteroids.clear();
        place_asteroids(&mut game, bounds, 3);
        assert_eq!(game.asteroids.len(), 3);
    }
}
