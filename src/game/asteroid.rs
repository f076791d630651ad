use rand::Rng;

use crate::config::Tuning;
use crate::geometry::{Bounds, Vec2};

/// A drifting rock. `size` 3 is large; smaller tiers move faster. The
/// jittered outline is generated once at creation and never changes, so a
/// rock keeps its silhouette for its whole lifetime.
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Tier in {1, 2, 3}.
    pub size: u8,
    pub radius: f32,
    /// Outline vertices relative to `pos`.
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    pub fn new<R: Rng>(rng: &mut R, pos: Vec2, size: u8, tuning: &Tuning) -> Self {
        debug_assert!((1..=3).contains(&size));
        let radius = size as f32 * 20.0;

        // Smaller tiers are faster: speed = base * (4 - size) / 3.
        let speed = tuning.asteroid_speed * (4 - size) as f32 / 3.0;
        let heading: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        let velocity = Vec2::new(heading.cos(), heading.sin()).scale(speed);

        let mut vertices = Vec::with_capacity(tuning.asteroid_vertices);
        for i in 0..tuning.asteroid_vertices {
            let angle = i as f32 * std::f32::consts::TAU / tuning.asteroid_vertices as f32;
            let jag = 1.0 - rng.gen::<f32>() * tuning.asteroid_jag;
            vertices.push(Vec2::new(angle.cos(), angle.sin()).scale(radius * jag));
        }

        Asteroid {
            pos,
            velocity,
            size,
            radius,
            vertices,
        }
    }

    /// Translate and wrap. The outline does not rotate over time.
    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.pos += self.velocity.scale(dt);
        bounds.wrap(&mut self.pos);
    }

    /// Points awarded for a direct kill: (4 - size) * 100.
    pub fn points(&self) -> u32 {
        (4 - self.size as u32) * 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn radius_and_speed_follow_tier() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let large = Asteroid::new(&mut rng, Vec2::ZERO, 3, &tuning);
        let small = Asteroid::new(&mut rng, Vec2::ZERO, 1, &tuning);

        assert_eq!(large.radius, 60.0);
        assert_eq!(small.radius, 20.0);
        assert!((large.velocity.length() - tuning.asteroid_speed / 3.0).abs() < 1e-3);
        assert!((small.velocity.length() - tuning.asteroid_speed).abs() < 1e-3);
    }

    #[test]
    fn outline_is_fixed_and_jittered_within_radius() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let rock = Asteroid::new(&mut rng, Vec2::ZERO, 2, &tuning);

        assert_eq!(rock.vertices.len(), tuning.asteroid_vertices);
        for v in &rock.vertices {
            let r = v.length();
            assert!(r <= rock.radius + 1e-3);
            assert!(r >= rock.radius * (1.0 - tuning.asteroid_jag) - 1e-3);
        }

        let before = rock.vertices.clone();
        let mut moved = rock.clone();
        moved.update(0.5, Bounds::new(800.0, 600.0));
        assert_eq!(moved.vertices, before);
    }

    #[test]
    fn score_formula_per_tier() {
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(3);
        for (size, points) in [(3u8, 100u32), (2, 200), (1, 300)] {
            let rock = Asteroid::new(&mut rng, Vec2::ZERO, size, &tuning);
            assert_eq!(rock.points(), points);
        }
    }
}
