use rand::Rng;

use crate::config::Tuning;
use crate::game::bullet::Bullet;
use crate::geometry::{Bounds, Vec2};

/// A flying saucer. Lifecycle: spawned just past a horizontal edge,
/// `entered` latches once it is fully on-screen in its direction of travel,
/// then it either gets destroyed or drifts off the far edge.
///
/// Until `entered` is set the saucer neither deals nor takes collision
/// damage and cannot exit, regardless of geometric overlap.
#[derive(Clone, Debug)]
pub struct Ufo {
    pub pos: Vec2,
    pub is_small: bool,
    pub entered: bool,
    /// +1.0 travelling right, -1.0 travelling left.
    pub direction: f32,
    pub shoot_timer: f32,
    /// Per-saucer vertical oscillation amplitude factor in [0.3, 0.5].
    osc_factor: f32,
}

impl Ufo {
    pub fn new<R: Rng>(rng: &mut R, bounds: Bounds, is_small: bool, tuning: &Tuning) -> Self {
        let radius = radius_for(is_small, tuning);
        let from_left = rng.gen_bool(0.5);
        let x = if from_left {
            -radius * 2.0
        } else {
            bounds.width + radius * 2.0
        };
        let y = rng.gen_range(radius..(bounds.height - radius).max(radius + 1.0));

        Ufo {
            pos: Vec2::new(x, y),
            is_small,
            entered: false,
            direction: if from_left { 1.0 } else { -1.0 },
            shoot_timer: tuning.ufo_shoot_interval,
            osc_factor: rng.gen_range(0.3..0.5),
        }
    }

    pub fn radius(&self, tuning: &Tuning) -> f32 {
        radius_for(self.is_small, tuning)
    }

    /// Small saucers are faster as well as smaller and more accurate.
    pub fn speed(&self, tuning: &Tuning) -> f32 {
        if self.is_small {
            tuning.ufo_speed * 1.5
        } else {
            tuning.ufo_speed
        }
    }

    /// Move and latch. The vertical wobble is a continuous oscillation
    /// driven by cumulative simulation time, so replays are deterministic.
    pub fn update(&mut self, dt: f32, sim_time: f32, bounds: Bounds, tuning: &Tuning) {
        let speed = self.speed(tuning);
        let vx = self.direction * speed;
        let vy = sim_time.sin() * speed * self.osc_factor;

        self.pos.x += vx * dt;
        self.pos.y += vy * dt;

        let radius = self.radius(tuning);
        self.pos.y = self
            .pos
            .y
            .clamp(radius, (bounds.height - radius).max(radius));

        if !self.entered {
            let fully_on = if self.direction > 0.0 {
                self.pos.x >= radius
            } else {
                self.pos.x <= bounds.width - radius
            };
            if fully_on {
                self.entered = true;
            }
        }
    }

    /// True once the saucer, having entered, has passed beyond the far
    /// edge. Removal without score.
    pub fn has_exited(&self, bounds: Bounds, tuning: &Tuning) -> bool {
        if !self.entered {
            return false;
        }
        let radius = self.radius(tuning);
        if self.direction > 0.0 {
            self.pos.x > bounds.width + radius
        } else {
            self.pos.x < -radius
        }
    }

    /// Tick the shoot timer; on expiry reset it and emit a bullet. Small
    /// saucers aim at the ship with up to 10 degrees of jitter either side;
    /// large ones fire on a fully random heading.
    pub fn try_shoot<R: Rng>(
        &mut self,
        dt: f32,
        ship_pos: Vec2,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<Bullet> {
        self.shoot_timer -= dt;
        if self.shoot_timer > 0.0 {
            return None;
        }
        self.shoot_timer = tuning.ufo_shoot_interval;

        let angle = if self.is_small {
            let to_ship = ship_pos - self.pos;
            let aim = to_ship.y.atan2(to_ship.x).to_degrees();
            aim + rng.gen_range(-10.0..10.0)
        } else {
            rng.gen_range(0.0..360.0)
        };

        Some(Bullet::fired(
            self.pos,
            angle,
            tuning.ufo_bullet_speed,
            tuning.bullet_lifetime,
        ))
    }

    /// Score for a player-bullet kill; asteroid-collision kills credit half.
    pub fn points(&self) -> u32 {
        if self.is_small {
            1000
        } else {
            200
        }
    }
}

fn radius_for(is_small: bool, tuning: &Tuning) -> f32 {
    if is_small {
        tuning.ufo_radius_small
    } else {
        tuning.ufo_radius_large
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn saucer_from_left(is_small: bool) -> (Ufo, Tuning, Bounds) {
        let tuning = Tuning::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(0);
        let mut ufo = Ufo::new(&mut rng, bounds, is_small, &tuning);
        ufo.pos.x = -ufo.radius(&tuning) * 2.0;
        ufo.direction = 1.0;
        ufo.entered = false;
        (ufo, tuning, bounds)
    }

    #[test]
    fn latch_sets_only_once_fully_on_screen() {
        let (mut ufo, tuning, bounds) = saucer_from_left(false);
        assert!(!ufo.entered);

        let mut sim_time = 0.0;
        while !ufo.entered {
            sim_time += 0.016;
            ufo.update(0.016, sim_time, bounds, &tuning);
            assert!(sim_time < 10.0, "never entered");
        }
        assert!(ufo.pos.x >= ufo.radius(&tuning) - 2.0);
    }

    #[test]
    fn no_exit_before_entering() {
        let (ufo, tuning, bounds) = saucer_from_left(false);
        // Off-screen on the spawn side but not yet entered.
        assert!(!ufo.has_exited(bounds, &tuning));
    }

    #[test]
    fn exits_past_far_edge_after_entering() {
        let (mut ufo, tuning, bounds) = saucer_from_left(true);
        let mut sim_time = 0.0;
        while !ufo.has_exited(bounds, &tuning) {
            sim_time += 0.016;
            ufo.update(0.016, sim_time, bounds, &tuning);
            assert!(sim_time < 30.0, "never exited");
        }
        assert!(ufo.entered);
        assert!(ufo.pos.x > bounds.width);
    }

    #[test]
    fn small_saucer_aims_within_ten_degrees() {
        let tuning = Tuning::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(99);
        let mut ufo = Ufo::new(&mut rng, bounds, true, &tuning);
        ufo.pos = Vec2::new(200.0, 300.0);
        let ship_pos = Vec2::new(600.0, 300.0); // due east: aim angle 0

        let bullet = ufo
            .try_shoot(tuning.ufo_shoot_interval + 0.001, ship_pos, &mut rng, &tuning)
            .expect("timer elapsed");
        let heading = bullet.velocity.y.atan2(bullet.velocity.x).to_degrees();
        assert!(heading.abs() <= 10.0, "heading {heading} outside jitter band");
    }

    #[test]
    fn shoot_timer_resets_to_interval() {
        let tuning = Tuning::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ufo = Ufo::new(&mut rng, bounds, false, &tuning);

        assert!(ufo.try_shoot(0.5, Vec2::ZERO, &mut rng, &tuning).is_none());
        let fired = ufo.try_shoot(tuning.ufo_shoot_interval, Vec2::ZERO, &mut rng, &tuning);
        assert!(fired.is_some());
        assert!((ufo.shoot_timer - tuning.ufo_shoot_interval).abs() < 1e-5);
    }

    #[test]
    fn score_by_size() {
        let tuning = Tuning::default();
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(Ufo::new(&mut rng, bounds, true, &tuning).points(), 1000);
        assert_eq!(Ufo::new(&mut rng, bounds, false, &tuning).points(), 200);
    }
}
