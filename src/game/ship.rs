use crate::config::Tuning;
use crate::geometry::{Bounds, Vec2};

/// The player ship. A singleton: taking damage repositions it, never
/// destroys it.
#[derive(Clone, Debug)]
pub struct Ship {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees. Additive and unbounded; trig use is unaffected.
    pub angle: f32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Ship {
            pos,
            velocity: Vec2::ZERO,
            angle: 0.0,
        }
    }

    pub fn rotate(&mut self, delta_deg: f32) {
        self.angle += delta_deg;
    }

    /// Apply a thrust impulse along the current heading, then clamp speed
    /// to the cap by uniform rescale.
    pub fn thrust(&mut self, force: f32, tuning: &Tuning) {
        self.velocity += Vec2::from_degrees(self.angle).scale(force);

        let speed = self.velocity.length();
        if speed > tuning.max_speed {
            self.velocity = self.velocity.scale(tuning.max_speed / speed);
        }
    }

    pub fn update(&mut self, dt: f32, bounds: Bounds, tuning: &Tuning) {
        // Framerate-normalized exponential damping: FRICTION is the decay
        // per 1/60 s, so the feel is identical at any frame rate.
        let damping = tuning.friction.powf(dt * 60.0);
        self.velocity = self.velocity.scale(damping);

        self.pos += self.velocity.scale(dt);
        bounds.wrap(&mut self.pos);
    }

    /// Collision radius; the hull is drawn SHIP_SIZE long but collides as a
    /// half-size circle.
    pub fn radius(&self, tuning: &Tuning) -> f32 {
        tuning.ship_size / 2.0
    }

    /// Reposition after losing a life: canvas center, zero velocity,
    /// heading reset to 0.
    pub fn respawn(&mut self, bounds: Bounds) {
        self.pos = bounds.center();
        self.velocity = Vec2::ZERO;
        self.angle = 0.0;
    }
}
