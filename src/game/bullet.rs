use crate::geometry::{Bounds, Vec2};

/// A fired shot. The same shape serves ship fire and UFO fire; ownership is
/// expressed by which collection it lives in.
///
/// Expiry rule: a countdown in real seconds, wrapping at the screen edges
/// while flying. Expired bullets are pruned before the collision passes run,
/// so a bullet can never score on the tick it dies.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
}

impl Bullet {
    pub fn fired(pos: Vec2, angle_deg: f32, speed: f32, lifetime: f32) -> Self {
        Bullet {
            pos,
            velocity: Vec2::from_degrees(angle_deg).scale(speed),
            lifetime,
        }
    }

    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.pos += self.velocity.scale(dt);
        bounds.wrap(&mut self.pos);
        self.lifetime -= dt;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }
}
