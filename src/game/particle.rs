use ratatui::style::Color;

use crate::geometry::{Bounds, Vec2};

/// A cosmetic spark. Carries no gameplay state; the renderer fades it by
/// the remaining-lifetime fraction.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
    pub original_lifetime: f32,
    pub color: Color,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, velocity: Vec2, lifetime: f32, color: Color, size: f32) -> Self {
        Particle {
            pos,
            velocity,
            lifetime,
            original_lifetime: lifetime,
            color,
            size,
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

    /// 1.0 when fresh, 0.0 when expired.
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.original_lifetime).clamp(0.0, 1.0)
    }
}
