//! Small vector/viewport helpers shared by the simulation and the renderer.
//!
//! All world coordinates are canvas-style pixels with +y pointing down, the
//! same convention the renderer uses when projecting onto braille dots.

/// A 2D point or velocity in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Unit vector for a heading given in degrees.
    pub fn from_degrees(angle_deg: f32) -> Self {
        let rad = angle_deg.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Current viewport size in world pixels. Rebuilt from the terminal size
/// every tick; nothing caches a stale copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Minimum usable extent. Degenerate terminal sizes (zero-area panes
    /// during resize) are clamped so wrap math stays finite.
    const MIN_EXTENT: f32 = 1.0;

    pub fn new(width: f32, height: f32) -> Self {
        Bounds {
            width: width.max(Self::MIN_EXTENT),
            height: height.max(Self::MIN_EXTENT),
        }
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Teleport-to-edge screen wrap: a coordinate driven past an edge is
    /// relocated to exactly the opposite bound, not reflected and not
    /// reduced modulo the extent. The one-frame jump is the point.
    pub fn wrap(self, pos: &mut Vec2) {
        if pos.x < 0.0 {
            pos.x = self.width;
        }
        if pos.x > self.width {
            pos.x = 0.0;
        }
        if pos.y < 0.0 {
            pos.y = self.height;
        }
        if pos.y > self.height {
            pos.y = 0.0;
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_teleports_to_opposite_edge() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut p = Vec2::new(-3.0, 250.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(800.0, 250.0));

        let mut q = Vec2::new(400.0, 600.5);
        bounds.wrap(&mut q);
        assert_eq!(q, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn wrap_leaves_interior_points_alone() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut p = Vec2::new(12.5, 599.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(12.5, 599.0));
    }

    #[test]
    fn degenerate_bounds_are_clamped() {
        let bounds = Bounds::new(0.0, -4.0);
        assert!(bounds.width >= 1.0);
        assert!(bounds.height >= 1.0);
        let mut p = Vec2::new(-1.0, 0.5);
        bounds.wrap(&mut p);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn from_degrees_matches_cardinal_directions() {
        let right = Vec2::from_degrees(0.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
        let down = Vec2::from_degrees(90.0);
        assert!(down.x.abs() < 1e-6 && (down.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }
}
