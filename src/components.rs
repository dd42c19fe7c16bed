use glam::DVec2;

/// A single simulated circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub mass: f64,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, mass: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass,
        }
    }

    /// Radius and mass are both strictly positive and finite
    pub fn is_valid(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0 && self.mass.is_finite() && self.mass > 0.0
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// How far the circle pokes outside `bounds`, 0 when fully inside
    pub fn boundary_violation(&self, bounds: Bounds) -> f64 {
        let left = self.radius - self.position.x;
        let right = self.position.x + self.radius - bounds.width;
        let top = self.radius - self.position.y;
        let bottom = self.position.y + self.radius - bounds.height;

        left.max(right).max(top).max(bottom).max(0.0)
    }
}

/// Containment box, origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
