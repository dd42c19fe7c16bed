use anyhow::Result;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::components::{Body, Bounds};
use crate::config::{SpawnConfig, WorldConfig};
use crate::systems::{self, StepParams};

/// Owns every body plus the constants the step reads.
///
/// Bodies keep their insertion order for their whole lifetime, the pair pass
/// depends on it.
#[derive(Clone, Debug)]
pub struct World {
    bodies: Vec<Body>,
    capacity: usize,
    bounds: Bounds,
    gravity: f64,
    restitution: f64,
    pair_restitution: f64,
    settle_speed: f64,
    correction: f64,
    distance_bias: f64,
    spawn: SpawnConfig,
    rng: StdRng,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: WorldConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bodies: Vec::new(),
            capacity: config.capacity,
            bounds: Bounds::new(config.width, config.height),
            gravity: config.gravity,
            restitution: config.restitution,
            pair_restitution: config.pair_restitution,
            settle_speed: config.settle_speed,
            correction: config.correction,
            distance_bias: config.distance_bias,
            spawn: config.spawn,
            rng,
        })
    }

    /// Appends up to `count` bodies at `point`, returns how many fit.
    pub fn spawn(&mut self, point: DVec2, count: usize) -> usize {
        let added = count.min(self.capacity - self.bodies.len());

        for _ in 0..added {
            let body = self.random_body(point);
            self.bodies.push(body);
        }

        if added < count {
            debug!(requested = count, added, capacity = self.capacity, "spawn truncated");
        }

        added
    }

    fn random_body(&mut self, position: DVec2) -> Body {
        let SpawnConfig {
            radius,
            mass,
            speed,
        } = self.spawn;

        let velocity = DVec2::new(
            self.rng.gen_range(-1i32..=1) as f64 * speed,
            self.rng.gen_range(-1i32..=1) as f64 * speed,
        );
        let radius = sample(&mut self.rng, radius);
        let mass = sample(&mut self.rng, mass);

        Body::new(position, velocity, radius, mass)
    }

    /// Appends an explicit body; false when full or the body is degenerate.
    pub fn push(&mut self, body: Body) -> bool {
        if !body.is_valid() {
            warn!(
                radius = body.radius,
                mass = body.mass,
                "rejected body with non-positive radius or mass"
            );
            return false;
        }
        if self.is_full() {
            return false;
        }

        self.bodies.push(body);
        true
    }

    /// Existing bodies are re-clamped by the next step
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::new(width, height);
    }

    pub fn remove_last(&mut self, k: usize) {
        let len = self.bodies.len().saturating_sub(k);
        self.bodies.truncate(len);
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn step(&mut self, dt: f64, speed: f64) {
        systems::step(self, dt, speed);
    }

    pub(crate) fn step_params(&self) -> StepParams {
        StepParams {
            bounds: self.bounds,
            gravity: self.gravity,
            restitution: self.restitution,
            pair_restitution: self.pair_restitution,
            settle_speed: self.settle_speed,
            correction: self.correction,
            distance_bias: self.distance_bias,
        }
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        if gravity.is_finite() {
            self.gravity = gravity;
        }
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    pub fn set_restitution(&mut self, restitution: f64) {
        if restitution.is_finite() {
            self.restitution = restitution.max(0.0);
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> DVec2 {
        self.bodies.iter().map(|b| b.velocity * b.mass).sum()
    }
}

fn sample(rng: &mut StdRng, [min, max]: [f64; 2]) -> f64 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
