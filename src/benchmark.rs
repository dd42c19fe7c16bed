use std::time::{Duration, Instant};

use glam::DVec2;

use crate::collision;
use crate::world::World;

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub frames: usize,
    pub bodies: usize,
    pub elapsed: Duration,
    pub kinetic_energy: f64,
    /// Worst distance any circle pokes outside the bounds
    pub max_boundary_violation: f64,
    /// Worst pair overlap left after the last frame
    pub max_overlap: f64,
}

impl RunStats {
    pub fn frame_time(&self) -> Duration {
        if self.frames == 0 {
            Duration::ZERO
        } else {
            self.elapsed.div_f64(self.frames as f64)
        }
    }
}

/// Steps `world` for `frames` frames of `dt` seconds and reports how it went.
pub fn run(world: &mut World, frames: usize, dt: f64, speed: f64) -> RunStats {
    let timer = Instant::now();
    for _ in 0..frames {
        world.step(dt, speed);
    }
    let elapsed = timer.elapsed();

    let bounds = world.bounds();
    let max_boundary_violation = world
        .bodies()
        .iter()
        .map(|b| b.boundary_violation(bounds))
        .fold(0.0, f64::max);

    RunStats {
        frames,
        bodies: world.len(),
        elapsed,
        kinetic_energy: world.kinetic_energy(),
        max_boundary_violation,
        max_overlap: max_overlap(world),
    }
}

fn max_overlap(world: &World) -> f64 {
    let bodies = world.bodies();
    let mut worst: f64 = 0.0;

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (&bodies[i], &bodies[j]);
            let contact = collision::detect(a.position, a.radius, b.position, b.radius, 0.0);
            if let Some(contact) = contact {
                worst = worst.max(contact.overlap);
            }
        }
    }

    worst
}

/// Spawns `count` bodies spread over a grid covering the world,
/// deterministic positions so runs are comparable.
pub fn populate(world: &mut World, count: usize) -> usize {
    let bounds = world.bounds();
    let columns = (count as f64).sqrt().ceil().max(1.0) as usize;
    let rows = count.div_ceil(columns).max(1);

    let mut added = 0;
    for n in 0..count {
        let (col, row) = (n % columns, n / columns);
        let point = DVec2::new(
            bounds.width * (col as f64 + 0.5) / columns as f64,
            bounds.height * (row as f64 + 0.5) / rows as f64,
        );

        if world.spawn(point, 1) == 0 {
            break;
        }
        added += 1;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    #[test]
    fn populate_respects_capacity() {
        let mut world = World::new(WorldConfig {
            capacity: 30,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(populate(&mut world, 100), 30);
        assert_eq!(world.len(), 30);
    }

    #[test]
    fn run_reports_frames_and_containment() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        populate(&mut world, 200);

        let stats = run(&mut world, 120, 1.0 / 60.0, 1.0);

        assert_eq!(stats.frames, 120);
        assert_eq!(stats.bodies, 200);
        assert!(stats.max_boundary_violation < 1e-9);
        assert!(stats.kinetic_energy.is_finite());
    }

    #[test]
    fn frame_time_averages_elapsed() {
        let stats = RunStats {
            frames: 4,
            bodies: 0,
            elapsed: Duration::from_millis(10),
            kinetic_energy: 0.0,
            max_boundary_violation: 0.0,
            max_overlap: 0.0,
        };
        let per_frame = stats.frame_time().as_secs_f64();
        assert!((per_frame - 0.0025).abs() < 1e-9, "{per_frame}");

        // would truncate to a zero divisor as u32
        let stats = RunStats {
            frames: 1usize << 32,
            ..stats
        };
        assert!(stats.frame_time() < Duration::from_nanos(1));
    }

    #[test]
    fn zero_frames() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let stats = run(&mut world, 0, 1.0 / 60.0, 1.0);
        assert_eq!(stats.frame_time(), Duration::ZERO);
        assert_eq!(stats.max_overlap, 0.0);
    }
}
