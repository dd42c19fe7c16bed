use crate::collision::{self, process_collision};
use crate::components::{Body, Bounds};
use crate::world::World;

/// Constants a step reads from the world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub bounds: Bounds,
    pub gravity: f64,
    pub restitution: f64,
    pub pair_restitution: f64,
    pub settle_speed: f64,
    pub correction: f64,
    pub distance_bias: f64,
}

/// Advances the world by `dt * speed` seconds of simulated time.
///
/// Bodies are visited in insertion order. Each one is integrated and pushed
/// back inside the walls, then tested against every later body. Pairs are
/// therefore resolved in ascending `(i, j)` order, which fixes the outcome
/// of simultaneous contacts.
pub fn step(world: &mut World, dt: f64, speed: f64) {
    let params = world.step_params();
    let dt = non_negative(dt) * non_negative(speed);

    let bodies = world.bodies_mut();

    for i in 0..bodies.len() {
        update_velocity(&mut bodies[i], params.gravity, dt);
        update_position(&mut bodies[i], dt);
        check_wall_collision(&mut bodies[i], &params);

        for j in (i + 1)..bodies.len() {
            handle_collision(bodies, i, j, &params);
        }
    }

    // pair corrections may have nudged already-contained bodies past a wall
    for body in bodies.iter_mut() {
        clamp_to_bounds(body, params.bounds);
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub fn update_velocity(body: &mut Body, gravity: f64, dt: f64) {
    body.velocity.y += gravity * dt;
}

pub fn update_position(body: &mut Body, dt: f64) {
    body.position += body.velocity * dt;
}

pub fn check_wall_collision(body: &mut Body, params: &StepParams) {
    let Body {
        position,
        velocity,
        radius,
        ..
    } = body;
    let Bounds { width, height } = params.bounds;
    let rest = params.restitution;

    if position.y + *radius > height {
        position.y = height - *radius;
        // not heading into the floor fast enough to bounce
        if velocity.y < params.settle_speed {
            velocity.y = 0.0;
        }
        velocity.y *= -rest;
    }
    if position.y - *radius < 0.0 {
        position.y = *radius;
        if velocity.y > -params.settle_speed {
            velocity.y = 0.0;
        }
        velocity.y *= -rest;
    }

    if position.x - *radius < 0.0 {
        position.x = *radius;
        velocity.x *= -rest;
    }
    if position.x + *radius > width {
        position.x = width - *radius;
        velocity.x *= -rest;
    }
}

/// Detects and resolves the pair `(i, j)`, `i < j`.
pub fn handle_collision(bodies: &mut [Body], i: usize, j: usize, params: &StepParams) {
    let mut a = bodies[i];
    let mut b = bodies[j];

    let Some(contact) =
        collision::detect(a.position, a.radius, b.position, b.radius, params.distance_bias)
    else {
        return;
    };

    let (correction_a, correction_b) = collision::separate(contact, params.correction);
    a.position += correction_a;
    b.position += correction_b;

    if collision::approaching(a.velocity, b.velocity, a.position, b.position) {
        let (new_vel_a, new_vel_b) = process_collision(
            a.velocity,
            b.velocity,
            a.position,
            b.position,
            a.mass,
            b.mass,
            params.distance_bias,
        );

        // pair_restitution 1.0 keeps the fully elastic response
        let share = (1.0 + params.pair_restitution) / 2.0;
        a.velocity += (new_vel_a - a.velocity) * share;
        b.velocity += (new_vel_b - b.velocity) * share;
    }

    bodies[i] = a;
    bodies[j] = b;
}

fn clamp_to_bounds(body: &mut Body, bounds: Bounds) {
    body.position.x = body.position.x.max(body.radius).min(bounds.width - body.radius);
    body.position.y = body.position.y.max(body.radius).min(bounds.height - body.radius);
}
