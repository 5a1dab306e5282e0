//! Arena walls: left, right, floor, and an optional ceiling for flung particles.

use crate::api::config::WorldConfig;
use crate::components::particle::Particle;

/// Arena bounds. The floor line sits `floor_margin` above the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub floor_margin: f32,
    pub ceiling: Option<f32>,
}

impl Bounds {
    pub fn new(width: f32, height: f32, config: &WorldConfig) -> Self {
        Self {
            width,
            height,
            floor_margin: config.floor_margin,
            ceiling: config.ceiling,
        }
    }

    pub fn floor_y(&self) -> f32 {
        self.height - self.floor_margin
    }
}

/// Clamp every free particle back inside the arena and reflect its velocity.
pub fn contain(particles: &mut [Particle], bounds: &Bounds, restitution: f32, rest_epsilon: f32) {
    for p in particles.iter_mut() {
        if p.held {
            continue;
        }
        contain_one(p, bounds, restitution, rest_epsilon);
    }
}

fn contain_one(p: &mut Particle, bounds: &Bounds, restitution: f32, rest_epsilon: f32) {
    let r = p.radius;

    if p.pos.x - r < 0.0 {
        p.pos.x = r;
        p.vel.x *= -restitution;
    } else if p.pos.x + r > bounds.width {
        p.pos.x = bounds.width - r;
        p.vel.x *= -restitution;
    }

    let floor = bounds.floor_y();
    if p.pos.y + r > floor {
        p.pos.y = floor - r;
        p.vel.y *= -restitution;
        if p.vel.y.abs() < rest_epsilon {
            p.vel.y = 0.0;
        }
    } else if let Some(ceiling) = bounds.ceiling {
        if p.pos.y - r < ceiling {
            p.pos.y = ceiling + r;
            p.vel.y *= -restitution;
        }
    }
}
