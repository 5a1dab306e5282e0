//! Explicit Euler step: centering, gravity, air drag, then position.

use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::components::particle::Particle;

/// Advance every free particle by one tick. Held particles are skipped entirely.
pub fn integrate(particles: &mut [Particle], config: &WorldConfig, center_x: f32) {
    for p in particles.iter_mut() {
        if p.held {
            continue;
        }
        step(p, config, center_x);
    }
}

fn step(p: &mut Particle, config: &WorldConfig, center_x: f32) {
    p.vel.x += (center_x - p.pos.x) * config.inward_force;
    p.vel.y += config.gravity;
    p.vel *= config.air;

    if !p.vel.is_finite() {
        p.vel = Vec2::ZERO;
    }
    p.pos += p.vel;

    if p.shape.spins() {
        p.spin = (p.spin * config.air).clamp(-config.max_spin, config.max_spin);
        p.angle = (p.angle + p.spin) % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ParticleId;
    use crate::components::shape::ShapeKind;

    fn config() -> WorldConfig {
        WorldConfig {
            gravity: 1.0,
            air: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn gravity_then_damping_then_position() {
        let mut ps = vec![Particle::new(ParticleId(1), Vec2::new(10.0, 10.0), 5.0, 1.0)
            .with_vel(Vec2::new(2.0, 0.0))];
        integrate(&mut ps, &config(), 10.0);
        // vy = (0 + 1) * 0.5, vx = 2 * 0.5
        assert_eq!(ps[0].vel, Vec2::new(1.0, 0.5));
        assert_eq!(ps[0].pos, Vec2::new(11.0, 10.5));
    }

    #[test]
    fn inward_force_pulls_toward_center() {
        let cfg = WorldConfig {
            gravity: 0.0,
            air: 1.0,
            inward_force: 0.01,
            ..Default::default()
        };
        let mut ps = vec![
            Particle::new(ParticleId(1), Vec2::new(0.0, 0.0), 5.0, 1.0),
            Particle::new(ParticleId(2), Vec2::new(200.0, 0.0), 5.0, 1.0),
        ];
        integrate(&mut ps, &cfg, 100.0);
        assert!(ps[0].vel.x > 0.0);
        assert!(ps[1].vel.x < 0.0);
    }

    #[test]
    fn zero_inward_force_leaves_vx_alone() {
        let cfg = WorldConfig { gravity: 0.0, air: 1.0, ..Default::default() };
        let mut ps = vec![Particle::new(ParticleId(1), Vec2::new(0.0, 0.0), 5.0, 1.0)];
        integrate(&mut ps, &cfg, 100.0);
        assert_eq!(ps[0].vel, Vec2::ZERO);
    }

    #[test]
    fn held_particles_do_not_move() {
        let mut p = Particle::new(ParticleId(1), Vec2::new(10.0, 10.0), 5.0, 1.0)
            .with_vel(Vec2::new(3.0, 3.0));
        p.held = true;
        let mut ps = vec![p];
        integrate(&mut ps, &config(), 0.0);
        assert_eq!(ps[0].pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn non_finite_velocity_is_discarded() {
        let mut ps = vec![Particle::new(ParticleId(1), Vec2::new(10.0, 10.0), 5.0, 1.0)
            .with_vel(Vec2::new(f32::NAN, 0.0))];
        integrate(&mut ps, &config(), 0.0);
        assert_eq!(ps[0].pos, Vec2::new(10.0, 10.0));
        assert!(ps[0].vel.is_finite());
    }

    #[test]
    fn only_non_circles_rotate() {
        let mut ps = vec![
            Particle::new(ParticleId(1), Vec2::ZERO, 5.0, 1.0).with_spin(0.1),
            Particle::new(ParticleId(2), Vec2::ZERO, 5.0, 1.0)
                .with_shape(ShapeKind::Pencil)
                .with_spin(0.1),
        ];
        integrate(&mut ps, &WorldConfig { air: 1.0, ..Default::default() }, 0.0);
        assert_eq!(ps[0].angle, 0.0);
        assert!((ps[1].angle - 0.1).abs() < 1e-6);
    }
}
