//! Narrow phase: circle-circle overlap correction plus impulse response.
//!
//! Single pass, sequential. Each candidate pair is resolved once per tick in the
//! order the grid emits it, so a particle with several contacts receives the sum
//! of sequential corrections. Convergence comes from repeating this every tick.

use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::components::particle::Particle;
use crate::core::rng::Rng;

/// Centers closer than this are treated as coincident.
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Resolve every candidate pair once, in order.
pub fn resolve_pairs(
    particles: &mut [Particle],
    pairs: &[(usize, usize)],
    config: &WorldConfig,
    rng: &mut Rng,
) {
    for &(i, j) in pairs {
        if i == j || i >= particles.len() || j >= particles.len() {
            continue;
        }
        let (p, q) = pair_mut(particles, i, j);
        resolve(p, q, config, rng);
    }
}

fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    if i < j {
        let (a, b) = particles.split_at_mut(j);
        (&mut a[i], &mut b[0])
    } else {
        let (a, b) = particles.split_at_mut(i);
        (&mut b[0], &mut a[j])
    }
}

fn resolve(p: &mut Particle, q: &mut Particle, config: &WorldConfig, rng: &mut Rng) {
    let inv_p = p.inv_mass();
    let inv_q = q.inv_mass();
    let inv_sum = inv_p + inv_q;
    if inv_sum <= 0.0 {
        return;
    }

    let delta = q.pos - p.pos;
    let reach = p.radius + q.radius;
    let dist_sq = delta.length_squared();
    if dist_sq >= reach * reach {
        return;
    }

    let dist = dist_sq.sqrt();
    let (normal, dist) = if dist > COINCIDENT_EPSILON {
        (delta / dist, dist)
    } else {
        (rng.unit_vec(), 0.0)
    };

    // positional split: the lighter (or free) body moves further
    let overlap = reach - dist;
    p.pos -= normal * overlap * (inv_p / inv_sum);
    q.pos += normal * overlap * (inv_q / inv_sum);

    // restitution only for approaching pairs
    let rel_n = (q.vel - p.vel).dot(normal);
    if rel_n < 0.0 {
        let j = -(1.0 + config.restitution) * rel_n / inv_sum;
        let impulse = normal * j;
        p.vel -= impulse * inv_p;
        q.vel += impulse * inv_q;
    }

    apply_friction(p, q, normal, inv_p, inv_q, config);
}

fn apply_friction(
    p: &mut Particle,
    q: &mut Particle,
    normal: Vec2,
    inv_p: f32,
    inv_q: f32,
    config: &WorldConfig,
) {
    let tangent = normal.perp();
    let rel_t = (q.vel - p.vel).dot(tangent);
    let limit = config.friction_tangent;
    let jt = (-rel_t / (inv_p + inv_q)).clamp(-limit, limit);
    if jt == 0.0 {
        return;
    }

    let impulse = tangent * jt;
    p.vel -= impulse * inv_p;
    q.vel += impulse * inv_q;

    // the surface drag of a tangential impulse rolls asymmetric shapes
    if p.shape.spins() {
        p.spin = (p.spin - jt * inv_p / p.radius).clamp(-config.max_spin, config.max_spin);
    }
    if q.shape.spins() {
        q.spin = (q.spin - jt * inv_q / q.radius).clamp(-config.max_spin, config.max_spin);
    }
}
