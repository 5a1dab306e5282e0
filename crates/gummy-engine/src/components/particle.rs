use glam::Vec2;
use serde::Serialize;

use crate::api::gummy::GummySpec;
use crate::api::types::ParticleId;
use crate::components::color::Rgb;
use crate::components::shape::ShapeKind;

/// Decorative data carried alongside the physics state. Read by the renderer and
/// the tooltip, never by the solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GummyMeta {
    /// Color exactly as the adapter supplied it.
    pub color: String,
    pub shape: ShapeKind,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One simulated gummy. Collision treats it as a circle of `radius`.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    /// Center, arena-local (origin top-left, y down).
    pub pos: Vec2,
    /// Pixels per tick.
    pub vel: Vec2,
    /// Fixed at spawn.
    pub radius: f32,
    pub mass: f32,
    /// Rotation in radians, only meaningful for non-circle shapes.
    pub angle: f32,
    /// Angular velocity, radians per tick.
    pub spin: f32,
    pub shape: ShapeKind,
    /// Decoded fill color.
    pub rgb: Rgb,
    pub meta: GummyMeta,
    /// Set while the pointer holds this particle: no integration, infinite mass in contacts.
    pub held: bool,
}

impl Particle {
    pub fn new(id: ParticleId, pos: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: if radius.is_finite() && radius > 0.0 { radius } else { crate::api::gummy::MIN_RADIUS },
            mass: if mass.is_finite() { mass.max(1.0) } else { 1.0 },
            angle: 0.0,
            spin: 0.0,
            shape: ShapeKind::Circle,
            rgb: Rgb::FALLBACK,
            meta: GummyMeta::default(),
            held: false,
        }
    }

    /// Build a particle from adapter input. Radius and mass come from the (clamped) weight.
    pub fn from_spec(id: ParticleId, spec: &GummySpec, pos: Vec2) -> Self {
        let mut p = Self::new(id, pos, spec.radius(), spec.mass());
        p.shape = spec.shape;
        p.rgb = Rgb::parse_or_fallback(&spec.color);
        p.meta = GummyMeta {
            color: spec.color.clone(),
            shape: spec.shape,
            highlighted: spec.highlighted,
            title: spec.title.clone(),
            date: spec.date.clone(),
        };
        p
    }

    // -- Builder pattern --

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self.meta.shape = shape;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Inverse mass seen by the contact solver. Zero while held.
    pub fn inv_mass(&self) -> f32 {
        if self.held {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Hit test against the rotated silhouette.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d = point - self.pos;
        // outside the bounding box's circumcircle at any rotation
        if d.length_squared() > self.shape.half_extents(self.radius).length_squared() {
            return false;
        }
        let local = Vec2::from_angle(-self.angle).rotate(d);
        self.shape.contains(local, self.radius)
    }

    pub fn overlaps(&self, other: &Particle) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) < reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_derives_radius_and_mass() {
        let spec = GummySpec::new("#ff0000", 2.0)
            .with_shape(ShapeKind::Book)
            .with_title("Standup");
        let p = Particle::from_spec(ParticleId(7), &spec, Vec2::new(1.0, 2.0));
        assert_eq!(p.radius, 11.0);
        assert_eq!(p.mass, 2.0);
        assert_eq!(p.shape, ShapeKind::Book);
        assert_eq!(p.rgb, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(p.meta.title.as_deref(), Some("Standup"));
    }

    #[test]
    fn held_particles_have_infinite_mass() {
        let mut p = Particle::new(ParticleId(1), Vec2::ZERO, 10.0, 4.0);
        assert_eq!(p.inv_mass(), 0.25);
        p.held = true;
        assert_eq!(p.inv_mass(), 0.0);
    }

    #[test]
    fn bad_radius_and_mass_are_repaired() {
        let p = Particle::new(ParticleId(1), Vec2::ZERO, f32::NAN, -5.0);
        assert!(p.radius > 0.0);
        assert_eq!(p.mass, 1.0);
    }

    #[test]
    fn hit_test_follows_rotation() {
        // pencil is long along x: 3.2r plus the tip
        let mut p = Particle::new(ParticleId(1), Vec2::new(100.0, 100.0), 10.0, 1.0)
            .with_shape(ShapeKind::Pencil);
        assert!(p.contains_point(Vec2::new(112.0, 100.0)));
        assert!(!p.contains_point(Vec2::new(100.0, 112.0)));

        p.angle = std::f32::consts::FRAC_PI_2;
        assert!(p.contains_point(Vec2::new(100.0, 112.0)));
        assert!(!p.contains_point(Vec2::new(112.0, 100.0)));
    }

    #[test]
    fn overlap_is_strict() {
        let a = Particle::new(ParticleId(1), Vec2::ZERO, 10.0, 1.0);
        let b = Particle::new(ParticleId(2), Vec2::new(20.0, 0.0), 10.0, 1.0);
        let c = Particle::new(ParticleId(3), Vec2::new(19.0, 0.0), 10.0, 1.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
