use serde::{Deserialize, Serialize};

/// Tuning for a `World`. All rates are per physics tick (1/60 s in the web runner),
/// all lengths are arena pixels.
///
/// Deserializes from a partial JSON object: every missing field keeps its default,
/// so JS can pass `{"maxParticles": 300}` and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// Downward acceleration added to vy each tick.
    pub gravity: f32,
    /// Isotropic velocity multiplier applied each tick ("air" drag), in (0, 1].
    pub air: f32,
    /// Bounce coefficient used for particle pairs and walls, in [0, 1].
    pub restitution: f32,
    /// Largest tangential impulse a single contact may exchange.
    pub friction_tangent: f32,
    /// Spawn x spread: Gaussian sigma as a fraction of arena width.
    pub center_bias: f32,
    /// Horizontal pull toward the arena center (0 disables it).
    pub inward_force: f32,
    /// Population cap. Oldest particles are evicted first.
    pub max_particles: usize,
    /// Edge length of a spatial grid cell.
    pub cell_size: f32,
    /// Height of the floor line above the arena bottom edge.
    pub floor_margin: f32,
    /// Floor bounces slower than this are killed outright.
    pub rest_epsilon: f32,
    /// Optional upper bound on y (negative = above the visible arena).
    pub ceiling: Option<f32>,
    /// Velocity given to a shoved neighbor per unit of drag speed.
    pub drag_push: f32,
    /// How far outside the arena a held particle may travel before it is dropped.
    pub drag_escape_padding: f32,
    /// Full horizontal span of a shake impulse.
    pub shake_x: f32,
    /// Full vertical span of a shake impulse (biased upward).
    pub shake_y: f32,
    /// Clamp on angular velocity, radians per tick.
    pub max_spin: f32,
    /// Seed for spawn positions, shake and jitter.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            air: 0.995,
            restitution: 0.4,
            friction_tangent: 0.05,
            center_bias: 0.12,
            inward_force: 0.0,
            max_particles: 1000,
            cell_size: 40.0,
            floor_margin: 0.0,
            rest_epsilon: 0.25,
            ceiling: Some(-300.0),
            drag_push: 0.6,
            drag_escape_padding: 50.0,
            shake_x: 30.0,
            shake_y: 25.0,
            max_spin: 0.3,
            seed: 0x9E37_79B9,
        }
    }
}

impl WorldConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp every field into its valid range. Non-finite values fall back to defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            gravity: finite_or(self.gravity, d.gravity),
            air: finite_or(self.air, d.air).clamp(0.01, 1.0),
            restitution: finite_or(self.restitution, d.restitution).clamp(0.0, 1.0),
            friction_tangent: finite_or(self.friction_tangent, d.friction_tangent).max(0.0),
            center_bias: finite_or(self.center_bias, d.center_bias).max(0.0),
            inward_force: finite_or(self.inward_force, d.inward_force).max(0.0),
            max_particles: self.max_particles.max(1),
            cell_size: finite_or(self.cell_size, d.cell_size).max(1.0),
            floor_margin: finite_or(self.floor_margin, d.floor_margin).max(0.0),
            rest_epsilon: finite_or(self.rest_epsilon, d.rest_epsilon).max(0.0),
            ceiling: self.ceiling.filter(|c| c.is_finite()),
            drag_push: finite_or(self.drag_push, d.drag_push).max(0.0),
            drag_escape_padding: finite_or(self.drag_escape_padding, d.drag_escape_padding).max(0.0),
            shake_x: finite_or(self.shake_x, d.shake_x).abs(),
            shake_y: finite_or(self.shake_y, d.shake_y).abs(),
            max_spin: finite_or(self.max_spin, d.max_spin).abs(),
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = WorldConfig::from_json(r#"{ "maxParticles": 300, "restitution": 0.8 }"#).unwrap();
        assert_eq!(cfg.max_particles, 300);
        assert_eq!(cfg.restitution, 0.8);
        assert_eq!(cfg.gravity, WorldConfig::default().gravity);
        assert_eq!(cfg.ceiling, Some(-300.0));
    }

    #[test]
    fn null_ceiling_disables_it() {
        let cfg = WorldConfig::from_json(r#"{ "ceiling": null }"#).unwrap();
        assert_eq!(cfg.ceiling, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WorldConfig::from_json("{ maxParticles: }").is_err());
        assert!(WorldConfig::from_json(r#"{ "maxParticles": "lots" }"#).is_err());
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let cfg = WorldConfig {
            air: 1.5,
            restitution: -2.0,
            max_particles: 0,
            cell_size: 0.0,
            gravity: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.air, 1.0);
        assert_eq!(cfg.restitution, 0.0);
        assert_eq!(cfg.max_particles, 1);
        assert_eq!(cfg.cell_size, 1.0);
        assert_eq!(cfg.gravity, WorldConfig::default().gravity);
    }

    #[test]
    fn defaults_survive_sanitizing() {
        assert_eq!(WorldConfig::default().sanitized(), WorldConfig::default());
    }
}
