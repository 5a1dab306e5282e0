use bytemuck::{Pod, Zeroable};

use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// `flags` bit: the pointer is holding this gummy.
pub const FLAG_HELD: u32 = 1;
/// `flags` bit: highlighted (birthday) gummy, drawn with a marker.
pub const FLAG_HIGHLIGHTED: u32 = 2;

/// Outline colour is the fill darkened by this much.
pub const OUTLINE_SHADE: f32 = -0.25;

/// Per-gummy render data read by the canvas renderer out of WASM memory.
/// 16 floats = 64 bytes per instance. Integer fields are stored as f32.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GummyInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `ShapeKind` discriminant.
    pub shape: f32,
    pub outline_r: f32,
    pub outline_g: f32,
    pub outline_b: f32,
    /// `FLAG_*` bits.
    pub flags: f32,
    /// Low 16 bits of the `ParticleId`. Split so every u32 id survives the f32 trip.
    pub id_lo: f32,
    /// High 16 bits of the `ParticleId`.
    pub id_hi: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl GummyInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_particle(p: &Particle) -> Self {
        let mut flags = 0;
        if p.held {
            flags |= FLAG_HELD;
        }
        if p.meta.highlighted {
            flags |= FLAG_HIGHLIGHTED;
        }
        let outline = p.rgb.shade(OUTLINE_SHADE);
        Self {
            x: p.pos.x,
            y: p.pos.y,
            radius: p.radius,
            rotation: p.angle,
            r: p.rgb.r,
            g: p.rgb.g,
            b: p.rgb.b,
            shape: p.shape as u32 as f32,
            outline_r: outline.r,
            outline_g: outline.g,
            outline_b: outline.b,
            flags: flags as f32,
            id_lo: (p.id.0 & 0xFFFF) as f32,
            id_hi: (p.id.0 >> 16) as f32,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }

    /// Reassemble the id (JS does `hi * 65536 + lo`).
    pub fn particle_id(&self) -> ParticleId {
        ParticleId(((self.id_hi as u32) << 16) | self.id_lo as u32)
    }
}

/// Flat instance buffer rebuilt after every batch of ticks.
pub struct GummyBuffer {
    instances: Vec<GummyInstance>,
}

impl GummyBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: GummyInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[GummyInstance] {
        &self.instances
    }

    /// The instances as one contiguous float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

impl Default for GummyBuffer {
    fn default() -> Self {
        Self::new()
    }
}
