//! Pointer drag: grab the topmost particle, move it kinematically, shove whatever it runs into.

use glam::Vec2;

use crate::api::types::{CursorHint, ParticleId};
use crate::core::scene::ParticleArena;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        id: ParticleId,
        /// Pointer position minus particle center at grab time.
        offset: Vec2,
        /// Particle center after the previous move.
        last_pos: Vec2,
    },
}

pub struct DragController {
    state: DragState,
    hover: CursorHint,
    push: f32,
    escape_padding: f32,
}

impl DragController {
    pub fn new(push: f32, escape_padding: f32) -> Self {
        Self {
            state: DragState::Idle,
            hover: CursorHint::Default,
            push,
            escape_padding,
        }
    }

    pub fn held(&self) -> Option<ParticleId> {
        match self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn cursor(&self) -> CursorHint {
        match self.state {
            DragState::Dragging { .. } => CursorHint::Grabbing,
            DragState::Idle => self.hover,
        }
    }

    /// Grab the topmost particle under `point`. A second pointer while dragging is ignored.
    pub fn pointer_down(&mut self, arena: &mut ParticleArena, point: Vec2) -> Option<ParticleId> {
        if self.held().is_some() || !point.is_finite() {
            return None;
        }
        let id = arena.hit_test(point)?;
        let p = arena.get_mut(id)?;
        p.vel = Vec2::ZERO;
        p.spin = 0.0;
        p.held = true;
        self.state = DragState::Dragging {
            id,
            offset: point - p.pos,
            last_pos: p.pos,
        };
        log::debug!("drag start {:?}", id);
        Some(id)
    }

    /// Move the held particle to follow the pointer, or update the hover cursor when idle.
    pub fn pointer_move(&mut self, arena: &mut ParticleArena, point: Vec2) -> CursorHint {
        if !point.is_finite() {
            return self.cursor();
        }
        let DragState::Dragging { id, offset, last_pos } = self.state else {
            self.hover = match arena.hit_test(point) {
                Some(_) => CursorHint::Grab,
                None => CursorHint::Default,
            };
            return self.hover;
        };
        let Some(index) = arena.index_of(id) else {
            // evicted or cleared mid-drag
            self.state = DragState::Idle;
            return self.cursor();
        };

        let target = point - offset;
        let drag_speed = target.distance(last_pos);
        let drag_dir = (target - last_pos).normalize_or_zero();

        let particles = arena.as_mut_slice();
        let held = &mut particles[index];
        held.pos = target;
        held.vel = Vec2::ZERO;
        let radius = held.radius;

        for (i, q) in particles.iter_mut().enumerate() {
            if i == index {
                continue;
            }
            let delta = q.pos - target;
            let reach = radius + q.radius;
            let dist_sq = delta.length_squared();
            if dist_sq >= reach * reach {
                continue;
            }
            let dist = dist_sq.sqrt();
            let normal = if dist > 1e-6 {
                delta / dist
            } else if drag_dir != Vec2::ZERO {
                drag_dir
            } else {
                Vec2::NEG_Y
            };
            q.pos = target + normal * reach;
            q.vel += normal * drag_speed * self.push;
        }

        self.state = DragState::Dragging {
            id,
            offset,
            last_pos: target,
        };
        CursorHint::Grabbing
    }

    /// Let go. The particle keeps whatever velocity it holds (zero after a move).
    pub fn pointer_up(&mut self, arena: &mut ParticleArena) -> Option<ParticleId> {
        let id = self.held()?;
        if let Some(p) = arena.get_mut(id) {
            p.held = false;
        }
        self.state = DragState::Idle;
        log::debug!("drag end {:?}", id);
        Some(id)
    }

    /// Release the drag once the held particle is flung well outside the arena.
    pub fn release_if_escaped(&mut self, arena: &mut ParticleArena, width: f32, height: f32) -> bool {
        let Some(id) = self.held() else {
            return false;
        };
        let Some(p) = arena.get(id) else {
            self.state = DragState::Idle;
            return false;
        };
        let pad = self.escape_padding;
        let escaped = p.pos.x < -pad || p.pos.x > width + pad || p.pos.y < -pad || p.pos.y > height + pad;
        if escaped {
            log::debug!("drag released: {:?} left the arena", id);
            self.pointer_up(arena);
        }
        escaped
    }

    /// Forget the drag without touching particles (they are gone after a clear).
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.hover = CursorHint::Default;
    }
}
