use glam::Vec2;
use serde::Serialize;

use crate::api::config::WorldConfig;
use crate::api::gummy::GummySpec;
use crate::api::types::{CursorHint, ParticleId};
use crate::components::particle::{GummyMeta, Particle};
use crate::core::boundary::{self, Bounds};
use crate::core::collision;
use crate::core::drag::DragController;
use crate::core::grid::SpatialGrid;
use crate::core::integrator;
use crate::core::rng::Rng;
use crate::core::scene::ParticleArena;
use crate::input::queue::InputEvent;

/// Spawn x never lands closer than this to a side wall.
const SPAWN_SIDE_MARGIN: f32 = 20.0;
/// Spawn y is drawn from `[-(SPAWN_HEIGHT + SPAWN_LIFT), -SPAWN_LIFT)`.
const SPAWN_HEIGHT: f32 = 200.0;
const SPAWN_LIFT: f32 = 20.0;
/// Full span of the random horizontal velocity a gummy spawns with.
const SPAWN_VX_SPAN: f32 = 0.25;

/// The gummy simulation: owns the particles and runs the per-tick pipeline
/// (integrate, broad phase, narrow phase, boundary).
///
/// Configuration is fixed at construction. `set_size` is the only geometry mutator.
pub struct World {
    config: WorldConfig,
    width: f32,
    height: f32,
    arena: ParticleArena,
    grid: SpatialGrid,
    pairs: Vec<(usize, usize)>,
    drag: DragController,
    rng: Rng,
    frame: u64,
}

/// Tooltip payload for one particle.
#[derive(Serialize)]
struct TooltipView<'a> {
    id: u32,
    radius: f32,
    #[serde(flatten)]
    meta: &'a GummyMeta,
}

impl World {
    pub fn new(config: WorldConfig, width: f32, height: f32) -> Self {
        let config = config.sanitized();
        let (width, height) = if valid_size(width, height) {
            (width, height)
        } else {
            log::warn!("invalid arena size {}x{}, using 1x1", width, height);
            (1.0, 1.0)
        };
        log::info!(
            "World: {}x{} arena, cap {}, cell {}",
            width,
            height,
            config.max_particles,
            config.cell_size
        );

        Self {
            width,
            height,
            arena: ParticleArena::with_capacity(config.max_particles.min(1024)),
            grid: SpatialGrid::new(config.cell_size),
            pairs: Vec::with_capacity(1024),
            drag: DragController::new(config.drag_push, config.drag_escape_padding),
            rng: Rng::new(config.seed),
            frame: 0,
            config,
        }
    }

    /// Build a world from a partial JSON config override.
    pub fn with_config_json(json: &str, width: f32, height: f32) -> Result<Self, serde_json::Error> {
        Ok(Self::new(WorldConfig::from_json(json)?, width, height))
    }

    // -- Lifecycle --

    /// Spawn one particle per item above the arena, then evict the oldest down to the cap.
    /// Returns how many particles were evicted.
    pub fn add_gummies(&mut self, items: &[GummySpec]) -> usize {
        if items.is_empty() {
            return 0;
        }
        for spec in items {
            let weight = spec.clamped_weight();
            if weight != spec.weight {
                log::warn!("gummy weight {} clamped to {}", spec.weight, weight);
            }
            let id = self.arena.next_id();
            let pos = self.spawn_position();
            let vx = self.rng.range(-0.5, 0.5) * SPAWN_VX_SPAN;
            let spin = spec.shape.spawn_spin(self.rng.next_f32());
            let particle = Particle::from_spec(id, spec, pos)
                .with_vel(Vec2::new(vx, 0.0))
                .with_spin(spin);
            self.arena.push(particle);
        }

        let evicted = self.enforce_cap();
        log::debug!(
            "added {} gummies, evicted {}, live {}",
            items.len(),
            evicted,
            self.arena.len()
        );
        evicted
    }

    /// Place one gummy at a chosen point at rest, then enforce the cap.
    pub fn add_gummy_at(&mut self, spec: &GummySpec, pos: Vec2) -> ParticleId {
        let id = self.arena.next_id();
        let pos = if pos.is_finite() { pos } else { Vec2::new(self.width * 0.5, 0.0) };
        self.arena.push(Particle::from_spec(id, spec, pos));
        self.enforce_cap();
        id
    }

    /// Evict the oldest particles down to the cap. A drag on an evicted particle ends.
    fn enforce_cap(&mut self) -> usize {
        let evicted = self.arena.evict_oldest(self.config.max_particles);
        if let Some(id) = self.drag.held() {
            if self.arena.get(id).is_none() {
                self.drag.reset();
            }
        }
        evicted
    }

    /// Parse a JSON array of gummies and add them.
    pub fn add_gummies_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let items = GummySpec::list_from_json(json)?;
        Ok(self.add_gummies(&items))
    }

    fn spawn_position(&mut self) -> Vec2 {
        let w = self.width;
        let margin = SPAWN_SIDE_MARGIN.min(w * 0.5);
        let x = self
            .rng
            .normal(w * 0.5, w * self.config.center_bias)
            .clamp(margin, w - margin);
        let y = -self.rng.range(SPAWN_LIFT, SPAWN_LIFT + SPAWN_HEIGHT);
        Vec2::new(x, y)
    }

    /// Remove every particle. Configuration and arena size are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.drag.reset();
        self.pairs.clear();
        log::info!("World cleared");
    }

    /// One random kick to every free particle: wide horizontally, biased upward.
    pub fn shake(&mut self) {
        let (sx, sy) = (self.config.shake_x, self.config.shake_y);
        for p in self.arena.iter_mut() {
            if p.held {
                continue;
            }
            p.vel.x += self.rng.range(-0.5, 0.5) * sx;
            p.vel.y += self.rng.range(-0.7, 0.3) * sy;
        }
    }

    /// Resize the arena. Non-positive or non-finite sizes are ignored.
    /// Particles left outside are pulled back by the next tick's boundary pass.
    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        if !valid_size(width, height) {
            log::warn!("set_size({}, {}) rejected", width, height);
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    // -- Simulation --

    /// Advance the simulation by one fixed tick.
    pub fn tick(&mut self) {
        let center_x = self.width * 0.5;
        integrator::integrate(self.arena.as_mut_slice(), &self.config, center_x);

        self.grid.rebuild(self.arena.as_slice());
        self.grid.candidate_pairs(&mut self.pairs);
        collision::resolve_pairs(
            self.arena.as_mut_slice(),
            &self.pairs,
            &self.config,
            &mut self.rng,
        );

        let bounds = Bounds::new(self.width, self.height, &self.config);
        boundary::contain(
            self.arena.as_mut_slice(),
            &bounds,
            self.config.restitution,
            self.config.rest_epsilon,
        );

        self.drag.release_if_escaped(&mut self.arena, self.width, self.height);
        self.frame += 1;
    }

    /// Nothing to simulate. The web runner skips ticks while idle.
    pub fn is_idle(&self) -> bool {
        self.arena.is_empty()
    }

    // -- Input --

    /// Route queued pointer events, in order.
    pub fn apply_input(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    self.on_pointer_down(x, y);
                }
                InputEvent::PointerMove { x, y } => {
                    self.on_pointer_move(x, y);
                }
                InputEvent::PointerUp | InputEvent::PointerLeave => {
                    self.on_pointer_up();
                }
            }
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> Option<ParticleId> {
        self.drag.pointer_down(&mut self.arena, Vec2::new(x, y))
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> CursorHint {
        self.drag.pointer_move(&mut self.arena, Vec2::new(x, y))
    }

    pub fn on_pointer_up(&mut self) -> Option<ParticleId> {
        self.drag.pointer_up(&mut self.arena)
    }

    /// Topmost particle under a point, for hover tooltips.
    pub fn particle_at(&self, x: f32, y: f32) -> Option<ParticleId> {
        self.arena.hit_test(Vec2::new(x, y))
    }

    /// Tooltip JSON (`id`, `radius`, `color`, `shape`, `highlighted`, `title`, `date`).
    pub fn metadata_json(&self, id: ParticleId) -> Option<String> {
        let p = self.arena.get(id)?;
        let view = TooltipView {
            id: p.id.0,
            radius: p.radius,
            meta: &p.meta,
        };
        serde_json::to_string(&view).ok()
    }

    // -- Accessors --

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Read-only render snapshot, oldest first (draw order).
    pub fn particles(&self) -> &[Particle] {
        self.arena.as_slice()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.arena.get(id)
    }

    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.arena.index_of(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn held(&self) -> Option<ParticleId> {
        self.drag.held()
    }

    pub fn cursor(&self) -> CursorHint {
        self.drag.cursor()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

fn valid_size(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}
