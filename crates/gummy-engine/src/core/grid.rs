//! Uniform-cell broad phase. Rebuilt from scratch every tick; particle counts are
//! capped, so a full rebuild is cheaper than tracking moves.

use std::collections::HashMap;

use glam::Vec2;

use crate::components::particle::Particle;

type Cell = (i32, i32);

/// Widest neighbor reach the cell scan will use. Particles too big for it are
/// tested against everyone instead.
const MAX_REACH: i32 = 2;

pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<Cell, Vec<usize>>,
    /// Cell of each particle from the last rebuild, indexed like the particle slice.
    /// `None` for oversized particles.
    particle_cells: Vec<Option<Cell>>,
    /// Particles whose diameter exceeds `MAX_REACH` cells, in index order.
    oversized: Vec<usize>,
    /// Neighbor reach in cells for the last rebuild (1 = 3x3 Moore neighborhood).
    reach: i32,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: HashMap::with_capacity(256),
            particle_cells: Vec::new(),
            oversized: Vec::new(),
            reach: 1,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Reach used by the last rebuild.
    pub fn reach(&self) -> i32 {
        self.reach
    }

    /// Indices the last rebuild kept out of the cells.
    pub fn oversized(&self) -> &[usize] {
        &self.oversized
    }

    /// Cell containing `pos`. Coordinates far outside `i32` saturate.
    pub fn cell_of(&self, pos: Vec2) -> Cell {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    /// Bucket every particle by the cell its center falls in.
    ///
    /// The neighbor reach widens with the largest bucketed radius so overlapping
    /// pairs are never missed, up to `MAX_REACH`. Anything bigger goes on the
    /// oversized list and is paired with every other particle.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.particle_cells.clear();
        self.oversized.clear();

        let max_bucketed = self.cell_size * MAX_REACH as f32 * 0.5;
        let mut max_radius = 0.0f32;
        for (i, p) in particles.iter().enumerate() {
            if p.radius > max_bucketed {
                self.oversized.push(i);
                self.particle_cells.push(None);
                continue;
            }
            let cell = self.cell_of(p.pos);
            self.cells.entry(cell).or_default().push(i);
            self.particle_cells.push(Some(cell));
            max_radius = max_radius.max(p.radius);
        }

        self.reach = ((2.0 * max_radius) / self.cell_size)
            .ceil()
            .clamp(1.0, MAX_REACH as f32) as i32;

        // keep the map from growing without bound as particles wander
        if self.cells.len() > 4 * particles.len().max(64) {
            self.cells.retain(|_, bucket| !bucket.is_empty());
        }
    }

    /// Candidate pairs `(i, j)` with `i < j`, each pair at most once.
    /// Ordered by `i`, then neighbor cell row-major, then bucket order.
    /// Pairs involving an oversized particle follow, ordered by the oversized index.
    pub fn candidate_pairs(&self, out: &mut Vec<(usize, usize)>) {
        out.clear();
        let reach = self.reach;
        for (i, cell) in self.particle_cells.iter().enumerate() {
            let Some((cx, cy)) = *cell else {
                continue;
            };
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    // cells past the i32 range do not exist
                    let (Some(nx), Some(ny)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                        continue;
                    };
                    let Some(bucket) = self.cells.get(&(nx, ny)) else {
                        continue;
                    };
                    for &j in bucket {
                        if j <= i {
                            continue;
                        }
                        out.push((i, j));
                    }
                }
            }
        }

        let n = self.particle_cells.len();
        for &big in &self.oversized {
            for k in 0..n {
                if k == big {
                    continue;
                }
                // oversized-oversized pairs come once, from the lower index
                if self.particle_cells[k].is_none() && k < big {
                    continue;
                }
                out.push((big.min(k), big.max(k)));
            }
        }
    }
}
