use glam::Vec2;

use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// Live particles in insertion order, oldest first.
/// Ids are handed out monotonically and never reused, so index order and id
/// order agree and eviction can always drain from the front.
///
/// Ids are `u32`: lookups by id assume fewer than `u32::MAX` insertions over
/// the arena's lifetime. Past that the counter stops instead of wrapping.
pub struct ParticleArena {
    particles: Vec<Particle>,
    next_id: u32,
}

impl ParticleArena {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Reserve the next id. Ids keep counting across `clear`.
    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        if self.next_id == u32::MAX {
            log::warn!("particle id space exhausted, ids now repeat");
        }
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop the oldest particles until at most `cap` remain. Returns how many went.
    pub fn evict_oldest(&mut self, cap: usize) -> usize {
        let excess = self.particles.len().saturating_sub(cap);
        if excess > 0 {
            self.particles.drain(..excess);
        }
        excess
    }

    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        // ids ascend with index
        self.particles.binary_search_by_key(&id, |p| p.id).ok()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.index_of(id).map(|i| &self.particles[i])
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        let i = self.index_of(id)?;
        Some(&mut self.particles[i])
    }

    /// Topmost particle under `point`. Later insertions draw on top, so search from the back.
    pub fn hit_test(&self, point: Vec2) -> Option<ParticleId> {
        self.particles
            .iter()
            .rev()
            .find(|p| p.contains_point(point))
            .map(|p| p.id)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticleArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(arena: &mut ParticleArena, x: f32) -> ParticleId {
        let id = arena.next_id();
        arena.push(Particle::new(id, Vec2::new(x, 0.0), 10.0, 1.0));
        id
    }

    #[test]
    fn ids_are_monotonic_and_survive_clear() {
        let mut arena = ParticleArena::new();
        let a = spawn(&mut arena, 0.0);
        let b = spawn(&mut arena, 0.0);
        assert!(b > a);
        arena.clear();
        let c = spawn(&mut arena, 0.0);
        assert!(c > b);
    }

    #[test]
    fn id_counter_never_wraps_below_live_ids() {
        let mut arena = ParticleArena::new();
        arena.next_id = u32::MAX - 1;
        let a = spawn(&mut arena, 0.0);
        let b = spawn(&mut arena, 100.0);
        let c = spawn(&mut arena, 200.0);
        assert_eq!((a.0, b.0, c.0), (u32::MAX - 1, u32::MAX, u32::MAX));
        assert!(arena.iter().map(|p| p.id).collect::<Vec<_>>().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(arena.index_of(a), Some(0));
    }

    #[test]
    fn eviction_drops_oldest_first() {
        let mut arena = ParticleArena::new();
        let ids: Vec<_> = (0..5).map(|i| spawn(&mut arena, i as f32)).collect();
        assert_eq!(arena.evict_oldest(3), 2);
        let left: Vec<_> = arena.iter().map(|p| p.id).collect();
        assert_eq!(left, ids[2..].to_vec());
        assert_eq!(arena.evict_oldest(3), 0);
    }

    #[test]
    fn lookup_by_id_after_eviction() {
        let mut arena = ParticleArena::new();
        let ids: Vec<_> = (0..4).map(|i| spawn(&mut arena, i as f32 * 100.0)).collect();
        arena.evict_oldest(2);
        assert!(arena.get(ids[0]).is_none());
        assert_eq!(arena.index_of(ids[3]), Some(1));
        arena.get_mut(ids[2]).unwrap().vel = Vec2::ONE;
        assert_eq!(arena.get(ids[2]).unwrap().vel, Vec2::ONE);
    }

    #[test]
    fn hit_test_prefers_newest() {
        let mut arena = ParticleArena::new();
        assert_eq!(arena.hit_test(Vec2::ZERO), None);
        let _under = spawn(&mut arena, 0.0);
        let over = spawn(&mut arena, 5.0);
        assert_eq!(arena.hit_test(Vec2::new(2.0, 0.0)), Some(over));
        assert_eq!(arena.hit_test(Vec2::new(500.0, 0.0)), None);
    }
}
