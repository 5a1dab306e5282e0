use gummy_engine::bridge::protocol::HEADER_FLOATS;
use gummy_engine::{
    build_gummy_buffer, write_header, CursorHint, FixedTimestep, GummyBuffer, InputEvent,
    InputQueue, ParticleId, ProtocolLayout, World, WorldConfig,
};

/// Wires one `World` to the browser frame loop.
///
/// `lib.rs` keeps a single runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, which cannot export this struct's
/// lifetimes and raw pointers directly.
pub struct GummyRunner {
    world: World,
    timestep: FixedTimestep,
    input: InputQueue,
    buffer: GummyBuffer,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
}

impl GummyRunner {
    pub fn new(config: WorldConfig, width: f32, height: f32) -> Self {
        let layout = ProtocolLayout::new(config.max_particles.max(1));
        let world = World::new(config, width, height);
        let mut runner = Self {
            world,
            timestep: FixedTimestep::default(),
            input: InputQueue::new(),
            buffer: GummyBuffer::with_capacity(layout.max_instances),
            layout,
            header: [0.0; HEADER_FLOATS],
        };
        runner.refresh();
        runner
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame: route input, step physics, rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        let events = self.input.drain();
        self.world.apply_input(&events);

        if self.world.is_idle() {
            self.timestep.reset();
        } else {
            let steps = self.timestep.accumulate(dt);
            for _ in 0..steps {
                self.world.tick();
            }
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        build_gummy_buffer(&self.world, &mut self.buffer, self.layout.max_instances);
        write_header(&self.world, &self.buffer, &self.layout, &mut self.header);
    }

    // ---- World operations ----

    /// Parse and spawn a JSON array of gummies. Returns how many old ones were evicted.
    pub fn add_gummies_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let evicted = self.world.add_gummies_json(json)?;
        self.refresh();
        Ok(evicted)
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.input.drain();
        self.refresh();
    }

    pub fn shake(&mut self) {
        self.world.shake();
    }

    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        let accepted = self.world.set_size(width, height);
        self.refresh();
        accepted
    }

    pub fn particle_at(&self, x: f32, y: f32) -> Option<ParticleId> {
        self.world.particle_at(x, y)
    }

    pub fn metadata_json(&self, id: u32) -> Option<String> {
        self.world.metadata_json(ParticleId(id))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Pointer accessors for reads from JS ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn cursor(&self) -> CursorHint {
        self.world.cursor()
    }

    pub fn world_width(&self) -> f32 {
        self.world.width()
    }

    pub fn world_height(&self) -> f32 {
        self.world.height()
    }
}
