use crate::bridge::protocol::{
    ProtocolLayout, HEADER_CURSOR, HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_HELD_INDEX,
    HEADER_INSTANCE_COUNT, HEADER_MAX_INSTANCES, HEADER_PROTOCOL_VERSION, HEADER_WORLD_HEIGHT,
    HEADER_WORLD_WIDTH, PROTOCOL_VERSION,
};
use crate::core::world::World;
use crate::renderer::instance::{GummyBuffer, GummyInstance};

/// Build the render snapshot from the world, in draw order (oldest first,
/// so the newest gummy is on top, matching hit testing).
/// Stops at `max_instances`; the cap keeps the world below it anyway.
pub fn build_gummy_buffer(world: &World, buffer: &mut GummyBuffer, max_instances: usize) {
    buffer.clear();
    for p in world.particles().iter().take(max_instances) {
        buffer.push(GummyInstance::from_particle(p));
    }
}

/// Fill the frame header for the renderer.
pub fn write_header(
    world: &World,
    buffer: &GummyBuffer,
    layout: &ProtocolLayout,
    header: &mut [f32; HEADER_FLOATS],
) {
    let held_index = world
        .held()
        .and_then(|id| world.index_of(id))
        .filter(|&i| i < buffer.instances().len())
        .map_or(-1.0, |i| i as f32);

    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = world.frame() as f32;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = buffer.instance_count() as f32;
    header[HEADER_WORLD_WIDTH] = world.width();
    header[HEADER_WORLD_HEIGHT] = world.height();
    header[HEADER_HELD_INDEX] = held_index;
    header[HEADER_CURSOR] = world.cursor() as u32 as f32;
}
