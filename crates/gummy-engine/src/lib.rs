//! Gummy rain physics: event gummies fall into a bounded arena, pile up and can be dragged around.
//!
//! The engine is headless. `gummy-web` wraps a [`World`] for the browser.

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::WorldConfig;
pub use api::gummy::{radius_for_weight, mass_for_weight, GummySpec, HIGHLIGHT_RADIUS, MIN_RADIUS};
pub use api::types::{CursorHint, ParticleId};
pub use components::color::Rgb;
pub use components::particle::{GummyMeta, Particle};
pub use components::shape::ShapeKind;
pub use core::drag::DragController;
pub use core::grid::SpatialGrid;
pub use core::rng::Rng;
pub use core::scene::ParticleArena;
pub use core::time::{FixedTimestep, TICK_DT};
pub use core::world::World;
pub use renderer::instance::{GummyBuffer, GummyInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::{build_gummy_buffer, write_header};
