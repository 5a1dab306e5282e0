pub mod boundary;
pub mod collision;
pub mod drag;
pub mod grid;
pub mod integrator;
pub mod rng;
pub mod scene;
pub mod time;
pub mod world;
