pub mod color;
pub mod particle;
pub mod shape;
