pub mod config;
pub mod gummy;
pub mod types;
