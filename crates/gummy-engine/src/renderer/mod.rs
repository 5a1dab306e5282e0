pub mod instance;

pub use instance::{GummyBuffer, GummyInstance, FLAG_HELD, FLAG_HIGHLIGHTED};
