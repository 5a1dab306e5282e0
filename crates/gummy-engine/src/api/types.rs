/// Stable opaque handle for a live particle.
/// Handed out in insertion order and never reused within one `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// Pointer affordance the canvas should show after the latest pointer event.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default = 0,
    /// Hovering a particle that can be picked up.
    Grab = 1,
    /// A particle is being held.
    Grabbing = 2,
}

impl CursorHint {
    /// CSS `cursor` value for the canvas element.
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_insertion() {
        assert!(ParticleId(1) < ParticleId(2));
    }

    #[test]
    fn cursor_css_names() {
        assert_eq!(CursorHint::default().css(), "default");
        assert_eq!(CursorHint::Grabbing.css(), "grabbing");
    }
}
