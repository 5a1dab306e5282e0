/// Linear RGB color in 0..1, decoded from the CSS hex strings the calendar adapter hands us.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Neutral grey used when a color string cannot be decoded.
    pub const FALLBACK: Rgb = Rgb { r: 0.6, g: 0.6, b: 0.6 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional). Returns `None` for anything else.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |v: u8| v as f32 / 255.0;
        match hex.len() {
            6 => {
                let n = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::new(
                    channel((n >> 16) as u8),
                    channel((n >> 8) as u8),
                    channel(n as u8),
                ))
            }
            3 => {
                let n = u16::from_str_radix(hex, 16).ok()?;
                // #abc expands to #aabbcc
                let expand = |nibble: u16| channel(((nibble & 0xF) * 17) as u8);
                Some(Self::new(expand(n >> 8), expand(n >> 4), expand(n)))
            }
            _ => None,
        }
    }

    /// Like `parse_hex`, but never fails.
    pub fn parse_or_fallback(s: &str) -> Self {
        match Self::parse_hex(s) {
            Some(c) => c,
            None => {
                log::warn!("unparseable gummy color {:?}, using fallback grey", s);
                Self::FALLBACK
            }
        }
    }

    /// Lighten (`amount > 0`) or darken (`amount < 0`) by scaling each channel by `1 + amount`.
    pub fn shade(self, amount: f32) -> Self {
        let factor = 1.0 + amount;
        Self::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
        )
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::FALLBACK
    }
}
