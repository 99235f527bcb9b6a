/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE:       Self = Self { r: 1.0,   g: 1.0,   b: 1.0,   a: 1.0 }; // #ffffff
    pub const ORANGE:      Self = Self { r: 1.0,   g: 0.6,   b: 0.0,   a: 1.0 }; // #ff9900
    pub const RED:         Self = Self { r: 1.0,   g: 0.27,  b: 0.21,  a: 1.0 }; // #ff4536
    pub const CHARCOAL:    Self = Self { r: 0.16,  g: 0.16,  b: 0.16,  a: 1.0 }; // #292929
    pub const GRID:        Self = Self { r: 0.4,   g: 0.4,   b: 0.4,   a: 0.5 }; // #66666680
    pub const SILVER:      Self = Self { r: 0.8,   g: 0.8,   b: 0.8,   a: 1.0 }; // #cccccc
    pub const SKY:         Self = Self { r: 0.3,   g: 0.7,   b: 1.0,   a: 1.0 }; // #4db3ff

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if c(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b), c(self.a))
        }
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        let c = Color::from_hex("#ff9900").expect("valid hex");
        assert_eq!((c.r, c.b, c.a), (1.0, 0.0, 1.0));
        assert!((c.g - 0.6).abs() < 1e-6);

        let g = Color::from_hex("66666680").expect("valid hex");
        assert!((g.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn hex_round_trip_of_defaults() {
        assert_eq!(Color::RED.to_hex(), "#ff4536");
        assert_eq!(Color::WHITE.with_alpha(0.0).to_hex(), "#ffffff00");
    }
}
