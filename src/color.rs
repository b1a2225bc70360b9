use serde::{Deserialize, Serialize};

/// Opaque RGB colour used for the dye tint and the canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const BLACK: Tint = Tint::new(0, 0, 0);
    pub const CYAN: Tint = Tint::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// Colour of a single cell as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Alpha-composite this colour over an opaque background.
    pub fn over(self, background: Tint) -> [u8; 3] {
        let alpha = self.a as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        [
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        ]
    }
}
