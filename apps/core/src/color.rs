use std::fmt;

use serde::Serialize;

/// Opaque 8-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }

    /// Mixes `self` over `background` at `alpha` opacity.
    pub fn blend_over(self, background: Self, alpha: f64) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            let value = f64::from(fg).mul_add(alpha, f64::from(bg) * (1.0 - alpha));
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colour with an opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// Flattens onto an opaque background, for surfaces without transparency.
    pub fn flatten(self, background: Rgb) -> Rgb {
        self.rgb.blend_over(background, self.alpha)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_forms() {
        assert_eq!(Rgb::new(254, 176, 25).to_string(), "#feb019");
        assert_eq!(
            Rgb::new(0, 227, 150).with_alpha(0.2).to_string(),
            "rgba(0, 227, 150, 0.2)"
        );
    }

    #[test]
    fn blending_hits_both_ends() {
        let red = Rgb::new(255, 69, 96);
        assert_eq!(red.blend_over(Rgb::BLACK, 1.0), red);
        assert_eq!(red.blend_over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.with_alpha(0.5).flatten(Rgb::BLACK), Rgb::new(128, 128, 128));
    }
}
