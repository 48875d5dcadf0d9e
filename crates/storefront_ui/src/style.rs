//! Colors and text styling for storefront widgets.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns the color with its alpha scaled by `opacity`.
    #[must_use]
    pub fn faded(self, opacity: f32) -> Self {
        self.with_alpha(self.a * opacity.clamp(0.0, 1.0))
    }
}

/// Text style shared by every line a widget draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color at full opacity.
    pub color: Color,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height in pixels. Ticker slots are exactly one line tall.
    pub line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: 16.0,
            // 1.2em
            line_height: 19.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faded_scales_alpha() {
        let c = Color::rgba(1.0, 0.0, 0.0, 0.5).faded(0.5);
        assert!((c.a - 0.25).abs() < f32::EPSILON);

        let clamped = Color::WHITE.faded(3.0);
        assert!((clamped.a - 1.0).abs() < f32::EPSILON);
    }
}
