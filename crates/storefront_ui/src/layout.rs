//! Layout primitives for widget positioning.

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Returns true if the horizontal band `[y, y + height)` overlaps this rect.
    #[must_use]
    pub fn overlaps_band(&self, y: f32, height: f32) -> bool {
        y < self.bottom() && y + height > self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 20.0);
        let b = Rect::new(50.0, 10.0, 100.0, 20.0);

        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 10.0, 50.0, 10.0)));
        assert!(a.intersection(&Rect::new(200.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn test_band_overlap() {
        let window = Rect::new(0.0, 100.0, 200.0, 20.0);

        assert!(window.overlaps_band(100.0, 20.0));
        assert!(window.overlaps_band(110.0, 20.0));
        // A slot parked fully above the window is hidden
        assert!(!window.overlaps_band(80.0, 20.0));
        assert!(!window.overlaps_band(120.0, 20.0));
    }
}
