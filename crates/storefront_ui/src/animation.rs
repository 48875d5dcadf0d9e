//! Interpolation of a single declared property.
//!
//! An [`Animation`] is how the compositor plays a CSS-style transition:
//! `set_target` starts an eased run from the current value, `set_immediate`
//! applies a value with transitions suppressed. Time is in milliseconds.

use serde::Deserialize;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Symmetric cubic ease-in-out (slow start, slow finish).
    #[default]
    EaseInOut,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::ExponentialOut => {
                // 1 - 2^(-10t)
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::Instant => 1.0,
        }
    }
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Animation progress (0-1).
    progress: f32,
    /// Animation duration (milliseconds).
    duration_ms: f32,
    /// Easing function.
    easing: Easing,
    /// Start value (for interpolation).
    start: f32,
}

impl Animation {
    /// Creates a new animation resting at the given value.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            progress: 1.0,
            duration_ms: 0.0,
            easing,
            start: value,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Returns true if the animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Starts an eased run from the current value towards `target`.
    ///
    /// Returns false (and does nothing) when `target` is already the target.
    pub fn set_target(&mut self, target: f32, duration_ms: u64, easing: Easing) -> bool {
        if (target - self.target).abs() <= 0.0001 {
            return false;
        }
        self.start = self.current;
        self.target = target;
        self.duration_ms = duration_ms as f32;
        self.easing = easing;
        self.progress = 0.0;
        true
    }

    /// Immediately sets the value without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Advances the animation by `dt_ms`.
    ///
    /// Returns true on the update that finishes a run.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        if self.progress >= 1.0 {
            return false;
        }

        if self.duration_ms > 0.0 {
            self.progress += dt_ms / self.duration_ms;
        } else {
            self.progress = 1.0;
        }

        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        if self.progress >= 1.0 {
            self.current = self.target;
            return true;
        }
        false
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::EaseInOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let easing = Easing::EaseInOut;

        assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((easing.apply(0.25) + easing.apply(0.75) - 1.0).abs() < 1e-6);
        assert!(easing.apply(0.1) < 0.1, "ease-in-out starts slowly");
    }

    #[test]
    fn test_animation_reaches_target_once() {
        let mut anim = Animation::new(0.0, Easing::EaseInOut);
        assert!(anim.set_target(100.0, 160, Easing::EaseInOut));

        let mut finished = 0;
        for _ in 0..20 {
            if anim.update(16.0) {
                finished += 1;
            }
        }

        assert!((anim.value() - 100.0).abs() < 0.01);
        assert!(anim.is_complete());
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let mut anim = Animation::new(1.0, Easing::Linear);
        assert!(!anim.set_target(1.0, 100, Easing::Linear));
        assert!(anim.is_complete());
    }

    #[test]
    fn test_zero_duration_finishes_on_next_update() {
        let mut anim = Animation::new(0.0, Easing::Linear);
        anim.set_target(-0.5, 0, Easing::Linear);

        assert!(!anim.is_complete());
        assert!(anim.update(0.0));
        assert!((anim.value() + 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_immediate_never_reports_completion() {
        let mut anim = Animation::new(0.0, Easing::Linear);
        anim.set_immediate(5.0);

        assert!(!anim.update(16.0));
        assert!((anim.value() - 5.0).abs() < f32::EPSILON);
    }
}
