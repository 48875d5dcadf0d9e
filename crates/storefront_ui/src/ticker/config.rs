//! Ticker configuration and label normalization.

use std::path::Path;

use serde::Deserialize;

use crate::animation::Easing;
use crate::error::{UiError, UiResult};

/// Time a label stays fully visible before sliding out.
pub const DEFAULT_HOLD_MS: u64 = 3200;
/// Duration of the slide between two labels.
pub const DEFAULT_TRANSITION_MS: u64 = 700;
/// Opacity the crossfade dips to. Subtle on purpose: an accent, not a blink.
pub const DEFAULT_FADE_FLOOR: f32 = 0.9;
/// Upper bound of the crossfade duration.
pub const DEFAULT_FADE_CAP_MS: u64 = 400;
/// Label shown when the caller supplies nothing usable.
pub const DEFAULT_PLACEHOLDER: &str = "Vendors";

/// Configuration for a [`RotatingLabelTicker`](super::RotatingLabelTicker).
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```toml
/// labels = ["Acme", "Globex", "Initech"]
/// hold_duration_ms = 2500
/// fade_enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Labels in display order. Blank entries are dropped at mount.
    pub labels: Vec<String>,
    /// Time a label is held before the next transition starts.
    pub hold_duration_ms: u64,
    /// Duration of the slide transition.
    pub transition_duration_ms: u64,
    /// Whether the slide is accompanied by an opacity crossfade.
    pub fade_enabled: bool,
    /// Lowest opacity reached by the crossfade (0-1).
    pub fade_floor: f32,
    /// Cap on the crossfade duration.
    pub fade_cap_ms: u64,
    /// Fallback label used when no usable label remains.
    pub placeholder: String,
    /// Timing curve of both the slide and the crossfade.
    pub easing: Easing,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            hold_duration_ms: DEFAULT_HOLD_MS,
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            fade_enabled: true,
            fade_floor: DEFAULT_FADE_FLOOR,
            fade_cap_ms: DEFAULT_FADE_CAP_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            easing: Easing::EaseInOut,
        }
    }
}

impl TickerConfig {
    /// Creates a configuration with default timings.
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the hold duration.
    #[must_use]
    pub fn with_hold_ms(mut self, hold_ms: u64) -> Self {
        self.hold_duration_ms = hold_ms;
        self
    }

    /// Sets the slide duration.
    #[must_use]
    pub fn with_transition_ms(mut self, transition_ms: u64) -> Self {
        self.transition_duration_ms = transition_ms;
        self
    }

    /// Enables or disables the crossfade.
    #[must_use]
    pub fn with_fade(mut self, enabled: bool) -> Self {
        self.fade_enabled = enabled;
        self
    }

    /// Sets the crossfade floor. See [`sanitize_fade_floor`].
    #[must_use]
    pub fn with_fade_floor(mut self, floor: f32) -> Self {
        self.fade_floor = sanitize_fade_floor(floor);
        self
    }

    /// Sets the fallback label.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this type or if a
    /// value is out of range.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UiError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidFadeFloor`] unless the floor is a
    /// non-zero opacity.
    pub fn validate(&self) -> UiResult<()> {
        if self.fade_floor.is_nan() || self.fade_floor <= 0.0 || self.fade_floor > 1.0 {
            return Err(UiError::InvalidFadeFloor(self.fade_floor));
        }
        Ok(())
    }

    /// Duration of the crossfade: the slide duration, capped.
    #[must_use]
    pub fn fade_duration_ms(&self) -> u64 {
        self.transition_duration_ms.min(self.fade_cap_ms)
    }

    /// Floor the view actually uses, whatever was stored in `fade_floor`.
    #[must_use]
    pub fn effective_fade_floor(&self) -> f32 {
        sanitize_fade_floor(self.fade_floor)
    }

    /// Returns the labels the ticker will actually cycle through.
    #[must_use]
    pub fn normalized_labels(&self) -> Vec<String> {
        normalize_labels(&self.labels, &self.placeholder)
    }
}

/// Maps any value onto a usable crossfade floor in `(0, 1]`.
///
/// Values above 1 become 1. Zero, negative and non-finite values fall back to
/// [`DEFAULT_FADE_FLOOR`]: the crossfade never dips to transparent.
#[must_use]
pub fn sanitize_fade_floor(floor: f32) -> f32 {
    if !floor.is_finite() || floor <= 0.0 {
        DEFAULT_FADE_FLOOR
    } else {
        floor.min(1.0)
    }
}

/// Trims labels and drops blank ones.
///
/// Never returns an empty list: if nothing usable remains, the result is the
/// single `placeholder` (or [`DEFAULT_PLACEHOLDER`] if that is blank too).
#[must_use]
pub fn normalize_labels<S: AsRef<str>>(labels: &[S], placeholder: &str) -> Vec<String> {
    let cleaned: Vec<String> = labels
        .iter()
        .map(|label| label.as_ref().trim())
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .collect();

    if !cleaned.is_empty() {
        return cleaned;
    }

    let placeholder = placeholder.trim();
    if placeholder.is_empty() {
        vec![DEFAULT_PLACEHOLDER.to_owned()]
    } else {
        vec![placeholder.to_owned()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blank() {
        let labels = normalize_labels(&["  Acme ", "", "   ", "Globex"], DEFAULT_PLACEHOLDER);
        assert_eq!(labels, vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_normalize_falls_back_to_placeholder() {
        let empty: [&str; 0] = [];
        assert_eq!(normalize_labels(&empty, "Sellers"), vec!["Sellers"]);
        assert_eq!(normalize_labels(&[" ", "\t"], "  "), vec![DEFAULT_PLACEHOLDER]);
    }

    #[test]
    fn test_fade_duration_is_capped() {
        let config = TickerConfig::new(["a"]).with_transition_ms(700);
        assert_eq!(config.fade_duration_ms(), 400);

        let short = TickerConfig::new(["a"]).with_transition_ms(250);
        assert_eq!(short.fade_duration_ms(), 250);
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let config = TickerConfig::from_toml_str(
            r#"
            labels = ["Acme", "Globex"]
            hold_duration_ms = 100
            easing = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(config.labels, vec!["Acme", "Globex"]);
        assert_eq!(config.hold_duration_ms, 100);
        assert_eq!(config.transition_duration_ms, DEFAULT_TRANSITION_MS);
        assert!(config.fade_enabled);
        assert_eq!(config.easing, Easing::Linear);
    }

    #[test]
    fn test_toml_rejects_bad_floor() {
        let err = TickerConfig::from_toml_str("fade_floor = 1.5").unwrap_err();
        assert!(matches!(err, UiError::InvalidFadeFloor(_)));
    }

    #[test]
    fn test_toml_rejects_negative_duration() {
        let err = TickerConfig::from_toml_str("hold_duration_ms = -1").unwrap_err();
        assert!(matches!(err, UiError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_rejects_zero_floor() {
        let err = TickerConfig::from_toml_str("fade_floor = 0.0").unwrap_err();
        assert!(matches!(err, UiError::InvalidFadeFloor(_)));
        assert!(TickerConfig::from_toml_str("fade_floor = 0.5").is_ok());
    }

    #[test]
    fn test_toml_accepts_exponential_easing() {
        let config = TickerConfig::from_toml_str(r#"easing = "exponential-out""#).unwrap();
        assert_eq!(config.easing, Easing::ExponentialOut);
    }

    #[test]
    fn test_builder_clamps_floor() {
        assert!((TickerConfig::default().with_fade_floor(2.0).fade_floor - 1.0).abs() < f32::EPSILON);
        assert!((TickerConfig::default().with_fade_floor(f32::NAN).fade_floor - DEFAULT_FADE_FLOOR).abs() < f32::EPSILON);
        assert!((TickerConfig::default().with_fade_floor(0.0).fade_floor - DEFAULT_FADE_FLOOR).abs() < f32::EPSILON);
    }

    #[test]
    fn test_effective_floor_ignores_unusable_field_values() {
        for bad in [f32::NAN, f32::INFINITY, 0.0, -0.3] {
            let config = TickerConfig {
                fade_floor: bad,
                ..TickerConfig::default()
            };
            assert!((config.effective_fade_floor() - DEFAULT_FADE_FLOOR).abs() < f32::EPSILON);
        }
        let config = TickerConfig {
            fade_floor: 0.75,
            ..TickerConfig::default()
        };
        assert!((config.effective_fade_floor() - 0.75).abs() < f32::EPSILON);
    }
}
