//! Rotating label ticker.
//!
//! Cycles through a list of labels: each is held for a while, then the next
//! one slides in from above while the current one slides out below, with an
//! optional subtle crossfade. With one label (or none) it renders statically
//! and schedules nothing.

mod config;
mod machine;
mod view;

pub use config::{
    normalize_labels, sanitize_fade_floor, TickerConfig, DEFAULT_FADE_CAP_MS, DEFAULT_FADE_FLOOR, DEFAULT_HOLD_MS,
    DEFAULT_PLACEHOLDER, DEFAULT_TRANSITION_MS,
};
pub use machine::{ResetStep, RotatingLabelTicker, TickerPhase, TickerState};
pub use view::{
    is_track_transition_end, LiveRegion, Property, SlotView, TickerNodes, TickerView, TrackOffset,
    Transition, TransitionEnd,
};
