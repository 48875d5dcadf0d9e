//! # Storefront UI
//!
//! Presentational widgets for the storefront, written as explicit state
//! machines instead of reactive components.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI PIPELINE                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Scheduler wakeups → Widget state machine → Declared view     │
//! │         ↑                                        ↓            │
//! │  TransitionEnd  ←────────── Compositor (animate) → Commands   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Widgets own no clock and no renderer. They are handed a [`Scheduler`]
//! for timers and paint callbacks, describe what they want on screen as a
//! view, and learn about finished animations through notifications. That
//! keeps every transition deterministic under [`VirtualScheduler`].
//!
//! ## Example
//!
//! ```rust
//! use storefront_ui::{Rect, TextStyle, TickerConfig, TickerStage};
//!
//! let config = TickerConfig::new(["Acme", "Globex", "Initech"]).with_hold_ms(100);
//! let mut stage = TickerStage::new(config, Rect::new(0.0, 0.0, 240.0, 20.0), TextStyle::default());
//!
//! stage.frame(100);
//! assert!(stage.ticker().ticker_state().is_transitioning);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod compositor;
pub mod error;
pub mod layout;
pub mod render;
pub mod scheduler;
pub mod stage;
pub mod style;
pub mod ticker;
pub mod widget;

pub use animation::{Animation, Easing};
pub use compositor::Compositor;
pub use error::{UiError, UiResult};
pub use layout::Rect;
pub use render::{Politeness, RenderCommand, UIRenderer};
pub use scheduler::{FrameId, Scheduler, TimerId, VirtualScheduler, Wakeup};
pub use stage::{FrameOutput, FrameStats, TickerStage};
pub use style::{Color, TextStyle};
pub use ticker::{
    is_track_transition_end, RotatingLabelTicker, TickerConfig, TickerPhase, TickerState,
    TickerView, TransitionEnd,
};
pub use widget::{WidgetId, WidgetState, WidgetTree};
