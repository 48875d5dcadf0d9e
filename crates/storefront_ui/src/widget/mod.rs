//! Widget system for UI components.

mod core;
mod tree;

pub use self::core::{WidgetId, WidgetState};
pub use self::tree::WidgetTree;
