//! Declarative output of the ticker.
//!
//! The ticker never animates anything itself. Each state change produces a
//! [`TickerView`]: where the track should sit, which properties may animate
//! on the way there, and what each slot says. The rendering layer reports
//! back with [`TransitionEnd`] notifications.
//!
//! ```text
//!  root (clip, live region)          track offset -50%      track offset 0%
//!  ┌──────────────────────┐          ┌──────────────┐
//!  │ track                │          │ incoming     │ hidden
//!  │ ┌──────────────────┐ │        ──┼──────────────┼──   ──┼──────────────┼──
//!  │ │ incoming (next)  │ │          │ outgoing     │ shown   │ incoming     │ shown
//!  │ │ outgoing (curr.) │ │        ──┼──────────────┼──   ──┼──────────────┼──
//!  │ └──────────────────┘ │                                   │ outgoing     │ hidden
//!  └──────────────────────┘                                   └──────────────┘
//! ```

use crate::animation::Easing;
use crate::render::Politeness;
use crate::widget::WidgetId;

/// Property of a node that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Vertical translation of the track.
    Transform,
    /// Opacity of a slot.
    Opacity,
}

/// A declared transition: "changes to `property` animate like this".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Animated property.
    pub property: Property,
    /// Duration of a run.
    pub duration_ms: u64,
    /// Timing curve.
    pub easing: Easing,
}

/// Notification that an animated property finished on some node.
///
/// Notifications bubble: a slot finishing its opacity fade is also seen by
/// the track's handler, with `target` set to the slot and `current_target`
/// set to the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEnd {
    /// Node whose property finished.
    pub target: WidgetId,
    /// Node whose handler is receiving the notification.
    pub current_target: WidgetId,
    /// The property that finished.
    pub property: Property,
}

/// Returns true only for the track's own transform finishing.
///
/// Opacity fades on the slots, and anything bubbling up from a descendant,
/// must not be mistaken for the end of the slide.
#[must_use]
pub fn is_track_transition_end(event: &TransitionEnd, track: WidgetId) -> bool {
    event.target == track && event.current_target == track && event.property == Property::Transform
}

/// Vertical position of the track inside the clipped root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackOffset {
    /// Shifted up by one slot: the outgoing (current) slot is visible.
    #[default]
    Baseline,
    /// Unshifted: the incoming (next) slot is visible.
    Revealed,
}

impl TrackOffset {
    /// Offset as a fraction of the track height.
    #[must_use]
    pub const fn fraction(self) -> f32 {
        match self {
            Self::Baseline => -0.5,
            Self::Revealed => 0.0,
        }
    }
}

/// The four nodes a ticker renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerNodes {
    /// Clipping root, also the live region.
    pub root: WidgetId,
    /// Translated container holding both slots.
    pub track: WidgetId,
    /// Upper slot, shows the next label.
    pub incoming: WidgetId,
    /// Lower slot, shows the current label.
    pub outgoing: WidgetId,
}

/// One line of text inside the track.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    /// Node rendering this slot.
    pub node: WidgetId,
    /// Label text.
    pub text: String,
    /// Declared opacity (0-1).
    pub opacity: f32,
    /// How opacity changes animate; `None` applies them instantly.
    pub opacity_transition: Option<Transition>,
}

/// Accessibility semantics of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveRegion {
    /// Announcement urgency.
    pub politeness: Politeness,
    /// Whether the whole region is read on any change.
    pub atomic: bool,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self {
            politeness: Politeness::Polite,
            atomic: true,
        }
    }
}

/// Complete declarative snapshot of a ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerView {
    /// Node ids.
    pub nodes: TickerNodes,
    /// Declared track position.
    pub track_offset: TrackOffset,
    /// How track moves animate; `None` while transitions are suppressed.
    pub track_transition: Option<Transition>,
    /// Slot showing the next label.
    pub incoming: SlotView,
    /// Slot showing the current label.
    pub outgoing: SlotView,
    /// Accessibility semantics of the root.
    pub live_region: LiveRegion,
    /// Text of the settled label, announced when it changes.
    pub live_text: String,
}

impl TickerView {
    /// Returns the label the viewer is meant to read once motion stops.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.track_offset {
            TrackOffset::Baseline => &self.outgoing.text,
            TrackOffset::Revealed => &self.incoming.text,
        }
    }

    /// Returns true if any property is allowed to animate.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.track_transition.is_some()
            || self.incoming.opacity_transition.is_some()
            || self.outgoing.opacity_transition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: WidgetId = WidgetId(2);
    const SLOT: WidgetId = WidgetId(3);

    #[test]
    fn test_predicate_accepts_own_transform() {
        let event = TransitionEnd {
            target: TRACK,
            current_target: TRACK,
            property: Property::Transform,
        };
        assert!(is_track_transition_end(&event, TRACK));
    }

    #[test]
    fn test_predicate_rejects_bubbled_and_foreign_properties() {
        let bubbled = TransitionEnd {
            target: SLOT,
            current_target: TRACK,
            property: Property::Transform,
        };
        let opacity = TransitionEnd {
            target: TRACK,
            current_target: TRACK,
            property: Property::Opacity,
        };
        let elsewhere = TransitionEnd {
            target: TRACK,
            current_target: SLOT,
            property: Property::Transform,
        };

        assert!(!is_track_transition_end(&bubbled, TRACK));
        assert!(!is_track_transition_end(&opacity, TRACK));
        assert!(!is_track_transition_end(&elsewhere, TRACK));
    }
}
