//! Plays declared views.
//!
//! The compositor is the rendering layer as far as widgets are concerned. It
//! diffs each incoming [`TickerView`] against what it is already showing:
//! a changed property with a declared transition starts an eased run, a
//! changed property without one is applied on the spot. Finished runs are
//! reported as [`TransitionEnd`] notifications, dispatched through the
//! widget tree to the node the ticker listens on.

use crate::animation::{Animation, Easing};
use crate::layout::Rect;
use crate::render::{RenderCommand, UIRenderer};
use crate::style::TextStyle;
use crate::ticker::{Property, TickerNodes, TickerView, Transition, TransitionEnd};
use crate::widget::{WidgetId, WidgetTree};

/// Animated state of one mounted ticker.
#[derive(Debug)]
pub struct Compositor {
    /// Node ids of the ticker being played.
    nodes: TickerNodes,
    /// Root bounds (the visible window).
    bounds: Rect,
    /// Text style of both slots.
    style: TextStyle,
    /// Track offset as a fraction of the track height.
    track: Animation,
    /// Opacity of the incoming slot.
    incoming_opacity: Animation,
    /// Opacity of the outgoing slot.
    outgoing_opacity: Animation,
    /// Last text announced through the live region.
    last_announced: Option<String>,
}

impl Compositor {
    /// Creates a compositor resting at the given view, no animation.
    #[must_use]
    pub fn new(view: &TickerView, bounds: Rect, style: TextStyle) -> Self {
        Self {
            nodes: view.nodes,
            bounds,
            style,
            track: Animation::new(view.track_offset.fraction(), Easing::Instant),
            incoming_opacity: Animation::new(view.incoming.opacity, Easing::Instant),
            outgoing_opacity: Animation::new(view.outgoing.opacity, Easing::Instant),
            last_announced: None,
        }
    }

    /// Applies a new declared view.
    pub fn apply(&mut self, view: &TickerView) {
        drive(&mut self.track, view.track_offset.fraction(), view.track_transition);
        drive(&mut self.incoming_opacity, view.incoming.opacity, view.incoming.opacity_transition);
        drive(&mut self.outgoing_opacity, view.outgoing.opacity, view.outgoing.opacity_transition);
    }

    /// Advances every running property and returns the completion
    /// notifications as seen by the track's handler.
    pub fn advance(&mut self, dt_ms: f32, tree: &WidgetTree) -> Vec<TransitionEnd> {
        let mut finished: Vec<(WidgetId, Property)> = Vec::with_capacity(3);

        if self.incoming_opacity.update(dt_ms) {
            finished.push((self.nodes.incoming, Property::Opacity));
        }
        if self.outgoing_opacity.update(dt_ms) {
            finished.push((self.nodes.outgoing, Property::Opacity));
        }
        if self.track.update(dt_ms) {
            finished.push((self.nodes.track, Property::Transform));
        }

        let mut events = Vec::with_capacity(finished.len());
        for (target, property) in finished {
            // Bubble from the target up; only the track has a handler.
            for node in tree.ancestry(target) {
                if node == self.nodes.track {
                    events.push(TransitionEnd {
                        target,
                        current_target: node,
                        property,
                    });
                }
            }
        }
        events
    }

    /// Returns true while any property is mid-run.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !(self.track.is_complete()
            && self.incoming_opacity.is_complete()
            && self.outgoing_opacity.is_complete())
    }

    /// Current track offset as a fraction of the track height.
    #[must_use]
    pub fn track_offset(&self) -> f32 {
        self.track.value()
    }

    /// Draws the ticker at its current animated state.
    ///
    /// Slots fully outside the window are culled. An announcement is emitted
    /// whenever the settled label differs from the last one announced.
    pub fn render(&mut self, view: &TickerView, renderer: &mut UIRenderer) {
        let line = self.style.line_height;
        // The track is two lines tall; offsets are fractions of that.
        let track_y = self.bounds.y + self.track.value() * 2.0 * line;

        renderer.push_clip(self.bounds);
        let slots = [
            (&view.incoming.text, track_y, self.incoming_opacity.value()),
            (&view.outgoing.text, track_y + line, self.outgoing_opacity.value()),
        ];
        for (text, y, opacity) in slots {
            if self.bounds.overlaps_band(y, line) {
                renderer.push(RenderCommand::Text {
                    text: text.clone(),
                    x: self.bounds.x,
                    y,
                    color: self.style.color.faded(opacity),
                    font_size: self.style.font_size,
                });
            }
        }
        renderer.pop_clip();

        if self.last_announced.as_deref() != Some(view.live_text.as_str()) {
            renderer.push(RenderCommand::Announce {
                text: view.live_text.clone(),
                politeness: view.live_region.politeness,
            });
            self.last_announced = Some(view.live_text.clone());
        }
    }
}

fn drive(animation: &mut Animation, value: f32, transition: Option<Transition>) {
    match transition {
        Some(transition) => {
            animation.set_target(value, transition.duration_ms, transition.easing);
        }
        None => animation.set_immediate(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;
    use crate::ticker::{RotatingLabelTicker, TickerConfig};

    fn setup() -> (RotatingLabelTicker, WidgetTree, VirtualScheduler, Compositor) {
        let mut tree = WidgetTree::new();
        let mut scheduler = VirtualScheduler::new();
        let ticker = RotatingLabelTicker::mount(
            TickerConfig::new(["Acme", "Globex"]).with_hold_ms(100).with_transition_ms(50),
            &mut tree,
            &mut scheduler,
        );
        let compositor = Compositor::new(&ticker.view(), Rect::new(0.0, 100.0, 200.0, 20.0), TextStyle {
            line_height: 20.0,
            ..TextStyle::default()
        });
        (ticker, tree, scheduler, compositor)
    }

    #[test]
    fn test_resting_view_shows_only_current_label() {
        let (ticker, _tree, _scheduler, mut compositor) = setup();
        let mut renderer = UIRenderer::new();

        compositor.render(&ticker.view(), &mut renderer);
        let texts: Vec<&str> = renderer
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(texts, vec!["Acme"]);
    }

    #[test]
    fn test_announces_once_per_label() {
        let (ticker, _tree, _scheduler, mut compositor) = setup();
        let mut renderer = UIRenderer::new();

        compositor.render(&ticker.view(), &mut renderer);
        compositor.render(&ticker.view(), &mut renderer);

        let announcements = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Announce { .. }))
            .count();
        assert_eq!(announcements, 1);
    }

    #[test]
    fn test_slide_emits_bubbled_fades_and_own_transform() {
        let (mut ticker, tree, mut scheduler, mut compositor) = setup();
        for wakeup in scheduler.advance(100) {
            ticker.handle_wakeup(wakeup, &mut scheduler);
        }
        compositor.apply(&ticker.view());
        assert!(compositor.is_animating());

        let events = compositor.advance(50.0, &tree);
        let nodes = ticker.nodes();

        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.current_target == nodes.track));
        assert_eq!(
            events.iter().filter(|e| e.property == Property::Opacity).count(),
            2
        );
        assert!(events
            .iter()
            .any(|e| e.target == nodes.track && e.property == Property::Transform));
        assert!(compositor.track_offset().abs() < f32::EPSILON);
    }

    #[test]
    fn test_suppressed_change_snaps_without_event() {
        let (ticker, tree, _scheduler, mut compositor) = setup();
        let mut view = ticker.view();
        view.track_offset = crate::ticker::TrackOffset::Revealed;
        view.track_transition = None;

        compositor.apply(&view);

        assert!(!compositor.is_animating());
        assert!(compositor.advance(16.0, &tree).is_empty());
        assert!(compositor.track_offset().abs() < f32::EPSILON);
    }
}
