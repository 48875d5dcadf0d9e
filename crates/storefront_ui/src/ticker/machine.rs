//! The rotating label state machine.
//!
//! ```text
//!            mount (n > 1)
//!                 │
//!                 ▼
//!   ┌────────► HOLDING ──hold timer──► TRANSITIONING
//!   │        (timer armed)            (slide in flight)
//!   │                                        │
//!   │                          track transform finished
//!   │                                        ▼
//!   └──second paint── RESETTING ◄────────────┘
//!                 (suppressed, snapped,
//!                  first paint → second paint)
//!
//!   mount (n <= 1) ──► STATIC        unmount from anywhere ──► UNMOUNTED
//! ```
//!
//! At most one timer or one frame request is pending at any time, and every
//! callback is matched against the handle the ticker is waiting on.

use tracing::{debug, trace};

use super::config::TickerConfig;
use super::view::{
    is_track_transition_end, LiveRegion, Property, SlotView, TickerNodes, TickerView, TrackOffset,
    Transition, TransitionEnd,
};
use crate::scheduler::{FrameId, Scheduler, TimerId, Wakeup};
use crate::widget::{WidgetState, WidgetTree};

/// Which paint the reset is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    /// Snap applied, waiting for it to be painted.
    AwaitFirstPaint,
    /// Snap painted once, waiting one more paint before re-arming transitions.
    AwaitSecondPaint,
}

/// Lifecycle phase of a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerPhase {
    /// A single label: nothing is ever scheduled.
    Static,
    /// Showing the active label; the hold timer is armed.
    Holding {
        /// The pending hold timer.
        timer: TimerId,
    },
    /// Sliding from the active label to `next`.
    Transitioning {
        /// Index of the incoming label.
        next: usize,
    },
    /// Transitions suppressed after a settle, waiting on paint callbacks.
    Resetting {
        /// The pending paint callback.
        frame: FrameId,
        /// Which of the two paints is pending.
        step: ResetStep,
    },
    /// Torn down; every callback is ignored.
    Unmounted,
}

/// Mutable state owned by a ticker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerState {
    /// Index of the settled label.
    pub active_index: usize,
    /// True from transition start until its completion is observed.
    pub is_transitioning: bool,
    /// True while property changes must apply without animation.
    pub transitions_suppressed: bool,
}

impl Default for TickerState {
    fn default() -> Self {
        Self {
            active_index: 0,
            is_transitioning: false,
            transitions_suppressed: true,
        }
    }
}

/// Cycles a list of labels with a hold, a slide and an optional crossfade.
///
/// The ticker is driven entirely from outside: the host forwards scheduler
/// [`Wakeup`]s and rendering-layer [`TransitionEnd`]s, and reads back a
/// [`TickerView`] after each change. Every handler returns `true` when the
/// view changed.
#[derive(Debug)]
pub struct RotatingLabelTicker {
    /// Rendered node ids.
    nodes: TickerNodes,
    /// Caller configuration.
    config: TickerConfig,
    /// Normalized labels, never empty.
    labels: Vec<String>,
    /// Index/transition/suppression state.
    state: TickerState,
    /// Lifecycle phase.
    phase: TickerPhase,
}

impl RotatingLabelTicker {
    /// Mounts a ticker: registers its nodes and, with more than one label,
    /// arms the first hold timer.
    pub fn mount(config: TickerConfig, tree: &mut WidgetTree, scheduler: &mut dyn Scheduler) -> Self {
        let labels = config.normalized_labels();

        let nodes = TickerNodes {
            root: tree.next_id(),
            track: tree.next_id(),
            incoming: tree.next_id(),
            outgoing: tree.next_id(),
        };
        tree.add_root(WidgetState::new(nodes.root));
        tree.add_child(nodes.root, WidgetState::new(nodes.track));
        tree.add_child(nodes.track, WidgetState::new(nodes.incoming));
        tree.add_child(nodes.track, WidgetState::new(nodes.outgoing));

        let mut ticker = Self {
            nodes,
            config,
            labels,
            state: TickerState::default(),
            phase: TickerPhase::Static,
        };

        if ticker.labels.len() > 1 {
            ticker.arm_hold(scheduler);
        }

        debug!(
            widget = nodes.root.raw(),
            labels = ticker.labels.len(),
            hold_ms = ticker.config.hold_duration_ms,
            "ticker mounted"
        );
        ticker
    }

    /// Dispatches a scheduler callback.
    pub fn handle_wakeup(&mut self, wakeup: Wakeup, scheduler: &mut dyn Scheduler) -> bool {
        match wakeup {
            Wakeup::Timer(id) => self.on_timer(id, scheduler),
            Wakeup::Frame(id) => self.on_frame(id, scheduler),
        }
    }

    /// Hold timer elapsed: start the slide to the next label.
    pub fn on_timer(&mut self, id: TimerId, _scheduler: &mut dyn Scheduler) -> bool {
        if self.phase != (TickerPhase::Holding { timer: id }) {
            trace!(widget = self.nodes.root.raw(), timer = id.raw(), "stale hold timer ignored");
            return false;
        }

        let next = self.next_index();
        // Offset change and transition re-enable land in the same view.
        self.state.is_transitioning = true;
        self.state.transitions_suppressed = false;
        self.phase = TickerPhase::Transitioning { next };

        debug!(
            widget = self.nodes.root.raw(),
            from = self.state.active_index,
            to = next,
            "ticker transition started"
        );
        true
    }

    /// Rendering layer reported a finished property.
    ///
    /// Only the track's own transform counts; see [`is_track_transition_end`].
    pub fn on_transition_end(&mut self, event: &TransitionEnd, scheduler: &mut dyn Scheduler) -> bool {
        if !is_track_transition_end(event, self.nodes.track) {
            trace!(
                widget = self.nodes.root.raw(),
                target = event.target.raw(),
                property = ?event.property,
                "unrelated transition end ignored"
            );
            return false;
        }

        let TickerPhase::Transitioning { next } = self.phase else {
            trace!(widget = self.nodes.root.raw(), phase = ?self.phase, "transition end outside of a slide");
            return false;
        };

        self.state.active_index = next;
        self.state.transitions_suppressed = true;
        self.state.is_transitioning = false;
        let frame = scheduler.request_frame();
        self.phase = TickerPhase::Resetting {
            frame,
            step: ResetStep::AwaitFirstPaint,
        };

        debug!(
            widget = self.nodes.root.raw(),
            index = next,
            label = %self.labels[next],
            "ticker settled"
        );
        true
    }

    /// Paint callback: walks the two-step re-enable.
    pub fn on_frame(&mut self, id: FrameId, scheduler: &mut dyn Scheduler) -> bool {
        let TickerPhase::Resetting { frame, step } = self.phase else {
            trace!(widget = self.nodes.root.raw(), frame = id.raw(), "stale frame callback ignored");
            return false;
        };
        if frame != id {
            trace!(widget = self.nodes.root.raw(), frame = id.raw(), "stale frame callback ignored");
            return false;
        }

        match step {
            ResetStep::AwaitFirstPaint => {
                let frame = scheduler.request_frame();
                self.phase = TickerPhase::Resetting {
                    frame,
                    step: ResetStep::AwaitSecondPaint,
                };
                false
            }
            ResetStep::AwaitSecondPaint => {
                self.state.transitions_suppressed = false;
                self.arm_hold(scheduler);
                        true
            }
        }
    }

    /// Tears the ticker down: cancels whatever is pending and removes its
    /// nodes. Every later callback is ignored.
    pub fn unmount(&mut self, tree: &mut WidgetTree, scheduler: &mut dyn Scheduler) {
        match self.phase {
            TickerPhase::Holding { timer } => scheduler.clear_timeout(timer),
            TickerPhase::Resetting { frame, .. } => scheduler.cancel_frame(frame),
            TickerPhase::Unmounted => return,
            TickerPhase::Static | TickerPhase::Transitioning { .. } => {}
        }

        self.phase = TickerPhase::Unmounted;
        tree.remove(self.nodes.root);

        debug!(widget = self.nodes.root.raw(), "ticker unmounted");
    }

    /// Builds the declarative snapshot for the rendering layer.
    #[must_use]
    pub fn view(&self) -> TickerView {
        let animating = self.state.is_transitioning;
        let suppressed = self.state.transitions_suppressed;
        let fade = self.config.fade_enabled;
        let floor = self.config.effective_fade_floor();

        let (incoming_opacity, outgoing_opacity) = match (fade, animating) {
            (false, _) => (1.0, 1.0),
            (true, true) => (1.0, floor),
            (true, false) => (floor, 1.0),
        };

        let opacity_transition = (fade && !suppressed).then(|| Transition {
            property: Property::Opacity,
            duration_ms: self.config.fade_duration_ms(),
            easing: self.config.easing,
        });
        let track_transition = (!suppressed).then(|| Transition {
            property: Property::Transform,
            duration_ms: self.config.transition_duration_ms,
            easing: self.config.easing,
        });

        TickerView {
            nodes: self.nodes,
            track_offset: if animating { TrackOffset::Revealed } else { TrackOffset::Baseline },
            track_transition,
            incoming: SlotView {
                node: self.nodes.incoming,
                text: self.incoming_label().to_owned(),
                opacity: incoming_opacity,
                opacity_transition,
            },
            outgoing: SlotView {
                node: self.nodes.outgoing,
                text: self.active_label().to_owned(),
                opacity: outgoing_opacity,
                opacity_transition,
            },
            live_region: LiveRegion::default(),
            live_text: self.active_label().to_owned(),
        }
    }

    /// Returns the labels being cycled.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the settled label.
    #[must_use]
    pub fn active_label(&self) -> &str {
        &self.labels[self.state.active_index]
    }

    /// Returns the label in the incoming slot.
    #[must_use]
    pub fn incoming_label(&self) -> &str {
        &self.labels[self.next_index()]
    }

    /// Index that follows the active one; the active index itself when static.
    #[must_use]
    pub fn next_index(&self) -> usize {
        if self.labels.len() > 1 {
            (self.state.active_index + 1) % self.labels.len()
        } else {
            self.state.active_index
        }
    }

    /// Returns the mutable ticker state.
    #[must_use]
    pub fn ticker_state(&self) -> TickerState {
        self.state
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> TickerPhase {
        self.phase
    }

    /// Returns the rendered node ids.
    #[must_use]
    pub fn nodes(&self) -> TickerNodes {
        self.nodes
    }

    /// Returns false once the ticker has been unmounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase != TickerPhase::Unmounted
    }

    fn arm_hold(&mut self, scheduler: &mut dyn Scheduler) {
        let timer = scheduler.set_timeout(self.config.hold_duration_ms);
        self.phase = TickerPhase::Holding { timer };
        trace!(widget = self.nodes.root.raw(), timer = timer.raw(), "hold timer armed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::VirtualScheduler;

    fn mount(labels: &[&str]) -> (RotatingLabelTicker, WidgetTree, VirtualScheduler) {
        let mut tree = WidgetTree::new();
        let mut scheduler = VirtualScheduler::new();
        let config = TickerConfig::new(labels.iter().copied())
            .with_hold_ms(100)
            .with_transition_ms(50);
        let ticker = RotatingLabelTicker::mount(config, &mut tree, &mut scheduler);
        (ticker, tree, scheduler)
    }

    fn track_end(ticker: &RotatingLabelTicker) -> TransitionEnd {
        let track = ticker.nodes().track;
        TransitionEnd {
            target: track,
            current_target: track,
            property: Property::Transform,
        }
    }

    #[test]
    fn test_mount_starts_suppressed_at_zero() {
        let (ticker, tree, scheduler) = mount(&["Acme", "Globex"]);

        assert_eq!(ticker.ticker_state(), TickerState::default());
        assert!(matches!(ticker.phase(), TickerPhase::Holding { .. }));
        assert_eq!(scheduler.pending_timers(), 1);
        assert_eq!(tree.len(), 4);
        assert!(!ticker.view().is_animated());
    }

    #[test]
    fn test_timer_enables_transition_and_moves_track_together() {
        let (mut ticker, _tree, mut scheduler) = mount(&["Acme", "Globex"]);

        for wakeup in scheduler.advance(100) {
            assert!(ticker.handle_wakeup(wakeup, &mut scheduler));
        }

        let view = ticker.view();
        assert_eq!(view.track_offset, TrackOffset::Revealed);
        assert!(view.track_transition.is_some());
        assert_eq!(view.incoming.text, "Globex");
        assert_eq!(view.outgoing.text, "Acme");
        assert!((view.outgoing.opacity - 0.9).abs() < f32::EPSILON);
        assert!((view.incoming.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let (mut ticker, _tree, mut scheduler) = mount(&["Acme", "Globex"]);
        let bogus = scheduler.set_timeout(0);

        assert!(!ticker.on_timer(bogus, &mut scheduler));
        assert_eq!(ticker.ticker_state().active_index, 0);
        assert!(!ticker.ticker_state().is_transitioning);
    }

    #[test]
    fn test_completion_outside_slide_is_ignored() {
        let (mut ticker, _tree, mut scheduler) = mount(&["Acme", "Globex"]);
        let event = track_end(&ticker);

        assert!(!ticker.on_transition_end(&event, &mut scheduler));
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_no_fade_keeps_full_opacity() {
        let mut tree = WidgetTree::new();
        let mut scheduler = VirtualScheduler::new();
        let config = TickerConfig::new(["Acme", "Globex"]).with_fade(false).with_hold_ms(10);
        let mut ticker = RotatingLabelTicker::mount(config, &mut tree, &mut scheduler);

        for wakeup in scheduler.advance(10) {
            ticker.handle_wakeup(wakeup, &mut scheduler);
        }

        let view = ticker.view();
        assert!((view.incoming.opacity - 1.0).abs() < f32::EPSILON);
        assert!((view.outgoing.opacity - 1.0).abs() < f32::EPSILON);
        assert!(view.incoming.opacity_transition.is_none());
        assert!(view.track_transition.is_some());
    }

    #[test]
    fn test_unusable_floor_in_config_falls_back_to_default() {
        let mut tree = WidgetTree::new();
        let mut scheduler = VirtualScheduler::new();
        let config = TickerConfig {
            fade_floor: f32::NAN,
            ..TickerConfig::new(["Acme", "Globex"])
        };
        let mut ticker = RotatingLabelTicker::mount(config, &mut tree, &mut scheduler);

        let view = ticker.view();
        assert!((view.incoming.opacity - 0.9).abs() < f32::EPSILON);

        for wakeup in scheduler.advance(3200) {
            ticker.handle_wakeup(wakeup, &mut scheduler);
        }
        let view = ticker.view();
        assert!(view.outgoing.opacity.is_finite());
        assert!((view.outgoing.opacity - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let (mut ticker, mut tree, mut scheduler) = mount(&["Acme", "Globex"]);

        ticker.unmount(&mut tree, &mut scheduler);
        ticker.unmount(&mut tree, &mut scheduler);

        assert!(!ticker.is_mounted());
        assert!(tree.is_empty());
        assert_eq!(scheduler.pending_timers(), 0);
    }
}
