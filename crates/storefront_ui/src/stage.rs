//! # Ticker Stage
//!
//! A self-contained host for one ticker: widget tree, virtual scheduler,
//! compositor and renderer, stepped one paint at a time.
//!
//! ```text
//! Frame N (dt):
//! ┌────────────────────────────────────────────────────────────────┐
//! │ 1. TIMERS      scheduler.advance(dt)   → ticker.on_timer       │
//! │ 2. PAINT CBS   scheduler.next_frame()  → ticker.on_frame       │
//! │ 3. ANIMATE     compositor.advance(dt)  → ticker.on_transition_end │
//! │ 4. STYLE       compositor.apply(ticker.view())                 │
//! │ 5. PAINT       compositor.render(...)  → RenderCommands        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Runs declared in step 4 start progressing on the following frame, so a
//! transition always starts from its pre-change value.

use tracing::trace;

use crate::compositor::Compositor;
use crate::layout::Rect;
use crate::render::{RenderCommand, UIRenderer};
use crate::scheduler::VirtualScheduler;
use crate::style::TextStyle;
use crate::ticker::{RotatingLabelTicker, TickerConfig};
use crate::widget::WidgetTree;

/// Per-frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Virtual time after this frame.
    pub now_ms: u64,
    /// Timer callbacks delivered.
    pub timers_fired: u32,
    /// Paint callbacks delivered.
    pub paint_callbacks: u32,
    /// Completion notifications delivered to the ticker.
    pub transition_ends: u32,
    /// Whether the ticker's view changed.
    pub view_changed: bool,
}

/// Output of one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Frame statistics.
    pub stats: FrameStats,
    /// Commands to draw.
    pub commands: Vec<RenderCommand>,
}

/// Host of a single ticker.
#[derive(Debug)]
pub struct TickerStage {
    /// Node hierarchy.
    tree: WidgetTree,
    /// Time source.
    scheduler: VirtualScheduler,
    /// The widget.
    ticker: RotatingLabelTicker,
    /// Rendering layer.
    compositor: Compositor,
    /// Command sink.
    renderer: UIRenderer,
    /// Frame counter.
    frame: u64,
}

impl TickerStage {
    /// Mounts a ticker in a window of the given bounds.
    #[must_use]
    pub fn new(config: TickerConfig, bounds: Rect, style: TextStyle) -> Self {
        let mut tree = WidgetTree::new();
        let mut scheduler = VirtualScheduler::new();
        let ticker = RotatingLabelTicker::mount(config, &mut tree, &mut scheduler);
        let compositor = Compositor::new(&ticker.view(), bounds, style);

        Self {
            tree,
            scheduler,
            ticker,
            compositor,
            renderer: UIRenderer::new(),
            frame: 0,
        }
    }

    /// Runs one frame after `dt_ms` of elapsed time.
    pub fn frame(&mut self, dt_ms: u64) -> FrameOutput {
        self.frame += 1;
        let mut stats = FrameStats {
            frame: self.frame,
            ..FrameStats::default()
        };

        for wakeup in self.scheduler.advance(dt_ms) {
            stats.timers_fired += 1;
            stats.view_changed |= self.ticker.handle_wakeup(wakeup, &mut self.scheduler);
        }

        for wakeup in self.scheduler.next_frame() {
            stats.paint_callbacks += 1;
            stats.view_changed |= self.ticker.handle_wakeup(wakeup, &mut self.scheduler);
        }

        #[allow(clippy::cast_precision_loss)]
        let events = self.compositor.advance(dt_ms as f32, &self.tree);
        for event in &events {
            stats.transition_ends += 1;
            stats.view_changed |= self.ticker.on_transition_end(event, &mut self.scheduler);
        }

        let view = self.ticker.view();
        self.compositor.apply(&view);

        self.renderer.begin_frame();
        if self.ticker.is_mounted() {
            self.compositor.render(&view, &mut self.renderer);
        }
        stats.now_ms = self.scheduler.now_ms();

        trace!(
            frame = stats.frame,
            now_ms = stats.now_ms,
            changed = stats.view_changed,
            "stage frame"
        );

        FrameOutput {
            stats,
            commands: self.renderer.end_frame(),
        }
    }

    /// Runs frames of `step_ms` until at least `duration_ms` has elapsed.
    pub fn run_for(&mut self, duration_ms: u64, step_ms: u64) -> Vec<FrameOutput> {
        let step = step_ms.max(1);
        let mut outputs = Vec::new();
        let mut elapsed = 0;
        while elapsed < duration_ms {
            outputs.push(self.frame(step));
            elapsed += step;
        }
        outputs
    }

    /// Tears the ticker down.
    pub fn unmount(&mut self) {
        self.ticker.unmount(&mut self.tree, &mut self.scheduler);
    }

    /// Returns the hosted ticker.
    #[must_use]
    pub fn ticker(&self) -> &RotatingLabelTicker {
        &self.ticker
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }
}

impl Drop for TickerStage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(labels: &[&str]) -> TickerStage {
        TickerStage::new(
            TickerConfig::new(labels.iter().copied())
                .with_hold_ms(100)
                .with_transition_ms(50),
            Rect::new(0.0, 0.0, 200.0, 20.0),
            TextStyle::default(),
        )
    }

    #[test]
    fn test_first_frame_announces_initial_label() {
        let mut stage = stage(&["Acme", "Globex"]);
        let output = stage.frame(16);

        assert!(output.commands.contains(&RenderCommand::Announce {
            text: "Acme".into(),
            politeness: crate::render::Politeness::Polite,
        }));
        assert!(!output.stats.view_changed);
    }

    #[test]
    fn test_full_cycle_through_stage() {
        let mut stage = stage(&["Acme", "Globex"]);

        // Hold
        let output = stage.frame(100);
        assert_eq!(output.stats.timers_fired, 1);
        assert!(stage.ticker().ticker_state().is_transitioning);

        // Slide finishes
        let output = stage.frame(50);
        assert_eq!(output.stats.transition_ends, 3);
        assert_eq!(stage.ticker().ticker_state().active_index, 1);
        assert!(stage.ticker().ticker_state().transitions_suppressed);

        // Two paints later transitions are back and the next hold is armed
        stage.frame(16);
        assert!(stage.ticker().ticker_state().transitions_suppressed);
        stage.frame(16);
        assert!(!stage.ticker().ticker_state().transitions_suppressed);
        assert_eq!(stage.scheduler().pending_timers(), 1);
    }

    #[test]
    fn test_unmounted_stage_draws_nothing() {
        let mut stage = stage(&["Acme", "Globex"]);
        stage.unmount();

        let output = stage.frame(1_000);
        assert!(output.commands.is_empty());
        assert_eq!(output.stats.timers_fired, 0);
    }
}
