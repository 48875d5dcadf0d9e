//! Render command stream.
//!
//! Widgets and the compositor never draw. They push commands into a
//! [`UIRenderer`], and the host backend (terminal, canvas, HTML) consumes
//! the finished frame.

use crate::layout::Rect;
use crate::style::Color;

/// How urgently assistive technology should announce a live-region update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Politeness {
    /// Announce when the user is idle; never interrupt.
    #[default]
    Polite,
    /// Interrupt whatever is being announced.
    Assertive,
}

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// A single line of text.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position (top of the line box).
        y: f32,
        /// Text color, alpha already multiplied by opacity.
        color: Color,
        /// Font size.
        font_size: f32,
    },
    /// Scissor rect (clip children).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
    /// Live-region announcement for assistive technology.
    Announce {
        /// The complete text of the region (regions are atomic).
        text: String,
        /// Announcement urgency.
        politeness: Politeness,
    },
}

/// UI renderer that collects commands for one frame.
#[derive(Debug)]
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Clip stack.
    clip_stack: Vec<Rect>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
            clip_stack: Vec::with_capacity(4),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Pushes a clip rect.
    pub fn push_clip(&mut self, bounds: Rect) {
        // Intersect with current clip if any
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current.intersection(&bounds).unwrap_or(Rect::ZERO)
        } else {
            bounds
        };

        self.clip_stack.push(actual_clip);
        self.commands.push(RenderCommand::PushClip { bounds: actual_clip });
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(RenderCommand::PopClip);
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Returns the commands recorded so far this frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Ends the frame and hands the recorded commands to the caller.
    pub fn end_frame(&mut self) -> Vec<RenderCommand> {
        self.clip_stack.clear();
        std::mem::take(&mut self.commands)
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_frame() {
        let mut renderer = UIRenderer::new();

        renderer.begin_frame();
        renderer.push(RenderCommand::Announce {
            text: "Acme".into(),
            politeness: Politeness::Polite,
        });
        assert_eq!(renderer.command_count(), 1);

        let commands = renderer.end_frame();
        assert_eq!(commands.len(), 1);
        assert_eq!(renderer.command_count(), 0);
    }

    #[test]
    fn test_clip_stack_intersects() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();

        renderer.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        renderer.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(renderer.current_clip(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        renderer.pop_clip();
        renderer.pop_clip();
        assert!(renderer.current_clip().is_none());
    }
}
