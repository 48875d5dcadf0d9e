//! Time sources for widgets.
//!
//! Widgets never sleep and never hold closures. They ask a [`Scheduler`] for
//! a one-shot timer or a next-paint callback and get back a handle. The host
//! later delivers the matching [`Wakeup`], and the widget compares it with
//! the handle it is still waiting on. A wakeup for a handle the widget no
//! longer holds (cancelled, superseded, or torn down) is simply ignored.
//!
//! ```text
//!   widget ──set_timeout(ms)──► Scheduler ──TimerId──► widget
//!   host   ◄──advance(dt)────── Scheduler ──Wakeup::Timer(id)──► widget
//!   widget ──request_frame()──► Scheduler ──FrameId──► widget
//!   host   ◄──next_frame()───── Scheduler ──Wakeup::Frame(id)──► widget
//! ```

/// Handle of a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Handle of a pending next-paint callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A callback the host owes a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// A one-shot timer elapsed.
    Timer(TimerId),
    /// The next paint happened.
    Frame(FrameId),
}

/// Timer and paint-callback provider.
pub trait Scheduler {
    /// Arms a one-shot timer that fires after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;

    /// Cancels a pending timer. Unknown or already fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Requests a callback on the next paint.
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a pending paint callback. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Deterministic virtual-time scheduler.
///
/// Time only moves when the host calls [`advance`](Self::advance), and paint
/// callbacks only run when it calls [`next_frame`](Self::next_frame). Frame
/// requests made while a frame's callbacks are being delivered land in the
/// following frame, which is what makes "wait two frames" observable.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    /// Current virtual time.
    now_ms: u64,
    /// ID counter shared by timers and frames.
    next_id: u64,
    /// Pending timers as (deadline, id).
    timers: Vec<(u64, TimerId)>,
    /// Pending frame requests in request order.
    frames: Vec<FrameId>,
    /// Total timers ever armed.
    timers_armed: u64,
    /// Total frames ever requested.
    frames_requested: u64,
}

impl VirtualScheduler {
    /// Creates a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves virtual time forward and returns the timers that came due,
    /// ordered by deadline then by arming order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<Wakeup> {
        self.now_ms = self.now_ms.saturating_add(dt_ms);

        let now = self.now_ms;
        let mut due: Vec<(u64, TimerId)> = Vec::new();
        self.timers.retain(|&(deadline, id)| {
            if deadline <= now {
                due.push((deadline, id));
                false
            } else {
                true
            }
        });
        due.sort_unstable();

        due.into_iter().map(|(_, id)| Wakeup::Timer(id)).collect()
    }

    /// Runs a paint: returns every frame callback requested before this call.
    pub fn next_frame(&mut self) -> Vec<Wakeup> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(Wakeup::Frame)
            .collect()
    }

    /// Returns the number of timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns the number of frame callbacks still pending.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Returns how many timers have been armed over the scheduler's life.
    #[must_use]
    pub fn timers_armed(&self) -> u64 {
        self.timers_armed
    }

    /// Returns how many frame callbacks have been requested over the scheduler's life.
    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for VirtualScheduler {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.allocate());
        self.timers.push((self.now_ms.saturating_add(delay_ms), id));
        self.timers_armed += 1;
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|&(_, pending)| pending != id);
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.allocate());
        self.frames.push(id);
        self.frames_requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|&pending| pending != id);
    }
}
