//! Per-frame animation state and frame-request pacing.

/// Host primitive that schedules one callback before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    #[inline]
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// Frame-request state of an [`AnimationDriver`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnimationState {
    /// No callback pending.
    Idle,
    /// Exactly one callback pending.
    FrameRequested,
    /// Shut down; callbacks are ignored and nothing is re-armed.
    Stopped,
}

/// Ping-pong translation offset.
///
/// The offset moves by `increment` each step and stays inside
/// `[REST - HALF_WIDTH, REST + HALF_WIDTH]`. A step that would leave the
/// window reverses direction instead.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Oscillator {
    offset: f32,
    increment: f32,
}

impl Oscillator {
    pub const REST: f32 = -1.0;
    pub const HALF_WIDTH: f32 = 1.0;
    pub const DEFAULT_STEP: f32 = 0.01;

    /// Starts at rest. The step magnitude is capped to the window width.
    pub fn new(increment: f32) -> Self {
        let increment = if increment.is_finite() {
            increment.clamp(-2.0 * Self::HALF_WIDTH, 2.0 * Self::HALF_WIDTH)
        } else {
            Self::DEFAULT_STEP
        };
        Self {
            offset: Self::REST,
            increment,
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Advances one frame and returns the new offset.
    pub fn step(&mut self) -> f32 {
        let mut next = self.offset + self.increment;
        if (next - Self::REST).abs() > Self::HALF_WIDTH {
            self.increment = -self.increment;
            next = self.offset + self.increment;
        }
        self.offset = next.clamp(Self::REST - Self::HALF_WIDTH, Self::REST + Self::HALF_WIDTH);
        self.offset
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

/// Drives the frame loop: one transform update and one draw per callback.
///
/// At most one frame request is outstanding. Repeated `request_draw` calls
/// (e.g. from both a resize handler and the previous frame) collapse into
/// the single pending callback.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: AnimationState,
    oscillator: Oscillator,
    frames: u64,
}

impl AnimationDriver {
    pub fn new(step: f32) -> Self {
        Self {
            state: AnimationState::Idle,
            oscillator: Oscillator::new(step),
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.oscillator.offset()
    }

    /// Number of frame callbacks that advanced the animation.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Begins (or resumes) the loop by requesting the first frame.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        if self.state == AnimationState::Stopped {
            self.state = AnimationState::Idle;
        }
        self.request_draw(scheduler)
    }

    /// Requests a frame callback unless one is already pending.
    ///
    /// Returns `true` if a new request was issued.
    pub fn request_draw<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        match self.state {
            AnimationState::Idle => {
                scheduler.request_frame();
                self.state = AnimationState::FrameRequested;
                true
            }
            AnimationState::FrameRequested | AnimationState::Stopped => false,
        }
    }

    /// Handles a fired frame callback.
    ///
    /// Moves to `Idle` and advances the transform, returning the offset to
    /// draw with. Returns `None` once stopped. The caller draws and then
    /// re-arms with [`request_draw`](Self::request_draw).
    pub fn begin_frame(&mut self) -> Option<f32> {
        if self.state == AnimationState::Stopped {
            return None;
        }
        self.state = AnimationState::Idle;
        self.frames += 1;
        Some(self.oscillator.step())
    }

    /// Handles a fired frame callback that could not draw (no surface texture).
    ///
    /// The host already consumed the pending request, so the driver drops
    /// back to `Idle` and re-arms without advancing the transform. Returns
    /// `true` if a new request was issued.
    pub fn skip_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        if self.state == AnimationState::FrameRequested {
            self.state = AnimationState::Idle;
        }
        self.request_draw(scheduler)
    }

    /// Stops the loop. A callback already queued by the host becomes a no-op.
    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(Oscillator::DEFAULT_STEP)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use super::*;

    /// Scheduler that only counts requests.
    #[derive(Default)]
    pub(crate) struct CountingScheduler {
        pub requests: Cell<u32>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    // ── oscillator ────────────────────────────────────────────────────────

    #[test]
    fn oscillator_stays_in_window_and_returns() {
        let mut osc = Oscillator::new(0.01);
        assert_eq!(osc.offset(), -1.0);

        let mut reached_top = false;
        let mut back_near_rest = false;
        for _ in 0..1000 {
            let o = osc.step();
            assert!((-2.0..=0.0).contains(&o), "offset {o} left the window");
            if o > -0.02 {
                reached_top = true;
            }
            if reached_top && (o + 1.0).abs() < 0.006 {
                back_near_rest = true;
            }
        }
        assert!(reached_top);
        assert!(back_near_rest);
    }

    #[test]
    fn oscillator_reverses_at_bounds() {
        let mut osc = Oscillator::new(0.5);
        assert_eq!(osc.step(), -0.5);
        assert_eq!(osc.step(), 0.0);
        // 0.5 would leave the window: reverse.
        assert_eq!(osc.step(), -0.5);
        assert_eq!(osc.increment(), -0.5);
        assert_eq!(osc.step(), -1.0);
        assert_eq!(osc.step(), -1.5);
        assert_eq!(osc.step(), -2.0);
        assert_eq!(osc.step(), -1.5);
    }

    #[test]
    fn oscillator_caps_oversized_step() {
        let mut osc = Oscillator::new(10.0);
        for _ in 0..10 {
            let o = osc.step();
            assert!((-2.0..=0.0).contains(&o));
        }
    }

    #[test]
    fn oscillator_rejects_nan_step() {
        assert_eq!(Oscillator::new(f32::NAN).increment(), Oscillator::DEFAULT_STEP);
    }

    // ── driver ────────────────────────────────────────────────────────────

    #[test]
    fn starts_idle() {
        assert_eq!(AnimationDriver::default().state(), AnimationState::Idle);
    }

    #[test]
    fn duplicate_requests_schedule_once() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();

        assert!(driver.request_draw(&sched));
        assert!(!driver.request_draw(&sched));
        assert_eq!(sched.requests.get(), 1);
        assert_eq!(driver.state(), AnimationState::FrameRequested);
    }

    #[test]
    fn callback_rearms_loop() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();
        driver.start(&sched);

        for frame in 1..=5u32 {
            let offset = driver.begin_frame();
            assert!(offset.is_some());
            assert_eq!(driver.state(), AnimationState::Idle);
            driver.request_draw(&sched);
            assert_eq!(sched.requests.get(), frame + 1);
        }
        assert_eq!(driver.frames(), 5);
        assert!((driver.offset() - -0.95).abs() < 1e-5);
    }

    #[test]
    fn stop_ignores_pending_callback() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();
        driver.start(&sched);
        driver.stop();

        assert_eq!(driver.begin_frame(), None);
        assert!(!driver.request_draw(&sched));
        assert_eq!(sched.requests.get(), 1);
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn skipped_callback_rearms_loop() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();
        driver.start(&sched);

        // Callback fires but no surface texture was available.
        assert!(driver.skip_frame(&sched));
        assert_eq!(sched.requests.get(), 2);
        assert_eq!(driver.state(), AnimationState::FrameRequested);
        assert_eq!(driver.frames(), 0);
        assert_eq!(driver.offset(), Oscillator::REST);

        // The re-armed callback draws normally.
        assert!(driver.begin_frame().is_some());
        assert!(driver.request_draw(&sched));
        assert_eq!(sched.requests.get(), 3);
    }

    #[test]
    fn skipped_callback_after_stop_stays_stopped() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();
        driver.start(&sched);
        driver.stop();

        assert!(!driver.skip_frame(&sched));
        assert_eq!(driver.state(), AnimationState::Stopped);
        assert_eq!(sched.requests.get(), 1);
    }

    #[test]
    fn start_after_stop_resumes() {
        let sched = CountingScheduler::default();
        let mut driver = AnimationDriver::default();
        driver.stop();
        assert!(driver.start(&sched));
        assert_eq!(driver.state(), AnimationState::FrameRequested);
    }
}
