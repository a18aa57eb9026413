use std::time::{SystemTime, UNIX_EPOCH};

/// Frame statistics snapshot.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Frames counted during the last completed wall-clock second.
    ///
    /// Zero until the first second boundary has been observed.
    pub fps: u32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameStats` snapshots.
///
/// The clock only looks at the millisecond-of-second component of the wall
/// clock. A call whose millisecond value is smaller than the previous one is
/// treated as a second boundary: the running count becomes the published fps
/// and counting restarts at 1.
///
/// Known approximation: two calls a whole number of seconds apart whose
/// millisecond values happen not to decrease are not seen as a rollover.
/// At interactive frame rates this is off by at most one frame per second.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms_of_second: Option<u32>,
    count: u32,
    fps: u32,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the rolling count and the published fps.
    pub fn reset(&mut self) {
        self.last_ms_of_second = None;
        self.count = 0;
        self.fps = 0;
    }

    /// Last finalized fps value.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Advances the clock using the current wall-clock time.
    pub fn tick(&mut self) -> FrameStats {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.tick_at(now_ms)
    }

    /// Advances the clock with an explicit timestamp in milliseconds.
    ///
    /// Only `now_ms % 1000` is used.
    pub fn tick_at(&mut self, now_ms: u64) -> FrameStats {
        let ms = (now_ms % 1000) as u32;

        match self.last_ms_of_second {
            Some(prev) if ms < prev => {
                self.fps = self.count;
                self.count = 1;
            }
            _ => self.count = self.count.saturating_add(1),
        }
        self.last_ms_of_second = Some(ms);

        let stats = FrameStats {
            fps: self.fps,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        stats
    }
}
