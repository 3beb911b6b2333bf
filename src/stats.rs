//! Frame timing: the frame clock and the performance counter.

use instant::{Duration, Instant};

/// Measures the time elapsed between consecutive calls to [`FrameClock::delta`].
///
/// Monotonic; the reference point is only reset at construction.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Time since the previous call (or since construction for the first call).
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.elapsed += dt;
        dt
    }

    /// Total time handed out by [`FrameClock::delta`] so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second counter, reported through `log` once per interval.
#[derive(Debug)]
pub struct Stats {
    frames: u64,
    window_frames: u32,
    window_start: Instant,
    interval: Duration,
    fps: f32,
}

impl Stats {
    pub fn new(interval: Duration) -> Self {
        Self {
            frames: 0,
            window_frames: 0,
            window_start: Instant::now(),
            interval,
            fps: 0.0,
        }
    }

    /// Count one frame. Returns the fresh FPS value when a reporting window closes.
    pub fn update(&mut self) -> Option<f32> {
        self.frames += 1;
        self.window_frames += 1;
        let window = self.window_start.elapsed();
        if window < self.interval {
            return None;
        }
        self.fps = self.window_frames as f32 / window.as_secs_f32();
        log::info!("{:.1} fps ({} frames total)", self.fps, self.frames);
        self.window_frames = 0;
        self.window_start = Instant::now();
        Some(self.fps)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// FPS measured over the last completed window, 0 before the first one closes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
