//! Frame timing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling frame-time window with a periodic report timer
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    last_report: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a counter averaging over the last `sample_count` frames
    pub fn new(sample_count: usize) -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: now,
            last_report: now,
            sample_count: sample_count.max(1),
        }
    }

    /// Call once per frame; returns the time since the previous call in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    /// Average frame time over the window, in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    pub fn avg_fps(&self) -> f32 {
        let ms = self.avg_frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    /// (min, max) FPS over the window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self.frame_times.iter().copied().fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().copied().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }

    /// True at most once per `interval`
    pub fn report_due(&mut self, interval: Duration) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_report) >= interval {
            self.last_report = now;
            true
        } else {
            false
        }
    }
}
