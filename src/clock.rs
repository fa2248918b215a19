/// Frame clock: caps the loop at a target rate and reports the real elapsed
/// time of each frame.

use std::thread;
use std::time::{Duration, Instant};

pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until one interval has passed since the previous call, then
    /// return the elapsed wall-clock seconds.
    pub fn tick(&mut self) -> f32 {
        let target = self.last + self.interval;
        let now = Instant::now();
        if now < target {
            thread::sleep(target - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}
