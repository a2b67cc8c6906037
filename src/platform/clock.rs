//! Fixed-rate frame pacing
//!
//! The driver waits until `next_frame()` and then calls `begin_frame()`.
//! A late frame reschedules from "now" instead of bursting to catch up.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Paces frames at a target rate and measures the achieved rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    interval: Duration,
    next_frame: Instant,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl FrameClock {
    pub fn new(rate: u32, now: Instant) -> Self {
        let interval = Duration::from_secs_f64(1.0 / rate.max(1) as f64);
        Self {
            start: now,
            interval,
            next_frame: now,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame should run
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Milliseconds since the clock started
    pub fn game_time_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start).as_millis() as u64
    }

    /// Start a frame: schedule the next one, record timing, return game time (ms)
    pub fn begin_frame(&mut self, now: Instant) -> u64 {
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }

        let time = now.saturating_duration_since(self.start).as_secs_f64() * 1000.0;
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits at the slot about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        self.game_time_ms(now)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Seed derived from the wall clock
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_paced() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        assert!(clock.is_due(start));

        clock.begin_frame(start);
        assert!(!clock.is_due(start + Duration::from_millis(5)));
        assert!(clock.is_due(start + clock.interval()));
    }

    #[test]
    fn test_late_frame_does_not_burst() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        clock.begin_frame(start);

        let late = start + Duration::from_millis(500);
        clock.begin_frame(late);
        assert_eq!(clock.next_frame(), late + clock.interval());
    }

    #[test]
    fn test_game_time_and_fps() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        let step = Duration::from_millis(20);
        let mut game_time = 0;
        for i in 1..=120u32 {
            game_time = clock.begin_frame(start + step * i);
        }
        assert_eq!(game_time, 2_400);
        assert_eq!(clock.fps(), 50);
    }
}
