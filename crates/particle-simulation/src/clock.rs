//! Frame timing
//!
//! Turns wall-clock time between frames into the simulation step `dt` and
//! keeps a rolling average for the FPS readout.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FRAME_HISTORY: usize = 100;

#[derive(Debug)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    time_speed: f32,
    frame_times: VecDeque<f32>,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(time_speed: f32) -> Self {
        Self {
            last_tick: None,
            time_speed,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY),
            frame_count: 0,
        }
    }

    /// Mark the start of a frame and return its `dt` in simulated seconds.
    /// The very first call returns 0.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        match self.last_tick.replace(now) {
            Some(previous) => self.advance(now.duration_since(previous)),
            // No frame time to record yet
            None => {
                self.frame_count += 1;
                0.0
            }
        }
    }

    /// Account for `elapsed` wall-clock time and return the scaled `dt`
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        let elapsed_ms = elapsed.as_secs_f32() * 1000.0;

        self.frame_times.push_back(elapsed_ms);
        if self.frame_times.len() > FRAME_HISTORY {
            self.frame_times.pop_front();
        }
        self.frame_count += 1;

        self.time_speed * (elapsed_ms / 1000.0)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mean frame time in milliseconds over the recent history
    pub fn average_frame_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let average = self.average_frame_time();
        if average > 0.0 {
            1000.0 / average
        } else {
            0.0
        }
    }
}
