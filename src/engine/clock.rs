const SECONDS_PER_MINUTE: f32 = 60.0;

/// Session time limit. A limit of zero means no limit.
#[derive(Debug, Clone)]
pub struct Countdown {
    limit_secs: f32,
    elapsed_secs: f32,
    running: bool,
}

impl Countdown {
    pub fn new(limit_secs: f32) -> Self {
        Self {
            limit_secs: limit_secs.max(0.0),
            elapsed_secs: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.elapsed_secs = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_limited(&self) -> bool {
        self.limit_secs > 0.0
    }

    /// Advance by `dt` seconds; returns the remaining time while running.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.running || !(dt > 0.0) {
            return self.running.then(|| self.remaining());
        }
        self.elapsed_secs += dt;
        Some(self.remaining())
    }

    pub fn remaining(&self) -> f32 {
        if !self.is_limited() {
            return f32::INFINITY;
        }
        (self.limit_secs - self.elapsed_secs).max(0.0)
    }

    pub fn expired(&self) -> bool {
        self.is_limited() && self.elapsed_secs >= self.limit_secs
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }
}

pub fn format_remaining(remaining_secs: f32) -> String {
    if !remaining_secs.is_finite() {
        return "Time --:--".to_string();
    }
    let minutes = (remaining_secs / SECONDS_PER_MINUTE).floor() as u32;
    let seconds = (remaining_secs % SECONDS_PER_MINUTE).floor() as u32;
    format!("Time {:02}:{:02}", minutes, seconds)
}
