use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Elapsed-time bookkeeping for one round. The timer never reads a wall
/// clock; the host advances it through `tick`, once per second, and owns the
/// scheduling primitive that drives it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    elapsed_secs: u32,
    running: bool,
}

impl RoundTimer {
    /// Zeroes the clock and starts it.
    pub fn restart(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    /// Freezes the clock at its current reading. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances the clock by one second. No-op while stopped.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Clock face as zero-padded `"MM:SS"`; the minute field keeps growing
    /// past 99.
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}
