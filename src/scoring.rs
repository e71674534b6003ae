/// Absent, or the logic-clock time at which frightened mode ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrightenedTimer {
    expires_at: Option<u64>,
}

impl FrightenedTimer {
    /// Starts or restarts the countdown.
    pub fn start(&mut self, now: u64, duration_ms: u64) {
        self.expires_at = Some(now + duration_ms);
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.expires_at
            .map(|at| at.saturating_sub(now))
            .unwrap_or(0)
    }

    /// True exactly once: on the first check at or after the expiry time.
    pub fn expire(&mut self, now: u64) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Blinks on alternate `period_ms` windows during the final `window_ms`.
    pub fn flashing(&self, now: u64, window_ms: u64, period_ms: u64) -> bool {
        if !self.is_active() || period_ms == 0 {
            return false;
        }
        self.remaining(now) < window_ms && (now / period_ms) % 2 == 1
    }
}

/// Pursuers eaten during the current frightened period, capped at the last
/// index of the score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboCounter {
    count: usize,
    cap: usize,
}

impl ComboCounter {
    pub fn new(table_len: usize) -> Self {
        Self {
            count: 0,
            cap: table_len.saturating_sub(1),
        }
    }

    pub fn value(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Points for the pursuer just eaten; moves the combo up one notch.
    pub fn award(&mut self, table: &[u32]) -> u32 {
        let points = table
            .get(self.count.min(self.cap))
            .or_else(|| table.last())
            .copied()
            .unwrap_or(0);
        self.count = (self.count + 1).min(self.cap);
        points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
        }
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Returns the lives left afterwards.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn next_level(&mut self) {
        self.level += 1;
    }
}
