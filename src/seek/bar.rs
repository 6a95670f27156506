use std::time::Duration;

/// Maximum used while the player cannot report a duration.
pub const FALLBACK_MAX: u64 = 100;

/// Who moved the bar. Only user moves seek the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekOrigin {
    User,
    Program,
}

/// Seek bar state, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeekBar {
    max: u64,
    progress: u64,
}

impl Default for SeekBar {
    fn default() -> Self {
        Self {
            max: FALLBACK_MAX,
            progress: 0,
        }
    }
}

impl SeekBar {
    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Prepare the bar for a new handle reporting `duration`.
    pub fn reset_for(&mut self, duration: Option<Duration>) {
        self.max = duration
            .map(|d| d.as_millis() as u64)
            .filter(|&ms| ms > 0)
            .unwrap_or(FALLBACK_MAX);
        self.progress = 0;
    }

    /// Move the bar to `value`. Returns the position to seek to when the
    /// change came from the user.
    pub fn apply(&mut self, value: u64, origin: SeekOrigin) -> Option<Duration> {
        self.progress = value.min(self.max);
        match origin {
            SeekOrigin::User => Some(Duration::from_millis(self.progress)),
            SeekOrigin::Program => None,
        }
    }

    /// Fraction of the bar that is filled, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        (self.progress as f64 / self.max as f64).clamp(0.0, 1.0)
    }

    /// Bar value under column `offset` of a bar `width` cells wide.
    pub fn value_at(&self, offset: u16, width: u16) -> u64 {
        if width <= 1 {
            return 0;
        }
        let last = u64::from(width - 1);
        u64::from(offset).min(last) * self.max / last
    }
}
