use std::time::Duration;

/// Lap progress for the single car on track.
///
/// `lap_count` only goes up while `checkpoint_armed` is set, and doing so clears it.
/// Once `finished` is set nothing here changes again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceState {
    pub lap_count: u32,
    pub checkpoint_armed: bool,
    pub finished: bool,
    /// Simulated time the race started at
    pub start_time: Duration,
    pub last_checkpoint_fire: Option<Duration>,
    pub last_finish_fire: Option<Duration>,
    pub finish_time: Option<Duration>,
}

impl RaceState {
    #[must_use]
    pub const fn new(start_time: Duration) -> Self {
        Self {
            lap_count: 0,
            checkpoint_armed: false,
            finished: false,
            start_time,
            last_checkpoint_fire: None,
            last_finish_fire: None,
            finish_time: None,
        }
    }

    /// Race time at `now`, frozen at the finish once the race is over
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.finish_time
            .unwrap_or(now)
            .saturating_sub(self.start_time)
    }
}
