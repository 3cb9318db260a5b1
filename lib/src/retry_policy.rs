use std::time::Duration;

/// Bounded retry with a fixed backoff schedule.
///
/// The delay after attempt `n` is the `n`-th schedule entry; once the schedule
/// runs out its last entry repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_schedule: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_schedule: vec![Duration::from_secs(2), Duration::from_secs(4)],
        }
    }
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        backoff_schedule: Vec<Duration>,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_schedule,
        }
    }

    pub fn from_seconds(
        max_attempts: u32,
        backoff_schedule_in_seconds: &[u64],
    ) -> Self {
        Self::new(max_attempts, backoff_schedule_in_seconds.iter().map(|seconds| Duration::from_secs(*seconds)).collect())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_schedule(&self) -> &[Duration] {
        &self.backoff_schedule
    }

    pub fn has_attempts_left(
        &self,
        attempt: u32,
    ) -> bool {
        attempt < self.max_attempts
    }

    /// Wait before the attempt following the failed `attempt` (1-based).
    pub fn delay_after(
        &self,
        attempt: u32,
    ) -> Duration {
        let index = attempt.saturating_sub(1) as usize;

        self.backoff_schedule
            .get(index)
            .or(self.backoff_schedule.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}
