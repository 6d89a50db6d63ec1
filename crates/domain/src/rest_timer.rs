/// Preset rest durations in seconds offered by the UI. Policy, not part
/// of the timer's contract.
pub const REST_PRESETS: [u32; 6] = [30, 60, 90, 120, 180, 300];

/// Identifies one tick schedule. Arming operations hand out a new token
/// and thereby invalidate every previously scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

/// Outcome of applying one elapsed second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The countdown advanced and is still running.
    Running { remaining: u32 },
    /// The countdown just reached zero. Reported exactly once per run;
    /// callers fire the completion alert on this value.
    Elapsed,
    /// The tick belonged to a superseded schedule and was discarded.
    Stale,
}

/// Countdown used for rest between sets.
///
/// The timer holds no clock of its own. A scheduler (UI tick loop, async
/// interval) calls [`tick`] once per second with the token obtained from
/// the arming operation; tokens from before the latest `start`, `pause`,
/// `resume` or `reset` are rejected, which deterministically cancels the
/// previous schedule without the scheduler having to be torn down in
/// lockstep.
///
/// [`tick`]: RestTimer::tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    remaining: u32,
    total: u32,
    running: bool,
    generation: u64,
}

impl RestTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True in the terminal state of a finished countdown, until `reset`
    /// or the next `start`.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }

    /// Begins a new countdown, superseding any countdown in flight.
    pub fn start(&mut self, duration: u32) -> TickToken {
        self.generation += 1;
        self.total = duration;
        self.remaining = duration;
        self.running = duration > 0;
        TickToken(self.generation)
    }

    /// Halts the countdown, keeping the remaining time.
    pub fn pause(&mut self) {
        self.generation += 1;
        self.running = false;
    }

    /// Continues a paused countdown. Returns `None` when nothing remains
    /// to count down.
    pub fn resume(&mut self) -> Option<TickToken> {
        if self.remaining == 0 {
            return None;
        }
        self.generation += 1;
        self.running = true;
        Some(TickToken(self.generation))
    }

    /// Returns to idle, discarding any countdown in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.remaining = 0;
        self.total = 0;
        self.running = false;
    }

    /// Applies one elapsed second of the schedule identified by `token`.
    pub fn tick(&mut self, token: TickToken) -> TimerTick {
        if token.0 != self.generation || !self.running {
            return TimerTick::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.running = false;
            TimerTick::Elapsed
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_down(timer: &mut RestTimer, token: TickToken, ticks: u32) -> Vec<TimerTick> {
        (0..ticks).map(|_| timer.tick(token)).collect()
    }

    #[test]
    fn test_start_runs_to_completion_with_single_elapsed() {
        let mut timer = RestTimer::new();
        let token = timer.start(90);
        assert_eq!(timer.total_seconds(), 90);
        assert_eq!(timer.remaining_seconds(), 90);
        assert!(timer.is_running());

        let ticks = run_down(&mut timer, token, 95);

        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert!(timer.is_elapsed());
        assert_eq!(
            ticks.iter().filter(|t| **t == TimerTick::Elapsed).count(),
            1
        );
        // ticks after completion are discarded, not repeated alerts
        assert_eq!(ticks[90..], [TimerTick::Stale; 5]);
    }

    #[test]
    fn test_pause_and_resume_preserve_total_tick_count() {
        let mut timer = RestTimer::new();
        let token = timer.start(60);
        run_down(&mut timer, token, 10);

        timer.pause();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 50);
        // the paused interval must not consume ticks
        assert_eq!(timer.tick(token), TimerTick::Stale);
        assert_eq!(timer.remaining_seconds(), 50);

        let token = timer.resume().unwrap();
        let ticks = run_down(&mut timer, token, 50);
        assert_eq!(*ticks.last().unwrap(), TimerTick::Elapsed);
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn test_resume_after_completion_is_noop() {
        let mut timer = RestTimer::new();
        let token = timer.start(1);
        assert_eq!(timer.tick(token), TimerTick::Elapsed);
        assert_eq!(timer.resume(), None);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_start_supersedes_running_countdown() {
        let mut timer = RestTimer::new();
        let old = timer.start(120);
        run_down(&mut timer, old, 5);

        let new = timer.start(30);
        // ticks of the superseded schedule no longer fire
        assert_eq!(timer.tick(old), TimerTick::Stale);
        assert_eq!(timer.remaining_seconds(), 30);

        let ticks = run_down(&mut timer, new, 30);
        assert_eq!(*ticks.last().unwrap(), TimerTick::Elapsed);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut timer = RestTimer::new();
        let token = timer.start(45);
        run_down(&mut timer, token, 3);

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.total_seconds(), 0);
        assert!(!timer.is_running());
        assert!(!timer.is_elapsed());
        assert_eq!(timer.tick(token), TimerTick::Stale);
    }

    #[test]
    fn test_presets_are_distinct_and_ascending() {
        assert!(REST_PRESETS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_start_zero_duration_does_not_run() {
        let mut timer = RestTimer::new();
        let token = timer.start(0);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(token), TimerTick::Stale);
    }
}
