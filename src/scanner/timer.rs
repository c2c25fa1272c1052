//! One-shot finalize timer, modelled as a single optional deadline.
//!
//! Arming replaces any previous deadline, so at most one timer is ever
//! pending. The owner fires it by calling [`FinalizeTimer::take_due`]
//! from its event loop.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default)]
pub struct FinalizeTimer {
    deadline: Option<Instant>,
}

impl FinalizeTimer {
    pub fn new() -> Self {
        FinalizeTimer { deadline: None }
    }

    /// Replace any pending deadline with `now + delay`
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Disarm and return `true` if the deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = FinalizeTimer::new();
        timer.arm(t0, Duration::from_millis(300));
        timer.arm(t0 + Duration::from_millis(100), Duration::from_millis(300));
        assert_eq!(timer.deadline(), Some(t0 + Duration::from_millis(400)));
        assert!(!timer.take_due(t0 + Duration::from_millis(350)));
        assert!(timer.take_due(t0 + Duration::from_millis(400)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut timer = FinalizeTimer::new();
        timer.arm(t0, Duration::from_millis(300));
        timer.cancel();
        assert!(!timer.take_due(t0 + Duration::from_secs(1)));
        assert_eq!(timer.remaining(t0), None);
    }
}
