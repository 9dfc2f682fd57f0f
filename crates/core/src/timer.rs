//! Timer service seam.
//!
//! The controller owns at most one periodic task at a time. A task delivers its
//! [`TimerId`] back to the controller on every period (`Controller::on_timer`);
//! how that delivery happens is up to the implementation.

use crate::types::TimerId;

pub trait TimerService {
    /// Start a periodic task firing every `interval_ms`
    fn schedule_periodic(&mut self, interval_ms: u32) -> TimerId;

    /// Stop a task. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Deterministic timer that never fires on its own.
///
/// Tests drive it by handing the live id to `Controller::on_timer`.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    next_id: u64,
    live: Vec<(TimerId, u32)>,
    cancelled: Vec<TimerId>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live tasks with their intervals
    pub fn live(&self) -> &[(TimerId, u32)] {
        &self.live
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.live.iter().any(|&(live, _)| live == id)
    }

    pub fn interval_of(&self, id: TimerId) -> Option<u32> {
        self.live
            .iter()
            .find(|&&(live, _)| live == id)
            .map(|&(_, interval)| interval)
    }

    /// Every id cancelled so far, in order
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }
}

impl TimerService for ManualTimer {
    fn schedule_periodic(&mut self, interval_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.live.push((id, interval_ms));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.live.len();
        self.live.retain(|&(live, _)| live != id);
        if self.live.len() != before {
            self.cancelled.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_tracks_live_tasks() {
        let mut timer = ManualTimer::new();
        let a = timer.schedule_periodic(500);
        let b = timer.schedule_periodic(250);
        assert_ne!(a, b);
        assert_eq!(timer.live_count(), 2);
        assert_eq!(timer.interval_of(b), Some(250));

        timer.cancel(a);
        timer.cancel(a);
        assert!(!timer.is_live(a));
        assert!(timer.is_live(b));
        assert_eq!(timer.cancelled(), &[a]);
    }
}
