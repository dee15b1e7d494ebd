//=========================================================================
// Timer Queue
//=========================================================================
//
// One-shot and repeating timers multiplexed onto the fixed tick.
//
// Architecture:
//   after()/every() → BTreeMap<(due, id), Timer<T>> → advance(dt) → Vec<T>
//
// A timer carries a payload instead of a closure. `advance` returns the
// payloads that came due, in due-time order (creation order breaks ties),
// and the owner dispatches them one at a time. Nothing is ever called
// back into, so a payload that outlives what it names is just data the
// owner checks for liveness.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::time::Duration;

use log::trace;

//=== TimerId =============================================================

/// Creation order, used to break ties between timers due together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TimerId(u64);

//=== Timer ===============================================================

#[derive(Debug, Clone)]
struct Timer<T> {
    period: Option<Duration>,
    payload: T,
}

//=== TimerQueue ==========================================================

/// Scheduler for payload-carrying timers.
///
/// Time only moves through [`advance`](Self::advance); the queue has no
/// notion of wall-clock time, which keeps it deterministic under test.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), Timer<T>>,
}

impl<T: Clone> TimerQueue<T> {
    /// Creates an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Fires `payload` once, `delay` from now.
    pub fn after(&mut self, delay: Duration, payload: T) {
        self.schedule(delay, None, payload);
    }

    /// Fires `payload` every `period`, first at now + `period`.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn every(&mut self, period: Duration, payload: T) {
        assert!(!period.is_zero(), "Repeating timer period must be positive");
        self.schedule(period, Some(period), payload);
    }

    //--- Advancing --------------------------------------------------------

    /// Moves time forward by `dt` and returns every payload that came due.
    ///
    /// A repeating timer whose period is shorter than `dt` fires once per
    /// elapsed period.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        let target = self.now + dt;
        let mut fired = Vec::new();

        loop {
            let key = match self.pending.keys().next() {
                Some(&key) if key.0 <= target => key,
                _ => break,
            };

            let Some(timer) = self.pending.remove(&key) else {
                break;
            };
            let (due, id) = key;
            self.now = due;
            fired.push(timer.payload.clone());

            if let Some(period) = timer.period {
                self.pending.insert((due + period, id), timer);
            }
        }

        self.now = target;
        fired
    }

    //--- Queries ----------------------------------------------------------

    /// Time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn schedule(&mut self, delay: Duration, period: Option<Duration>, payload: T) {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending
            .insert((self.now + delay, id), Timer { period, payload });
        trace!(target: "core::timer", "Scheduled {:?} at {:?}", id, self.now + delay);
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn one_shot_fires_once_at_its_deadline() {
        let mut timers = TimerQueue::new();
        timers.after(ms(100), "expire");

        assert!(timers.advance(ms(99)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec!["expire"]);
        assert!(timers.advance(ms(1000)).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut timers = TimerQueue::new();
        timers.every(ms(250), "score");

        let mut fired = 0;
        for _ in 0..100 {
            fired += timers.advance(ms(10)).len();
        }
        // 1000 ms elapsed
        assert_eq!(fired, 4);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn large_step_fires_repeating_timer_multiple_times() {
        let mut timers = TimerQueue::new();
        timers.every(ms(250), 1u32);
        assert_eq!(timers.advance(ms(1000)), vec![1, 1, 1, 1]);
    }

    #[test]
    fn payloads_come_out_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.after(ms(30), "c");
        timers.after(ms(10), "a");
        timers.after(ms(20), "b");

        assert_eq!(timers.advance(ms(50)), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_resolve_in_creation_order() {
        let mut timers = TimerQueue::new();
        timers.after(ms(10), "first");
        timers.after(ms(10), "second");

        assert_eq!(timers.advance(ms(10)), vec!["first", "second"]);
    }

    #[test]
    fn interleaves_repeating_and_one_shot() {
        let mut timers = TimerQueue::new();
        timers.every(ms(100), "tick");
        timers.after(ms(150), "once");

        assert_eq!(timers.advance(ms(250)), vec!["tick", "once", "tick"]);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut timers = TimerQueue::new();
        timers.advance(ms(500));
        timers.after(ms(100), ());

        assert_eq!(timers.now(), ms(500));
        assert!(timers.advance(ms(99)).is_empty());
        assert_eq!(timers.advance(ms(1)), vec![()]);
        assert_eq!(timers.now(), ms(600));
    }

    #[test]
    #[should_panic(expected = "period must be positive")]
    fn zero_period_panics() {
        TimerQueue::new().every(Duration::ZERO, ());
    }
}
