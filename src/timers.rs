use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Fire-and-forget one-shot timers, drained by the event loop.
///
/// Timers are never cancelled; whoever handles an event is responsible for
/// recognising that it no longer applies.
#[derive(Debug)]
pub struct TimerQueue<E> {
    // Keyed by (due, sequence) so equal deadlines keep scheduling order.
    pending: BTreeMap<(Instant, u64), E>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        TimerQueue {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((now + delay, seq), event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Removes and returns every event due at `now`, earliest first. Events
    /// with the same due instant come out in scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<E> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > now {
                break;
            }
            fired.push(entry.remove());
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start, Duration::from_millis(300), "late");
        timers.schedule(start, Duration::from_millis(100), "early");
        timers.schedule(start, Duration::from_millis(100), "early-second");

        assert!(timers.drain_due(start).is_empty());
        assert_eq!(timers.next_due(), Some(start + Duration::from_millis(100)));
        assert_eq!(
            timers.drain_due(start + Duration::from_millis(150)),
            vec!["early", "early-second"]
        );
        assert_eq!(timers.next_due(), Some(start + Duration::from_millis(300)));
        assert_eq!(timers.drain_due(start + Duration::from_secs(1)), vec!["late"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn many_timers_at_one_instant_keep_scheduling_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        for i in 0..50 {
            timers.schedule(start, Duration::from_millis(10), i);
        }
        timers.schedule(start, Duration::from_millis(5), -1);
        let fired = timers.drain_due(start + Duration::from_millis(10));
        assert_eq!(fired.first(), Some(&-1));
        assert_eq!(fired[1..].to_vec(), (0..50).collect::<Vec<_>>());
        assert!(timers.is_empty());
    }
}
