//! Per-cue timer recurrences.
//!
//! A recurrence is a deadline, not a task: the table maps each ticking cue id
//! to the cue it refreshes and the instant its next publish is due. The event
//! loop sleeps until [`TimerScheduler::next_deadline`] and then collects the
//! due cues with [`TimerScheduler::take_due`]. Because the table is plain data
//! owned by the engine, there is at most one recurrence per id and cancelling
//! is just removal.

use std::collections::BTreeMap;

use crate::constants::timers::TICK_PERIOD_MS;
use crate::cue::Cue;
use crate::types::CueId;

#[derive(Debug, Clone)]
struct Recurrence {
    cue: Cue,
    next_due_ms: i64,
}

/// What reconciling a snapshot did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Timer cues now ticking (started or restarted).
    pub started: Vec<CueId>,
    /// Recurrences cancelled because their cue paused, reset or stopped
    /// being a timer.
    pub stopped: Vec<CueId>,
    /// Recurrences cancelled because their cue left the project.
    pub orphaned: Vec<CueId>,
}

/// Table of active timer recurrences.
#[derive(Debug, Clone)]
pub struct TimerScheduler {
    period_ms: i64,
    active: BTreeMap<CueId, Recurrence>,
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD_MS)
    }
}

impl TimerScheduler {
    /// An empty table ticking every `period_ms`.
    pub fn new(period_ms: i64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            active: BTreeMap::new(),
        }
    }

    /// Whether `id` has a live recurrence.
    pub fn is_ticking(&self, id: &CueId) -> bool {
        self.active.contains_key(id)
    }

    /// Ids with a live recurrence, in id order.
    pub fn ticking(&self) -> impl Iterator<Item = &CueId> {
        self.active.keys()
    }

    /// Number of live recurrences.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// No recurrence is live.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Start ticking `cue`, first due one period after `now_ms`.
    ///
    /// Returns `true` when a prior recurrence for the same id was replaced.
    pub fn start(&mut self, cue: Cue, now_ms: i64) -> bool {
        let id = cue.id.clone();
        let recurrence = Recurrence {
            cue,
            next_due_ms: now_ms + self.period_ms,
        };
        self.active.insert(id, recurrence).is_some()
    }

    /// Cancel the recurrence for `id`. Returns `false` (and does nothing) if
    /// there was none.
    pub fn cancel(&mut self, id: &CueId) -> bool {
        self.active.remove(id).is_some()
    }

    /// Bring the table in line with a fresh cue list.
    ///
    /// Timer cues that are neither paused nor reset (re)start ticking with
    /// the new cue data. Paused or reset timers, and ids whose cue is no
    /// longer a timer kind, are stopped. Recurrences whose cue is gone are
    /// cancelled as orphans.
    pub fn reconcile(&mut self, cues: &[Cue], now_ms: i64) -> Reconciliation {
        let mut outcome = Reconciliation::default();

        let present: Vec<&CueId> = cues.iter().map(|cue| &cue.id).collect();
        let orphans: Vec<CueId> = self
            .active
            .keys()
            .filter(|id| !present.contains(id))
            .cloned()
            .collect();
        for id in orphans {
            self.cancel(&id);
            tracing::debug!("Stopped timer for removed cue {}", id);
            outcome.orphaned.push(id);
        }

        for cue in cues {
            if !cue.kind().is_timer() || cue.is_paused_or_reset() {
                if self.cancel(&cue.id) {
                    outcome.stopped.push(cue.id.clone());
                }
            } else {
                self.start(cue.clone(), now_ms);
                outcome.started.push(cue.id.clone());
            }
        }

        outcome
    }

    /// Earliest pending deadline in Unix milliseconds.
    pub fn next_deadline(&self) -> Option<i64> {
        self.active.values().map(|r| r.next_due_ms).min()
    }

    /// Cues whose deadline has passed, advancing each to its next slot.
    ///
    /// A recurrence that fell several periods behind is published once and
    /// moved to the first slot after `now_ms`.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<Cue> {
        let period = self.period_ms;
        self.active
            .values_mut()
            .filter(|r| r.next_due_ms <= now_ms)
            .map(|r| {
                let missed = (now_ms - r.next_due_ms) / period + 1;
                r.next_due_ms += missed * period;
                r.cue.clone()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::cue::RunState;

    fn timer(id: &str, state: RunState) -> Cue {
        let mut cue = Cue::new(id, "time_countdown");
        cue.state = Some(state);
        cue
    }

    #[test]
    fn restart_replaces_instead_of_duplicating() {
        let mut scheduler = TimerScheduler::default();
        assert!(!scheduler.start(timer("a", RunState::Running), 0));
        assert!(scheduler.start(timer("a", RunState::Running), 500));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(1500));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = TimerScheduler::default();
        scheduler.start(timer("a", RunState::Running), 0);
        assert!(scheduler.cancel(&CueId::new("a")));
        assert!(!scheduler.cancel(&CueId::new("a")));
        assert!(!scheduler.cancel(&CueId::new("never")));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn reconcile_starts_stops_and_drops_orphans() {
        let mut scheduler = TimerScheduler::default();
        let cues = vec![
            timer("run", RunState::Running),
            timer("pause", RunState::Paused),
            Cue::new("clock", "utility_time_of_day"),
            Cue::new("msg", "message"),
        ];
        let first = scheduler.reconcile(&cues, 0);
        assert_eq!(first.started, [CueId::new("run"), CueId::new("clock")]);
        assert!(first.stopped.is_empty());
        assert!(!scheduler.is_ticking(&CueId::new("msg")));

        let cues = vec![timer("run", RunState::Reset)];
        let second = scheduler.reconcile(&cues, 1000);
        assert_eq!(second.orphaned, [CueId::new("clock")]);
        assert_eq!(second.stopped, [CueId::new("run")]);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn cue_that_stops_being_a_timer_stops_ticking() {
        let mut scheduler = TimerScheduler::default();
        scheduler.reconcile(&[timer("a", RunState::Running)], 0);
        assert!(scheduler.is_ticking(&CueId::new("a")));

        let retyped = Cue::new("a", "message").with_field("body", "hello");
        let outcome = scheduler.reconcile(&[retyped], 500);
        assert_eq!(outcome.stopped, [CueId::new("a")]);
        assert!(outcome.orphaned.is_empty());
        assert!(scheduler.is_empty());
        assert!(scheduler.take_due(5000).is_empty());
    }

    #[test]
    fn due_recurrences_advance_past_now() {
        let mut scheduler = TimerScheduler::default();
        scheduler.start(timer("a", RunState::Running), 0);
        scheduler.start(timer("b", RunState::Running), 400);

        assert!(scheduler.take_due(999).is_empty());

        let due = scheduler.take_due(1000);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, CueId::new("a"));
        assert_eq!(scheduler.next_deadline(), Some(1400));

        let due = scheduler.take_due(3500);
        assert_eq!(due.len(), 2);
        assert_eq!(scheduler.next_deadline(), Some(4000));
    }
}
