//! Deferred steps
//!
//! Sequencing that would otherwise hang off timers is queued here with a due
//! time in simulated milliseconds. Every entry carries the epoch it was
//! scheduled in; bumping the epoch (teardown, restart, game over) cancels all
//! older entries. A level transition cancels only level-scoped steps; the
//! session's pickup gate keeps its due time.

use chase_gamestate::LevelId;

/// Why a level is being spawned; selects the follow-up delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnContext {
    Start,
    Transition,
    Restart,
}

/// A deferred piece of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredStep {
    SpawnLevel { level: LevelId, context: SpawnContext },
    SpawnEnemies { level: LevelId },
    SpawnCollectible { level: LevelId },
    EnablePickup,
}

impl DeferredStep {
    /// Belongs to the session rather than to one level
    pub fn is_session_scoped(&self) -> bool {
        matches!(self, DeferredStep::EnablePickup)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    due_at: u64,
    epoch: u64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    step: DeferredStep,
}

/// Time-ordered queue of deferred steps
#[derive(Debug, Default)]
pub struct StepScheduler {
    now_ms: u64,
    epoch: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Run `step` `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, step: DeferredStep) {
        log::trace!("Scheduled {:?} in {} ms", step, delay_ms);
        self.entries.push(Entry {
            due_at: self.now_ms + delay_ms,
            epoch: self.epoch,
            seq: self.next_seq,
            step,
        });
        self.next_seq += 1;
    }

    /// Advance the clock
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;
    }

    /// Remove and return every due step of the current epoch, in due order
    pub fn take_due(&mut self) -> Vec<DeferredStep> {
        let now = self.now_ms;
        let epoch = self.epoch;
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.due_at <= now);
        self.entries = pending;

        due.retain(|e| {
            if e.epoch != epoch {
                log::debug!("Dropping stale {:?} from epoch {}", e.step, e.epoch);
            }
            e.epoch == epoch
        });
        due.sort_by_key(|e| (e.due_at, e.seq));
        due.into_iter().map(|e| e.step).collect()
    }

    /// Cancel everything scheduled so far; returns how many entries were dropped
    pub fn cancel_all(&mut self) -> usize {
        self.epoch += 1;
        let dropped = self.entries.len();
        for entry in self.entries.drain(..) {
            log::debug!("Cancelled {:?}", entry.step);
        }
        dropped
    }

    /// Cancel level-scoped steps; session-scoped ones move to the new epoch
    /// with their due time unchanged. Returns how many entries were dropped.
    pub fn cancel_level_steps(&mut self) -> usize {
        self.epoch += 1;
        let epoch = self.epoch;
        let before = self.entries.len();
        self.entries.retain_mut(|entry| {
            if entry.step.is_session_scoped() {
                entry.epoch = epoch;
                true
            } else {
                log::debug!("Cancelled {:?}", entry.step);
                false
            }
        });
        before - self.entries.len()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether a matching step is still queued
    pub fn is_pending(&self, step: &DeferredStep) -> bool {
        self.entries.iter().any(|e| e.epoch == self.epoch && e.step == *step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_order() {
        let mut scheduler = StepScheduler::new();
        scheduler.schedule(200, DeferredStep::SpawnEnemies { level: 1 });
        scheduler.schedule(100, DeferredStep::SpawnCollectible { level: 1 });
        scheduler.schedule(100, DeferredStep::EnablePickup);

        scheduler.advance(50);
        assert!(scheduler.take_due().is_empty());

        scheduler.advance(200);
        assert_eq!(
            scheduler.take_due(),
            vec![
                DeferredStep::SpawnCollectible { level: 1 },
                DeferredStep::EnablePickup,
                DeferredStep::SpawnEnemies { level: 1 },
            ]
        );
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_cancel_drops_old_epoch() {
        let mut scheduler = StepScheduler::new();
        scheduler.schedule(500, DeferredStep::SpawnCollectible { level: 1 });
        assert!(scheduler.is_pending(&DeferredStep::SpawnCollectible { level: 1 }));

        assert_eq!(scheduler.cancel_all(), 1);
        scheduler.schedule(100, DeferredStep::SpawnCollectible { level: 2 });
        scheduler.advance(1000);
        assert_eq!(scheduler.take_due(), vec![DeferredStep::SpawnCollectible { level: 2 }]);
        assert_eq!(scheduler.epoch(), 1);
    }

    #[test]
    fn test_level_cancel_keeps_pickup_gate() {
        let mut scheduler = StepScheduler::new();
        scheduler.schedule(2000, DeferredStep::EnablePickup);
        scheduler.schedule(1000, DeferredStep::SpawnEnemies { level: 1 });
        scheduler.advance(500);

        assert_eq!(scheduler.cancel_level_steps(), 1);
        assert!(scheduler.is_pending(&DeferredStep::EnablePickup));

        scheduler.advance(1499);
        assert!(scheduler.take_due().is_empty(), "due time is unchanged");
        scheduler.advance(1);
        assert_eq!(scheduler.take_due(), vec![DeferredStep::EnablePickup]);
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut scheduler = StepScheduler::new();
        scheduler.schedule(0, DeferredStep::EnablePickup);
        assert_eq!(scheduler.take_due(), vec![DeferredStep::EnablePickup]);
    }
}
