use crate::core::{Outcome, ResourceId};
use kube::runtime::controller::Action;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

/// Failure history older than this many maximum delays is dropped. Failing
/// parents are retried well within that window, so only parents that are no
/// longer reconciled (typically because they were deleted) age out.
const STALE_AFTER_MAX_DELAYS: u32 = 4;

/// Decides when a parent is reconciled again.
///
/// A converged parent is revisited after `resync` so that children deleted
/// out from under the controller are recreated even when no event fires. A
/// failed pass is retried with per-parent exponential backoff.
#[derive(Debug)]
pub struct Schedule {
    pub resync: Duration,
    pub backoff: Backoff,
}

/// Exponential backoff keyed by parent identity.
#[derive(Debug)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    failures: Mutex<HashMap<ResourceId, Failures>>,
}

#[derive(Copy, Clone, Debug)]
struct Failures {
    count: u32,
    last: Instant,
}

// === impl Schedule ===

impl Schedule {
    pub fn new(resync: Duration, backoff: Backoff) -> Self {
        Self { resync, backoff }
    }

    /// Returns the next action for a parent whose pass succeeded.
    pub fn succeeded(&self, id: &ResourceId, outcome: &Outcome) -> Action {
        self.backoff.succeeded(id);
        match outcome {
            Outcome::ParentMissing => Action::await_change(),
            Outcome::Converged { .. } => Action::requeue(self.resync),
        }
    }

    /// Returns the next action for a parent whose pass failed.
    pub fn failed(&self, id: &ResourceId) -> Action {
        Action::requeue(self.backoff.failed(id))
    }
}

// === impl Backoff ===

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Records a failed pass and returns how long to wait before the next.
    pub fn failed(&self, id: &ResourceId) -> Duration {
        self.failed_at(id, Instant::now())
    }

    /// Clears the failure history of a parent once a pass succeeds.
    pub fn succeeded(&self, id: &ResourceId) {
        self.failures.lock().remove(id);
    }

    /// The number of parents with a failure history.
    pub fn tracked(&self) -> usize {
        self.failures.lock().len()
    }

    fn failed_at(&self, id: &ResourceId, now: Instant) -> Duration {
        let stale_after = self.max.saturating_mul(STALE_AFTER_MAX_DELAYS);
        let mut failures = self.failures.lock();
        failures.retain(|_, f| now.saturating_duration_since(f.last) <= stale_after);

        let entry = failures.entry(id.clone()).or_insert(Failures {
            count: 0,
            last: now,
        });
        let delay = self.delay(entry.count);
        entry.count = entry.count.saturating_add(1);
        entry.last = now;
        delay
    }

    fn delay(&self, failures: u32) -> Duration {
        self.base
            .saturating_mul(2u32.saturating_pow(failures))
            .min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mk_schedule() -> Schedule {
        Schedule::new(
            Duration::from_secs(300),
            Backoff::new(Duration::from_millis(100), Duration::from_secs(1)),
        )
    }

    #[test]
    fn doubles_until_capped() {
        let backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1));
        let id = ResourceId::namespaced("default", "web");
        let delays = (0..6).map(|_| backoff.failed(&id)).collect::<Vec<_>>();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
                Duration::from_secs(1),
                Duration::from_secs(1),
            ]
        );
    }

    #[test]
    fn success_resets() {
        let backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1));
        let id = ResourceId::namespaced("default", "web");
        backoff.failed(&id);
        backoff.failed(&id);
        backoff.succeeded(&id);
        assert_eq!(backoff.tracked(), 0);
        assert_eq!(backoff.failed(&id), Duration::from_millis(100));
    }

    #[test]
    fn tracked_per_parent() {
        let backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1));
        let web = ResourceId::namespaced("default", "web");
        let api = ResourceId::namespaced("default", "api");
        backoff.failed(&web);
        backoff.failed(&web);
        assert_eq!(backoff.failed(&api), Duration::from_millis(100));
        assert_eq!(backoff.tracked(), 2);
    }

    #[test]
    fn saturates_after_many_failures() {
        let backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(300));
        let id = ResourceId::namespaced("default", "web");
        for _ in 0..100 {
            backoff.failed(&id);
        }
        assert_eq!(backoff.failed(&id), Duration::from_secs(300));
    }

    #[test]
    fn forgets_parents_that_stop_failing() {
        let backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1));
        let deleted = ResourceId::namespaced("default", "deleted");
        let live = ResourceId::namespaced("default", "live");
        let t0 = Instant::now();

        backoff.failed_at(&deleted, t0);
        backoff.failed_at(&live, t0);
        backoff.failed_at(&live, t0 + Duration::from_secs(3));
        assert_eq!(backoff.tracked(), 2);

        let delay = backoff.failed_at(&live, t0 + Duration::from_secs(5));
        assert_eq!(backoff.tracked(), 1);
        assert_eq!(delay, Duration::from_millis(400));
    }

    #[test]
    fn converged_parents_resync() {
        let schedule = mk_schedule();
        let id = ResourceId::namespaced("default", "web");
        assert_eq!(
            schedule.succeeded(&id, &Outcome::Converged { created: vec![] }),
            Action::requeue(Duration::from_secs(300))
        );
    }

    #[test]
    fn missing_parents_await_change() {
        let schedule = mk_schedule();
        let id = ResourceId::namespaced("default", "web");
        schedule.failed(&id);
        assert_eq!(
            schedule.succeeded(&id, &Outcome::ParentMissing),
            Action::await_change()
        );
        assert_eq!(schedule.backoff.tracked(), 0);
    }

    #[test]
    fn failures_back_off_until_success() {
        let schedule = mk_schedule();
        let id = ResourceId::namespaced("default", "web");
        assert_eq!(
            schedule.failed(&id),
            Action::requeue(Duration::from_millis(100))
        );
        assert_eq!(
            schedule.failed(&id),
            Action::requeue(Duration::from_millis(200))
        );
        schedule.succeeded(&id, &Outcome::Converged { created: vec![] });
        assert_eq!(
            schedule.failed(&id),
            Action::requeue(Duration::from_millis(100))
        );
    }
}
