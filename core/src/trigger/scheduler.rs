//! Pending delayed actions
//!
//! Each trigger owns one `ActionScheduler`. Delayed actions become entries in
//! its table, keyed by a handle and stamped with an absolute fire time. The
//! host drives time by calling `take_due` from its update loop; dropping the
//! scheduler (with its trigger) drops every pending entry.

use chrono::NaiveDateTime;
use hashbrown::HashMap;

use crate::collaborators::ActionRef;

/// Handle to a scheduled action, unique within one scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
pub struct PendingAction {
    pub handle: TaskHandle,

    /// Game time at which the action runs
    pub fire_at: NaiveDateTime,

    /// Position of the action in the trigger's list (for diagnostics)
    pub index: usize,

    pub action: ActionRef,
}

#[derive(Debug, Default)]
pub struct ActionScheduler {
    next_handle: u64,
    pending: HashMap<TaskHandle, PendingAction>,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        fire_at: NaiveDateTime,
        index: usize,
        action: ActionRef,
    ) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(
            handle,
            PendingAction {
                handle,
                fire_at,
                index,
                action,
            },
        );
        handle
    }

    /// Remove and return every entry whose fire time is at or before `now`,
    /// earliest first. Equal fire times come out in scheduling order.
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<PendingAction> {
        let mut due: Vec<(NaiveDateTime, TaskHandle)> = self
            .pending
            .values()
            .filter(|p| p.fire_at <= now)
            .map(|p| (p.fire_at, p.handle))
            .collect();
        due.sort_unstable();

        due.into_iter()
            .filter_map(|(_, handle)| self.pending.remove(&handle))
            .collect()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn next_fire_time(&self) -> Option<NaiveDateTime> {
        self.pending.values().map(|p| p.fire_at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
