//! Trigger activation and dispatch
//!
//! # Lifecycle
//!
//! 1. `activate` passes the gate (enabled, retrigger policy, preconditions)
//! 2. Immediate actions run in list order before `activate` returns
//! 3. Delayed actions are scheduled at `activation time + delay`
//! 4. The trigger is marked `Fired`; it never goes back to `Idle`
//! 5. The host calls `update` every frame to run actions that came due

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, warn};

use super::config::TriggerConfig;
use super::error::ConfigurationError;
use super::explain::build_explanation;
use super::scheduler::{ActionScheduler, TaskHandle};
use crate::context::HostContext;

/// Whether a trigger has dispatched at least once.
///
/// There is no transition back to `Idle`. A one-shot trigger is re-armed by
/// building a new engine from its config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FireState {
    #[default]
    Idle,
    Fired,
}

/// Result of one `activate` call.
///
/// Only `Dispatched` means anything happened; the others are silent no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    Disabled,
    AlreadyFired,
    PreconditionsFailed,
    Dispatched(DispatchReport),
}

impl ActivationOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, ActivationOutcome::Dispatched(_))
    }

    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            ActivationOutcome::Dispatched(report) => Some(report),
            _ => None,
        }
    }
}

/// What one dispatch pass did with each configured action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Actions executed synchronously (delay 0)
    pub executed: usize,
    pub scheduled: Vec<TaskHandle>,
    pub skipped_disabled: usize,
    pub defects: Vec<ConfigurationError>,
}

#[derive(Debug)]
pub struct TriggerEngine {
    id: String,
    config: TriggerConfig,
    state: FireState,
    scheduler: ActionScheduler,
}

impl TriggerEngine {
    pub fn new(id: impl Into<String>, config: TriggerConfig) -> Self {
        Self {
            id: id.into(),
            config,
            state: FireState::Idle,
            scheduler: ActionScheduler::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    pub fn state(&self) -> FireState {
        self.state
    }

    pub fn has_fired(&self) -> bool {
        self.state == FireState::Fired
    }

    // ─── Activation Gate ────────────────────────────────────────────────────

    pub fn can_activate(&self, ctx: &HostContext) -> bool {
        self.gate(ctx).is_none()
    }

    /// The outcome that blocks activation, if any
    fn gate(&self, ctx: &HostContext) -> Option<ActivationOutcome> {
        if !self.config.enabled {
            return Some(ActivationOutcome::Disabled);
        }
        if !self.config.allow_retrigger && self.state == FireState::Fired {
            return Some(ActivationOutcome::AlreadyFired);
        }
        if !self.evaluate_preconditions(ctx) {
            return Some(ActivationOutcome::PreconditionsFailed);
        }
        None
    }

    /// AND over all preconditions; vacuously true when checking is off or
    /// the list is empty. Every precondition is evaluated.
    pub fn evaluate_preconditions(&self, ctx: &HostContext) -> bool {
        if !self.config.has_preconditions {
            return true;
        }
        self.config
            .preconditions
            .iter()
            .fold(true, |all, condition| condition.evaluate(ctx) && all)
    }

    // ─── Action Scheduler ───────────────────────────────────────────────────

    /// Activate the trigger at game time `now`.
    pub fn activate(&mut self, now: NaiveDateTime, ctx: &HostContext) -> ActivationOutcome {
        if let Some(blocked) = self.gate(ctx) {
            debug!(trigger = %self.id, outcome = ?blocked, "activation gated");
            return blocked;
        }

        let mut report = DispatchReport::default();

        for (index, timed) in self.config.actions.iter().enumerate() {
            let action = match timed.action.resolve(index) {
                Ok(action) => action,
                Err(defect) => {
                    warn!(trigger = %self.id, error = %defect, "skipping misconfigured action");
                    report.defects.push(defect);
                    continue;
                }
            };

            if !action.is_enabled() {
                report.skipped_disabled += 1;
                continue;
            }

            if timed.is_immediate() {
                action.execute(ctx);
                report.executed += 1;
                continue;
            }

            let fire_at = TimeDelta::from_std(timed.delay)
                .ok()
                .and_then(|delay| now.checked_add_signed(delay));
            match fire_at {
                Some(fire_at) => {
                    let handle = self.scheduler.schedule(fire_at, index, timed.action.clone());
                    debug!(
                        trigger = %self.id,
                        index,
                        delay_secs = timed.delay.as_secs_f32(),
                        "action scheduled"
                    );
                    report.scheduled.push(handle);
                }
                None => {
                    let defect = ConfigurationError::DelayOutOfRange { index };
                    warn!(trigger = %self.id, error = %defect, "skipping misconfigured action");
                    report.defects.push(defect);
                }
            }
        }

        self.state = FireState::Fired;
        debug!(
            trigger = %self.id,
            executed = report.executed,
            scheduled = report.scheduled.len(),
            "trigger dispatched"
        );
        ActivationOutcome::Dispatched(report)
    }

    /// Run every delayed action due at or before `now`. Returns how many ran.
    pub fn update(&mut self, now: NaiveDateTime, ctx: &HostContext) -> usize {
        let mut ran = 0;
        for pending in self.scheduler.take_due(now) {
            match pending.action.resolve(pending.index) {
                Ok(action) => {
                    action.execute(ctx);
                    ran += 1;
                }
                Err(defect) => {
                    warn!(trigger = %self.id, error = %defect, "dropping delayed action");
                }
            }
        }
        ran
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.scheduler.is_pending(handle)
    }

    /// Number of delayed actions still waiting
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_fire_time(&self) -> Option<NaiveDateTime> {
        self.scheduler.next_fire_time()
    }

    // ─── Explanation ────────────────────────────────────────────────────────

    pub fn explain(&self, ctx: &HostContext) -> String {
        build_explanation(&self.config, ctx)
    }
}
