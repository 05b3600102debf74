//! Trigger set built from definitions
//!
//! The set owns every built action and condition. Triggers only hold weak
//! references to their actions, so removing an action from the set is
//! enough to turn a trigger's slot into a missing reference.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use hashbrown::{HashMap, HashSet};
use trigger_types::{DefinitionFile, TriggerDefinition};

use super::DefinitionError;
use crate::builtin::{build_action, build_condition};
use crate::collaborators::{ActionRef, Actionable, Precondition};
use crate::context::HostContext;
use crate::trigger::{ActivationOutcome, TimedAction, TriggerConfig, TriggerEngine};

pub struct TriggerSet {
    context: HostContext,
    actions: HashMap<String, Arc<dyn Actionable>>,
    conditions: HashMap<String, Arc<dyn Precondition>>,
    /// Definition order is kept for listing and update order
    triggers: Vec<TriggerEngine>,
}

impl TriggerSet {
    pub fn from_definitions(
        defs: DefinitionFile,
        context: HostContext,
    ) -> Result<Self, DefinitionError> {
        let mut conditions: HashMap<String, Arc<dyn Precondition>> = HashMap::new();
        for def in &defs.conditions {
            if conditions
                .insert(def.id.clone(), build_condition(def))
                .is_some()
            {
                return Err(duplicate(&def.id, "condition"));
            }
        }

        let mut actions: HashMap<String, Arc<dyn Actionable>> = HashMap::new();
        for def in &defs.actions {
            if actions.insert(def.id.clone(), build_action(def)).is_some() {
                return Err(duplicate(&def.id, "action"));
            }
        }

        let mut seen = HashSet::new();
        let mut triggers = Vec::with_capacity(defs.triggers.len());
        for def in &defs.triggers {
            if !seen.insert(def.id.as_str()) {
                return Err(duplicate(&def.id, "trigger"));
            }
            let config = build_config(def, &conditions, &actions)?;
            triggers.push(TriggerEngine::new(def.id.clone(), config));
        }

        tracing::debug!(
            host = context.name(),
            triggers = triggers.len(),
            actions = actions.len(),
            conditions = conditions.len(),
            "trigger set built"
        );

        Ok(Self {
            context,
            actions,
            conditions,
            triggers,
        })
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(TriggerEngine::id)
    }

    pub fn triggers(&self) -> &[TriggerEngine] {
        &self.triggers
    }

    pub fn get(&self, id: &str) -> Option<&TriggerEngine> {
        self.triggers.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Activate a trigger by id. `None` if no such trigger exists.
    pub fn activate(&mut self, id: &str, now: NaiveDateTime) -> Option<ActivationOutcome> {
        let ctx = &self.context;
        self.triggers
            .iter_mut()
            .find(|t| t.id() == id)
            .map(|trigger| trigger.activate(now, ctx))
    }

    /// Run due delayed actions on every trigger. Returns how many ran.
    pub fn update(&mut self, now: NaiveDateTime) -> usize {
        let ctx = &self.context;
        self.triggers
            .iter_mut()
            .map(|trigger| trigger.update(now, ctx))
            .sum()
    }

    pub fn explain(&self, id: &str) -> Option<String> {
        self.get(id).map(|t| t.explain(&self.context))
    }

    /// Remove a trigger; its pending delayed actions go with it
    pub fn remove(&mut self, id: &str) -> Option<TriggerEngine> {
        let index = self.triggers.iter().position(|t| t.id() == id)?;
        Some(self.triggers.remove(index))
    }

    /// Drop an action. Triggers referring to it will skip the slot.
    pub fn remove_action(&mut self, id: &str) -> bool {
        self.actions.remove(id).is_some()
    }

    pub fn pending(&self) -> usize {
        self.triggers.iter().map(TriggerEngine::pending).sum()
    }

    pub fn next_fire_time(&self) -> Option<NaiveDateTime> {
        self.triggers
            .iter()
            .filter_map(TriggerEngine::next_fire_time)
            .min()
    }
}

fn build_config(
    def: &TriggerDefinition,
    conditions: &HashMap<String, Arc<dyn Precondition>>,
    actions: &HashMap<String, Arc<dyn Actionable>>,
) -> Result<TriggerConfig, DefinitionError> {
    let preconditions = def
        .preconditions
        .iter()
        .map(|cond_id| {
            conditions
                .get(cond_id)
                .cloned()
                .ok_or_else(|| DefinitionError::InvalidDefinition {
                    id: def.id.clone(),
                    reason: format!("unknown precondition '{cond_id}'"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut timed = Vec::with_capacity(def.actions.len());
    for (index, slot) in def.actions.iter().enumerate() {
        let delay = Duration::try_from_secs_f32(slot.delay_secs).map_err(|e| {
            DefinitionError::InvalidDefinition {
                id: def.id.clone(),
                reason: format!("action slot {index} has invalid delay {}: {e}", slot.delay_secs),
            }
        })?;
        // a positive delay must stay on the timer even when it rounds below 1ns
        let delay = if delay.is_zero() && slot.delay_secs > 0.0 {
            Duration::from_nanos(1)
        } else {
            delay
        };

        let action = match slot.action.as_deref() {
            None => ActionRef::null(),
            Some(action_id) => match actions.get(action_id) {
                Some(action) => ActionRef::from_dyn(action),
                None => {
                    tracing::warn!(
                        trigger = %def.id,
                        action = action_id,
                        index,
                        "unknown action, slot left empty"
                    );
                    ActionRef::null()
                }
            },
        };

        timed.push(TimedAction::new(delay, action));
    }

    Ok(TriggerConfig {
        description: def.description.clone(),
        condition: def.condition.clone(),
        enabled: def.enabled,
        allow_retrigger: def.allow_retrigger,
        has_preconditions: def.has_preconditions,
        preconditions,
        actions: timed,
    })
}

fn duplicate(id: &str, kind: &str) -> DefinitionError {
    DefinitionError::InvalidDefinition {
        id: id.to_string(),
        reason: format!("duplicate {kind} id"),
    }
}
