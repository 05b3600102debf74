//! Tests for building and driving a TriggerSet from TOML definitions

use chrono::{Local, NaiveDateTime, TimeDelta};

use crate::context::HostContext;
use crate::trigger::{ActivationOutcome, ConfigurationError};
use trigger_types::DefinitionFile;

use super::{DefinitionError, TriggerSet};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const VAULT: &str = r#"
[[condition]]
id = "has_key"
type = "variable_compare"
variable = "keys"
op = "greater_or_equal"
value = 1.0

[[action]]
id = "click"
type = "log"
message = "click"

[[action]]
id = "open"
type = "set_variable"
variable = "open"
value = 1.0

[[action]]
id = "count"
type = "change_variable"
variable = "opened"
amount = 1.0

[[trigger]]
id = "vault"
description = "Opens the vault"
condition = "When the switch is pressed"
allow_retrigger = false
has_preconditions = true
preconditions = ["has_key"]

[[trigger.actions]]
delay_secs = 2.0
action = "open"

[[trigger.actions]]
action = "click"

[[trigger.actions]]
delay_secs = 2.0
action = "count"
"#;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse(text: &str) -> DefinitionFile {
    toml::from_str(text).unwrap()
}

fn vault_set() -> TriggerSet {
    TriggerSet::from_definitions(parse(VAULT), HostContext::new("vault_door")).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Building
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_builds_triggers_in_definition_order() {
    let text = format!("{VAULT}\n[[trigger]]\nid = \"second\"\n");
    let set = TriggerSet::from_definitions(parse(&text), HostContext::default()).unwrap();

    assert_eq!(set.ids().collect::<Vec<_>>(), ["vault", "second"]);
    assert_eq!(set.action_count(), 3);
    assert_eq!(set.condition_count(), 1);
}

#[test]
fn test_explanation_from_definitions() {
    let set = vault_set();

    assert_eq!(
        set.explain("vault").unwrap(),
        concat!(
            "Opens the vault\n",
            "----------------\n",
            "If keys >= 1 and When the switch is pressed:\n",
            "First, \n",
            "            logs \"click\"\n",
            "then, at 2 seconds, \n",
            "            sets variable open to 1\n",
            "            adds 1 to variable opened\n",
        )
    );
    assert!(set.explain("missing").is_none());
}

#[test]
fn test_unknown_precondition_rejected() {
    let text = "[[trigger]]\nid = \"t\"\npreconditions = [\"nope\"]\n";
    let err = TriggerSet::from_definitions(parse(text), HostContext::default()).err().unwrap();
    assert!(matches!(err, DefinitionError::InvalidDefinition { ref id, .. } if id == "t"));
}

#[test]
fn test_negative_delay_rejected() {
    let text = "[[trigger]]\nid = \"t\"\n[[trigger.actions]]\ndelay_secs = -1.0\n";
    let err = TriggerSet::from_definitions(parse(text), HostContext::default()).err().unwrap();
    assert!(err.to_string().contains("invalid delay"));
}

#[test]
fn test_subnanosecond_delay_stays_delayed() {
    let text = concat!(
        "[[action]]\nid = \"note\"\ntype = \"log\"\nmessage = \"m\"\n",
        "[[trigger]]\nid = \"t\"\n",
        "[[trigger.actions]]\ndelay_secs = 1e-10\naction = \"note\"\n",
    );
    let mut set = TriggerSet::from_definitions(parse(text), HostContext::default()).unwrap();
    assert!(!set.explain("t").unwrap().contains("First, "));

    let start = now();
    let report = set.activate("t", start).unwrap().report().cloned().unwrap();
    assert_eq!(report.executed, 0);
    assert_eq!(report.scheduled.len(), 1);
    assert!(set.context().journal().is_empty());

    assert_eq!(set.update(start), 0);
    assert_eq!(set.update(start + TimeDelta::milliseconds(1)), 1);
    assert_eq!(set.context().journal(), ["note"]);
}

#[test]
fn test_duplicate_ids_rejected() {
    let text = "[[trigger]]\nid = \"t\"\n[[trigger]]\nid = \"t\"\n";
    let err = TriggerSet::from_definitions(parse(text), HostContext::default()).err().unwrap();
    assert!(err.to_string().contains("duplicate trigger id"));
}

#[test]
fn test_unknown_action_becomes_null_slot() {
    let text = "[[trigger]]\nid = \"t\"\n[[trigger.actions]]\naction = \"ghost\"\n";
    let mut set = TriggerSet::from_definitions(parse(text), HostContext::default()).unwrap();

    assert!(set.explain("t").unwrap().contains("[NULL]"));

    let outcome = set.activate("t", now()).unwrap();
    assert_eq!(
        outcome.report().unwrap().defects,
        vec![ConfigurationError::MissingAction { index: 0 }]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Driving
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_vault_sequence() {
    let mut set = vault_set();
    let start = now();

    // no key yet
    assert_eq!(
        set.activate("vault", start),
        Some(ActivationOutcome::PreconditionsFailed)
    );

    set.context().set_variable("keys", 1.0);
    assert!(set.activate("vault", start).unwrap().is_dispatched());
    assert_eq!(set.context().journal(), vec!["click"]);
    assert_eq!(set.pending(), 2);
    assert_eq!(set.next_fire_time(), Some(start + TimeDelta::seconds(2)));

    assert_eq!(set.update(start + TimeDelta::seconds(1)), 0);
    assert_eq!(set.update(start + TimeDelta::seconds(2)), 2);
    assert_eq!(set.context().variable("open"), Some(1.0));
    assert_eq!(set.context().variable("opened"), Some(1.0));

    // one-shot
    assert_eq!(
        set.activate("vault", start + TimeDelta::seconds(3)),
        Some(ActivationOutcome::AlreadyFired)
    );
    assert!(set.activate("nonexistent", start).is_none());
}

#[test]
fn test_remove_drops_pending_actions() {
    let mut set = vault_set();
    let start = now();
    set.context().set_variable("keys", 1.0);
    set.activate("vault", start);
    assert_eq!(set.pending(), 2);

    let removed = set.remove("vault");
    assert!(removed.is_some());
    drop(removed);

    assert_eq!(set.pending(), 0);
    assert_eq!(set.update(start + TimeDelta::seconds(5)), 0);
    assert_eq!(set.context().variable("open"), None);
}

#[test]
fn test_removed_action_is_skipped_when_due() {
    let mut set = vault_set();
    let start = now();
    set.context().set_variable("keys", 1.0);
    set.activate("vault", start);

    assert!(set.remove_action("open"));
    assert_eq!(set.update(start + TimeDelta::seconds(2)), 1);
    assert_eq!(set.context().variable("open"), None);
    assert_eq!(set.context().variable("opened"), Some(1.0));
    assert!(set.explain("vault").unwrap().contains("[NULL]"));
}

#[test]
fn test_demo_definitions_build() {
    let defs = parse(include_str!("../../../demos/vault.toml"));
    let mut set = TriggerSet::from_definitions(defs, HostContext::new("demo")).unwrap();

    assert_eq!(set.ids().collect::<Vec<_>>(), ["vault", "pressure_plate"]);
    assert!(set.explain("pressure_plate").unwrap().contains("[NULL]"));

    set.context().set_variable("keys", 1.0);
    let outcome = set.activate("vault", now()).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.executed, 1);
    assert_eq!(report.scheduled.len(), 3);
    assert_eq!(report.skipped_disabled, 1);
}
