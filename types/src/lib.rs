//! Shared definition and configuration types for the trigger engine
//!
//! This crate contains serializable types shared between the engine
//! (trigger-core) and the interactive shell (trigger-cli). Nothing in here
//! knows how a trigger fires; it only describes what was authored.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Definition Files
// ─────────────────────────────────────────────────────────────────────────────

/// Layout of a single definitions TOML file.
///
/// ```toml
/// [[condition]]
/// id = "has_key"
/// type = "variable_compare"
/// variable = "keys"
/// op = "greater_or_equal"
/// value = 1.0
///
/// [[action]]
/// id = "open_door"
/// type = "log"
/// message = "the vault door opens"
///
/// [[trigger]]
/// id = "vault"
/// has_preconditions = true
/// preconditions = ["has_key"]
///
/// [[trigger.actions]]
/// delay_secs = 2.0
/// action = "open_door"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    #[serde(default, rename = "condition", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionDefinition>,

    #[serde(default, rename = "action", skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionDefinition>,

    #[serde(default, rename = "trigger", skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<TriggerDefinition>,
}

impl DefinitionFile {
    /// Append everything from `other`, keeping file order.
    pub fn merge(&mut self, other: DefinitionFile) {
        self.conditions.extend(other.conditions);
        self.actions.extend(other.actions);
        self.triggers.extend(other.triggers);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.actions.is_empty() && self.triggers.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conditions
// ─────────────────────────────────────────────────────────────────────────────

/// A named precondition that triggers can reference by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub id: String,

    #[serde(flatten)]
    pub kind: ConditionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ConditionKind {
    /// Compare a host variable against a constant
    VariableCompare {
        variable: String,
        op: CompareOp,
        value: f64,
    },

    /// Constant result
    Always {
        #[serde(default = "default_true")]
        value: bool,
    },
}

/// Comparison operator for variable conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    pub fn evaluate(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Equal => lhs == rhs,
            CompareOp::NotEqual => lhs != rhs,
            CompareOp::Less => lhs < rhs,
            CompareOp::LessOrEqual => lhs <= rhs,
            CompareOp::Greater => lhs > rhs,
            CompareOp::GreaterOrEqual => lhs >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::Less => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterOrEqual => ">=",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// A named action that triggers can schedule by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: String,

    /// Disabled actions are skipped at dispatch time
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(flatten)]
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ActionKind {
    /// Emit a message through the log
    Log { message: String },

    /// Overwrite a host variable
    SetVariable { variable: String, value: f64 },

    /// Add `amount` to a host variable (missing variables start at 0)
    ChangeVariable { variable: String, amount: f64 },
}

// ─────────────────────────────────────────────────────────────────────────────
// Triggers
// ─────────────────────────────────────────────────────────────────────────────

/// Definition of a trigger (loaded from config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Unique identifier for this trigger
    pub id: String,

    /// Free text shown above the generated explanation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Text describing what fires this trigger
    #[serde(default = "default_condition")]
    pub condition: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// If false, the trigger fires at most once
    #[serde(default = "default_true")]
    pub allow_retrigger: bool,

    /// If false, `preconditions` is ignored entirely
    #[serde(default)]
    pub has_preconditions: bool,

    /// Condition ids, all of which must hold
    #[serde(default)]
    pub preconditions: Vec<String>,

    #[serde(default)]
    pub actions: Vec<TimedActionDefinition>,
}

/// One scheduled action inside a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedActionDefinition {
    /// Seconds after activation (0 = immediately)
    #[serde(default)]
    pub delay_secs: f32,

    /// Action id; `None` leaves an empty slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Settings persisted for the interactive shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for `*.toml` definition files
    #[serde(default)]
    pub definitions_dir: String,

    /// How often the playback task advances game time
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Raise project crates to debug level
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            definitions_dir: String::new(),
            tick_interval_ms: default_tick_interval_ms(),
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn with_definitions_dir(dir: impl Into<String>) -> Self {
        Self {
            definitions_dir: dir.into(),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_condition() -> String {
    "When activated".to_string()
}

fn default_tick_interval_ms() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[condition]]
id = "has_key"
type = "variable_compare"
variable = "keys"
op = "greater_or_equal"
value = 1.0

[[action]]
id = "open_door"
type = "log"
message = "the vault door opens"

[[action]]
id = "alarm"
type = "set_variable"
enabled = false
variable = "alarm"
value = 1.0

[[trigger]]
id = "vault"
allow_retrigger = false
has_preconditions = true
preconditions = ["has_key"]

[[trigger.actions]]
delay_secs = 2.5
action = "open_door"

[[trigger.actions]]
"#;

    #[test]
    fn parses_definition_file() {
        let file: DefinitionFile = toml::from_str(SAMPLE).unwrap();

        assert_eq!(file.conditions.len(), 1);
        assert_eq!(
            file.conditions[0].kind,
            ConditionKind::VariableCompare {
                variable: "keys".to_string(),
                op: CompareOp::GreaterOrEqual,
                value: 1.0,
            }
        );

        assert_eq!(file.actions.len(), 2);
        assert!(file.actions[0].enabled);
        assert!(!file.actions[1].enabled);

        let trigger = &file.triggers[0];
        assert_eq!(trigger.condition, "When activated");
        assert!(trigger.enabled);
        assert!(!trigger.allow_retrigger);
        assert_eq!(trigger.actions[0].delay_secs, 2.5);
        assert_eq!(trigger.actions[0].action.as_deref(), Some("open_door"));
        assert_eq!(trigger.actions[1].delay_secs, 0.0);
        assert!(trigger.actions[1].action.is_none());
    }

    #[test]
    fn trigger_defaults_allow_retrigger() {
        let file: DefinitionFile = toml::from_str("[[trigger]]\nid = \"t\"\n").unwrap();
        assert!(file.triggers[0].allow_retrigger);
        assert!(!file.triggers[0].has_preconditions);
        assert!(file.triggers[0].actions.is_empty());
    }

    #[test]
    fn compare_ops() {
        assert!(CompareOp::Equal.evaluate(1.0, 1.0));
        assert!(CompareOp::NotEqual.evaluate(1.0, 2.0));
        assert!(CompareOp::Less.evaluate(1.0, 2.0));
        assert!(!CompareOp::Greater.evaluate(1.0, 2.0));
        assert!(CompareOp::GreaterOrEqual.evaluate(2.0, 2.0));
        assert_eq!(CompareOp::LessOrEqual.symbol(), "<=");
    }

    #[test]
    fn merge_keeps_order() {
        let mut a: DefinitionFile = toml::from_str("[[trigger]]\nid = \"a\"\n").unwrap();
        let b: DefinitionFile = toml::from_str("[[trigger]]\nid = \"b\"\n").unwrap();
        a.merge(b);
        let ids: Vec<_> = a.triggers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
