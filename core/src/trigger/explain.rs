//! Human-readable rendering of a trigger configuration
//!
//! Output depends only on the config (and the descriptions its collaborators
//! return), never on whether the trigger has fired or what is pending.
//!
//! ```text
//! Opens the vault
//! ----------------
//! If keys >= 1 and When activated:
//! First,
//!             logs "click"
//! then, at 2 seconds,
//!             sets variable open to 1
//!             adds 1 to variable opened_count
//! ```

use std::time::Duration;

use super::config::{TimedAction, TriggerConfig};
use crate::context::HostContext;

const SEPARATOR: &str = "\n----------------\n";

/// Indent under a time header; also used alone for later actions at the same time
const TIME_INDENT: &str = "          ";

const ACTION_INDENT: &str = "  ";

pub const NULL_ACTION: &str = "[NULL]";

pub fn build_explanation(config: &TriggerConfig, ctx: &HostContext) -> String {
    let mut out = String::new();

    if !config.description.is_empty() {
        out.push_str(&config.description);
        out.push_str(SEPARATOR);
    }

    if config.has_preconditions && !config.preconditions.is_empty() {
        out.push_str("If ");
        for condition in &config.preconditions {
            out.push_str(&condition.describe(ctx));
            out.push_str(" and ");
        }
    }

    out.push_str(&config.condition);
    out.push_str(":\n");

    // sort_by_key is stable: equal delays keep list order
    let mut sorted: Vec<&TimedAction> = config.actions.iter().collect();
    sorted.sort_by_key(|timed| timed.delay);

    let line_break = format!("\n{TIME_INDENT}");
    let mut last_delay: Option<Duration> = None;

    for (position, timed) in sorted.iter().enumerate() {
        if last_delay != Some(timed.delay) {
            out.push_str(&time_header(position, timed.delay));
        }
        out.push_str(TIME_INDENT);

        match timed.action.upgrade() {
            Some(action) => {
                let desc = action.describe(ACTION_INDENT, ctx);
                out.push_str(&desc.replace('\n', &line_break));
            }
            None => out.push_str(NULL_ACTION),
        }
        out.push('\n');

        last_delay = Some(timed.delay);
    }

    out
}

fn time_header(position: usize, delay: Duration) -> String {
    if delay.is_zero() {
        "First, \n".to_string()
    } else if position == 0 {
        format!("At {} seconds, \n", format_secs(delay))
    } else {
        format!("then, at {} seconds, \n", format_secs(delay))
    }
}

/// Shortest float form: 1 → "1", 2.5 → "2.5"
fn format_secs(delay: Duration) -> String {
    delay.as_secs_f32().to_string()
}
