//! Batch mode: feed a key script through a session.

use std::time::Instant;

use tracing::debug;

use crate::input::parse_key_script;
use crate::session::Session;

/// Outcome of running a key script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptOutcome {
    /// Display text after the last key.
    pub display: String,
    /// Number of evaluations that failed along the way.
    pub failures: usize,
}

/// Run every key of `script` through `session`.
///
/// No time passes between keys, so a failing final evaluation leaves the
/// error text on the display.
pub fn run_script(session: &mut Session, script: &str) -> ScriptOutcome {
    let now = Instant::now();
    let mut failures = 0;

    for key in parse_key_script(script) {
        if let Err(err) = session.handle_key(key, now) {
            debug!(error = %err, "Script evaluation failed");
            failures += 1;
        }
    }

    ScriptOutcome {
        display: session.display_text().to_string(),
        failures,
    }
}
