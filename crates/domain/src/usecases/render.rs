//! Rendering use case - turns a match tally into the classifier's output line

use std::time::Duration;

use crate::model::MatchTally;

/// Printed when no category matched
pub const NO_MATCHES: &str = "0";

/// Render a tally as `"Tigres = 1; Papagaios = 1"`, or [`NO_MATCHES`]
pub fn render_tally(tally: &MatchTally) -> String {
    if tally.is_empty() {
        return NO_MATCHES.to_string();
    }

    tally
        .iter()
        .map(|(key, count)| format!("{} = {}", capitalize(key), count))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Upper-case the first character, leaving the rest unchanged
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Timings reported in verbose mode
#[derive(Debug, Clone, Copy)]
pub struct TimingReport {
    pub load: Duration,
    pub verify: Duration,
}

impl TimingReport {
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Hierarchy load time: {}ms", self.load.as_millis()),
            format!("Phrase verification time: {}ms", self.verify.as_millis()),
        ]
    }
}
