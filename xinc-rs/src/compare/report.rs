//! Human-readable rendering of comparison results.

use crate::constants::NO_DIFF_MESSAGE;

use super::Comparison;

/// Renders a result the way the command-line tool prints it.
pub fn render(result: &Comparison) -> String {
    match result {
        Comparison::NoDiff => NO_DIFF_MESSAGE.to_string(),
        Comparison::Diff(difference) => {
            format!("Difference at {}: {}", difference.path, difference.kind)
        }
    }
}
