use crate::core::region::RunResult;
use crate::core::types::RunningMode;

/// Decide which comparison the inputs call for.
///
/// - A reference run selects `CompareToReference`, unless the assembly runs
///   come from different tools.
/// - Runs differing in both sample label and tool are `Unknown`.
/// - A single run, or runs of one tool on different samples, are `CompareSamples`.
/// - Runs sharing one sample label are `CompareTools`.
#[must_use]
pub fn determine_running_mode(reference: Option<&RunResult>, runs: &[RunResult]) -> RunningMode {
    let different_tools = runs
        .first()
        .is_some_and(|first| runs.iter().any(|r| r.tool_name != first.tool_name));
    let different_labels = runs
        .first()
        .is_some_and(|first| runs.iter().any(|r| r.display_label != first.display_label));

    if reference.is_some() {
        if different_tools {
            RunningMode::Unknown
        } else {
            RunningMode::CompareToReference
        }
    } else if different_labels && different_tools {
        RunningMode::Unknown
    } else if runs.len() == 1 || different_labels {
        RunningMode::CompareSamples
    } else {
        RunningMode::CompareTools
    }
}
