pub mod config;
pub mod coordinate;
pub mod date;
pub mod interpret;

use colored::*;
use quadrat_core::IssueSet;

/// Issue codes as a comma separated list, or a dimmed "none"
pub fn format_issues(issues: &IssueSet) -> String {
    if issues.is_empty() {
        return "none".dimmed().to_string();
    }
    issues
        .iter()
        .map(|i| i.as_str().yellow().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
