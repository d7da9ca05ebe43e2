//! Human readable renderings of an [`AggregationResult`] for embeds.

use rolecount_core::{AggregationResult, RoleId};

use crate::discord::Colors;
use crate::template::group_thousands;

pub fn role_mention(role: RoleId) -> String {
    format!("<@&{role}>")
}

/// Total, verified and unverified counts, one per line.
pub fn summary(result: &AggregationResult) -> String {
    format!(
        "**Members:** {}\n**Verified:** {} ({})\n**Unverified:** {} ({})",
        group_thousands(result.total_members),
        group_thousands(result.verified_members),
        result.verified_percentage(),
        group_thousands(result.unverified_members),
        result.unverified_percentage(),
    )
}

/// Per tracked role breakdown followed by the members no tracked role accounts for.
pub fn role_breakdown(result: &AggregationResult) -> String {
    let mut lines = Vec::with_capacity(result.per_role.len() + 3);

    if result.per_role.is_empty() {
        lines.push("No tracked roles are configured.".to_string());
    }

    for entry in &result.per_role {
        lines.push(format!(
            "{}: **{}** ({})",
            role_mention(entry.role),
            group_thousands(entry.count),
            entry.percentage
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Other roles: **{}** ({})",
        group_thousands(result.unaccounted_members),
        result.unaccounted_percentage()
    ));
    lines.push(format!(
        "Unverified: **{}** ({})",
        group_thousands(result.unverified_members),
        result.unverified_percentage()
    ));

    let skipped: Vec<String> = result.skipped_roles().map(|role| role.to_string()).collect();
    if !skipped.is_empty() {
        lines.push(format!("Skipped unknown roles: {}", skipped.join(", ")));
    }

    lines.join("\n")
}

/// Breakdowns that had to skip tracked roles are flagged with the warning colour.
pub fn breakdown_color(result: &AggregationResult) -> Colors {
    match result.skipped_roles().next() {
        Some(_) => Colors::Warning,
        None => Colors::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolecount_core::{Condition, Percentage, RoleCount};

    fn result() -> AggregationResult {
        AggregationResult {
            total_members: 2000,
            verified_members: 1500,
            unverified_members: 500,
            per_role: vec![RoleCount {
                role: RoleId(11),
                name: "Holder".to_string(),
                count: 1200,
                percentage: Percentage::of(1200, 2000),
            }],
            unaccounted_members: 300,
            conditions: vec![Condition::UnknownTrackedRole(RoleId(99))],
        }
    }

    #[test]
    fn summary_lists_totals_with_percentages() {
        assert_eq!(
            summary(&result()),
            "**Members:** 2,000\n**Verified:** 1,500 (75.00%)\n**Unverified:** 500 (25.00%)"
        );
    }

    #[test]
    fn breakdown_mentions_roles_and_skips() {
        let text = role_breakdown(&result());

        assert!(text.starts_with("<@&11>: **1,200** (60.00%)"));
        assert!(text.contains("Other roles: **300** (15.00%)"));
        assert!(text.contains("Unverified: **500** (25.00%)"));
        assert!(text.ends_with("Skipped unknown roles: 99"));
    }

    #[test]
    fn breakdown_without_tracked_roles() {
        let text = role_breakdown(&AggregationResult::default());

        assert!(text.starts_with("No tracked roles are configured."));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn breakdown_color_warns_about_skipped_roles() {
        assert_eq!(breakdown_color(&result()), Colors::Warning);
        assert_eq!(breakdown_color(&AggregationResult::default()), Colors::Info);
    }
}
