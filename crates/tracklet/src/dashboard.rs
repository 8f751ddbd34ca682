//! Dashboard queries: filtering, sorting and aggregate statistics.
//!
//! Everything here is a pure function over a slice of issues fetched from
//! the [service](crate::service); nothing touches the store.

use crate::domain::{Issue, IssueFilter, IssuePriority, IssueStatus, SortOrder};
use serde::Serialize;

/// Apply `filter` to `issues` and return the matches in `order`.
#[must_use]
pub fn filter_and_sort(issues: &[Issue], filter: &IssueFilter, order: SortOrder) -> Vec<Issue> {
    let mut matched: Vec<Issue> = issues
        .iter()
        .filter(|issue| filter.matches(issue))
        .cloned()
        .collect();
    sort_by_order(&mut matched, order);
    matched
}

/// Sort issues in place.
///
/// The issue ID is the final tiebreaker in every order, so output is
/// deterministic even when creation timestamps match exactly.
pub fn sort_by_order(issues: &mut [Issue], order: SortOrder) {
    match order {
        SortOrder::Newest => {
            issues.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        }
        SortOrder::Oldest => {
            issues.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        }
        SortOrder::Priority => {
            // High first, newest first within a priority
            issues.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(b.created_at.cmp(&a.created_at))
                    .then(a.id.cmp(&b.id))
            });
        }
    }
}

/// Aggregate counts over a set of issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of issues
    pub total: usize,
    /// Issues with status Open
    pub open: usize,
    /// Issues with status In Progress
    pub in_progress: usize,
    /// Issues with status Closed
    pub closed: usize,
    /// Issues with priority High
    pub high: usize,
    /// Issues with priority Medium
    pub medium: usize,
    /// Issues with priority Low
    pub low: usize,
}

impl DashboardStats {
    /// Count `issues` by status and by priority.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(
            Self {
                total: issues.len(),
                ..Self::default()
            },
            |mut stats, issue| {
                match issue.status {
                    IssueStatus::Open => stats.open += 1,
                    IssueStatus::InProgress => stats.in_progress += 1,
                    IssueStatus::Closed => stats.closed += 1,
                }
                match issue.priority {
                    IssuePriority::High => stats.high += 1,
                    IssuePriority::Medium => stats.medium += 1,
                    IssuePriority::Low => stats.low += 1,
                }
                stats
            },
        )
    }

    /// Count of issues with the given status.
    #[must_use]
    pub fn status_count(&self, status: IssueStatus) -> usize {
        match status {
            IssueStatus::Open => self.open,
            IssueStatus::InProgress => self.in_progress,
            IssueStatus::Closed => self.closed,
        }
    }

    /// Count of issues with the given priority.
    #[must_use]
    pub fn priority_count(&self, priority: IssuePriority) -> usize {
        match priority {
            IssuePriority::High => self.high,
            IssuePriority::Medium => self.medium,
            IssuePriority::Low => self.low,
        }
    }

    /// Percentage of issues that are closed, rounded half-up.
    ///
    /// Zero when there are no issues.
    #[must_use]
    pub fn completion_percentage(&self) -> u32 {
        self.share(self.closed)
    }

    /// `count` as a whole percentage of the total, rounded half-up.
    ///
    /// Zero when there are no issues. Counts above the total are clamped.
    #[must_use]
    pub fn share(&self, count: usize) -> u32 {
        percentage(count.min(self.total), self.total)
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // round(100 * part / total) with .5 rounding up, in integers
    let rounded = (200 * part + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}
