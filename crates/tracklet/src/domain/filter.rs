//! Dashboard query types: filters and sort orders.

use super::{Issue, IssuePriority, IssueStatus};
use serde::{Deserialize, Serialize};

/// Filter for querying issues.
///
/// All criteria are combined with AND. A `None` criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFilter {
    /// Case-insensitive substring matched against title or description
    pub search: Option<String>,

    /// Filter by status
    pub status: Option<IssueStatus>,

    /// Filter by priority
    pub priority: Option<IssuePriority>,
}

impl IssueFilter {
    /// Check whether `issue` satisfies every criterion of this filter.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                issue.title.to_lowercase().contains(&query)
                    || issue.description.to_lowercase().contains(&query)
            }
        };

        matches_search
            && self.status.is_none_or(|s| issue.status == s)
            && self.priority.is_none_or(|p| issue.priority == p)
    }

    /// Labels for the status and priority criteria currently applied,
    /// e.g. `["Status: Open", "Priority: High"]`.
    ///
    /// The search text is not included.
    #[must_use]
    pub fn active_filters(&self) -> Vec<String> {
        let mut active = Vec::new();
        if let Some(status) = self.status {
            active.push(format!("Status: {status}"));
        }
        if let Some(priority) = self.priority {
            active.push(format!("Priority: {priority}"));
        }
        active
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty)
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Order in which dashboard results are listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently created first
    #[default]
    Newest,

    /// Oldest first
    Oldest,

    /// High priority first
    Priority,
}
