//! Example issues written on first access to an empty slot.

use crate::domain::{Issue, IssueId, IssuePriority, IssueStatus};
use chrono::{DateTime, Duration, Utc};

/// The three seed issues, one per status, stamped relative to `now`.
///
/// Creation times descend a day apart (`now`, `now - 1d`, `now - 2d`), so a
/// newest-first listing shows them in ID order.
#[must_use]
pub fn seed_issues(now: DateTime<Utc>) -> Vec<Issue> {
    vec![
        Issue {
            id: IssueId::new("1"),
            title: "Login page not responding".to_string(),
            description: "Users are unable to login when the server is under heavy load"
                .to_string(),
            status: IssueStatus::Open,
            priority: IssuePriority::High,
            created_at: now,
        },
        Issue {
            id: IssueId::new("2"),
            title: "Dashboard shows incorrect stats".to_string(),
            description:
                "User dashboard is showing last week's statistics instead of current data"
                    .to_string(),
            status: IssueStatus::InProgress,
            priority: IssuePriority::Medium,
            created_at: now - Duration::days(1),
        },
        Issue {
            id: IssueId::new("3"),
            title: "Button alignment issue on mobile".to_string(),
            description: "The submit button is misaligned on mobile devices with screen width less than 375px".to_string(),
            status: IssueStatus::Closed,
            priority: IssuePriority::Low,
            created_at: now - Duration::days(2),
        },
    ]
}
