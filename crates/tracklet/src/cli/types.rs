//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::{IssuePriority, IssueStatus, SortOrder};

/// Issue status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatusArg {
    /// Not started
    Open,
    /// Currently being worked on
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    /// Completed
    Closed,
}

impl From<IssueStatusArg> for IssueStatus {
    fn from(arg: IssueStatusArg) -> Self {
        match arg {
            IssueStatusArg::Open => IssueStatus::Open,
            IssueStatusArg::InProgress => IssueStatus::InProgress,
            IssueStatusArg::Closed => IssueStatus::Closed,
        }
    }
}

/// Issue priority for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuePriorityArg {
    /// Can wait
    Low,
    /// Normal
    Medium,
    /// Urgent
    High,
}

impl From<IssuePriorityArg> for IssuePriority {
    fn from(arg: IssuePriorityArg) -> Self {
        match arg {
            IssuePriorityArg::Low => IssuePriority::Low,
            IssuePriorityArg::Medium => IssuePriority::Medium,
            IssuePriorityArg::High => IssuePriority::High,
        }
    }
}

/// Sort order for the list command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrderArg {
    /// Creation date, newest first
    #[default]
    Newest,
    /// Creation date, oldest first
    Oldest,
    /// High priority first
    Priority,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Newest => SortOrder::Newest,
            SortOrderArg::Oldest => SortOrder::Oldest,
            SortOrderArg::Priority => SortOrder::Priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(IssueStatus::from(IssueStatusArg::InProgress), IssueStatus::InProgress);
        assert_eq!(IssueStatus::from(IssueStatusArg::Closed), IssueStatus::Closed);
    }

    #[test]
    fn test_priority_conversion() {
        assert_eq!(IssuePriority::from(IssuePriorityArg::High), IssuePriority::High);
        assert_eq!(IssuePriority::from(IssuePriorityArg::Low), IssuePriority::Low);
    }

    #[test]
    fn test_sort_default_is_newest() {
        assert_eq!(SortOrder::from(SortOrderArg::default()), SortOrder::Newest);
    }
}
