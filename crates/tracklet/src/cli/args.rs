//! CLI argument structs for all commands.

use clap::Parser;

use super::types::{IssuePriorityArg, IssueStatusArg, SortOrderArg};
use super::validators::{validate_issue_id, validate_prefix};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Issue ID prefix (e.g., "iss" for "iss-a3f8")
    ///
    /// Must be 2-20 alphanumeric characters.
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Issue title
    #[arg(short, long)]
    pub title: String,

    /// Issue description
    #[arg(short = 'D', long)]
    pub description: String,

    /// Initial status
    #[arg(short, long, value_enum, default_value = "open")]
    pub status: IssueStatusArg,

    /// Priority level
    #[arg(short, long, value_enum, default_value = "medium")]
    pub priority: IssuePriorityArg,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Filter by status
    #[arg(short, long, value_enum)]
    pub status: Option<IssueStatusArg>,

    /// Filter by priority
    #[arg(short, long, value_enum)]
    pub priority: Option<IssuePriorityArg>,

    /// Case-insensitive text matched against title or description
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "newest")]
    pub sort: SortOrderArg,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Issue ID to show
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,
}

/// Arguments for the `update` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Issue ID to update
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<IssueStatusArg>,

    /// New priority
    #[arg(short, long, value_enum)]
    pub priority: Option<IssuePriorityArg>,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Issue ID to delete
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {}
