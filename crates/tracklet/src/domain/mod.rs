//! Domain types for issue tracking.
//!
//! This module contains the core domain types for the tracklet issue tracker:
//! the [`Issue`] record, its status and priority enums, and the payloads used
//! to create and patch issues.

mod filter;

pub use filter::{IssueFilter, SortOrder};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for an issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Create a new issue ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IssueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tracked unit of work.
///
/// Serialized with camelCase keys (`createdAt`) so the persisted blob keeps
/// the shape the tracker has always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier, assigned by the store
    pub id: IssueId,

    /// Issue title
    pub title: String,

    /// Issue description
    pub description: String,

    /// Current status
    pub status: IssueStatus,

    /// Priority level
    pub priority: IssuePriority,

    /// Creation timestamp, assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Issue {
    /// Merge the fields present in `update` into this issue.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, update: IssueUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
    }
}

/// Status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Issue is open and waiting to be worked on
    Open,

    /// Issue is currently being worked on
    #[serde(rename = "In Progress")]
    InProgress,

    /// Issue has been completed
    Closed,
}

impl IssueStatus {
    /// All statuses, in workflow order.
    pub const ALL: [IssueStatus; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssueStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                field: "status",
                value: s.to_string(),
                valid_values: "Open, In Progress, Closed",
            }),
        }
    }
}

/// Priority of an issue, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssuePriority {
    /// Can wait
    Low,

    /// Normal priority
    Medium,

    /// Needs attention first
    High,
}

impl IssuePriority {
    /// All priorities, highest first.
    pub const ALL: [IssuePriority; 3] = [Self::High, Self::Medium, Self::Low];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IssuePriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError {
                field: "priority",
                value: s.to_string(),
                valid_values: "Low, Medium, High",
            }),
        }
    }
}

/// A status or priority string that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
pub struct ParseEnumError {
    /// The field being parsed.
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
    /// Description of the accepted values.
    pub valid_values: &'static str,
}

/// Data for creating a new issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,

    /// Issue description
    pub description: String,

    /// Initial status
    pub status: IssueStatus,

    /// Priority level
    pub priority: IssuePriority,
}

impl NewIssue {
    /// Validate the new issue data.
    ///
    /// Title and description are required and may not be whitespace-only.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the title first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        Ok(())
    }
}

/// Data for updating an existing issue.
///
/// Every field is optional; absent fields keep their current value. There
/// is no `id` or `created_at` field, and unknown keys are
/// ignored when deserializing, so a JSON patch carrying either is harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUpdate {
    /// New title (if updating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description (if updating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status (if updating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,

    /// New priority (if updating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<IssuePriority>,
}

impl IssueUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }

    /// Validate the supplied fields.
    ///
    /// A title or description that is present must not be empty or
    /// whitespace-only.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the title first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle);
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }
}

/// A caller-supplied field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `title` missing or blank on create.
    #[error("Title is required")]
    TitleRequired,

    /// `description` missing or blank on create.
    #[error("Description is required")]
    DescriptionRequired,

    /// `title` supplied blank on update.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// `description` supplied blank on update.
    #[error("Description cannot be empty")]
    EmptyDescription,
}
