//! Output formatting for CLI commands.
//!
//! Every printer has a text form for people and a JSON form for scripts.
//! Text output honours `NO_COLOR` and `TRACKLET_MAX_WIDTH`.

use crate::dashboard::DashboardStats;
use crate::domain::{Issue, IssueFilter, IssuePriority, IssueStatus};
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;
const PROGRESS_BAR_WIDTH: usize = 20;

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Settings for text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for wrapped text
    pub max_width: usize,
    /// Whether to emit ANSI colors
    pub use_colors: bool,
}

impl OutputConfig {
    /// Read settings from the environment.
    ///
    /// - `TRACKLET_MAX_WIDTH`: maximum content width (default 80)
    /// - `NO_COLOR`: any value disables colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("TRACKLET_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "TRACKLET_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        Self {
            max_width,
            use_colors: env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Plain output of the given width, for tests and pipes.
    #[must_use]
    pub fn plain(max_width: usize) -> Self {
        Self {
            max_width,
            use_colors: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| usize::from(w.0))
}

// ============================================================================
// Color Helpers
// ============================================================================

/// Green text, or plain when `NO_COLOR` is set.
#[must_use]
pub fn success(text: &str) -> String {
    if OutputConfig::from_env().use_colors {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

fn colorize_status(status: IssueStatus, config: &OutputConfig) -> String {
    let text = status.label();
    if !config.use_colors {
        return text.to_string();
    }
    match status {
        IssueStatus::Open => text.white().to_string(),
        IssueStatus::InProgress => text.yellow().to_string(),
        IssueStatus::Closed => text.green().to_string(),
    }
}

fn colorize_priority(priority: IssuePriority, config: &OutputConfig) -> String {
    let text = priority.label();
    if !config.use_colors {
        return text.to_string();
    }
    match priority {
        IssuePriority::High => text.red().bold().to_string(),
        IssuePriority::Medium => text.yellow().to_string(),
        IssuePriority::Low => text.dimmed().to_string(),
    }
}

fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if config.use_colors {
        id.cyan().to_string()
    } else {
        id.to_string()
    }
}

fn dimmed(text: &str, config: &OutputConfig) -> String {
    if config.use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn bold(text: &str, config: &OutputConfig) -> String {
    if config.use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn status_icon(status: IssueStatus, config: &OutputConfig) -> String {
    let icon = match status {
        IssueStatus::Open => "○",
        IssueStatus::InProgress => "▶",
        IssueStatus::Closed => "✓",
    };
    if !config.use_colors {
        return icon.to_string();
    }
    match status {
        IssueStatus::Open => icon.white().to_string(),
        IssueStatus::InProgress => icon.yellow().to_string(),
        IssueStatus::Closed => icon.green().to_string(),
    }
}

// ============================================================================
// Public Printers
// ============================================================================

/// Print a simple message
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn print_message(msg: &str) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    writeln!(handle, "{msg}")
}

/// Print any serializable value as pretty JSON
///
/// # Errors
///
/// Fails if serialization or the write fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    write_json(&mut handle, value)
}

/// Print an issue as a single summary line (text) or an object (JSON)
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn print_issue(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => write_issue_line(&mut handle, issue, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

/// Print a filtered issue list
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn print_issues(issues: &[Issue], filter: &IssueFilter, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => {
            write_issues_text(&mut handle, issues, filter, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(&mut handle, &issues),
    }
}

/// Print every field of an issue
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn print_issue_details(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let width = terminal_width().min(config.max_width);
            write_issue_details_text(&mut handle, issue, width, &config)
        }
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

/// Print dashboard statistics
///
/// # Errors
///
/// Fails if stdout cannot be written.
pub fn print_stats(stats: &DashboardStats, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => write_stats_text(&mut handle, stats, &OutputConfig::from_env()),
        OutputMode::Json => write_json(
            &mut handle,
            &StatsJson {
                stats,
                completion_percentage: stats.completion_percentage(),
            },
        ),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsJson<'a> {
    #[serde(flatten)]
    stats: &'a DashboardStats,
    completion_percentage: u32,
}

// ============================================================================
// Writers
// ============================================================================

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_issue_line<W: Write>(w: &mut W, issue: &Issue, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{} {}  {}  {}",
        status_icon(issue.status, config),
        colorize_id(issue.id.as_str(), config),
        colorize_priority(issue.priority, config),
        issue.title
    )
}

fn write_issues_text<W: Write>(
    w: &mut W,
    issues: &[Issue],
    filter: &IssueFilter,
    config: &OutputConfig,
) -> io::Result<()> {
    let active = filter.active_filters();
    if !active.is_empty() {
        writeln!(w, "{} {}", dimmed("Filters:", config), active.join(", "))?;
    }

    if issues.is_empty() {
        writeln!(w, "No issues found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} issue(s):", issues.len())?;
    writeln!(w)?;
    for issue in issues {
        write_issue_line(w, issue, config)?;
    }
    Ok(())
}

fn write_issue_details_text<W: Write>(
    w: &mut W,
    issue: &Issue,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}: {}",
        status_icon(issue.status, config),
        colorize_id(issue.id.as_str(), config),
        issue.title
    )?;
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Status:", config),
        colorize_status(issue.status, config),
        dimmed("Priority:", config),
        colorize_priority(issue.priority, config)
    )?;
    writeln!(
        w,
        "{} {}",
        dimmed("Created:", config),
        issue.created_at.format("%Y-%m-%d %H:%M")
    )?;

    writeln!(w)?;
    writeln!(w, "{}:", bold("Description", config))?;
    for line in wrap_text(&issue.description, width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }
    Ok(())
}

fn write_stats_text<W: Write>(
    w: &mut W,
    stats: &DashboardStats,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Issue Statistics", config))?;
    writeln!(w, "================")?;
    writeln!(w)?;
    writeln!(w, "Total Issues:  {}", stats.total)?;
    writeln!(w)?;

    writeln!(w, "By Status:")?;
    for status in IssueStatus::ALL {
        let count = stats.status_count(status);
        writeln!(
            w,
            "  {:<13}{:>4}  ({}%)",
            format!("{}:", status.label()),
            count,
            stats.share(count)
        )?;
    }
    writeln!(w)?;

    writeln!(w, "By Priority:")?;
    for priority in IssuePriority::ALL {
        let count = stats.priority_count(priority);
        writeln!(
            w,
            "  {:<13}{:>4}  ({}%)",
            format!("{}:", priority.label()),
            count,
            stats.share(count)
        )?;
    }
    writeln!(w)?;

    let percent = stats.completion_percentage();
    writeln!(w, "Completion:    {} {percent}%", progress_bar(percent, config))
}

fn progress_bar(percent: u32, config: &OutputConfig) -> String {
    let filled = usize::try_from(percent.min(100)).unwrap_or(0) * PROGRESS_BAR_WIDTH / 100;
    let done = "#".repeat(filled);
    let rest = "-".repeat(PROGRESS_BAR_WIDTH - filled);
    if config.use_colors {
        format!("[{}{}]", done.green(), rest.dimmed())
    } else {
        format!("[{done}{rest}]")
    }
}

/// Wrap text to fit within a given width, preserving existing line breaks.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}
