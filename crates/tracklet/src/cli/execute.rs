//! Command execution logic.
//!
//! Every command except `init` goes through the [`IssueService`] held by the
//! [`App`]; nothing here touches the store directly.
//!
//! [`IssueService`]: crate::service::IssueService

use anyhow::{Result, bail};

use super::args::{CreateArgs, DeleteArgs, InitArgs, ListArgs, ShowArgs, StatsArgs, UpdateArgs};
use crate::app::App;
use crate::dashboard::{DashboardStats, filter_and_sort};
use crate::domain::{IssueFilter, IssueId, IssueUpdate, NewIssue};
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.prefix.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "tracklet_dir": result.tracklet_dir.display().to_string(),
            "config_file": result.config_file.display().to_string(),
            "data_dir": result.data_dir.display().to_string(),
            "prefix": result.prefix,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Initialized tracklet in {}", result.tracklet_dir.display());
            println!("  Config: {}", result.config_file.display());
            println!("  Data:   {}", result.data_dir.display());
            println!("  Issue prefix: {}", result.prefix);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let filter = IssueFilter {
        search: args.search.clone(),
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
    };

    let issues = app.service().get_all_issues().await?;
    let shown = filter_and_sort(&issues, &filter, args.sort.into());

    output::print_issues(&shown, &filter, output_mode)?;
    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let issue = app
        .service()
        .get_issue_by_id(&IssueId::new(&args.issue_id))
        .await?;

    output::print_issue_details(&issue, output_mode)?;
    Ok(())
}

/// Execute the create command
pub async fn execute_create(app: &App, args: &CreateArgs, output_mode: OutputMode) -> Result<()> {
    let fields = NewIssue {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.into(),
        priority: args.priority.into(),
    };

    let issue = app.service().create_issue(fields).await?;

    if output_mode == OutputMode::Text {
        output::print_message(&output::success(&format!("Created issue: {}", issue.id)))?;
    }
    output::print_issue(&issue, output_mode)?;
    Ok(())
}

/// Execute the update command
pub async fn execute_update(app: &App, args: &UpdateArgs, output_mode: OutputMode) -> Result<()> {
    let patch = IssueUpdate {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
    };

    if patch.is_empty() {
        bail!("No fields to update. Use --title, --description, --status or --priority.");
    }

    let issue = app
        .service()
        .update_issue(&IssueId::new(&args.issue_id), patch)
        .await?;

    if output_mode == OutputMode::Text {
        output::print_message(&output::success(&format!("Updated issue: {}", issue.id)))?;
    }
    output::print_issue(&issue, output_mode)?;
    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(app: &App, args: &DeleteArgs, output_mode: OutputMode) -> Result<()> {
    let id = IssueId::new(&args.issue_id);
    app.service().delete_issue(&id).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({ "deleted": id }))?,
        OutputMode::Text => {
            output::print_message(&output::success(&format!("Deleted issue: {id}")))?;
        }
    }
    Ok(())
}

/// Execute the stats command
pub async fn execute_stats(app: &App, _args: &StatsArgs, output_mode: OutputMode) -> Result<()> {
    let issues = app.service().get_all_issues().await?;
    let stats = DashboardStats::from_issues(&issues);

    output::print_stats(&stats, output_mode)?;
    Ok(())
}
