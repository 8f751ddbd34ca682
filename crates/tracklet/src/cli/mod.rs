//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize tracklet in the current directory
//! - `list`: List issues with optional filters and sort order
//! - `show`: Show issue details
//! - `create`: Create a new issue
//! - `update`: Update fields of an existing issue
//! - `delete`: Delete an issue
//! - `stats`: Show dashboard statistics
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! tracklet create --title "Fix login" --description "Times out" --priority high
//! tracklet list --status open --sort priority
//! tracklet update iss-a3f8 --status in_progress
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CreateArgs, DeleteArgs, InitArgs, ListArgs, ShowArgs, StatsArgs, UpdateArgs};
pub use types::{IssuePriorityArg, IssueStatusArg, SortOrderArg};
pub use validators::{validate_issue_id, validate_prefix};

/// Tracklet - a small issue tracker
///
/// Issues live in `.tracklet/data/` as a single JSON collection.
#[derive(Parser, Debug)]
#[command(name = "tracklet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize tracklet in the current directory
    ///
    /// Creates `.tracklet/` with a configuration file and a data directory.
    Init(InitArgs),

    /// List issues with optional filters
    List(ListArgs),

    /// Show detailed information about an issue
    Show(ShowArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// Update an existing issue
    ///
    /// Only provided fields change; the others keep their values.
    Update(UpdateArgs),

    /// Delete an issue permanently
    Delete(DeleteArgs),

    /// Show issue counts and completion
    Stats(StatsArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any error from workspace discovery, configuration, or the
    /// issue service.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Tracklet issue tracker");
            println!("Use --help for more information");
            return Ok(());
        };

        if let Commands::Init(args) = command {
            return execute::execute_init(args, output_mode).await;
        }

        let app = App::from_directory(&std::env::current_dir()?).await?;
        match command {
            Commands::Init(_) => Ok(()),
            Commands::List(args) => execute::execute_list(&app, args, output_mode).await,
            Commands::Show(args) => execute::execute_show(&app, args, output_mode).await,
            Commands::Create(args) => execute::execute_create(&app, args, output_mode).await,
            Commands::Update(args) => execute::execute_update(&app, args, output_mode).await,
            Commands::Delete(args) => execute::execute_delete(&app, args, output_mode).await,
            Commands::Stats(args) => execute::execute_stats(&app, args, output_mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["tracklet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["tracklet", "list", "--json"]).unwrap();
        assert!(cli.json);

        let cli = Cli::try_parse_from(["tracklet", "--json", "stats"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Stats(_))));
    }

    #[test]
    fn test_parse_init_default() {
        let cli = Cli::try_parse_from(["tracklet", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.prefix.is_none());
                assert!(!args.quiet);
            }
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_with_prefix_and_quiet() {
        let cli = Cli::try_parse_from(["tracklet", "init", "--prefix", "proj", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.prefix.as_deref(), Some("proj"));
                assert!(args.quiet);
            }
            other => panic!("Expected Init, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_invalid_prefix() {
        assert!(Cli::try_parse_from(["tracklet", "init", "--prefix", "a"]).is_err());
    }

    #[test]
    fn test_parse_list_default() {
        let cli = Cli::try_parse_from(["tracklet", "list"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert!(args.status.is_none());
                assert!(args.priority.is_none());
                assert!(args.search.is_none());
                assert_eq!(args.sort, SortOrderArg::Newest);
            }
            other => panic!("Expected List, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "tracklet",
            "list",
            "--status",
            "in-progress",
            "--priority",
            "high",
            "--search",
            "login",
            "--sort",
            "priority",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, Some(IssueStatusArg::InProgress));
                assert_eq!(args.priority, Some(IssuePriorityArg::High));
                assert_eq!(args.search.as_deref(), Some("login"));
                assert_eq!(args.sort, SortOrderArg::Priority);
            }
            other => panic!("Expected List, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_invalid_status() {
        assert!(Cli::try_parse_from(["tracklet", "list", "--status", "blocked"]).is_err());
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["tracklet", "show", "iss-a3f8"]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.issue_id, "iss-a3f8"),
            other => panic!("Expected Show, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_show_invalid_id() {
        assert!(Cli::try_parse_from(["tracklet", "show", "../etc"]).is_err());
    }

    #[test]
    fn test_parse_create_minimal() {
        let cli =
            Cli::try_parse_from(["tracklet", "create", "--title", "A", "--description", "B"])
                .unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.title, "A");
                assert_eq!(args.description, "B");
                assert_eq!(args.status, IssueStatusArg::Open);
                assert_eq!(args.priority, IssuePriorityArg::Medium);
            }
            other => panic!("Expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_requires_title() {
        assert!(Cli::try_parse_from(["tracklet", "create", "--description", "B"]).is_err());
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "tracklet",
            "update",
            "1",
            "--status",
            "closed",
            "-D",
            "Fixed",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.issue_id, "1");
                assert_eq!(args.status, Some(IssueStatusArg::Closed));
                assert_eq!(args.description.as_deref(), Some("Fixed"));
                assert!(args.title.is_none());
                assert!(args.priority.is_none());
            }
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["tracklet", "delete", "iss-0000"]).unwrap();
        match cli.command {
            Some(Commands::Delete(args)) => assert_eq!(args.issue_id, "iss-0000"),
            other => panic!("Expected Delete, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_stats() {
        let cli = Cli::try_parse_from(["tracklet", "stats"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats(_))));
    }
}
