use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::parse_timestamp;
use crate::features::board::ListFilter;
use crate::features::nlp::Priority;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Turn plain-English sentences into organized tasks")]
#[command(long_about = "taskflow - natural language task board

Type a task the way you would say it. taskflow pulls out who it is for,
when it is due, and how urgent it is, then keeps it on a local board.

QUICK START:
  taskflow add \"Finish report by Alice tomorrow 3pm P1\"
  taskflow parse \"Submit taxes by April 15\"     Preview without saving
  taskflow list --filter overdue
  taskflow done 3f2a                             Toggle by id prefix
  taskflow tui                                   Interactive board

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Falls back to `general.default_output` in config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and tasks.db
    #[arg(long, global = true, env = "TASKFLOW_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pin the current time, e.g. 2026-10-14T10:30
    #[arg(long, global = true, hide = true, env = "TASKFLOW_NOW", value_parser = parse_instant)]
    pub now: Option<NaiveDateTime>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task written in plain English
    ///
    /// # Examples
    ///
    ///   taskflow add Finish report by Alice tomorrow 3pm P1
    ///   taskflow add "Call mom next friday"
    ///   taskflow add "Submit taxes by April 15" --parse-only
    ///
    /// # Supported Patterns
    ///
    ///   Priority:   P1 (urgent) .. P4 (low), default P3
    ///   Assignee:   by/to/for/assigned to/give to <Name>
    ///   Dates:      today, tomorrow, next week, next month, this week,
    ///               15th March, April 15, 12/1, in 3 days, next monday
    ///   Times:      3pm, 3:30 PM, 17:30
    #[command(alias = "a")]
    Add(AddArgs),

    /// Show how a sentence would be parsed, without saving it
    Parse {
        /// The task sentence
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one task
    Show {
        /// Task id or unique id prefix
        id: String,
    },

    /// Toggle a task between open and completed
    #[command(alias = "toggle")]
    Done {
        /// Task id or unique id prefix
        id: String,
    },

    /// Change fields of an existing task
    Edit(EditArgs),

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task id or unique id prefix
        id: String,
    },

    /// Delete every completed task
    ClearCompleted,

    /// Show board counters
    Stats,

    /// Write the board as a JSON snapshot
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Merge tasks from a JSON snapshot
    ///
    /// Tasks whose id already exists are overwritten.
    Import {
        /// Snapshot file
        file: PathBuf,
    },

    /// Inspect or create config.yaml
    Config(ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   taskflow completions zsh > ~/.zsh/completions/_taskflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Interactive board with live parsing
    Tui,
}

#[derive(Args)]
pub struct AddArgs {
    /// The task sentence
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Only show what would be added
    #[arg(long)]
    pub parse_only: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (defaults to `board.default_filter`)
    #[arg(short, long, value_enum)]
    pub filter: Option<ListFilter>,

    /// Case-insensitive match on title or assignee
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id or unique id prefix
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New assignee; an empty string unassigns
    #[arg(long)]
    pub assignee: Option<String>,

    /// New due date, e.g. 2026-10-15T15:00
    #[arg(long, value_parser = parse_instant, conflicts_with = "clear_due")]
    pub due: Option<NaiveDateTime>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// New priority (P1..P4)
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Accept the timestamp forms used for storage.
fn parse_instant(s: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(s).ok_or_else(|| format!("'{s}' is not a date, expected YYYY-MM-DDTHH:MM"))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse().map_err(|e: crate::error::TaskflowError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_joins_words() {
        let cli = Cli::try_parse_from(["taskflow", "add", "Buy", "milk", "tomorrow"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.text.join(" "), "Buy milk tomorrow");
                assert!(!args.parse_only);
            },
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "taskflow",
            "list",
            "-o",
            "json",
            "--now",
            "2026-10-14T10:30",
            "--filter",
            "overdue",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(
            cli.now.map(|n| n.to_string()),
            Some("2026-10-14 10:30:00".to_string())
        );
        match cli.command {
            Commands::List(args) => assert_eq!(args.filter, Some(ListFilter::Overdue)),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_edit_flags() {
        let cli = Cli::try_parse_from(["taskflow", "edit", "abc", "--priority", "p1", "--clear-due"])
            .unwrap();
        match cli.command {
            Commands::Edit(args) => {
                assert_eq!(args.priority, Some(Priority::P1));
                assert!(args.clear_due);
                assert!(args.due.is_none());
            },
            _ => panic!("expected edit"),
        }

        assert!(Cli::try_parse_from([
            "taskflow",
            "edit",
            "abc",
            "--due",
            "2026-10-15T15:00",
            "--clear-due"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["taskflow", "edit", "abc", "--priority", "P9"]).is_err());
        assert!(Cli::try_parse_from(["taskflow", "edit", "abc", "--due", "friday"]).is_err());
    }

    #[test]
    fn test_aliases() {
        assert!(Cli::try_parse_from(["taskflow", "ls"]).is_ok());
        assert!(Cli::try_parse_from(["taskflow", "rm", "abc"]).is_ok());
        assert!(Cli::try_parse_from(["taskflow", "toggle", "abc"]).is_ok());
    }

    #[test]
    fn test_flag_after_text() {
        let cli = Cli::try_parse_from(["taskflow", "add", "Call", "mom", "--parse-only"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.text, vec!["Call", "mom"]);
                assert!(args.parse_only);
            },
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_add_requires_text() {
        assert!(Cli::try_parse_from(["taskflow", "add"]).is_err());
    }
}
