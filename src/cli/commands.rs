use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "todo-cache")]
#[command(version, about = "A deduplicating todo list stored as JSON or CSV")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the todo files (default: $TODO_CACHE_DIR or ./.todo-cache)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage format to read and write
    #[arg(long, global = true, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn other(self) -> Self {
        match self {
            Format::Json => Format::Csv,
            Format::Csv => Format::Json,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new todo
    Add {
        /// Todo text
        text: String,

        /// Priority (unimportant, normal, important)
        #[arg(long, short = 'p', default_value = "normal")]
        priority: String,

        /// Deadline as YYYY-MM-DD or epoch seconds
        #[arg(long, short = 'd')]
        deadline: Option<String>,

        /// Create the todo already completed
        #[arg(long)]
        done: bool,

        /// Use this id instead of a generated one (replaces an existing todo)
        #[arg(long)]
        id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List todos
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single todo by id or unique id prefix
    Get {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a todo as completed
    Done {
        id: String,

        /// Mark as not completed instead
        #[arg(long)]
        undo: bool,
    },

    /// Remove a todo
    Remove {
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Copy every todo from the active format into another
    Convert {
        /// Target format (defaults to the one not selected by --format)
        #[arg(long, value_enum)]
        to: Option<Format>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_options() {
        let cli = Cli::try_parse_from([
            "todo-cache",
            "--format",
            "csv",
            "add",
            "Buy milk",
            "-p",
            "important",
            "--deadline",
            "2023-06-12",
        ])
        .unwrap();

        assert_eq!(cli.format, Format::Csv);
        match cli.command {
            Commands::Add {
                text,
                priority,
                deadline,
                done,
                ..
            } => {
                assert_eq!(text, "Buy milk");
                assert_eq!(priority, "important");
                assert_eq!(deadline.as_deref(), Some("2023-06-12"));
                assert!(!done);
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["todo-cache", "list", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn test_format_other() {
        assert_eq!(Format::Json.other(), Format::Csv);
        assert_eq!(Format::Csv.other(), Format::Json);
    }
}
