use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::{ScoreColumn, parse_filter};
use crate::services::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Board game recommendations from user reviews")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Where read commands load data from, and how results are printed
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct SourceArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Read from the SQLite database instead of the CSV data store
    #[arg(long)]
    pub db: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Recommend unowned games for a user
    Recommend {
        #[arg(long)]
        user_id: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List reviewed games by mean score, best first
    Games {
        /// Score column to rank by
        #[arg(long, default_value_t = ScoreColumn::Overall)]
        sort_by: ScoreColumn,
        /// Four column weights, e.g. 1,1,1,2 (only used with overall_score)
        #[arg(long, value_delimiter = ',')]
        weighting: Option<Vec<u32>>,
        /// Exact-match filter, repeatable
        #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the values available to game filters
    Filters {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List collections, optionally for one user
    Collections {
        #[arg(long)]
        user_id: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Edit collections in the SQLite database
    Collection {
        #[clap(subcommand)]
        action: CollectionAction,
    },
    /// Load the CSV data store into the SQLite database
    Ingest,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CollectionAction {
    /// Create an empty collection
    Create {
        #[arg(long)]
        user_id: String,
    },
    /// Add a game to a collection
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        game_id: String,
    },
    /// Remove a game from a collection
    Remove {
        #[arg(long)]
        id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        game_id: String,
    },
    /// Delete a collection
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long)]
        user_id: String,
    },
}
