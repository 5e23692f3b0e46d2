use anyhow::Result;

use game_recs::cli::Command;
use game_recs::{
    handle_collection, handle_collections, handle_completions, handle_filters, handle_games,
    handle_ingest, handle_recommend, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Recommend { user_id, source } => handle_recommend(user_id, source),
        Command::Games {
            sort_by,
            weighting,
            filters,
            source,
        } => handle_games(*sort_by, weighting.as_deref(), filters, source),
        Command::Filters { source } => handle_filters(source),
        Command::Collections { user_id, source } => handle_collections(user_id.as_deref(), source),
        Command::Collection { action } => handle_collection(action),
        Command::Ingest => handle_ingest(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
