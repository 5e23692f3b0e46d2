pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod recommend;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::{CollectionAction, Command, SourceArgs};
use crate::config::AppConfig;
use crate::database::setup::ensure_schema;
use crate::database::{create_pool, get_connection};
use crate::domain::{ScoreColumn, filter_games, filter_terms};
use crate::ranking::{Weighting, rank_games};
use crate::recommend::Recommender;
use crate::services::collections::CollectionService;
use crate::services::ingestion::IngestionService;
use crate::services::open_store;
use crate::services::output::{
    render_collections, render_filter_terms, render_ranked_games, render_recommendations,
};
use crate::store::{CollectionStore, GameStore, RatingStore};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_recommend(user_id: &str, source: &SourceArgs) -> Result<()> {
    let config = AppConfig::from_env();
    let store = open_store(&config, source.db)?;
    let recommender = Recommender::new(&*store, &*store, config.recommend.clone());

    let recommendations = recommender.recommend_scored(user_id)?;
    println!("{}", render_recommendations(&recommendations, source.format)?);
    Ok(())
}

pub fn handle_games(
    sort_by: ScoreColumn,
    weighting: Option<&[u32]>,
    filters: &[(String, String)],
    source: &SourceArgs,
) -> Result<()> {
    let weighting = match weighting {
        Some(values) => Weighting::try_from(values.to_vec())?,
        None => Weighting::default(),
    };

    let config = AppConfig::from_env();
    let store = open_store(&config, source.db)?;

    let games = filter_games(&store.all_games()?, filters)?;
    let reviews = store.all_ratings()?;
    let ranked = rank_games(&games, &reviews, sort_by, weighting)?;

    println!("{}", render_ranked_games(&ranked, source.format)?);
    Ok(())
}

pub fn handle_filters(source: &SourceArgs) -> Result<()> {
    let config = AppConfig::from_env();
    let store = open_store(&config, source.db)?;

    let terms = filter_terms(&store.all_games()?);
    println!("{}", render_filter_terms(&terms, source.format)?);
    Ok(())
}

pub fn handle_collections(user_id: Option<&str>, source: &SourceArgs) -> Result<()> {
    let config = AppConfig::from_env();
    let store = open_store(&config, source.db)?;

    let collections = store.collections(user_id)?;
    println!("{}", render_collections(&collections, source.format)?);
    Ok(())
}

pub fn handle_collection(action: &CollectionAction) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = create_pool(&config.data.database_path)?;
    ensure_schema(&mut get_connection(&pool)?)?;
    let service = CollectionService::new(pool);

    match action {
        CollectionAction::Create { user_id } => {
            let collection = service.create(user_id)?;
            println!("{} {}", "Created".green().bold(), collection.collection_id);
        }
        CollectionAction::Add { id, user_id, game_id } => {
            if service.add_game(id, user_id, game_id)? {
                println!("{} {} to {}", "Added".green().bold(), game_id, id);
            } else {
                println!("{} {} is already in {}", "Unchanged".yellow().bold(), game_id, id);
            }
        }
        CollectionAction::Remove { id, user_id, game_id } => {
            if service.remove_game(id, user_id, game_id)? {
                println!("{} {} from {}", "Removed".green().bold(), game_id, id);
            } else {
                println!("{} {} is not in {}", "Unchanged".yellow().bold(), game_id, id);
            }
        }
        CollectionAction::Delete { id, user_id } => {
            service.delete(id, user_id)?;
            println!("{} {}", "Deleted".green().bold(), id);
        }
    }
    Ok(())
}

pub fn handle_ingest() -> Result<()> {
    let config = AppConfig::from_env();
    let summary = IngestionService::new(&config).run()?;

    println!(
        "{} {} games, {} reviews, {} collections into {}",
        "Ingested".green().bold(),
        summary.games,
        summary.reviews,
        summary.collections,
        config.data.database_path.display()
    );
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
