use std::fs;
use std::path::PathBuf;

use game_recs::config::{AppConfig, RecommendSettings};
use game_recs::database::{SqliteStore, create_pool};
use game_recs::domain::{Rating, ScoreColumn, filter_games};
use game_recs::errors::RecommendError;
use game_recs::ranking::{Weighting, rank_games};
use game_recs::recommend::Recommender;
use game_recs::services::ingestion::IngestionService;
use game_recs::store::{CsvDataStore, GameStore, MemoryStore, OwnershipStore, RatingStore};

const REVIEWS: &[(&str, &str, f64)] = &[
    ("u1", "g1", 5.0),
    ("u1", "g2", 3.0),
    ("u1", "g3", 4.0),
    ("u2", "g1", 5.0),
    ("u2", "g2", 3.0),
    ("u2", "g3", 4.0),
    ("u2", "g4", 5.0),
    ("u2", "g5", 1.0),
    ("u3", "g1", 1.0),
    ("u3", "g2", 5.0),
    ("u3", "g4", 2.0),
    ("u4", "g1", 4.0),
    ("u4", "g2", 3.0),
    ("u4", "g3", 4.0),
    ("u4", "g5", 5.0),
];

// u2 and u4 are the only neighbours of u1; u3 correlates at about 0.04.
const EXPECTED: &[(&str, f64)] = &[
    ("g4", 2.812796491501837),
    ("g3", 2.5179418547148105),
    ("g5", 2.1603167044670286),
    ("g2", 1.696148457814486),
];

fn memory_store() -> MemoryStore {
    let mut store = MemoryStore::with_ratings(
        REVIEWS
            .iter()
            .map(|(u, g, s)| Rating::uniform(u, g, *s))
            .collect(),
    );
    store.add_owned("u1", &["g1"]);
    store
}

fn assert_expected(store_ratings: impl RatingStore, ownership: impl OwnershipStore) {
    let recommender = Recommender::new(store_ratings, ownership, RecommendSettings::default());
    let recommendations = recommender.recommend_scored("u1").unwrap();

    assert_eq!(recommendations.len(), EXPECTED.len());
    for (got, (id, score)) in recommendations.iter().zip(EXPECTED) {
        assert_eq!(got.game_id, *id);
        assert!((got.score - score).abs() < 1e-9, "{} scored {}", id, got.score);
    }
}

struct Fixture {
    root: PathBuf,
    config: AppConfig,
}

impl Fixture {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("game_recs_it_{}_{}", name, std::process::id()));
        let data_dir = root.join("data_store");
        fs::create_dir_all(&data_dir).unwrap();

        let mut reviews = String::from(
            "user_id,game_id,complexity_score,gameplay_score,visual_score,overall_score\n",
        );
        for (u, g, s) in REVIEWS {
            reviews.push_str(&format!("{u},{g},3,3,3,{s}\n"));
        }
        fs::write(data_dir.join("reviews.csv"), reviews).unwrap();

        fs::write(
            data_dir.join("games.csv"),
            "game_id,name,game_type,genre,keywords,mechanic\n\
             g1,Harbour,BOARD GAME,strategy,trade,worker placement\n\
             g2,Parlour,CARD GAME,party,bluff,hand management\n\
             g3,Orchard,BOARD GAME,family,farm,tile placement\n\
             g4,Citadel,BOARD GAME,strategy,war,area control\n\
             g5,Lantern,BOARD GAME,family,lights,set collection\n",
        )
        .unwrap();

        fs::write(
            data_dir.join("collections.csv"),
            "collection_id,user_id,game_ids\n\
             c_1,u1,g1\n\
             c_2,u3,\"g2, g4\"\n",
        )
        .unwrap();

        let mut config = AppConfig::new();
        config.data.data_dir = data_dir;
        config.data.database_path = root.join("game_recs.db");

        Self { root, config }
    }

    fn csv_store(&self) -> CsvDataStore {
        CsvDataStore::new(&self.config.data.data_dir)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn test_recommendations_from_memory_store() {
    let store = memory_store();
    assert_expected(&store, &store);
}

#[test]
fn test_recommendations_from_csv_store() {
    let fixture = Fixture::new("csv");
    let store = fixture.csv_store();
    assert_expected(&store, &store);
}

#[test]
fn test_recommendations_from_ingested_database() {
    let fixture = Fixture::new("sqlite");
    IngestionService::new(&fixture.config).run().unwrap();

    let store = SqliteStore::new(create_pool(&fixture.config.data.database_path).unwrap());
    assert_expected(&store, &store);
}

#[test]
fn test_result_limit_and_unknown_user() {
    let store = memory_store();
    let settings = RecommendSettings {
        max_results: 2,
        ..RecommendSettings::default()
    };
    let recommender = Recommender::new(&store, &store, settings);

    assert_eq!(recommender.recommend("u1").unwrap(), vec!["g4", "g3"]);
    assert!(matches!(
        recommender.recommend("nobody"),
        Err(RecommendError::UserNotFound(_))
    ));
}

#[test]
fn test_filtered_game_ranking() {
    let fixture = Fixture::new("ranking");
    let store = fixture.csv_store();

    let games = store.all_games().unwrap();
    let reviews = store.all_ratings().unwrap();

    let filters = vec![
        ("game_type".to_string(), "BOARD GAME".to_string()),
        ("genre".to_string(), "family".to_string()),
    ];
    let family = filter_games(&games, &filters).unwrap();
    let ranked = rank_games(&family, &reviews, ScoreColumn::Overall, Weighting::default()).unwrap();

    // g3: (4 + 4 + 4) / 3, g5: (1 + 5) / 2
    let ids: Vec<&str> = ranked.iter().map(|r| r.game.game_id.as_str()).collect();
    assert_eq!(ids, vec!["g3", "g5"]);
    assert!((ranked[0].mean - 4.0).abs() < 1e-12);
    assert!((ranked[1].mean - 3.0).abs() < 1e-12);
}
