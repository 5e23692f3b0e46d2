pub mod settings;

pub use settings::{AppConfig, DataSettings, RecommendSettings};
