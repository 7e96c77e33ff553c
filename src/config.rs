use std::{env, path::PathBuf};

use crate::store::{IdStrategy, ValidationMode};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub id_strategy: IdStrategy,
    pub validation: ValidationMode,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8081);
        let id_strategy = match env::var("ID_STRATEGY") {
            Ok(value) => value.parse()?,
            Err(_) => IdStrategy::default(),
        };
        let validation = match env::var("STRICT_VALIDATION") {
            Ok(value) if parse_flag(&value) => ValidationMode::Strict,
            _ => ValidationMode::Permissive,
        };
        Ok(Self {
            data_dir,
            host,
            port,
            id_strategy,
            validation,
        })
    }

    /// Defaults rooted at `data_dir`, without reading the environment.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            host: "127.0.0.1".to_string(),
            port: 8081,
            id_strategy: IdStrategy::default(),
            validation: ValidationMode::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
