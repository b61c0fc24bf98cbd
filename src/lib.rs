//! Recipe Glossary
//!
//! A query and aggregation engine over a recipe property graph:
//! - Paged recipe listings with search, ingredient filters and sorting
//! - Exact filter-consistent totals for every page
//! - Recipe detail, author listings and similar-recipe lookups
//! - Top-5 dashboard aggregations over the whole graph

pub mod error;
pub mod neo4j;
pub mod recipes;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub neo4j: Neo4jYamlConfig,
    pub query: QueryYamlConfig,
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: usize,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "password".into(),
            max_connections: 16,
        }
    }
}

/// Query execution section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryYamlConfig {
    pub request_timeout_secs: u64,
}

impl Default for QueryYamlConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub neo4j_max_connections: usize,
    /// Deadline applied to every recipe query
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        let max_connections = std::env::var("NEO4J_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(yaml.neo4j.max_connections);
        let timeout_secs = std::env::var("RECIPES_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(yaml.query.request_timeout_secs);

        if max_connections == 0 {
            anyhow::bail!("neo4j.max_connections must be at least 1");
        }
        if timeout_secs == 0 {
            anyhow::bail!("query.request_timeout_secs must be at least 1");
        }

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            neo4j_max_connections: max_connections,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub neo4j: Arc<dyn neo4j::RecipeStore>,
    pub recipes: Arc<recipes::RecipeManager>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to Neo4j and build the recipe manager
    pub async fn new(config: Config) -> Result<Self> {
        let neo4j: Arc<dyn neo4j::RecipeStore> = Arc::new(
            neo4j::client::Neo4jClient::new(
                &config.neo4j_uri,
                &config.neo4j_user,
                &config.neo4j_password,
                config.neo4j_max_connections,
            )
            .await?,
        );

        let recipes = Arc::new(recipes::RecipeManager::with_timeout(
            neo4j.clone(),
            config.request_timeout,
        ));

        Ok(Self {
            neo4j,
            recipes,
            config: Arc::new(config),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
