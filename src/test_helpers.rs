//! Test helper factories and mock state builders
//!
//! Provides convenience functions for creating test recipes with sensible
//! defaults, and helpers for seeding the in-memory store.
#![allow(dead_code)]

use crate::neo4j::mock::MockRecipeStore;
use crate::neo4j::models::*;
use crate::recipes::RecipeManager;
use crate::{AppState, Config};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Mock state builders
// ============================================================================

/// Config pointing at an unreachable database
pub fn mock_config() -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        neo4j_max_connections: 4,
        request_timeout: Duration::from_secs(5),
    }
}

/// Create a mock AppState over a pre-seeded store
pub fn mock_app_state_with(store: MockRecipeStore) -> AppState {
    let config = mock_config();
    let store = Arc::new(store);
    AppState {
        recipes: Arc::new(RecipeManager::with_timeout(
            store.clone(),
            config.request_timeout,
        )),
        neo4j: store,
        config: Arc::new(config),
    }
}

// ============================================================================
// Test data factories
// ============================================================================

/// Create a test recipe with the given ingredients and no other satellites
pub fn test_recipe(id: &str, name: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(format!("Test recipe: {}", name)),
        cooking_time: Some(1800),
        preparation_time: Some(600),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        collections: vec![],
        keywords: vec![],
        diet_types: vec![],
    }
}

/// Seed `count` recipes by `author`, named "Recipe 001", "Recipe 002", ...
///
/// Every recipe contains "water"; skill levels and extra ingredients rotate.
pub async fn seed_many(store: MockRecipeStore, count: usize, author: &str) -> MockRecipeStore {
    const LEVELS: [&str; 3] = ["Easy", "More effort", "A challenge"];
    const EXTRAS: [&str; 4] = ["salt", "flour", "eggs", "butter"];

    let mut store = store;
    for i in 1..=count {
        let mut ingredients = vec!["water"];
        ingredients.extend(EXTRAS.iter().take(i % (EXTRAS.len() + 1)));
        store = store
            .with_recipe(
                author,
                test_recipe(
                    &format!("{}-{:03}", author.to_lowercase(), i),
                    &format!("Recipe {:03}", i),
                    &ingredients,
                ),
                Some(LEVELS[i % LEVELS.len()]),
            )
            .await;
    }
    store
}
