//! In-memory mock implementation of RecipeStore for testing.
//!
//! Evaluates the same `RecipeFilter` / `SortSpec` / `Page` values the Neo4j
//! client renders to Cypher, over a `tokio::sync::RwLock<Vec<_>>` graph.
//! Also records calls and received filters, and can simulate an outage or
//! a slow store. Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::traits::RecipeStore;
use crate::recipes::filter::RecipeFilter;
use crate::recipes::pagination::Page;
use crate::recipes::sort::SortSpec;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// A recipe node plus the edges and properties the listings read
#[derive(Debug, Clone)]
pub struct MockRecipe {
    pub recipe: Recipe,
    pub author: Option<String>,
    pub skill_level: Option<String>,
}

impl MockRecipe {
    fn ingredient_names(&self) -> Vec<String> {
        let distinct: BTreeSet<&String> = self.recipe.ingredients.iter().collect();
        distinct.into_iter().cloned().collect()
    }

    fn display_record(&self) -> Option<RecipeDisplayRecord> {
        let author = self.author.clone()?;
        Some(RecipeDisplayRecord {
            recipe_id: self.recipe.id.clone(),
            recipe_name: self.recipe.name.clone(),
            author_name: author,
            ingredient_count: self.ingredient_names().len() as i64,
            skill_level: self.skill_level.clone(),
        })
    }
}

/// In-memory mock implementation of RecipeStore for testing.
pub struct MockRecipeStore {
    /// Recipe nodes; duplicates by id are allowed on purpose
    pub recipes: RwLock<Vec<MockRecipe>>,
    /// Every filter received by `list_recipes` / `count_recipes_matching`
    pub seen_filters: RwLock<Vec<RecipeFilter>>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

impl Default for MockRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecipeStore {
    /// Create a new empty MockRecipeStore.
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(Vec::new()),
            seen_filters: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
            latency: None,
        }
    }

    // ========================================================================
    // Builder / seeding methods for tests
    // ========================================================================

    /// Seed a recipe written by `author`.
    pub async fn with_recipe(self, author: &str, recipe: Recipe, skill_level: Option<&str>) -> Self {
        self.recipes.write().await.push(MockRecipe {
            recipe,
            author: Some(author.to_string()),
            skill_level: skill_level.map(String::from),
        });
        self
    }

    /// Seed a recipe with no WROTE edge.
    pub async fn with_orphan_recipe(self, recipe: Recipe) -> Self {
        self.recipes.write().await.push(MockRecipe {
            recipe,
            author: None,
            skill_level: None,
        });
        self
    }

    /// Delay every store call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every following call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of store calls issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused: mock graph store is offline"));
        }
        Ok(())
    }

    async fn matching_records(&self, filter: &RecipeFilter) -> Vec<RecipeDisplayRecord> {
        self.seen_filters.write().await.push(filter.clone());
        self.recipes
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(&r.recipe.name, &r.ingredient_names()))
            .filter_map(MockRecipe::display_record)
            .collect()
    }
}

fn top_counts(counts: HashMap<String, HashSet<String>>, limit: i64) -> Vec<(String, i64)> {
    let mut ranked: Vec<(String, i64)> = counts
        .into_iter()
        .map(|(key, ids)| (key, ids.len() as i64))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit.max(0) as usize);
    ranked
}

#[async_trait]
impl RecipeStore for MockRecipeStore {
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        sort: &SortSpec,
        page: &Page,
    ) -> Result<Vec<RecipeDisplayRecord>> {
        self.enter().await?;
        let mut records = self.matching_records(filter).await;
        records.sort_by(|a, b| sort.compare(a, b));
        Ok(page.slice(records))
    }

    async fn count_recipes_matching(&self, filter: &RecipeFilter) -> Result<i64> {
        self.enter().await?;
        let distinct: HashSet<String> = self
            .matching_records(filter)
            .await
            .into_iter()
            .map(|r| r.recipe_id)
            .collect();
        Ok(distinct.len() as i64)
    }

    async fn count_all_recipes(&self) -> Result<i64> {
        self.enter().await?;
        Ok(self.recipes.read().await.len() as i64)
    }

    async fn get_recipes_by_id(&self, id: &str) -> Result<Vec<Recipe>> {
        self.enter().await?;
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| r.recipe.id == id)
            .map(|r| r.recipe.clone())
            .collect())
    }

    async fn similar_recipes(&self, id: &str, limit: i64) -> Result<Vec<SimilarRecipeRecord>> {
        self.enter().await?;
        let recipes = self.recipes.read().await;
        let source: HashSet<String> = match recipes.iter().find(|r| r.recipe.id == id) {
            Some(r) => r.ingredient_names().into_iter().collect(),
            None => return Ok(vec![]),
        };

        let mut similar: Vec<SimilarRecipeRecord> = recipes
            .iter()
            .filter(|r| r.recipe.id != id)
            .map(|r| SimilarRecipeRecord {
                recipe_id: r.recipe.id.clone(),
                recipe_name: r.recipe.name.clone(),
                similarity_score: r
                    .ingredient_names()
                    .iter()
                    .filter(|name| source.contains(*name))
                    .count() as i64,
            })
            .filter(|s| s.similarity_score > 0)
            .collect();
        similar.sort_by(|a, b| {
            b.similarity_score
                .cmp(&a.similarity_score)
                .then_with(|| a.recipe_id.cmp(&b.recipe_id))
        });
        similar.truncate(limit.max(0) as usize);
        Ok(similar)
    }

    async fn list_author_recipes(
        &self,
        author_name: &str,
        page: &Page,
    ) -> Result<Vec<AuthorDisplayRecord>> {
        self.enter().await?;
        let mut records: Vec<AuthorDisplayRecord> = self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| r.author.as_deref() == Some(author_name))
            .map(|r| AuthorDisplayRecord {
                recipe_id: r.recipe.id.clone(),
                recipe_name: r.recipe.name.clone(),
            })
            .collect();
        records.sort_by(|a, b| {
            a.recipe_name
                .cmp(&b.recipe_name)
                .then_with(|| a.recipe_id.cmp(&b.recipe_id))
        });
        Ok(page.slice(records))
    }

    async fn count_author_recipes(&self, author_name: &str) -> Result<i64> {
        self.enter().await?;
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|r| r.author.as_deref() == Some(author_name))
            .count() as i64)
    }

    async fn top_common_ingredients(&self, limit: i64) -> Result<Vec<CommonIngredientRecord>> {
        self.enter().await?;
        let mut usage: HashMap<String, HashSet<String>> = HashMap::new();
        for r in self.recipes.read().await.iter() {
            for name in r.ingredient_names() {
                usage.entry(name).or_default().insert(r.recipe.id.clone());
            }
        }
        Ok(top_counts(usage, limit)
            .into_iter()
            .map(|(name, recipe_count)| CommonIngredientRecord { name, recipe_count })
            .collect())
    }

    async fn top_prolific_authors(&self, limit: i64) -> Result<Vec<ProlificAuthorRecord>> {
        self.enter().await?;
        let mut written: HashMap<String, HashSet<String>> = HashMap::new();
        for r in self.recipes.read().await.iter() {
            if let Some(author) = &r.author {
                written
                    .entry(author.clone())
                    .or_default()
                    .insert(r.recipe.id.clone());
            }
        }
        Ok(top_counts(written, limit)
            .into_iter()
            .map(|(author_name, recipe_count)| ProlificAuthorRecord {
                author_name,
                recipe_count,
            })
            .collect())
    }

    async fn top_complex_recipes(&self, limit: i64) -> Result<Vec<RecipeDisplayRecord>> {
        self.enter().await?;
        let mut records: Vec<RecipeDisplayRecord> = self
            .recipes
            .read()
            .await
            .iter()
            .filter_map(MockRecipe::display_record)
            .collect();
        records.sort_by(|a, b| b.ingredient_count.cmp(&a.ingredient_count));
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }
}
