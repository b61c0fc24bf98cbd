//! RecipeStore trait definition
//!
//! Defines the read interface the recipe manager needs from the graph.
//! This trait mirrors the public async query methods of `Neo4jClient`,
//! enabling testing with the in-memory mock and future backend swaps.

use crate::neo4j::models::*;
use crate::recipes::filter::RecipeFilter;
use crate::recipes::pagination::Page;
use crate::recipes::sort::SortSpec;
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for recipe graph reads.
///
/// Implementations must evaluate the same `RecipeFilter` identically in
/// [`RecipeStore::list_recipes`] and [`RecipeStore::count_recipes_matching`].
#[async_trait]
pub trait RecipeStore: Send + Sync {
    // ========================================================================
    // Recipe listing
    // ========================================================================

    /// One sorted page of authored recipes matching `filter`
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        sort: &SortSpec,
        page: &Page,
    ) -> Result<Vec<RecipeDisplayRecord>>;

    /// Number of distinct authored recipes matching `filter`
    async fn count_recipes_matching(&self, filter: &RecipeFilter) -> Result<i64>;

    /// Number of Recipe nodes in the graph
    async fn count_all_recipes(&self) -> Result<i64>;

    // ========================================================================
    // Recipe detail
    // ========================================================================

    /// Every recipe carrying `id`, expanded with its satellite sets.
    /// More than one result means the graph holds duplicate ids.
    async fn get_recipes_by_id(&self, id: &str) -> Result<Vec<Recipe>>;

    /// Recipes sharing ingredients with recipe `id`, most shared first
    async fn similar_recipes(&self, id: &str, limit: i64) -> Result<Vec<SimilarRecipeRecord>>;

    // ========================================================================
    // Author scope
    // ========================================================================

    /// One page of an author's recipes, by name ascending
    async fn list_author_recipes(
        &self,
        author_name: &str,
        page: &Page,
    ) -> Result<Vec<AuthorDisplayRecord>>;

    /// Number of recipes written by an author
    async fn count_author_recipes(&self, author_name: &str) -> Result<i64>;

    // ========================================================================
    // Aggregations
    // ========================================================================

    async fn top_common_ingredients(&self, limit: i64) -> Result<Vec<CommonIngredientRecord>>;

    async fn top_prolific_authors(&self, limit: i64) -> Result<Vec<ProlificAuthorRecord>>;

    async fn top_complex_recipes(&self, limit: i64) -> Result<Vec<RecipeDisplayRecord>>;
}
