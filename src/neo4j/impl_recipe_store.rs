//! `RecipeStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::*;
use super::traits::RecipeStore;
use crate::recipes::filter::RecipeFilter;
use crate::recipes::pagination::Page;
use crate::recipes::sort::SortSpec;

#[async_trait]
impl RecipeStore for Neo4jClient {
    // ========================================================================
    // Recipe listing
    // ========================================================================

    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        sort: &SortSpec,
        page: &Page,
    ) -> anyhow::Result<Vec<RecipeDisplayRecord>> {
        self.list_recipes(filter, sort, page).await
    }

    async fn count_recipes_matching(&self, filter: &RecipeFilter) -> anyhow::Result<i64> {
        self.count_recipes_matching(filter).await
    }

    async fn count_all_recipes(&self) -> anyhow::Result<i64> {
        self.count_all_recipes().await
    }

    // ========================================================================
    // Recipe detail
    // ========================================================================

    async fn get_recipes_by_id(&self, id: &str) -> anyhow::Result<Vec<Recipe>> {
        self.get_recipes_by_id(id).await
    }

    async fn similar_recipes(
        &self,
        id: &str,
        limit: i64,
    ) -> anyhow::Result<Vec<SimilarRecipeRecord>> {
        self.similar_recipes(id, limit).await
    }

    // ========================================================================
    // Author scope
    // ========================================================================

    async fn list_author_recipes(
        &self,
        author_name: &str,
        page: &Page,
    ) -> anyhow::Result<Vec<AuthorDisplayRecord>> {
        self.list_author_recipes(author_name, page).await
    }

    async fn count_author_recipes(&self, author_name: &str) -> anyhow::Result<i64> {
        self.count_author_recipes(author_name).await
    }

    // ========================================================================
    // Aggregations
    // ========================================================================

    async fn top_common_ingredients(
        &self,
        limit: i64,
    ) -> anyhow::Result<Vec<CommonIngredientRecord>> {
        self.top_common_ingredients(limit).await
    }

    async fn top_prolific_authors(&self, limit: i64) -> anyhow::Result<Vec<ProlificAuthorRecord>> {
        self.top_prolific_authors(limit).await
    }

    async fn top_complex_recipes(&self, limit: i64) -> anyhow::Result<Vec<RecipeDisplayRecord>> {
        self.top_complex_recipes(limit).await
    }
}
