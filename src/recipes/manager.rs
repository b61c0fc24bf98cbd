//! Recipe query operations
//!
//! `RecipeManager` is the single entry point for every read the recipe
//! glossary offers. It resolves caller parameters into a `RecipeFilter`,
//! `SortSpec` and `Page` before touching the store, runs each request under
//! a deadline, and converts store failures into `QueryError`s.

use super::filter::RecipeFilter;
use super::models::*;
use super::pagination::Page;
use super::sort::SortSpec;
use crate::error::{QueryError, QueryResult};
use crate::neo4j::models::*;
use crate::neo4j::traits::RecipeStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Number of entries returned by the dashboard rankings
pub const TOP_N: i64 = 5;

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Manager for recipe read operations
pub struct RecipeManager {
    store: Arc<dyn RecipeStore>,
    request_timeout: Duration,
}

impl RecipeManager {
    /// Create a new recipe manager
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self::with_timeout(store, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a recipe manager with a custom per-request deadline
    pub fn with_timeout(store: Arc<dyn RecipeStore>, request_timeout: Duration) -> Self {
        Self {
            store,
            request_timeout,
        }
    }

    /// Run one logical request under the deadline, mapping store errors
    async fn run<T, F>(&self, operation: &'static str, fut: F) -> QueryResult<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let outcome = match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result.map_err(QueryError::from_store),
            Err(_) => Err(QueryError::transient(format!(
                "{} exceeded deadline of {:?}",
                operation, self.request_timeout
            ))),
        };

        if let Err(e) = &outcome {
            tracing::warn!(operation, kind = e.kind(), "Recipe query failed: {}", e);
        }
        outcome
    }

    // ========================================================================
    // Recipe listing
    // ========================================================================

    /// Get one page of recipes with the total number of matching recipes.
    ///
    /// The filter is built once and the same value drives both the page
    /// query and the count query, which run concurrently. Invalid sort
    /// parameters are rejected before any query is issued.
    pub async fn get_recipes(&self, req: &RecipeListRequest) -> QueryResult<PagedRecipeResult> {
        let sort = SortSpec::resolve(req.sort_by.as_deref(), req.sort_order.as_deref())
            .inspect_err(|e| tracing::warn!("Rejected recipe listing: {}", e))?;
        let page = Page::new(req.page_number)?;
        let filter = RecipeFilter::new(
            req.search_query.as_deref(),
            Some(req.ingredient_filters.as_slice()),
        );

        let store = &self.store;
        let filter = &filter;
        let (records, total_count) = self
            .run("get_recipes", async move {
                tokio::try_join!(
                    store.list_recipes(filter, &sort, &page),
                    store.count_recipes_matching(filter),
                )
            })
            .await?;

        tracing::debug!(
            "Recipe page {} returned {} of {} matching recipes",
            page.number(),
            records.len(),
            total_count
        );

        Ok(PagedRecipeResult {
            records,
            total_count,
        })
    }

    /// Total number of Recipe nodes, authored or not
    pub async fn count_recipes(&self) -> QueryResult<i64> {
        self.run("count_recipes", self.store.count_all_recipes())
            .await
    }

    // ========================================================================
    // Recipe detail
    // ========================================================================

    /// Get a recipe with its ingredients, collections, keywords and diet types
    pub async fn get_by_id(&self, id: &str) -> QueryResult<Recipe> {
        let id = Self::recipe_id(id)?;
        let matches = self
            .run("get_by_id", self.store.get_recipes_by_id(id))
            .await?;
        Self::single_recipe(id, matches)
    }

    /// Recipes sharing the most ingredients with recipe `id`.
    ///
    /// The existence check and the similarity query share one deadline.
    pub async fn similar_recipes(&self, id: &str) -> QueryResult<Vec<SimilarRecipeRecord>> {
        let id = Self::recipe_id(id)?;
        let store = &self.store;
        self.run("similar_recipes", async move {
            let recipe = Self::single_recipe(id, store.get_recipes_by_id(id).await?)?;
            store.similar_recipes(&recipe.id, TOP_N).await
        })
        .await
    }

    fn recipe_id(id: &str) -> QueryResult<&str> {
        let id = id.trim();
        if id.is_empty() {
            return Err(QueryError::invalid_argument("recipe id must not be blank"));
        }
        Ok(id)
    }

    /// Exactly one match is expected for an id lookup
    fn single_recipe(id: &str, mut matches: Vec<Recipe>) -> QueryResult<Recipe> {
        match matches.len() {
            0 => Err(QueryError::not_found(format!("recipe '{}'", id))),
            1 => Ok(matches.remove(0)),
            n => {
                tracing::error!("Recipe id '{}' is shared by {} nodes", id, n);
                Err(QueryError::data_integrity(format!(
                    "recipe id '{}' matched {} recipes",
                    id, n
                )))
            }
        }
    }

    // ========================================================================
    // Author scope
    // ========================================================================

    /// One page of an author's recipes, by name ascending
    pub async fn get_by_author(
        &self,
        author_name: &str,
        page_number: i64,
    ) -> QueryResult<Vec<AuthorDisplayRecord>> {
        let page = Page::new(page_number)?;
        self.run(
            "get_by_author",
            self.store.list_author_recipes(author_name, &page),
        )
        .await
    }

    /// Number of recipes written by an author
    pub async fn count_by_author(&self, author_name: &str) -> QueryResult<i64> {
        self.run(
            "count_by_author",
            self.store.count_author_recipes(author_name),
        )
        .await
    }

    /// An author's page together with their total
    pub async fn author_recipes_page(
        &self,
        author_name: &str,
        page_number: i64,
    ) -> QueryResult<AuthorRecipesPage> {
        let page = Page::new(page_number)?;
        let store = &self.store;
        let (records, total_count) = self
            .run("author_recipes_page", async move {
                tokio::try_join!(
                    store.list_author_recipes(author_name, &page),
                    store.count_author_recipes(author_name),
                )
            })
            .await?;

        Ok(AuthorRecipesPage {
            author_name: author_name.to_string(),
            page_number: page.number(),
            records,
            total_count,
        })
    }

    // ========================================================================
    // Aggregations
    // ========================================================================

    /// The five ingredients used by the most recipes
    pub async fn top_common_ingredients(&self) -> QueryResult<Vec<CommonIngredientRecord>> {
        self.run(
            "top_common_ingredients",
            self.store.top_common_ingredients(TOP_N),
        )
        .await
    }

    /// The five authors with the most recipes
    pub async fn top_prolific_authors(&self) -> QueryResult<Vec<ProlificAuthorRecord>> {
        self.run(
            "top_prolific_authors",
            self.store.top_prolific_authors(TOP_N),
        )
        .await
    }

    /// The five recipes with the most distinct ingredients
    pub async fn top_complex_recipes(&self) -> QueryResult<Vec<RecipeDisplayRecord>> {
        self.run(
            "top_complex_recipes",
            self.store.top_complex_recipes(TOP_N),
        )
        .await
    }

    /// Every dashboard aggregation, gathered concurrently
    pub async fn dashboard(&self) -> QueryResult<DashboardStats> {
        let (total_recipes, common_ingredients, prolific_authors, complex_recipes) = tokio::try_join!(
            self.count_recipes(),
            self.top_common_ingredients(),
            self.top_prolific_authors(),
            self.top_complex_recipes(),
        )?;

        Ok(DashboardStats {
            total_recipes,
            common_ingredients,
            prolific_authors,
            complex_recipes,
        })
    }
}
