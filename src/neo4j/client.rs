//! Neo4j client for reading the recipe graph

use super::models::*;
use crate::error::QueryError;
use crate::recipes::filter::RecipeFilter;
use crate::recipes::pagination::Page;
use crate::recipes::sort::SortSpec;
use anyhow::{Context, Result};
use neo4rs::{query, ConfigBuilder, Graph, Query, Row};
use std::sync::Arc;

/// Authored recipes joined to the names of all their ingredients.
///
/// Binds `recipe`, `author` and `ingredientNames`, which is what
/// `RecipeFilter::where_clause` and `SortSpec::order_by_clause` expect.
const RECIPE_CANDIDATES: &str = r#"
    MATCH (author:Author)-[:WROTE]->(recipe:Recipe)
    OPTIONAL MATCH (recipe)-[:CONTAINS_INGREDIENT]->(ingredient:Ingredient)
    WITH recipe, author, collect(DISTINCT ingredient.name) AS ingredientNames
"#;

/// Shared by the author listing and the author count
const AUTHORED_BY: &str = "MATCH (author:Author {name: $authorName})-[:WROTE]->(recipe:Recipe)";

/// Recipe lookup by id. Ids are compared as strings on both sides so that
/// ids projected by the listings always resolve, whatever their stored type.
const RECIPE_BY_ID: &str = r#"
    MATCH (recipe:Recipe)
    WHERE toString(recipe.id) = $id
    OPTIONAL MATCH (recipe)-[:CONTAINS_INGREDIENT]->(ingredient:Ingredient)
    WITH recipe, collect(DISTINCT ingredient.name) AS ingredients
    OPTIONAL MATCH (recipe)-[:COLLECTION]->(collection:Collection)
    WITH recipe, ingredients, collect(DISTINCT collection.name) AS collections
    OPTIONAL MATCH (recipe)-[:KEYWORD]->(keyword:Keyword)
    WITH recipe, ingredients, collections, collect(DISTINCT keyword.name) AS keywords
    OPTIONAL MATCH (recipe)-[:DIET_TYPE]->(dietType:DietType)
    WITH recipe, ingredients, collections, keywords,
         collect(DISTINCT dietType.name) AS dietTypes
    RETURN toString(recipe.id) AS id,
           recipe.name AS name,
           recipe.description AS description,
           recipe.cookingTime AS cookingTime,
           recipe.preparationTime AS preparationTime,
           ingredients, collections, keywords, dietTypes
"#;

/// Recipes sharing ingredients with the recipe whose id is `$id`
const SIMILAR_RECIPES: &str = r#"
    MATCH (source:Recipe)-[:CONTAINS_INGREDIENT]->(ingredient:Ingredient)
          <-[:CONTAINS_INGREDIENT]-(other:Recipe)
    WHERE toString(source.id) = $id AND other <> source
    WITH other, count(DISTINCT ingredient) AS similarityScore
    ORDER BY similarityScore DESC, other.id ASC
    LIMIT $limit
    RETURN toString(other.id) AS recipeId,
           other.name AS recipeName,
           similarityScore
"#;

/// Cypher for one page of the filtered recipe listing
pub fn recipe_page_cypher(filter: &RecipeFilter, sort: &SortSpec) -> String {
    format!(
        r#"
        {}
        {}
        WITH recipe, author, size(ingredientNames) AS ingredientCount
        {}
        SKIP $skip
        LIMIT $limit
        RETURN toString(recipe.id) AS recipeId,
               recipe.name AS recipeName,
               author.name AS authorName,
               ingredientCount,
               recipe.skillLevel AS skillLevel
        "#,
        RECIPE_CANDIDATES,
        filter.where_clause(),
        sort.order_by_clause()
    )
}

/// Cypher for the total behind [`recipe_page_cypher`]
pub fn recipe_count_cypher(filter: &RecipeFilter) -> String {
    format!(
        r#"
        {}
        {}
        RETURN count(DISTINCT recipe) AS total
        "#,
        RECIPE_CANDIDATES,
        filter.where_clause()
    )
}

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect to Neo4j with a bounded connection pool
    pub async fn new(uri: &str, user: &str, password: &str, max_connections: usize) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .max_connections(max_connections)
            .build()
            .context("Invalid Neo4j configuration")?;

        let graph = Graph::connect(config)
            .await
            .context("Failed to connect to Neo4j")?;

        tracing::info!(
            "Connected to Neo4j at {} (pool size {})",
            uri,
            max_connections
        );

        Ok(Self::from_graph(graph))
    }

    /// Wrap an already connected graph
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Run a read query and decode every row.
    ///
    /// The pooled connection is held by the row stream and goes back to the
    /// pool when the stream is dropped, including on early returns.
    /// A row that fails to decode is a data integrity fault, not a store
    /// outage.
    async fn fetch<T, F>(&self, q: Query, what: &str, decode: F) -> Result<Vec<T>>
    where
        F: Fn(&Row) -> Result<T>,
    {
        let mut stream = self
            .graph
            .execute(q)
            .await
            .with_context(|| format!("Failed to run {} query", what))?;

        let mut records = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .with_context(|| format!("Failed to read {} results", what))?
        {
            let record = decode(&row).map_err(|e| {
                QueryError::data_integrity(format!("malformed {} record: {:#}", what, e))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Run a query returning a single `total` column
    async fn fetch_total(&self, q: Query, what: &str) -> Result<i64> {
        let totals = self
            .fetch(q, what, |row| Ok(row.get::<i64>("total")?))
            .await?;
        Ok(totals.first().copied().unwrap_or(0))
    }

    fn row_to_display_record(row: &Row) -> Result<RecipeDisplayRecord> {
        Ok(RecipeDisplayRecord {
            recipe_id: row.get("recipeId")?,
            recipe_name: row.get("recipeName")?,
            author_name: row.get("authorName")?,
            ingredient_count: row.get("ingredientCount")?,
            skill_level: row.get::<Option<String>>("skillLevel")?,
        })
    }

    fn row_to_recipe(row: &Row) -> Result<Recipe> {
        Ok(Recipe {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get::<Option<String>>("description")?,
            cooking_time: row.get::<Option<i64>>("cookingTime")?,
            preparation_time: row.get::<Option<i64>>("preparationTime")?,
            ingredients: row.get("ingredients")?,
            collections: row.get("collections")?,
            keywords: row.get("keywords")?,
            diet_types: row.get("dietTypes")?,
        })
    }

    // ========================================================================
    // Recipe listing
    // ========================================================================

    /// One sorted page of authored recipes matching the filter
    pub async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        sort: &SortSpec,
        page: &Page,
    ) -> Result<Vec<RecipeDisplayRecord>> {
        tracing::debug!(
            search = ?filter.search(),
            ingredients = filter.ingredients().len(),
            sort_by = %sort.field,
            page = page.number(),
            "Fetching recipe page"
        );

        let q = filter
            .bind(query(&recipe_page_cypher(filter, sort)))
            .param("skip", page.skip())
            .param("limit", page.limit());

        self.fetch(q, "recipe page", Self::row_to_display_record)
            .await
    }

    /// Count distinct authored recipes matching the filter
    pub async fn count_recipes_matching(&self, filter: &RecipeFilter) -> Result<i64> {
        let q = filter.bind(query(&recipe_count_cypher(filter)));
        self.fetch_total(q, "recipe count").await
    }

    /// Count every Recipe node
    pub async fn count_all_recipes(&self) -> Result<i64> {
        let q = query("MATCH (recipe:Recipe) RETURN count(recipe) AS total");
        self.fetch_total(q, "recipe total").await
    }

    // ========================================================================
    // Recipe detail
    // ========================================================================

    /// Get every recipe node with this id, with satellite name sets
    pub async fn get_recipes_by_id(&self, id: &str) -> Result<Vec<Recipe>> {
        let q = query(RECIPE_BY_ID).param("id", id);

        self.fetch(q, "recipe detail", Self::row_to_recipe).await
    }

    /// Recipes sharing at least one ingredient with recipe `id`
    pub async fn similar_recipes(&self, id: &str, limit: i64) -> Result<Vec<SimilarRecipeRecord>> {
        let q = query(SIMILAR_RECIPES)
            .param("id", id)
            .param("limit", limit);

        self.fetch(q, "similar recipes", |row| {
            Ok(SimilarRecipeRecord {
                recipe_id: row.get("recipeId")?,
                recipe_name: row.get("recipeName")?,
                similarity_score: row.get("similarityScore")?,
            })
        })
        .await
    }

    // ========================================================================
    // Author scope
    // ========================================================================

    /// One page of an author's recipes ordered by name
    pub async fn list_author_recipes(
        &self,
        author_name: &str,
        page: &Page,
    ) -> Result<Vec<AuthorDisplayRecord>> {
        let cypher = format!(
            r#"
            {}
            WITH recipe
            ORDER BY recipe.name ASC, recipe.id ASC
            SKIP $skip
            LIMIT $limit
            RETURN toString(recipe.id) AS recipeId, recipe.name AS recipeName
            "#,
            AUTHORED_BY
        );
        let q = query(&cypher)
            .param("authorName", author_name)
            .param("skip", page.skip())
            .param("limit", page.limit());

        self.fetch(q, "author recipes", |row| {
            Ok(AuthorDisplayRecord {
                recipe_id: row.get("recipeId")?,
                recipe_name: row.get("recipeName")?,
            })
        })
        .await
    }

    /// Count an author's recipes
    pub async fn count_author_recipes(&self, author_name: &str) -> Result<i64> {
        let cypher = format!("{} RETURN count(DISTINCT recipe) AS total", AUTHORED_BY);
        let q = query(&cypher).param("authorName", author_name);
        self.fetch_total(q, "author recipe count").await
    }

    // ========================================================================
    // Aggregations
    // ========================================================================

    /// Ingredients used by the most recipes
    pub async fn top_common_ingredients(&self, limit: i64) -> Result<Vec<CommonIngredientRecord>> {
        let q = query(
            r#"
            MATCH (recipe:Recipe)-[:CONTAINS_INGREDIENT]->(ingredient:Ingredient)
            WITH ingredient, count(DISTINCT recipe) AS recipeCount
            ORDER BY recipeCount DESC
            LIMIT $limit
            RETURN ingredient.name AS name, recipeCount
            "#,
        )
        .param("limit", limit);

        self.fetch(q, "common ingredients", |row| {
            Ok(CommonIngredientRecord {
                name: row.get("name")?,
                recipe_count: row.get("recipeCount")?,
            })
        })
        .await
    }

    /// Authors with the most recipes
    pub async fn top_prolific_authors(&self, limit: i64) -> Result<Vec<ProlificAuthorRecord>> {
        let q = query(
            r#"
            MATCH (author:Author)-[:WROTE]->(recipe:Recipe)
            WITH author, count(DISTINCT recipe) AS recipeCount
            ORDER BY recipeCount DESC
            LIMIT $limit
            RETURN author.name AS authorName, recipeCount
            "#,
        )
        .param("limit", limit);

        self.fetch(q, "prolific authors", |row| {
            Ok(ProlificAuthorRecord {
                author_name: row.get("authorName")?,
                recipe_count: row.get("recipeCount")?,
            })
        })
        .await
    }

    /// Recipes with the most distinct ingredients (recipes with none included)
    pub async fn top_complex_recipes(&self, limit: i64) -> Result<Vec<RecipeDisplayRecord>> {
        let q = query(
            r#"
            MATCH (author:Author)-[:WROTE]->(recipe:Recipe)
            OPTIONAL MATCH (recipe)-[:CONTAINS_INGREDIENT]->(ingredient:Ingredient)
            WITH recipe, author, count(DISTINCT ingredient) AS ingredientCount
            ORDER BY ingredientCount DESC
            LIMIT $limit
            RETURN toString(recipe.id) AS recipeId,
                   recipe.name AS recipeName,
                   author.name AS authorName,
                   ingredientCount,
                   recipe.skillLevel AS skillLevel
            "#,
        )
        .param("limit", limit);

        self.fetch(q, "complex recipes", Self::row_to_display_record)
            .await
    }
}
