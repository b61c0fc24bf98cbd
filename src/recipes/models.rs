//! Request and response types for the recipe manager

use crate::neo4j::models::{
    AuthorDisplayRecord, CommonIngredientRecord, ProlificAuthorRecord, RecipeDisplayRecord,
};
use serde::{Deserialize, Serialize};

/// Parameters of the main recipe listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeListRequest {
    /// 1-based page number (values below 1 mean page 1)
    pub page_number: i64,
    /// One of `name`, `skillLevel`, `ingredientCount` (default `name`)
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default `asc`)
    pub sort_order: Option<String>,
    /// Case-insensitive substring of the recipe name
    pub search_query: Option<String>,
    /// Ingredient names that must all be present
    pub ingredient_filters: Vec<String>,
}

impl RecipeListRequest {
    pub fn page(page_number: i64) -> Self {
        Self {
            page_number,
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, sort_by: &str, sort_order: &str) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self.sort_order = Some(sort_order.to_string());
        self
    }

    pub fn searching(mut self, query: &str) -> Self {
        self.search_query = Some(query.to_string());
        self
    }

    pub fn with_ingredients<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredient_filters = names.into_iter().map(Into::into).collect();
        self
    }
}

/// A page of the recipe listing with the total number of matching recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedRecipeResult {
    pub records: Vec<RecipeDisplayRecord>,
    pub total_count: i64,
}

/// A page of one author's recipes with that author's total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecipesPage {
    pub author_name: String,
    pub page_number: i64,
    pub records: Vec<AuthorDisplayRecord>,
    pub total_count: i64,
}

/// All dashboard aggregations in one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_recipes: i64,
    pub common_ingredients: Vec<CommonIngredientRecord>,
    pub prolific_authors: Vec<ProlificAuthorRecord>,
    pub complex_recipes: Vec<RecipeDisplayRecord>,
}
