//! Records projected out of the recipe graph

use serde::{Deserialize, Serialize};

// ============================================================================
// Recipe detail
// ============================================================================

/// A recipe with its satellite name sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Cooking time in seconds
    pub cooking_time: Option<i64>,
    /// Preparation time in seconds
    pub preparation_time: Option<i64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub diet_types: Vec<String>,
}

// ============================================================================
// Listing projections
// ============================================================================

/// One row of the main recipe listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDisplayRecord {
    pub recipe_id: String,
    pub recipe_name: String,
    pub author_name: String,
    /// Size of the recipe's full ingredient set, regardless of any filter
    pub ingredient_count: i64,
    pub skill_level: Option<String>,
}

/// One row of an author's recipe listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDisplayRecord {
    pub recipe_id: String,
    pub recipe_name: String,
}

// ============================================================================
// Aggregations
// ============================================================================

/// Ingredient ranked by how many recipes use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonIngredientRecord {
    pub name: String,
    pub recipe_count: i64,
}

/// Author ranked by how many recipes they wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProlificAuthorRecord {
    pub author_name: String,
    pub recipe_count: i64,
}

/// Recipe ranked by ingredients shared with a reference recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarRecipeRecord {
    pub recipe_id: String,
    pub recipe_name: String,
    pub similarity_score: i64,
}
