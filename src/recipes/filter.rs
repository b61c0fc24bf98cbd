//! Recipe filter predicate
//!
//! A `RecipeFilter` is built once per request and then borrowed by every
//! query that needs it, so a page and its total count can never disagree on
//! which recipes match.

use neo4rs::Query;
use std::collections::BTreeSet;

/// Cypher variable the filter expects to be bound to the candidate recipe
pub const RECIPE_ALIAS: &str = "recipe";
/// Cypher variable the filter expects to hold the recipe's ingredient names
pub const INGREDIENT_NAMES_ALIAS: &str = "ingredientNames";

const SEARCH_PARAM: &str = "search";
const INGREDIENTS_PARAM: &str = "requiredIngredients";

/// Immutable "matches all supplied conditions" predicate over recipes.
///
/// - search: case-insensitive substring of the recipe name
/// - ingredients: the recipe's ingredient names must include every one
///   (extra ingredients are fine)
///
/// With neither condition the filter accepts every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    search: Option<String>,
    ingredients: Vec<String>,
}

impl RecipeFilter {
    /// Build the filter from raw caller input.
    ///
    /// Blank search text and blank ingredient names are ignored; duplicate
    /// ingredient names collapse.
    pub fn new(search: Option<&str>, ingredients: Option<&[String]>) -> Self {
        let search = search
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_lowercase());

        let ingredients: BTreeSet<String> = ingredients
            .unwrap_or_default()
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();

        Self {
            search,
            ingredients: ingredients.into_iter().collect(),
        }
    }

    /// Lowercased search text, if any
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Required ingredient names, sorted and deduplicated
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Evaluate the predicate against one candidate recipe
    pub fn matches(&self, recipe_name: &str, ingredient_names: &[String]) -> bool {
        if let Some(search) = &self.search {
            if !recipe_name.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        self.ingredients
            .iter()
            .all(|required| ingredient_names.iter().any(|name| name == required))
    }

    /// Render the predicate as a Cypher `WHERE` clause over
    /// [`RECIPE_ALIAS`] and [`INGREDIENT_NAMES_ALIAS`].
    ///
    /// Caller text only ever reaches the query through [`Self::bind`];
    /// the returned clause references parameters, never values.
    pub fn where_clause(&self) -> String {
        let mut conditions = Vec::new();
        if self.search.is_some() {
            conditions.push(format!(
                "toLower({}.name) CONTAINS ${}",
                RECIPE_ALIAS, SEARCH_PARAM
            ));
        }
        if !self.ingredients.is_empty() {
            conditions.push(format!(
                "ALL(required IN ${} WHERE required IN {})",
                INGREDIENTS_PARAM, INGREDIENT_NAMES_ALIAS
            ));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }

    /// Bind the parameters referenced by [`Self::where_clause`]
    pub fn bind(&self, mut q: Query) -> Query {
        if let Some(search) = &self.search {
            q = q.param(SEARCH_PARAM, search.clone());
        }
        if !self.ingredients.is_empty() {
            q = q.param(INGREDIENTS_PARAM, self.ingredients.clone());
        }
        q
    }
}
