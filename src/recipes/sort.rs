//! Sort resolution for the recipe listing
//!
//! Sort fields come from a closed enumeration. Each one maps to a fixed
//! Cypher ordering expression, so caller text never reaches the query.

use crate::error::QueryError;
use crate::neo4j::models::RecipeDisplayRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Skill levels in ascending order of difficulty
pub const SKILL_LEVELS: [&str; 3] = ["Easy", "More effort", "A challenge"];

/// Ordinal given to missing or unrecognised skill levels
const UNKNOWN_SKILL_ORDINAL: u8 = 4;

/// Ordinal of a skill level label (Easy=1, More effort=2, A challenge=3)
pub fn skill_ordinal(level: Option<&str>) -> u8 {
    level
        .and_then(|l| SKILL_LEVELS.iter().position(|known| *known == l))
        .map(|idx| idx as u8 + 1)
        .unwrap_or(UNKNOWN_SKILL_ORDINAL)
}

// ============================================================================
// Field & direction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    SkillLevel,
    IngredientCount,
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "skillLevel" | "skill_level" => Ok(Self::SkillLevel),
            "ingredientCount" | "ingredient_count" => Ok(Self::IngredientCount),
            other => Err(QueryError::invalid_argument(format!(
                "unsupported sort field '{}', expected one of: name, skillLevel, ingredientCount",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::SkillLevel => "skillLevel",
            Self::IngredientCount => "ingredientCount",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(QueryError::invalid_argument(format!(
                "sort order must be 'asc' or 'desc', got '{}'",
                s
            ))),
        }
    }
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ============================================================================
// Resolved ordering
// ============================================================================

/// Resolved, deterministic ordering rule for the recipe listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            order: SortOrder::Asc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Resolve caller-supplied sort parameters. Blank values fall back to
    /// name / ascending; anything outside the allowlist is rejected.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, QueryError> {
        let field = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SortField::Name,
        };
        let order = match sort_order.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.parse()?,
            None => SortOrder::Asc,
        };
        Ok(Self { field, order })
    }

    /// Cypher `ORDER BY` clause. Expects `recipe` and `ingredientCount` in
    /// scope; `recipe.id` breaks ties so page boundaries are stable.
    pub fn order_by_clause(&self) -> String {
        let expr = match self.field {
            SortField::Name => "ltrim(recipe.name)",
            SortField::SkillLevel => {
                "CASE recipe.skillLevel \
                 WHEN 'Easy' THEN 1 \
                 WHEN 'More effort' THEN 2 \
                 WHEN 'A challenge' THEN 3 \
                 ELSE 4 END"
            }
            SortField::IngredientCount => "ingredientCount",
        };
        format!("ORDER BY {} {}, recipe.id ASC", expr, self.order.keyword())
    }

    /// In-memory equivalent of [`Self::order_by_clause`]
    pub fn compare(&self, a: &RecipeDisplayRecord, b: &RecipeDisplayRecord) -> Ordering {
        let primary = match self.field {
            SortField::Name => a.recipe_name.trim_start().cmp(b.recipe_name.trim_start()),
            SortField::SkillLevel => skill_ordinal(a.skill_level.as_deref())
                .cmp(&skill_ordinal(b.skill_level.as_deref())),
            SortField::IngredientCount => a.ingredient_count.cmp(&b.ingredient_count),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.recipe_id.cmp(&b.recipe_id))
    }
}
