//! Recipe query engine
//!
//! Turns caller search, ingredient-filter, sort and pagination parameters
//! into consistent reads against the recipe graph.

pub mod filter;
pub mod manager;
pub mod models;
pub mod pagination;
pub mod sort;

pub use filter::RecipeFilter;
pub use manager::RecipeManager;
pub use models::*;
pub use pagination::{Page, PAGE_SIZE};
pub use sort::{SortField, SortOrder, SortSpec};
