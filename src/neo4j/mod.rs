//! Neo4j client and models for the recipe graph

pub mod client;
mod impl_recipe_store;
pub mod models;
pub mod traits;

pub use client::Neo4jClient;
pub use models::*;
pub use traits::RecipeStore;

#[cfg(test)]
pub(crate) mod mock;
