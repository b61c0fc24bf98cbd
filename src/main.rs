//! Recipe Glossary - command line front end
//!
//! Runs one recipe query against Neo4j and prints the result as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipe_glossary::recipes::RecipeListRequest;
use recipe_glossary::{AppState, Config};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recipe-glossary")]
#[command(about = "Search, page and rank recipes in a Neo4j recipe graph")]
struct Cli {
    /// Path to a YAML config file (default: ./config.yaml)
    #[arg(short, long, env = "RECIPES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of recipes
    Recipes {
        /// 1-based page number
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        /// Sort key: name, skillLevel or ingredientCount
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction: asc or desc
        #[arg(long)]
        sort_order: Option<String>,

        /// Case-insensitive substring of the recipe name
        #[arg(short, long)]
        search: Option<String>,

        /// Required ingredient (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
    },

    /// Show one recipe with its ingredients, collections, keywords and diet types
    Recipe {
        /// Recipe id
        id: String,
    },

    /// Recipes sharing the most ingredients with a recipe
    Similar {
        /// Recipe id
        id: String,
    },

    /// List one page of an author's recipes
    Author {
        /// Author name
        name: String,

        /// 1-based page number
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
    },

    /// Show the dashboard rankings and the recipe total
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_glossary=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_yaml_and_env(cli.config.as_deref())?;
    let state = AppState::new(config).await?;
    tracing::info!("Connected to Neo4j at {}", state.config.neo4j_uri);

    match cli.command {
        Commands::Recipes {
            page,
            sort_by,
            sort_order,
            search,
            ingredients,
        } => {
            let req = RecipeListRequest {
                page_number: page,
                sort_by,
                sort_order,
                search_query: search,
                ingredient_filters: ingredients,
            };
            print_json(&state.recipes.get_recipes(&req).await?)
        }
        Commands::Recipe { id } => print_json(&state.recipes.get_by_id(&id).await?),
        Commands::Similar { id } => print_json(&state.recipes.similar_recipes(&id).await?),
        Commands::Author { name, page } => {
            print_json(&state.recipes.author_recipes_page(&name, page).await?)
        }
        Commands::Stats => print_json(&state.recipes.dashboard().await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
