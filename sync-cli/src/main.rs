//! # recipe-sync
//!
//! Command-line front end for the recipe-sync client layer.
//!
//! ## Commands
//!
//! - `categories`: List recipe categories
//! - `recipes`: List a page of recipes
//! - `info`: Show page counts per category
//! - `show`: Print one recipe
//! - `search`: Search recipes by ingredient
//! - `websites`: List websites recipes can be imported from
//! - `import`: Import a recipe from a web page
//! - `create`: Save a recipe from a JSON file
//!
//! ## Example
//!
//! ```bash
//! # Point at a server
//! export RECIPE_SYNC_API_URL=http://localhost:3001/api/v1
//!
//! # Browse
//! recipe-sync categories
//! recipe-sync recipes --category soup --page 2
//!
//! # Find something to cook
//! recipe-sync search egg spinach --mode minimize
//!
//! # Add recipes
//! recipe-sync import https://www.example.com/recipes/apple-pie
//! recipe-sync create pie.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sync_client::{Coordinator, HttpTransport};
use sync_core::{SearchMode, DEFAULT_SEARCH_LIMIT};
use sync_types::RecipeId;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{browse, create, search};
use config::{FileConfig, DEFAULT_CONFIG_FILE, ENV_BASE_URL};

/// Command-line front end for the recipe API.
#[derive(Parser, Debug)]
#[command(name = "recipe-sync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./recipe-sync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:3001/api/v1
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log more (-v debug, -vv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List recipe categories
    Categories,

    /// List a page of recipes
    Recipes {
        /// Only recipes in this category
        #[arg(long, short)]
        category: Option<String>,

        /// Page number, starting at 1
        #[arg(long, short, default_value = "1")]
        page: u32,
    },

    /// Show page counts per category
    Info,

    /// Print one recipe as JSON
    Show {
        /// Recipe id
        id: RecipeId,
    },

    /// Search recipes by ingredient
    Search {
        /// Ingredients to look for
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Ranking: minimize missing or maximize used ingredients
        #[arg(long, short, default_value = "maximize")]
        mode: SearchMode,

        /// Maximum number of results (at most 30)
        #[arg(long, short = 'n', default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },

    /// List websites recipes can be imported from
    Websites,

    /// Import a recipe from a web page
    Import {
        /// Page to import
        url: String,
    },

    /// Save a recipe from a JSON file
    Create {
        /// Recipe JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Resolve configuration
    let (path, required) = match cli.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let config = FileConfig::load(&path, required)
        .await?
        .resolve(std::env::var(ENV_BASE_URL).ok(), cli.base_url);

    let transport = HttpTransport::new(&config).context("Failed to create HTTP client")?;
    let coordinator = Coordinator::new(&config, transport)
        .with_context(|| format!("Invalid API base URL {:?}", config.base_url))?;

    // Print notifications as they arrive
    let mut notifications = coordinator.notifications().subscribe();
    let printer = tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            eprintln!("{notification}");
        }
    });

    let result = match cli.command {
        Commands::Categories => browse::categories(&coordinator).await,
        Commands::Recipes { category, page } => {
            browse::recipes(&coordinator, category, page).await
        }
        Commands::Info => browse::info(&coordinator).await,
        Commands::Show { id } => browse::show(&coordinator, id).await,
        Commands::Search {
            ingredients,
            mode,
            limit,
        } => search::run(&coordinator, ingredients, mode, limit).await,
        Commands::Websites => create::websites(&coordinator).await,
        Commands::Import { url } => create::import(&coordinator, &url).await,
        Commands::Create { file } => create::from_file(&coordinator, &file).await,
    };

    // Closing the channel lets the printer drain and stop.
    coordinator.shutdown();
    printer.await.context("Notification printer panicked")?;

    result
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
