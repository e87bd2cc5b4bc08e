// src/main.rs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recipe_server::{Loader, Recipe, RecipesConfig, db, server};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "recipe-server")]
#[command(author, version, about = "Recipe catalog server with bulk JSON ingestion and search", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the recipe document (if needed) and serve the HTTP API
    Serve {
        #[command(flatten)]
        overrides: Overrides,

        /// Address to bind to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Load the recipe document into an empty database and exit
    Load {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Create the database and apply migrations
    Init {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the number of stored recipes
    Stats {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Settings that override the configuration file
#[derive(Args)]
struct Overrides {
    /// Database path
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Recipe document to load instead of the bundled sample
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Skip loading the recipe document
    #[arg(long)]
    no_load: bool,
}

impl Overrides {
    fn apply(self, config: &mut RecipesConfig) {
        if let Some(db_path) = self.db_path {
            config.database.path = db_path;
        }
        if let Some(data_file) = self.data_file {
            config.data.file = Some(data_file);
        }
        if self.no_load {
            config.data.load = false;
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RecipesConfig> {
    match path {
        Some(path) => RecipesConfig::load(path),
        None => Ok(RecipesConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Serve { overrides, bind }) => {
            overrides.apply(&mut config);
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            config.validate()?;

            let server_config = config.to_server_config()?;
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(server::run_server(server_config))
        }
        Some(Commands::Load { overrides }) => {
            overrides.apply(&mut config);
            config.validate()?;

            db::init(&config.database.path)?;
            let mut conn = db::open(&config.database.path)?;
            let loader = Loader::new(config.loader_config());

            info!("Loading recipes from {}", loader.config().source);
            let outcome = loader
                .load_if_needed(&mut conn)
                .context("Failed to load recipe document")?;

            println!("Load result: {}", outcome.status.as_str());
            println!("  Processed: {}", outcome.processed);
            println!("  Skipped:   {}", outcome.skipped);
            println!("  Saved:     {}", outcome.saved);
            println!("  Total:     {}", Recipe::count(&conn)?);
            Ok(())
        }
        Some(Commands::Init { overrides }) => {
            overrides.apply(&mut config);
            config.validate()?;

            db::init(&config.database.path)?;
            println!(
                "Database initialized successfully at: {}",
                config.database.path.display()
            );
            Ok(())
        }
        Some(Commands::Stats { overrides }) => {
            overrides.apply(&mut config);
            config.validate()?;

            db::init(&config.database.path)?;
            let conn = db::open(&config.database.path)?;
            println!("Recipes: {}", Recipe::count(&conn)?);
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("Recipe Server v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'recipe-server --help' for usage information");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "recipe-server",
            "serve",
            "--db-path",
            "/tmp/r.db",
            "--no-load",
            "--bind",
            "127.0.0.1:3000",
        ])
        .unwrap();

        let mut config = RecipesConfig::default();
        match cli.command {
            Some(Commands::Serve { overrides, bind }) => {
                overrides.apply(&mut config);
                assert_eq!(bind.as_deref(), Some("127.0.0.1:3000"));
            }
            _ => panic!("expected serve command"),
        }
        assert_eq!(config.database.path, PathBuf::from("/tmp/r.db"));
        assert!(!config.data.load);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli = Cli::try_parse_from(["recipe-server", "stats", "--config", "recipes.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("recipes.toml")));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
