//! Iconografix - browse icon catalogs and hand icons to an embedding host

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use iconografix_core::catalog::AssetSource;
use iconografix_core::{IconografixConfig, ProviderRegistry};

mod add_cli;
mod browse_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "iconografix", version, about = "Browse icon catalogs and add icons to a host")]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// JSON configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Asset root, overriding the configured one
    #[clap(long, global = true)]
    assets: Option<String>,

    /// Log level
    #[clap(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List icon sets and their sizes
    Providers {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Search an icon set by name
    Search {
        /// Search query (empty lists everything)
        query: Option<String>,

        #[clap(flatten)]
        page: browse_cli::PageArgs,
    },

    /// Show a random page of icons
    Random {
        #[clap(flatten)]
        page: browse_cli::PageArgs,
    },

    /// Print the markup of one icon
    Show {
        /// Icon name (file name without .svg)
        name: String,

        /// Icon set id (defaults to the configured default provider)
        #[clap(long, short)]
        provider: Option<String>,
    },

    /// Select icons and post the selection to the host as JSON lines on stdout
    Add(add_cli::AddArgs),
}

/// Initialize tracing with CLI flags
///
/// Logs always go to stderr; stdout carries command output.
fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Configuration plus the registry built from it
pub(crate) struct AppContext {
    pub config: IconografixConfig,
    pub registry: ProviderRegistry,
}

impl AppContext {
    fn load(config_path: Option<&std::path::Path>, assets: Option<String>) -> Result<Self> {
        let mut config = IconografixConfig::load(config_path).context("Failed to load configuration")?;
        if let Some(assets) = assets {
            config.assets_path = assets;
        }

        debug!(
            "Loaded configuration: assets={}, default provider={}, production={}",
            config.assets_path, config.default_provider, config.production
        );

        let source = asset_source(&config.assets_path)?;
        let registry = ProviderRegistry::from_config(&config, source)?;
        Ok(Self { config, registry })
    }

    /// Make `provider` active, or keep the configured default
    pub fn activate(&mut self, provider: Option<&str>) -> Result<()> {
        if let Some(id) = provider {
            if !self.registry.set_active(id) {
                anyhow::bail!(
                    "Unknown provider '{}'. Run `iconografix providers` to list them.",
                    id
                );
            }
        }
        Ok(())
    }
}

#[cfg(feature = "http")]
fn asset_source(assets_path: &str) -> Result<Arc<dyn AssetSource>> {
    use iconografix_core::catalog::{FsSource, HttpSource};

    if assets_path.starts_with("http://") || assets_path.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(assets_path)?))
    } else {
        Ok(Arc::new(FsSource::new(assets_path)))
    }
}

#[cfg(not(feature = "http"))]
fn asset_source(assets_path: &str) -> Result<Arc<dyn AssetSource>> {
    use iconografix_core::catalog::FsSource;

    if assets_path.starts_with("http://") || assets_path.starts_with("https://") {
        anyhow::bail!("Remote asset roots need the http feature. Rebuild with --features http");
    }
    Ok(Arc::new(FsSource::new(assets_path)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level, cli.log_json);

    let mut ctx = AppContext::load(cli.config.as_deref(), cli.assets)?;

    match cli.command {
        Command::Providers { json } => browse_cli::execute_providers(&ctx, json).await,
        Command::Search { query, page } => {
            ctx.activate(page.provider.as_deref())?;
            browse_cli::execute_search(&ctx, query.as_deref().unwrap_or(""), &page).await
        }
        Command::Random { page } => {
            ctx.activate(page.provider.as_deref())?;
            browse_cli::execute_random(&ctx, &page).await
        }
        Command::Show { name, provider } => {
            ctx.activate(provider.as_deref())?;
            browse_cli::execute_show(&ctx, &name).await
        }
        Command::Add(args) => {
            ctx.activate(args.provider.as_deref())?;
            add_cli::execute_add(&ctx, &args).await
        }
    }
}
