//! WebPageTest mock API server.
//!
//! ```text
//!   WebPageTest client (under test)
//!        │  GET http://www.webpagetest.org/testStatus.php?test=...
//!        │  (server configured as HTTP proxy, or pointed at directly)
//!        ▼
//!   ┌──────────┐    ┌────────────┐    ┌──────────────┐
//!   │   http   │───▶│  routing   │───▶│   fixtures/  │
//!   │  server  │    │  registry  │    │  responses   │
//!   └──────────┘    └────────────┘    └──────────────┘
//!        ▲                 │
//!        └─ 200 + fixture / 404 / 501 ◀┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use wpt_mock_server::config::{load_config, MockConfig};
use wpt_mock_server::http::HttpServer;
use wpt_mock_server::lifecycle::{signals, Shutdown};
use wpt_mock_server::observability::{logging, metrics};
use wpt_mock_server::routing::MockRegistry;

#[derive(Parser)]
#[command(name = "wpt-mock-server")]
#[command(about = "Serve canned WebPageTest API responses for client tests", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL to intercept (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Fixture directory (overrides the config file).
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Bind address (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,

    /// Answer requests addressed to any host.
    #[arg(long)]
    match_any_host: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the mock API (default)
    Serve,
    /// Print the effective route table
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Report routes whose fixture file is missing
    Check,
}

impl Cli {
    fn resolve_config(&self) -> Result<MockConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MockConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(dir) = &self.fixtures {
            config.fixtures.dir = dir.clone();
        }
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if self.match_any_host {
            config.server.match_any_host = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability.log_level);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::Routes { json } => print_routes(&config, json)?,
        Commands::Check => return check(&config),
    }

    Ok(ExitCode::SUCCESS)
}

async fn serve(config: MockConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.server.bind_address,
        host = %config.server.host,
        fixtures = %config.fixtures.dir.display(),
        match_any_host = config.server.match_any_host,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    let missing = server.registry().missing_fixtures();
    if !missing.is_empty() {
        tracing::warn!(count = missing.len(), "Some routes reference missing fixtures");
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(config: &MockConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let routes = config.route_table();
    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    for route in routes {
        let target = if route.query.is_empty() {
            route.path.clone()
        } else {
            format!("{}?{}", route.path, route.query)
        };
        match route.fixture_name() {
            Some(name) => println!("200 {target} -> {name}"),
            None => println!("404 {target}"),
        }
    }
    Ok(())
}

fn check(config: &MockConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let registry = MockRegistry::from_config(config)?;
    let missing = registry.missing_fixtures();

    if missing.is_empty() {
        println!(
            "All {} routes resolved in {}",
            registry.intercepts().len(),
            registry.fixtures_dir().display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    for (key, path) in &missing {
        eprintln!("missing fixture for {key}: {}", path.display());
    }
    Ok(ExitCode::FAILURE)
}
