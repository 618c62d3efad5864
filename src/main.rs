use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use car_directory::{api, config::ServerConfig, service::CarService};

#[derive(Parser)]
#[command(name = "cardir")]
#[command(about = "In-memory car directory served over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port for the HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Start with no cars instead of the sample data
        #[arg(long)]
        empty: bool,
    },
    /// Print the resolved configuration
    Config,
}

/// Initialize tracing, letting `RUST_LOG` override the configured filter
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let service = if config.seed_sample_data {
        CarService::with_sample_data()
    } else {
        CarService::new()
    };
    tracing::info!("Loaded {} cars", service.len());

    let app = api::create_router(service);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Car directory listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ServerConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Some(Commands::Serve { host, port, empty }) => {
            config.apply_overrides(host, port, empty);

            init_tracing(&config.log_filter);
            serve(config).await?;
        }
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        None => {
            init_tracing(&config.log_filter);
            serve(config).await?;
        }
    }

    Ok(())
}
