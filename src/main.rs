use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blog_api::auth::{generate_jwt, Claims};
use blog_api::config::AppConfig;
use blog_api::database::{manager::redact_locator, DatabaseManager, MemoryStoreProvider};
use blog_api::{app, AppState};

#[derive(Parser)]
#[command(name = "blog-api", version, about = "Blog post API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override BLOG_API_PORT / PORT
        #[arg(long)]
        port: Option<u16>,

        /// Keep posts in process memory instead of Postgres
        #[arg(long)]
        in_memory: bool,
    },
    /// Mint a development token signed with JWT_SECRET
    Token {
        /// Value of the `id` claim
        #[arg(long)]
        id: String,

        /// Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)
        #[arg(long)]
        hours: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve { port: None, in_memory: false }) {
        Command::Serve { port, in_memory } => serve(config, port, in_memory).await,
        Command::Token { id, hours } => {
            let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
            let token = generate_jwt(&Claims::new(id, hours)?, &config.security.jwt_secret)?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Blog API in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let manager = if in_memory {
        None
    } else {
        config.require_database_url()?;
        Some(Arc::new(DatabaseManager::new(&config.database)))
    };

    let state = match &manager {
        Some(manager) => {
            tracing::info!("Using datasource {}", redact_locator(&config.database.url));
            AppState::new(config, manager.clone())
        }
        None => {
            tracing::warn!("Using in-memory post store; data is lost on exit");
            if config.database.url.is_empty() {
                config.database.url = "memory://".to_string();
            }
            AppState::new(config, Arc::new(MemoryStoreProvider::new()))
        }
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Blog API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close_all().await;
    }

    tracing::info!("Blog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
