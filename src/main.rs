//! Bodur Oto Kurtarma site - Main entry point
//!
//! Serves the public marketing page and the session-protected admin area,
//! seeding the database with default content on first start.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bodur_site::config::{self, Config};
use bodur_site::db::Database;
use bodur_site::seed;
use bodur_site::web::{AppState, AuthStore, ContentStore, site_router};

/// Content-managed marketing site for Bodur Oto Kurtarma
#[derive(Parser)]
#[command(name = "bodur-site")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        listen: Option<SocketAddr>,
    },

    /// Admin user management
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Generate a default configuration file
    InitConfig {
        /// Output path (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Reset a user's password
    SetPassword {
        /// Username to update
        username: String,

        /// The new password
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    match cli.command {
        Commands::Serve { listen } => {
            // For server mode: log to both stdout and file with rotation
            init_server_logging(Path::new("logs"), filter)?;
            serve(&cli.config, listen).await
        }
        Commands::User { command } => {
            init_cli_logging(filter);
            handle_user_command(command, &cli.config).await
        }
        Commands::InitConfig { output } => {
            init_cli_logging(filter);
            generate_config(output)
        }
    }
}

/// Initialize logging for CLI commands (stdout only).
fn init_cli_logging(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Initialize logging for server mode (stdout + rotating file).
fn init_server_logging(log_dir: &Path, filter: EnvFilter) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    // Daily rotating file appender (e.g., bodur-site.2026-08-30.log)
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("bodur-site")
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| "Failed to create log file appender")?;

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Leak the guard to keep the writer alive for the lifetime of the program
    std::mem::forget(_guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    info!("Logging to: {}", log_dir.display());
    Ok(())
}

/// Run the web server
async fn serve(config_path: &Path, listen_override: Option<SocketAddr>) -> Result<()> {
    let config = Config::load(config_path)?;

    let listen_addr: SocketAddr = match listen_override {
        Some(addr) => addr,
        None => config
            .http
            .listen_addr
            .parse()
            .context("Invalid [http] listen_addr in config")?,
    };

    let db = Database::new(&config.database).await?;
    seed::run(&db.pool(), &config.admin.username, &config.admin.password).await?;

    let state = Arc::new(AppState {
        auth: AuthStore::new(db.pool()),
        content: ContentStore::new(db.pool()),
        session_timeout_secs: config.session.timeout_secs,
        image_dir: config.uploads.image_dir.clone(),
    });

    // Periodically sweep expired sessions
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            ticker.tick().await;
            match cleanup_state.auth.cleanup_expired_sessions().await {
                Ok(0) => {}
                Ok(removed) => info!("Removed {removed} expired sessions"),
                Err(e) => warn!("Session cleanup failed: {e:#}"),
            }
        }
    });

    let app = site_router(state, &config.uploads.static_dir);

    info!("Bodur site starting...");
    info!("Listening on: {listen_addr}");

    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Handle user subcommands
async fn handle_user_command(command: UserCommands, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::new(&config.database).await?;
    let auth = AuthStore::new(db.pool());

    match command {
        UserCommands::SetPassword { username, password } => {
            auth.update_password(&username, &password).await?;
            println!("Password updated for {username}.");
            Ok(())
        }
    }
}

/// Generate a default configuration file
fn generate_config(output: Option<PathBuf>) -> Result<()> {
    let config = config::default_config_template();

    match output {
        Some(path) => {
            std::fs::write(&path, &config)?;
            println!("Configuration written to: {}", path.display());
        }
        None => {
            print!("{config}");
        }
    }

    Ok(())
}
