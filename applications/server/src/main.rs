/// Album Countdown Server - countdown through the top 500 albums
use clap::{Parser, Subcommand};
use countdown_core::{catalog, AccountRepository};
use countdown_server::{
    config::ServerConfig, create_router, services::AuthService, state::AppState,
};
use countdown_storage::SqliteStore;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "countdown-server")]
#[command(about = "Album countdown API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load the album catalog from a CSV file
    Seed {
        /// CSV with Rank, Artist, Album, Info and Description columns
        path: PathBuf,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List all users
    ListUsers {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "countdown_server=info,countdown_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::Seed { path, config } => {
            seed(&path, config.as_deref()).await?;
        }
        Commands::ListUsers { config } => {
            list_users(config.as_deref()).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    let mut config = ServerConfig::load_from(path)?;
    config.validate()?;
    Ok(config)
}

/// Open the database, creating its directory if needed, and migrate it
async fn open_store(database_url: &str) -> anyhow::Result<SqliteStore> {
    if let Some(file) = database_url
        .strip_prefix("sqlite://")
        .filter(|path| !path.starts_with(':'))
    {
        if let Some(dir) = Path::new(file).parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
    }

    let pool = countdown_storage::create_pool(database_url).await?;
    countdown_storage::run_migrations(&pool).await?;
    Ok(SqliteStore::new(pool))
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Album Countdown server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = Arc::new(open_store(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let album_count = countdown_storage::albums::count(store.pool()).await?;
    if album_count == 0 {
        tracing::warn!("Album catalog is empty, run `countdown-server seed <csv>` first");
    } else {
        tracing::info!(album_count, "Album catalog loaded");
    }

    // Initialize auth service
    let auth_service = AuthService::new(&config.auth.jwt_secret, config.auth.jwt_expiration_hours)
        .with_bcrypt_cost(config.auth.bcrypt_cost);
    let auth_service = Arc::new(auth_service);
    tracing::info!("Auth service initialized");

    // Build application state
    let app_state = AppState::new(store, auth_service);

    // Build router
    let app = create_router(app_state, &config.cors.allowed_origins);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

async fn seed(csv_path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config.storage.database_url).await?;

    let rows = countdown_storage::catalog_import::read_catalog_file(csv_path)?;
    tracing::info!(rows = rows.len(), path = %csv_path.display(), "Read catalog");

    let report = catalog::seed(&store, rows).await?;

    println!(
        "Seeded albums: {} inserted, {} skipped",
        report.inserted, report.skipped
    );

    Ok(())
}

async fn list_users(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config.storage.database_url).await?;

    let accounts = store.list_accounts().await?;

    println!("Users:");
    for account in accounts {
        println!("  {} - {} <{}>", account.id, account.username, account.email);
    }

    Ok(())
}
