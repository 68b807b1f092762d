use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod security;
    pub mod tags;
    pub mod events {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod health {
        pub mod routes;
    }
}
mod config;
mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Notifier entry point
///
/// Receives Firestore document events over HTTP and emails new feedback and
/// issue reports to the team.
/// - config/: environment configuration (server, Firebase, mail, secret)
/// - setup/: dependency injection and server setup
/// - api/: route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Register the Firebase app once for the whole process
    let firebase = firestore::app::initialize_app(config.firebase.options())?;
    tracing::info!(project = firebase.project_id(), "Firebase app initialized");

    // 5. Wire dependencies
    let container = DependencyContainer::new(&config, firebase)?;

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
