use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use yojana_match::config::{LoggingSettings, Settings, StorageBackend};
use yojana_match::core::{Matcher, SchemeCatalog};
use yojana_match::routes::{self, handle_json_payload_error, AppState};
use yojana_match::services::{PasswordHasher, PostgresClient, UserStore};

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error(what: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("Failed to {}: {}", what, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => {
            init_logging(&settings.logging);
            settings
        }
        Err(e) => {
            init_logging(&LoggingSettings::default());
            return Err(startup_error("load configuration", e));
        }
    };

    info!("Starting Yojana eligibility service...");

    let catalog = SchemeCatalog::load(&settings.catalog.path)
        .map_err(|e| startup_error("load scheme catalog", e))?;
    let matcher = Matcher::new(Arc::new(catalog));

    info!("Scheme catalog ready ({} schemes)", matcher.catalog().len());

    let store = match settings.storage.backend {
        StorageBackend::Postgres => {
            let client = PostgresClient::from_settings(&settings.database)
                .await
                .map_err(|e| startup_error("connect to PostgreSQL", e))?;
            UserStore::Postgres(Arc::new(client))
        }
        StorageBackend::Memory => {
            info!("Using in-memory user store; registrations will not survive a restart");
            UserStore::memory()
        }
    };

    info!("User store initialized ({})", store.backend_name());

    let app_state = AppState {
        matcher,
        store,
        hasher: PasswordHasher::new(settings.security.bcrypt_cost),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
