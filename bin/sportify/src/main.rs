//! # Sportify Binary
//!
//! The entry point that assembles the application from configuration and
//! compile-time storage features.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use sf_api::middleware::{cors_policy, security_headers, standard_middleware};
use sf_api::{configure_routes, AppState};
use sf_config::{AppConfig, LogFormat, StorageBackend, StorageConfig};
use sf_core::{KeyValueStore, MemoryKeyValueStore, SponsorStore};
use sf_submit_http::HttpSubmissionClient;
use tracing_subscriber::EnvFilter;

// Feature-gated imports: backends are compiled to order
#[cfg(feature = "storage-file")]
use sf_storage_file::FileKeyValueStore;

#[cfg(feature = "storage-sqlite")]
use sf_storage_sqlite::SqliteKeyValueStore;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn open_storage(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match cfg.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryKeyValueStore::new())),
        #[cfg(feature = "storage-file")]
        StorageBackend::File => Ok(Arc::new(FileKeyValueStore::new(cfg.data_dir.clone()))),
        #[cfg(feature = "storage-sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(SqliteKeyValueStore::new(&cfg.sqlite_url).await?)),
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("storage backend {other:?} is not compiled into this binary"),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.log.format);

    // 1. Storage slot for sponsor records
    let backend = open_storage(&config.storage).await?;
    let store = SponsorStore::with_key(backend, config.storage.slot_key.clone());

    // 2. Remote endpoint receiving applications
    let submitter = HttpSubmissionClient::new(
        config.submission.endpoint.clone(),
        config.submission.timeout_secs.map(Duration::from_secs),
    )?;

    // 3. Shared state (dynamic dispatch keeps plugins swappable)
    let state = web::Data::new(AppState::new(store, Arc::new(submitter)));

    let (host, port) = config.bind_addr();
    tracing::info!(
        %host,
        port,
        storage = ?config.storage.backend,
        endpoint = %config.submission.endpoint,
        "sportify starting"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(cors_policy())
            .wrap(standard_middleware())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
