use crate::config::{ApiConfig, StorageBackend};
use crate::handlers::AppState;
use crate::routes::configure_routes;
use crate::storage::SqliteSurveyStorage;
use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use survey_engine::{InMemoryStorage, SurveyStorage};
use tracing::info;

pub fn open_storage(config: &ApiConfig) -> anyhow::Result<Arc<dyn SurveyStorage>> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let storage = SqliteSurveyStorage::open(&config.storage.path)?;
            info!("Database initialized at {:?}", config.storage.path);
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(InMemoryStorage::new()))
        }
    }
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let storage = open_storage(&config)?;
    let state = web::Data::new(
        AppState::new(storage).with_enforce_required(config.responses.enforce_required),
    );
    let origins = config.allowed_origins().to_vec();
    let bind_addr = config.bind_address();

    info!(
        origins = ?origins,
        enforce_required = config.responses.enforce_required,
        "Starting survey API at http://{}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
