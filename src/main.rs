use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use merenda_match::config::Settings;
use merenda_match::core::{Catalog, Enricher, Matcher};
use merenda_match::models::{CostModel, EnrichmentProfile};
use merenda_match::routes::{self, AppState};
use merenda_match::services::{load_catalog, DatasetError, DatasetLoader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration (CONFIG_PATH selects an explicit file)
    let settings = Settings::load_from_env()
        .and_then(|s| s.validate().map(|_| s))
        .unwrap_or_else(|e| {
            eprintln!("Failed to load configuration: {}", e);
            panic!("Configuration error: {}", e);
        });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting EcoMerenda matching service...");

    // Build the catalog once, before serving any request
    let profile: EnrichmentProfile = settings.enrichment.clone().into();
    let enricher = Enricher::new(profile);
    let loader = DatasetLoader::new(&settings.dataset.path);

    let catalog = match load_catalog(&loader, &enricher, settings.dataset.seed).await {
        Ok(catalog) => catalog,
        Err(DatasetError::NotFound(path)) => {
            warn!(
                "Dataset {} not found, starting with an empty catalog",
                path.display()
            );
            Catalog::empty()
        }
        Err(e) => {
            error!("Failed to load dataset ({}), starting with an empty catalog", e);
            Catalog::empty()
        }
    };

    info!(
        "Catalog ready: {} schools, {} farmers, {} features",
        catalog.schools().len(),
        catalog.farmers().len(),
        catalog.enriched().features.len()
    );

    let cost_model: CostModel = settings.savings.clone().into();
    let matcher = Matcher::new(cost_model);

    info!("Matcher initialized with cost model: {:?}", cost_model);

    let app_state = AppState::new(catalog, matcher, settings.matching.clone());

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
