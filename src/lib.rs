use std::sync::Arc;

use actix_web::web::{self, Data, FormConfig, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod jersey;
pub mod narrator;
pub mod seed;
pub mod typedid;
pub mod wizard;

pub use campaign::{ActionResultBody, CampaignBody, DashboardBody, TakeActionBody};
pub use cart::{CartBody, QuoteBody, QuoteLineBody};
pub use catalog::{BrowseBody, CatalogQuery, HighlightsBody};
pub use config::{Config, Storage};
pub use database::{Database, MemoryDatabase, MongoDatabase};
pub use error::Error;
pub use jersey::JerseyBody;
pub use narrator::Narrator;
pub use wizard::{TogglePersonaBody, WizardBody};

/// Registers every route along with the extractor configs that render
/// rejected input in the common error format.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(FormConfig::default().error_handler(|err, _req| {
        // format form errors with custom format
        Error::InvalidForm(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(wizard::endpoints::get_personas)
    .service(wizard::endpoints::open_wizard)
    .service(wizard::endpoints::get_wizard_by_id)
    .service(wizard::endpoints::update_draft)
    .service(wizard::endpoints::toggle_persona)
    .service(wizard::endpoints::advance_wizard)
    .service(wizard::endpoints::retreat_wizard)
    .service(wizard::endpoints::submit_wizard)
    .service(campaign::endpoints::get_dashboard)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(campaign::endpoints::delete_campaign)
    .service(campaign::endpoints::take_action)
    .service(jersey::endpoints::get_jerseys)
    .service(jersey::endpoints::get_jersey_by_id)
    .service(catalog::endpoints::browse_catalog)
    .service(catalog::endpoints::get_highlights)
    .service(cart::endpoints::quote_cart)
    .default_service(web::to(|| async { Error::PathNotFound.error_response() }));
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db: Arc<dyn Database> = match config.storage {
        Storage::Memory => {
            info!("using in-memory storage");
            Arc::new(MemoryDatabase::new())
        }
        Storage::Mongo => {
            info!("connecting to db: {}", config.mongo_uri);
            let db = Client::with_uri_str(&config.mongo_uri)
                .await?
                .database(&config.mongo_database);
            Arc::new(MongoDatabase::initialize(db).await?)
        }
    };

    if config.seed {
        seed::seed(&*db).await?;
    }

    let db = Data::from(db);
    let narrator = Data::new(Narrator::new(config.narrator_delay));

    info!(bind = %config.bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(narrator.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await?;

    Ok(())
}
