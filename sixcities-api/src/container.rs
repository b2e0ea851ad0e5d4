use anyhow::Context;
use sixcities_core::{DefaultOfferService, OfferRepository, OfferService};
use sixcities_store::app_config::{Config, StorageBackend};
use sixcities_store::{DbClient, InMemoryOfferRepository, PostgresOfferRepository};
use std::sync::Arc;
use tracing::info;

use crate::offers::OfferController;

/// One shared instance each of the storage model, the service and the
/// controller. Cloning the container clones handles, never the components.
#[derive(Clone)]
pub struct OfferContainer {
    pub model: Arc<dyn OfferRepository>,
    pub service: Arc<dyn OfferService>,
    pub controller: Arc<OfferController>,
}

pub fn create_offer_container(model: Arc<dyn OfferRepository>) -> OfferContainer {
    let service: Arc<dyn OfferService> = Arc::new(DefaultOfferService::new(model.clone()));
    let controller = Arc::new(OfferController::new(service.clone()));

    OfferContainer {
        model,
        service,
        controller,
    }
}

/// Build the storage model selected by `storage.backend`
pub async fn connect_offer_model(config: &Config) -> anyhow::Result<Arc<dyn OfferRepository>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            if config.database.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
            }
            info!("Offer storage: postgres");
            Ok(Arc::new(PostgresOfferRepository::new(db.pool)))
        }
        StorageBackend::Memory => {
            info!("Offer storage: in-memory");
            Ok(Arc::new(InMemoryOfferRepository::new()))
        }
    }
}
