use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mongodb::{bson, Collection};

use crate::campaign::db::CampaignStore;
use crate::campaign::{self, Campaign};
use crate::error::Error;
use crate::jersey::db::JerseyStore;
use crate::jersey::Jersey;
use crate::wizard::db::WizardStore;
use crate::wizard::Wizard;

pub mod memory;

pub use memory::MemoryDatabase;

pub type MongoCampaignStore = Collection<Campaign>;
pub type MongoWizardStore = Collection<Wizard>;
pub type MongoJerseyStore = Collection<Jersey>;

/// The timestamp to stamp on an updated document. Always at least a
/// millisecond past `previous` so that `modified_at` checks stay meaningful
/// even when bson truncates to milliseconds.
pub fn next_modified_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    let floor = previous + Duration::milliseconds(1);

    if now > floor {
        now
    } else {
        floor
    }
}

#[async_trait]
pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;

    fn wizards(&self) -> &dyn WizardStore;

    fn jerseys(&self) -> &dyn JerseyStore;

    /// Removes everything from every store.
    async fn drop(&self) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    campaigns: MongoCampaignStore,
    wizards: MongoWizardStore,
    jerseys: MongoJerseyStore,
    db: mongodb::Database,
}

impl MongoDatabase {
    pub async fn initialize(db: mongodb::Database) -> Result<MongoDatabase, Error> {
        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        campaign::db::initialize(&db).await?;

        Ok(MongoDatabase {
            campaigns: db.collection("campaigns"),
            wizards: db.collection("wizards"),
            jerseys: db.collection("jerseys"),
            db,
        })
    }
}

#[async_trait]
impl Database for MongoDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    fn wizards(&self) -> &dyn WizardStore {
        &self.wizards
    }

    fn jerseys(&self) -> &dyn JerseyStore {
        &self.jerseys
    }

    #[tracing::instrument(skip(self))]
    async fn drop(&self) -> Result<(), Error> {
        self.db.drop(None).await?;
        campaign::db::initialize(&self.db).await?;

        Ok(())
    }
}
