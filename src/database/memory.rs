use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::campaign::db::CampaignStore;
use crate::campaign::Campaign;
use crate::error::Error;
use crate::jersey::db::JerseyStore;
use crate::jersey::Jersey;
use crate::wizard::db::WizardStore;
use crate::wizard::Wizard;

use super::Database;

/// An insertion-ordered list of documents guarded by an async lock.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    pub(crate) documents: RwLock<Vec<T>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> MemoryCollection<T> {
        MemoryCollection {
            documents: RwLock::new(vec![]),
        }
    }
}

impl<T> MemoryCollection<T> {
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }
}

pub type MemoryCampaignStore = MemoryCollection<Campaign>;
pub type MemoryWizardStore = MemoryCollection<Wizard>;
pub type MemoryJerseyStore = MemoryCollection<Jersey>;

/// Keeps every store in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
    wizards: MemoryWizardStore,
    jerseys: MemoryJerseyStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
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
        self.campaigns.clear().await;
        self.wizards.clear().await;
        self.jerseys.clear().await;

        Ok(())
    }
}
