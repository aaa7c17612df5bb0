use async_trait::async_trait;
use mongodb::bson;

use crate::database::memory::MemoryWizardStore;
use crate::database::{next_modified_at, MongoWizardStore};
use crate::error::Error;

use super::{Wizard, WizardId};

#[async_trait]
pub trait WizardStore: Send + Sync {
    async fn insert_wizard(&self, wizard: &Wizard) -> Result<(), Error>;

    async fn fetch_wizard_by_id(&self, wizard_id: WizardId) -> Result<Option<Wizard>, Error>;

    /// Persists `wizard` if nobody else changed it since it was fetched.
    async fn update_wizard(&self, wizard: Wizard) -> Result<Wizard, Error>;

    async fn delete_wizard(&self, wizard_id: WizardId) -> Result<(), Error>;
}

#[async_trait]
impl WizardStore for MongoWizardStore {
    #[tracing::instrument(skip(self))]
    async fn insert_wizard(&self, wizard: &Wizard) -> Result<(), Error> {
        self.insert_one(wizard, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_wizard_by_id(&self, wizard_id: WizardId) -> Result<Option<Wizard>, Error> {
        let wizard = self.find_one(bson::doc! { "_id": wizard_id }, None).await?;

        Ok(wizard)
    }

    #[tracing::instrument(skip(self))]
    async fn update_wizard(&self, mut wizard: Wizard) -> Result<Wizard, Error> {
        let old_modified_at = bson::DateTime::from_chrono(wizard.modified_at);
        wizard.modified_at = next_modified_at(wizard.modified_at);

        let result = self
            .replace_one(
                bson::doc! { "_id": wizard.id, "modified_at": old_modified_at },
                &wizard,
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::ConcurrentModificationDetected);
        }

        Ok(wizard)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_wizard(&self, wizard_id: WizardId) -> Result<(), Error> {
        self.delete_one(bson::doc! { "_id": wizard_id }, None)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl WizardStore for MemoryWizardStore {
    #[tracing::instrument(skip(self))]
    async fn insert_wizard(&self, wizard: &Wizard) -> Result<(), Error> {
        self.documents.write().await.push(wizard.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_wizard_by_id(&self, wizard_id: WizardId) -> Result<Option<Wizard>, Error> {
        let wizards = self.documents.read().await;

        Ok(wizards.iter().find(|wizard| wizard.id == wizard_id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn update_wizard(&self, mut wizard: Wizard) -> Result<Wizard, Error> {
        let mut wizards = self.documents.write().await;
        let stored = wizards
            .iter_mut()
            .find(|stored| stored.id == wizard.id && stored.modified_at == wizard.modified_at)
            .ok_or(Error::ConcurrentModificationDetected)?;

        wizard.modified_at = next_modified_at(wizard.modified_at);
        *stored = wizard.clone();

        Ok(wizard)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_wizard(&self, wizard_id: WizardId) -> Result<(), Error> {
        self.documents
            .write()
            .await
            .retain(|wizard| wizard.id != wizard_id);

        Ok(())
    }
}
