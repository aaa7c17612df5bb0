use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;

use crate::database::memory::MemoryJerseyStore;
use crate::database::MongoJerseyStore;
use crate::error::Error;

use super::{Jersey, JerseyId};

#[async_trait]
pub trait JerseyStore: Send + Sync {
    async fn insert_jerseys(&self, jerseys: &[Jersey]) -> Result<(), Error>;

    /// All jerseys in listing order.
    async fn fetch_jerseys(&self) -> Result<Vec<Jersey>, Error>;

    async fn fetch_jersey_by_id(&self, jersey_id: JerseyId) -> Result<Option<Jersey>, Error>;
}

#[async_trait]
impl JerseyStore for MongoJerseyStore {
    #[tracing::instrument(skip(self, jerseys))]
    async fn insert_jerseys(&self, jerseys: &[Jersey]) -> Result<(), Error> {
        if jerseys.is_empty() {
            return Ok(());
        }

        self.insert_many(jerseys, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_jerseys(&self) -> Result<Vec<Jersey>, Error> {
        let jerseys: Vec<Jersey> = self.find(bson::doc! {}, None).await?.try_collect().await?;

        Ok(jerseys)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_jersey_by_id(&self, jersey_id: JerseyId) -> Result<Option<Jersey>, Error> {
        let jersey = self.find_one(bson::doc! { "_id": jersey_id }, None).await?;

        Ok(jersey)
    }
}

#[async_trait]
impl JerseyStore for MemoryJerseyStore {
    #[tracing::instrument(skip(self, jerseys))]
    async fn insert_jerseys(&self, jerseys: &[Jersey]) -> Result<(), Error> {
        self.documents.write().await.extend_from_slice(jerseys);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_jerseys(&self) -> Result<Vec<Jersey>, Error> {
        Ok(self.documents.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_jersey_by_id(&self, jersey_id: JerseyId) -> Result<Option<Jersey>, Error> {
        let jerseys = self.documents.read().await;

        Ok(jerseys.iter().find(|jersey| jersey.id == jersey_id).cloned())
    }
}
