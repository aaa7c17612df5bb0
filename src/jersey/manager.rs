use crate::database::Database;
use crate::error::Error;

use super::{Jersey, JerseyId};

#[tracing::instrument(skip(db))]
pub async fn get_jerseys(db: &dyn Database) -> Result<Vec<Jersey>, Error> {
    let jerseys = db.jerseys().fetch_jerseys().await?;

    Ok(jerseys)
}

#[tracing::instrument(skip(db))]
pub async fn get_jersey_by_id(db: &dyn Database, jersey_id: JerseyId) -> Result<Jersey, Error> {
    let jersey = db
        .jerseys()
        .fetch_jersey_by_id(jersey_id)
        .await?
        .ok_or(Error::JerseyNotFound { jersey_id })?;

    Ok(jersey)
}
