use actix_web::web::{Data, Json};
use actix_web::{get, post};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::jersey::JerseyBody;

use super::{manager, CatalogQuery};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrowseBody {
    pub count: usize,
    pub jerseys: Vec<JerseyBody>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HighlightsBody {
    pub featured: Vec<JerseyBody>,
    pub deals: Vec<JerseyBody>,
}

#[post("/catalog/browse")]
#[tracing::instrument(skip(db))]
pub async fn browse_catalog(
    db: Data<dyn Database>,
    body: Json<CatalogQuery>,
) -> Result<Json<BrowseBody>, Error> {
    let query = body.into_inner();
    let jerseys = manager::browse(&**db, &query).await?;

    Ok(Json(BrowseBody {
        count: jerseys.len(),
        jerseys: jerseys.into_iter().map(JerseyBody::render).collect(),
    }))
}

#[get("/catalog/highlights")]
#[tracing::instrument(skip(db))]
pub async fn get_highlights(db: Data<dyn Database>) -> Result<Json<HighlightsBody>, Error> {
    let highlights = manager::highlights(&**db).await?;

    Ok(Json(HighlightsBody {
        featured: highlights
            .featured
            .into_iter()
            .map(JerseyBody::render)
            .collect(),
        deals: highlights.deals.into_iter().map(JerseyBody::render).collect(),
    }))
}
