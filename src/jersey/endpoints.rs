use actix_web::get;
use actix_web::web::{Data, Json, Path};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Condition, Jersey, JerseyId, Size, Sport};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JerseyBody {
    pub id: JerseyId,
    pub name: String,
    pub player: String,
    pub team: String,
    pub number: i32,
    pub sport: Sport,
    pub year: i32,
    pub price: f64,
    pub original_price: f64,
    pub savings_percentage: i32,
    pub size: Size,
    pub condition: Condition,
    pub is_authentic: bool,
    pub is_vintage: bool,
    pub seller_id: String,
    pub seller_rating: f64,
    pub image_url: String,
}

impl JerseyBody {
    pub fn render(jersey: Jersey) -> JerseyBody {
        JerseyBody {
            savings_percentage: jersey.savings_percentage(),
            id: jersey.id,
            name: jersey.name,
            player: jersey.player,
            team: jersey.team,
            number: jersey.number,
            sport: jersey.sport,
            year: jersey.year,
            price: jersey.price,
            original_price: jersey.original_price,
            size: jersey.size,
            condition: jersey.condition,
            is_authentic: jersey.is_authentic,
            is_vintage: jersey.is_vintage,
            seller_id: jersey.seller_id,
            seller_rating: jersey.seller_rating,
            image_url: jersey.image_url,
        }
    }
}

#[get("/jerseys")]
#[tracing::instrument(skip(db))]
pub async fn get_jerseys(db: Data<dyn Database>) -> Result<Json<Vec<JerseyBody>>, Error> {
    let jerseys = manager::get_jerseys(&**db).await?;

    let body = jerseys.into_iter().map(JerseyBody::render).collect();

    Ok(Json(body))
}

#[get("/jerseys/{jersey_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_jersey_by_id(
    db: Data<dyn Database>,
    params: Path<JerseyId>,
) -> Result<Json<JerseyBody>, Error> {
    let jersey_id = params.into_inner();
    let jersey = manager::get_jersey_by_id(&**db, jersey_id).await?;

    Ok(Json(JerseyBody::render(jersey)))
}
