use actix_web::post;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::jersey::{JerseyBody, JerseyId};

use super::{manager, to_cents, CartLine, CartSummary};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteLineBody {
    pub jersey_id: JerseyId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteBody {
    pub lines: Vec<QuoteLineBody>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartLineBody {
    pub jersey: JerseyBody,
    pub quantity: u32,
    pub line_total: f64,
}

impl CartLineBody {
    pub fn render(line: CartLine) -> CartLineBody {
        CartLineBody {
            line_total: to_cents(line.line_total()),
            quantity: line.quantity,
            jersey: JerseyBody::render(line.jersey),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartBody {
    pub lines: Vec<CartLineBody>,
    #[serde(flatten)]
    pub summary: CartSummary,
}

#[post("/cart/quote")]
#[tracing::instrument(skip(db))]
pub async fn quote_cart(
    db: Data<dyn Database>,
    body: Json<QuoteBody>,
) -> Result<Json<CartBody>, Error> {
    let lines: Vec<(JerseyId, u32)> = body
        .into_inner()
        .lines
        .into_iter()
        .map(|line| (line.jersey_id, line.quantity))
        .collect();

    let cart = manager::quote(&**db, &lines).await?;
    let summary = cart.summary();

    Ok(Json(CartBody {
        lines: cart.into_lines().into_iter().map(CartLineBody::render).collect(),
        summary,
    }))
}
