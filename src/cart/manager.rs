use crate::database::Database;
use crate::error::Error;
use crate::jersey::JerseyId;

use super::Cart;

/// Builds a cart from `(jersey, quantity)` pairs, looking each jersey up in
/// the store.
#[tracing::instrument(skip(db))]
pub async fn quote(db: &dyn Database, lines: &[(JerseyId, u32)]) -> Result<Cart, Error> {
    let mut cart = Cart::new();

    for &(jersey_id, quantity) in lines {
        let jersey = db
            .jerseys()
            .fetch_jersey_by_id(jersey_id)
            .await?
            .ok_or(Error::JerseyNotFound { jersey_id })?;

        cart.insert(jersey, quantity)?;
    }

    Ok(cart)
}
