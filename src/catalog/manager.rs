use crate::database::Database;
use crate::error::Error;
use crate::jersey::Jersey;

use super::{deals, evaluate, featured, CatalogQuery};

#[derive(Clone, Debug, PartialEq)]
pub struct Highlights {
    pub featured: Vec<Jersey>,
    pub deals: Vec<Jersey>,
}

#[tracing::instrument(skip(db))]
pub async fn browse(db: &dyn Database, query: &CatalogQuery) -> Result<Vec<Jersey>, Error> {
    let jerseys = db.jerseys().fetch_jerseys().await?;

    Ok(evaluate(&jerseys, query))
}

#[tracing::instrument(skip(db))]
pub async fn highlights(db: &dyn Database) -> Result<Highlights, Error> {
    let jerseys = db.jerseys().fetch_jerseys().await?;

    Ok(Highlights {
        featured: featured(&jerseys),
        deals: deals(&jerseys),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::jersey;
    use crate::catalog::{PriceRange, SortKey};
    use crate::database::MemoryDatabase;

    #[tokio::test]
    async fn browse_evaluates_stored_jerseys() {
        let db = MemoryDatabase::new();
        let jerseys = vec![
            jersey("Tom Brady Jersey", 150.0),
            jersey("Drew Bledsoe Jersey", 80.0),
            jersey("Randy Moss Jersey", 120.0),
        ];
        db.jerseys().insert_jerseys(&jerseys).await.unwrap();

        let query = CatalogQuery {
            price_range: PriceRange {
                low: 100.0,
                high: 500.0,
            },
            sort: SortKey::PriceLow,
            ..CatalogQuery::default()
        };
        let results = browse(&db, &query).await.unwrap();

        assert_eq!(results, vec![jerseys[2].clone(), jerseys[0].clone()]);
    }

    #[tokio::test]
    async fn highlights_on_empty_store_are_empty() {
        let db = MemoryDatabase::new();

        let highlights = highlights(&db).await.unwrap();

        assert!(highlights.featured.is_empty());
        assert!(highlights.deals.is_empty());
    }
}
