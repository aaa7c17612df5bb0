use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type JerseyId = TypedId<Jersey>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Jersey {
    #[serde(rename = "_id")]
    pub id: JerseyId,
    pub name: String,
    pub player: String,
    pub team: String,
    pub number: i32,
    pub sport: Sport,
    pub year: i32,
    pub price: f64,
    pub original_price: f64,
    pub size: Size,
    pub condition: Condition,
    pub is_authentic: bool,
    pub is_vintage: bool,
    pub seller_id: String,
    pub seller_rating: f64,
    pub image_url: String,
}

impl TypedIdMarker for Jersey {
    fn tag() -> &'static str {
        "JRS"
    }
}

impl Jersey {
    /// Fraction of the original price knocked off, `0.0` when there is no
    /// meaningful original price.
    pub fn discount(&self) -> f64 {
        if self.original_price <= 0.0 {
            return 0.0;
        }

        (self.original_price - self.price) / self.original_price
    }

    pub fn savings_percentage(&self) -> i32 {
        (self.discount() * 100.0).round() as i32
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Sport {
    #[serde(rename = "NFL")]
    Nfl,
    #[serde(rename = "NBA")]
    Nba,
    #[serde(rename = "MLB")]
    Mlb,
    #[serde(rename = "NHL")]
    Nhl,
    Soccer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

/// Ordered from worst to best.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Condition {
    Fair,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Excellent,
}

impl Condition {
    pub fn rank(self) -> u8 {
        match self {
            Condition::Fair => 1,
            Condition::Good => 2,
            Condition::VeryGood => 3,
            Condition::Excellent => 4,
        }
    }
}
