use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};
use crate::wizard::CampaignDraft;

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    #[serde(flatten)]
    pub settings: CampaignDraft,
    pub story_length: i32,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
    #[serde(default, with = "optional_bson_datetime")]
    pub last_played: Option<DateTime<Utc>>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

const RECENT_LIMIT: usize = 3;

/// Totals across the campaign list plus the most recently played campaigns.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub campaign_count: usize,
    pub total_story_length: i64,
    pub recent: Vec<Campaign>,
}

impl Dashboard {
    /// Expects `campaigns` newest first. Played campaigns lead, latest play
    /// first; never-played ones follow in the order given.
    pub fn summarize(mut campaigns: Vec<Campaign>) -> Dashboard {
        let campaign_count = campaigns.len();
        let total_story_length = campaigns
            .iter()
            .map(|campaign| i64::from(campaign.story_length))
            .sum();

        campaigns.sort_by_key(|campaign| Reverse(campaign.last_played));
        campaigns.truncate(RECENT_LIMIT);

        Dashboard {
            campaign_count,
            total_story_length,
            recent: campaigns,
        }
    }
}

/// Like `chrono_datetime_as_bson_datetime` but for an optional timestamp.
mod optional_bson_datetime {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(bson::DateTime::from_chrono).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<bson::DateTime>::deserialize(deserializer)?;

        Ok(value.map(bson::DateTime::to_chrono))
    }
}
