use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::narrator::Narrator;

use super::{manager, Campaign, CampaignId, Dashboard};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignBody {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub ai_personas: Vec<String>,
    pub has_companions: bool,
    pub use_default_world: bool,
    pub custom_world_description: String,
    pub story_length: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub last_played: Option<DateTime<Utc>>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        let settings = campaign.settings;
        CampaignBody {
            id: campaign.id,
            title: settings.title,
            description: settings.description,
            ai_personas: settings.ai_personas,
            has_companions: settings.has_companions,
            use_default_world: settings.use_default_world,
            custom_world_description: settings.custom_world_description,
            story_length: campaign.story_length,
            created_at: campaign.created_at,
            modified_at: campaign.modified_at,
            last_played: campaign.last_played,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TakeActionBody {
    pub input: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum StoryEntryType {
    Action,
    Narration,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoryEntryBody {
    pub entry_type: StoryEntryType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResultBody {
    pub action: StoryEntryBody,
    pub narration: StoryEntryBody,
    pub campaign: CampaignBody,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardBody {
    pub campaign_count: usize,
    pub total_story_length: i64,
    pub recent: Vec<CampaignBody>,
}

impl DashboardBody {
    pub fn render(dashboard: Dashboard) -> DashboardBody {
        DashboardBody {
            campaign_count: dashboard.campaign_count,
            total_story_length: dashboard.total_story_length,
            recent: dashboard
                .recent
                .into_iter()
                .map(CampaignBody::render)
                .collect(),
        }
    }
}

#[get("/dashboard")]
#[tracing::instrument(skip(db))]
pub async fn get_dashboard(db: Data<dyn Database>) -> Result<Json<DashboardBody>, Error> {
    let dashboard = manager::get_dashboard(&**db).await?;

    Ok(Json(DashboardBody::render(dashboard)))
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: Data<dyn Database>) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(&**db).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign = manager::get_campaign_by_id(&**db, campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<dyn Database>,
    params: Path<CampaignId>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();
    manager::delete_campaign(&**db, campaign_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Plays one exchange: the player's action is answered by the narrator after
/// its delay. A client hanging up before then cancels the reply and leaves
/// the campaign untouched.
#[post("/campaigns/{campaign_id}/actions")]
#[tracing::instrument(skip(db, narrator))]
pub async fn take_action(
    db: Data<dyn Database>,
    narrator: Data<Narrator>,
    params: Path<CampaignId>,
    body: Json<TakeActionBody>,
) -> Result<Json<ActionResultBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();
    manager::get_campaign_by_id(&**db, campaign_id).await?;

    let action = StoryEntryBody {
        entry_type: StoryEntryType::Action,
        content: body.input,
        timestamp: Utc::now(),
    };

    let narration = narrator.reply(&action.content).wait().await?;
    let narration = StoryEntryBody {
        entry_type: StoryEntryType::Narration,
        content: narration,
        timestamp: Utc::now(),
    };

    let campaign = manager::record_play(&**db, campaign_id).await?;

    Ok(Json(ActionResultBody {
        action,
        narration,
        campaign: CampaignBody::render(campaign),
    }))
}
