use chrono::Utc;
use tracing::{debug, info};

use crate::database::Database;
use crate::error::Error;
use crate::wizard::{self, CampaignDraft, WizardId};

use super::{Campaign, CampaignId, Dashboard};

const PLAY_ATTEMPTS: usize = 3;

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, draft: CampaignDraft) -> Result<Campaign, Error> {
    let now = Utc::now();
    let campaign = Campaign {
        id: CampaignId::new(),
        settings: draft,
        story_length: 0,
        created_at: now,
        modified_at: now,
        last_played: None,
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

/// Hands the draft of a wizard sitting on its review step over to the
/// campaign list. The wizard session is discarded afterwards.
#[tracing::instrument(skip(db))]
pub async fn submit_wizard(db: &dyn Database, wizard_id: WizardId) -> Result<Campaign, Error> {
    let wizard = wizard::manager::get_wizard_by_id(db, wizard_id).await?;
    let draft = wizard.submit()?;

    let campaign = create_campaign(db, draft).await?;
    db.wizards().delete_wizard(wizard_id).await?;
    info!(campaign_id = %campaign.id, "campaign created from wizard");

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    get_campaign_by_id(db, campaign_id).await?;
    db.campaigns().delete_campaign(campaign_id).await?;

    Ok(())
}

/// Counts one more exchange in the campaign's story. Always works from the
/// stored campaign, retrying when another play lands in between.
#[tracing::instrument(skip(db))]
pub async fn record_play(db: &dyn Database, campaign_id: CampaignId) -> Result<Campaign, Error> {
    let mut attempt = 1;
    loop {
        let campaign = get_campaign_by_id(db, campaign_id).await?;

        match db
            .campaigns()
            .update_campaign_play(campaign, Utc::now())
            .await
        {
            Err(Error::ConcurrentModificationDetected) if attempt < PLAY_ATTEMPTS => {
                debug!(attempt, "campaign changed while recording play");
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[tracing::instrument(skip(db))]
pub async fn get_dashboard(db: &dyn Database) -> Result<Dashboard, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(Dashboard::summarize(campaigns))
}
