use actix_web::web::{Data, Json, Path};
use actix_web::{get, patch, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::{self, CampaignBody};
use crate::database::Database;
use crate::error::Error;

use super::{default_personas, manager, CampaignDraft, DraftUpdate, Persona, Progress, Wizard};
use super::{Step, WizardId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WizardBody {
    pub id: WizardId,
    pub step: Step,
    pub draft: CampaignDraft,
    pub progress: Progress,
    pub personas: Vec<Persona>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl WizardBody {
    pub fn render(wizard: Wizard) -> WizardBody {
        WizardBody {
            id: wizard.id,
            step: wizard.step(),
            progress: wizard.progress(),
            draft: wizard.draft().clone(),
            personas: wizard.personas().to_vec(),
            created_at: wizard.created_at,
            modified_at: wizard.modified_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TogglePersonaBody {
    pub name: String,
}

#[get("/personas")]
#[tracing::instrument]
pub async fn get_personas() -> Json<Vec<Persona>> {
    Json(default_personas())
}

#[post("/wizards")]
#[tracing::instrument(skip(db))]
pub async fn open_wizard(db: Data<dyn Database>) -> Result<Json<WizardBody>, Error> {
    let wizard = manager::open_wizard(&**db).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[get("/wizards/{wizard_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_wizard_by_id(
    db: Data<dyn Database>,
    params: Path<WizardId>,
) -> Result<Json<WizardBody>, Error> {
    let wizard_id = params.into_inner();
    let wizard = manager::get_wizard_by_id(&**db, wizard_id).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[patch("/wizards/{wizard_id}/draft")]
#[tracing::instrument(skip(db))]
pub async fn update_draft(
    db: Data<dyn Database>,
    params: Path<WizardId>,
    body: Json<DraftUpdate>,
) -> Result<Json<WizardBody>, Error> {
    let wizard_id = params.into_inner();
    let wizard = manager::update_draft(&**db, wizard_id, body.into_inner()).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[post("/wizards/{wizard_id}/personas/toggle")]
#[tracing::instrument(skip(db))]
pub async fn toggle_persona(
    db: Data<dyn Database>,
    params: Path<WizardId>,
    body: Json<TogglePersonaBody>,
) -> Result<Json<WizardBody>, Error> {
    let wizard_id = params.into_inner();
    let body = body.into_inner();
    let wizard = manager::toggle_persona(&**db, wizard_id, &body.name).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[post("/wizards/{wizard_id}/advance")]
#[tracing::instrument(skip(db))]
pub async fn advance_wizard(
    db: Data<dyn Database>,
    params: Path<WizardId>,
) -> Result<Json<WizardBody>, Error> {
    let wizard_id = params.into_inner();
    let wizard = manager::advance_wizard(&**db, wizard_id).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[post("/wizards/{wizard_id}/retreat")]
#[tracing::instrument(skip(db))]
pub async fn retreat_wizard(
    db: Data<dyn Database>,
    params: Path<WizardId>,
) -> Result<Json<WizardBody>, Error> {
    let wizard_id = params.into_inner();
    let wizard = manager::retreat_wizard(&**db, wizard_id).await?;

    Ok(Json(WizardBody::render(wizard)))
}

#[post("/wizards/{wizard_id}/submit")]
#[tracing::instrument(skip(db))]
pub async fn submit_wizard(
    db: Data<dyn Database>,
    params: Path<WizardId>,
) -> Result<Json<CampaignBody>, Error> {
    let wizard_id = params.into_inner();
    let campaign = campaign::manager::submit_wizard(&**db, wizard_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}
