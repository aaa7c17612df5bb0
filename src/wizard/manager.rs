use tracing::debug;

use crate::database::Database;
use crate::error::Error;

use super::{default_personas, Advance, DraftUpdate, Wizard, WizardId};

#[tracing::instrument(skip(db))]
pub async fn open_wizard(db: &dyn Database) -> Result<Wizard, Error> {
    let wizard = Wizard::new(default_personas());

    db.wizards().insert_wizard(&wizard).await?;

    Ok(wizard)
}

#[tracing::instrument(skip(db))]
pub async fn get_wizard_by_id(db: &dyn Database, wizard_id: WizardId) -> Result<Wizard, Error> {
    let wizard = db
        .wizards()
        .fetch_wizard_by_id(wizard_id)
        .await?
        .ok_or(Error::WizardNotFound { wizard_id })?;

    Ok(wizard)
}

#[tracing::instrument(skip(db))]
pub async fn update_draft(
    db: &dyn Database,
    wizard_id: WizardId,
    update: DraftUpdate,
) -> Result<Wizard, Error> {
    let mut wizard = get_wizard_by_id(db, wizard_id).await?;
    wizard.update(update);

    db.wizards().update_wizard(wizard).await
}

#[tracing::instrument(skip(db))]
pub async fn toggle_persona(
    db: &dyn Database,
    wizard_id: WizardId,
    name: &str,
) -> Result<Wizard, Error> {
    let mut wizard = get_wizard_by_id(db, wizard_id).await?;
    let selected = wizard.toggle_persona(name)?;
    debug!(selected, "toggled persona");

    db.wizards().update_wizard(wizard).await
}

#[tracing::instrument(skip(db))]
pub async fn advance_wizard(db: &dyn Database, wizard_id: WizardId) -> Result<Wizard, Error> {
    let mut wizard = get_wizard_by_id(db, wizard_id).await?;

    match wizard.try_advance() {
        Advance::Moved(step) => {
            debug!(?step, "wizard advanced");
            db.wizards().update_wizard(wizard).await
        }
        Advance::AtEnd => Ok(wizard),
        Advance::Blocked(step) => Err(Error::WizardStepIncomplete { wizard_id, step }),
    }
}

#[tracing::instrument(skip(db))]
pub async fn retreat_wizard(db: &dyn Database, wizard_id: WizardId) -> Result<Wizard, Error> {
    let mut wizard = get_wizard_by_id(db, wizard_id).await?;
    let before = wizard.step();

    if wizard.retreat() == before {
        return Ok(wizard);
    }

    db.wizards().update_wizard(wizard).await
}
