use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub mod persona;
pub use endpoints::*;
pub use persona::{default_personas, Persona};

pub type WizardId = TypedId<Wizard>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Step {
    Basics,
    Personas,
    World,
    Companions,
    Review,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Basics,
        Step::Personas,
        Step::World,
        Step::Companions,
        Step::Review,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::Basics => 0,
            Step::Personas => 1,
            Step::World => 2,
            Step::Companions => 3,
            Step::Review => 4,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Step::ALL.get(index).copied())
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Basics => "Campaign Basics",
            Step::Personas => "AI Personalities",
            Step::World => "World Setting",
            Step::Companions => "Companions",
            Step::Review => "Review & Create",
        }
    }
}

/// The in-progress campaign configuration filled in by the wizard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub ai_personas: Vec<String>,
    pub has_companions: bool,
    pub use_default_world: bool,
    pub custom_world_description: String,
}

impl Default for CampaignDraft {
    fn default() -> CampaignDraft {
        CampaignDraft {
            title: String::new(),
            description: String::new(),
            ai_personas: vec![],
            has_companions: false,
            use_default_world: true,
            custom_world_description: String::new(),
        }
    }
}

impl CampaignDraft {
    /// Removes `name` if selected, otherwise appends it. Returns whether the
    /// persona is selected afterwards.
    pub fn toggle_persona(&mut self, name: &str) -> bool {
        match self.ai_personas.iter().position(|persona| persona == name) {
            Some(index) => {
                self.ai_personas.remove(index);
                false
            }
            None => {
                self.ai_personas.push(name.to_string());
                true
            }
        }
    }

    pub fn apply(&mut self, update: DraftUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(has_companions) = update.has_companions {
            self.has_companions = has_companions;
        }
        if let Some(use_default_world) = update.use_default_world {
            self.use_default_world = use_default_world;
        }
        if let Some(custom_world_description) = update.custom_world_description {
            self.custom_world_description = custom_world_description;
        }
    }
}

/// A partial edit of the draft. Personas only change through
/// [`Wizard::toggle_persona`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DraftUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub has_companions: Option<bool>,
    #[serde(default)]
    pub use_default_world: Option<bool>,
    #[serde(default)]
    pub custom_world_description: Option<String>,
}

/// Whether the draft satisfies the gate for leaving `step` forwards.
pub fn can_advance(step: Step, draft: &CampaignDraft) -> bool {
    match step {
        Step::Basics => !draft.title.trim().is_empty() && !draft.description.trim().is_empty(),
        Step::Personas => !draft.ai_personas.is_empty(),
        Step::World => {
            draft.use_default_world || !draft.custom_world_description.trim().is_empty()
        }
        Step::Companions => true,
        Step::Review => true,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    Blocked(Step),
    AtEnd,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StepProgress {
    pub step: Step,
    pub title: String,
    pub active: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Progress {
    pub step: Step,
    pub index: usize,
    pub total: usize,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub steps: Vec<StepProgress>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Wizard {
    #[serde(rename = "_id")]
    pub id: WizardId,
    step: Step,
    draft: CampaignDraft,
    personas: Vec<Persona>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl TypedIdMarker for Wizard {
    fn tag() -> &'static str {
        "WIZ"
    }
}

impl Wizard {
    pub fn new(personas: Vec<Persona>) -> Wizard {
        let now = Utc::now();
        Wizard {
            id: WizardId::new(),
            step: Step::Basics,
            draft: CampaignDraft::default(),
            personas,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn can_advance(&self) -> bool {
        can_advance(self.step, &self.draft)
    }

    /// Moves one step forward without consulting the gate. Does nothing on
    /// the review step.
    pub fn advance(&mut self) -> Step {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        self.step
    }

    /// Moves one step back. Does nothing on the basics step.
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Moves one step forward only if the gate for the current step holds.
    pub fn try_advance(&mut self) -> Advance {
        if self.step.next().is_none() {
            return Advance::AtEnd;
        }
        if !self.can_advance() {
            return Advance::Blocked(self.step);
        }

        Advance::Moved(self.advance())
    }

    pub fn toggle_persona(&mut self, name: &str) -> Result<bool, Error> {
        if !self.personas.iter().any(|persona| persona.name == name) {
            return Err(Error::PersonaNotFound {
                name: name.to_string(),
            });
        }

        Ok(self.draft.toggle_persona(name))
    }

    pub fn update(&mut self, update: DraftUpdate) {
        self.draft.apply(update);
    }

    pub fn submit(&self) -> Result<CampaignDraft, Error> {
        if self.step != Step::Review {
            return Err(Error::WizardNotAtReview { step: self.step });
        }

        Ok(self.draft.clone())
    }

    pub fn progress(&self) -> Progress {
        let current = self.step.index();
        Progress {
            step: self.step,
            index: current,
            total: Step::ALL.len(),
            can_advance: self.can_advance(),
            can_retreat: self.step.previous().is_some(),
            steps: Step::ALL
                .iter()
                .map(|step| StepProgress {
                    step: *step,
                    title: step.title().to_string(),
                    active: *step == self.step,
                    completed: current > step.index(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARRATIVE: &str = "Jeff's Narrative Flair";
    const MECHANICAL: &str = "Jeff's Mechanical Precision";

    fn wizard_at(step: Step) -> Wizard {
        let mut wizard = Wizard::new(default_personas());
        while wizard.step() != step {
            wizard.advance();
        }
        wizard
    }

    fn filled_draft() -> CampaignDraft {
        CampaignDraft {
            title: "Epic Quest".to_string(),
            description: "A tale.".to_string(),
            ai_personas: vec![NARRATIVE.to_string()],
            ..CampaignDraft::default()
        }
    }

    #[test]
    fn new_wizard_starts_on_basics_with_default_world() {
        let wizard = Wizard::new(default_personas());

        assert_eq!(wizard.step(), Step::Basics);
        assert_eq!(wizard.draft(), &CampaignDraft::default());
        assert!(wizard.draft().use_default_world);
        assert!(!wizard.draft().has_companions);
    }

    #[test]
    fn advance_then_retreat_returns_to_every_step_but_review() {
        for step in Step::ALL.iter().copied().filter(|s| *s != Step::Review) {
            let mut wizard = wizard_at(step);
            wizard.advance();
            wizard.retreat();
            assert_eq!(wizard.step(), step);
        }
    }

    #[test]
    fn retreat_then_advance_returns_to_every_step_but_basics() {
        for step in Step::ALL.iter().copied().filter(|s| *s != Step::Basics) {
            let mut wizard = wizard_at(step);
            wizard.retreat();
            wizard.advance();
            assert_eq!(wizard.step(), step);
        }
    }

    #[test]
    fn navigation_stops_at_the_boundaries() {
        let mut wizard = wizard_at(Step::Basics);
        assert_eq!(wizard.retreat(), Step::Basics);

        let mut wizard = wizard_at(Step::Review);
        assert_eq!(wizard.advance(), Step::Review);
        assert_eq!(wizard.try_advance(), Advance::AtEnd);
    }

    #[test]
    fn basics_gate_requires_trimmed_title_and_description() {
        let mut draft = CampaignDraft {
            title: "   ".to_string(),
            description: "A tale.".to_string(),
            ..CampaignDraft::default()
        };
        assert!(!can_advance(Step::Basics, &draft));

        draft.title = "Epic Quest".to_string();
        assert!(can_advance(Step::Basics, &draft));

        draft.description = "\n\t".to_string();
        assert!(!can_advance(Step::Basics, &draft));
    }

    #[test]
    fn personas_gate_requires_a_selection() {
        let mut draft = CampaignDraft::default();
        assert!(!can_advance(Step::Personas, &draft));

        draft.toggle_persona(NARRATIVE);
        assert!(can_advance(Step::Personas, &draft));
    }

    #[test]
    fn world_gate_accepts_default_or_described_world() {
        let mut draft = CampaignDraft::default();
        assert!(can_advance(Step::World, &draft));

        draft.use_default_world = false;
        assert!(!can_advance(Step::World, &draft));

        draft.custom_world_description = "  ".to_string();
        assert!(!can_advance(Step::World, &draft));

        draft.custom_world_description = "A drowned archipelago".to_string();
        assert!(can_advance(Step::World, &draft));
    }

    #[test]
    fn companions_and_review_are_never_gated() {
        let draft = CampaignDraft::default();

        assert!(can_advance(Step::Companions, &draft));
        assert!(can_advance(Step::Review, &draft));
    }

    #[test]
    fn try_advance_leaves_step_unchanged_when_gated() {
        let mut wizard = Wizard::new(default_personas());

        assert_eq!(wizard.try_advance(), Advance::Blocked(Step::Basics));
        assert_eq!(wizard.step(), Step::Basics);

        wizard.update(DraftUpdate {
            title: Some("Epic Quest".to_string()),
            description: Some("A tale.".to_string()),
            ..DraftUpdate::default()
        });
        assert_eq!(wizard.try_advance(), Advance::Moved(Step::Personas));
    }

    #[test]
    fn toggle_persona_is_its_own_inverse() {
        let mut draft = filled_draft();
        let original = draft.ai_personas.clone();

        assert!(draft.toggle_persona(MECHANICAL));
        assert!(!draft.toggle_persona(MECHANICAL));
        assert_eq!(draft.ai_personas, original);

        assert!(!draft.toggle_persona(NARRATIVE));
        assert!(draft.toggle_persona(NARRATIVE));
        assert_eq!(draft.ai_personas, original);
    }

    #[test]
    fn toggle_persona_keeps_selection_order() {
        let mut wizard = Wizard::new(default_personas());
        wizard.toggle_persona(MECHANICAL).unwrap();
        wizard.toggle_persona(NARRATIVE).unwrap();

        assert_eq!(
            wizard.draft().ai_personas,
            vec![MECHANICAL.to_string(), NARRATIVE.to_string()]
        );
    }

    #[test]
    fn toggle_persona_rejects_names_outside_the_catalog() {
        let mut wizard = Wizard::new(default_personas());

        assert_eq!(
            wizard.toggle_persona("Jeff's Evil Twin"),
            Err(Error::PersonaNotFound {
                name: "Jeff's Evil Twin".to_string()
            })
        );
        assert!(wizard.draft().ai_personas.is_empty());
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut wizard = Wizard::new(default_personas());
        wizard.update(DraftUpdate {
            title: Some("Epic Quest".to_string()),
            ..DraftUpdate::default()
        });
        wizard.update(DraftUpdate {
            has_companions: Some(true),
            ..DraftUpdate::default()
        });

        assert_eq!(wizard.draft().title, "Epic Quest");
        assert!(wizard.draft().has_companions);
        assert_eq!(wizard.draft().description, "");
    }

    #[test]
    fn submit_is_only_valid_on_review() {
        let mut wizard = Wizard::new(default_personas());
        wizard.update(DraftUpdate {
            title: Some("Epic Quest".to_string()),
            description: Some("A tale.".to_string()),
            ..DraftUpdate::default()
        });

        assert_eq!(
            wizard.submit(),
            Err(Error::WizardNotAtReview { step: Step::Basics })
        );

        while wizard.step() != Step::Review {
            wizard.advance();
        }
        let draft = wizard.submit().unwrap();

        assert_eq!(&draft, wizard.draft());
    }

    #[test]
    fn progress_marks_active_and_completed_steps() {
        let wizard = wizard_at(Step::World);
        let progress = wizard.progress();

        assert_eq!(progress.index, 2);
        assert_eq!(progress.total, 5);
        assert!(progress.can_retreat);
        assert!(progress.can_advance);
        assert_eq!(progress.steps[2].title, "World Setting");

        let completed: Vec<_> = progress.steps.iter().map(|s| s.completed).collect();
        let active: Vec<_> = progress.steps.iter().map(|s| s.active).collect();
        assert_eq!(completed, vec![true, true, false, false, false]);
        assert_eq!(active, vec![false, false, true, false, false]);
    }
}
