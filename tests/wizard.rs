use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use assiah::wizard::Step;
use assiah::{CampaignBody, Database, MemoryDatabase, TogglePersonaBody, WizardBody};
use serde_json::{json, Value};

mod common;
use common::init_app;

#[actix_web::test]
async fn wizard_walks_from_basics_to_campaign() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::post().uri("/wizards").to_request();
    let wizard: WizardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(wizard.step, Step::Basics);
    assert!(!wizard.progress.can_advance);
    assert_eq!(wizard.personas.len(), 3);

    let uri = |path: &str| format!("/wizards/{}{}", wizard.id, path);

    // basics is gated on title and description
    let req = TestRequest::post().uri(&uri("/advance")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error_code"], "E4091001");

    let req = TestRequest::patch()
        .uri(&uri("/draft"))
        .set_json(json!({ "title": "Epic Quest", "description": "A tale." }))
        .to_request();
    let updated: WizardBody = test::call_and_read_body_json(&app, req).await;
    assert!(updated.progress.can_advance);

    let req = TestRequest::post().uri(&uri("/advance")).to_request();
    let advanced: WizardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(advanced.step, Step::Personas);

    let req = TestRequest::post().uri(&uri("/advance")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = TestRequest::post()
        .uri(&uri("/personas/toggle"))
        .set_json(TogglePersonaBody {
            name: "Jeff's Narrative Flair".into(),
        })
        .to_request();
    let toggled: WizardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled.draft.ai_personas, vec!["Jeff's Narrative Flair"]);

    for expected in [Step::World, Step::Companions, Step::Review, Step::Review] {
        let req = TestRequest::post().uri(&uri("/advance")).to_request();
        let advanced: WizardBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!(advanced.step, expected);
    }

    let req = TestRequest::post().uri(&uri("/submit")).to_request();
    let campaign: CampaignBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(campaign.title, "Epic Quest");
    assert_eq!(campaign.description, "A tale.");
    assert_eq!(campaign.ai_personas, vec!["Jeff's Narrative Flair"]);
    assert_eq!(campaign.story_length, 0);

    // the wizard session is gone once submitted
    let req = TestRequest::get().uri(&uri("")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/campaigns").to_request();
    let campaigns: Vec<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].id, campaign.id);
}

#[actix_web::test]
async fn unknown_persona_is_rejected() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::post().uri("/wizards").to_request();
    let wizard: WizardBody = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::post()
        .uri(&format!("/wizards/{}/personas/toggle", wizard.id))
        .set_json(json!({ "name": "Jeff's Culinary Genius" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error_code"], "E4041004");
    assert_eq!(error["error_meta"]["name"], "Jeff's Culinary Genius");
}

#[actix_web::test]
async fn submit_before_review_is_rejected() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::post().uri("/wizards").to_request();
    let wizard: WizardBody = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::post()
        .uri(&format!("/wizards/{}/submit", wizard.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error_code"], "E4091002");
    assert_eq!(error["error_meta"]["step"], "BASICS");
}

#[actix_web::test]
async fn retreat_at_basics_stays_put() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::post().uri("/wizards").to_request();
    let wizard: WizardBody = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::post()
        .uri(&format!("/wizards/{}/retreat", wizard.id))
        .to_request();
    let retreated: WizardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(retreated.step, Step::Basics);
    assert!(!retreated.progress.can_retreat);
}

#[actix_web::test]
async fn personas_are_listed() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::get().uri("/personas").to_request();
    let personas: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(personas.len(), 3);
    assert_eq!(personas[0]["name"], "Jeff's Narrative Flair");
}
