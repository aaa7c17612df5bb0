use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use assiah::{
    ActionResultBody, CampaignBody, DashboardBody, Database, MemoryDatabase, TakeActionBody,
};

mod common;
use common::init_app;

const DRAGONS_HOARD: &str = "CPN-16E77539-8873-4C8A-BCA3-2036010474AD";

async fn seeded() -> Arc<dyn Database> {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    assiah::seed::seed(&*db).await.unwrap();
    db
}

#[actix_web::test]
async fn taking_an_action_advances_the_story() {
    let db = seeded().await;
    let app = init_app!(db);

    let req = TestRequest::get()
        .uri(&format!("/campaigns/{}", DRAGONS_HOARD))
        .to_request();
    let before: CampaignBody = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::post()
        .uri(&format!("/campaigns/{}/actions", DRAGONS_HOARD))
        .set_json(TakeActionBody {
            input: "I search the cave for tracks".into(),
        })
        .to_request();
    let result: ActionResultBody = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.action.content, "I search the cave for tracks");
    assert!(!result.narration.content.is_empty());
    assert_eq!(result.campaign.story_length, before.story_length + 1);
    assert!(result.campaign.last_played >= before.last_played);
}

#[actix_web::test]
async fn deleting_a_campaign() {
    let db = seeded().await;
    let app = init_app!(db);

    let req = TestRequest::delete()
        .uri(&format!("/campaigns/{}", DRAGONS_HOARD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::delete()
        .uri(&format!("/campaigns/{}", DRAGONS_HOARD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/campaigns").to_request();
    let campaigns: Vec<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert!(campaigns.is_empty());
}

#[actix_web::test]
async fn action_on_missing_campaign() {
    let db = seeded().await;
    let app = init_app!(db);

    let req = TestRequest::post()
        .uri("/campaigns/CPN-00000000-0000-0000-0000-000000000000/actions")
        .set_json(TakeActionBody {
            input: "hello?".into(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn action(input: &str) -> TestRequest {
    TestRequest::post()
        .uri(&format!("/campaigns/{}/actions", DRAGONS_HOARD))
        .set_json(TakeActionBody {
            input: input.into(),
        })
}

#[actix_web::test]
async fn overlapping_actions_both_count() {
    let db = seeded().await;
    let app = init_app!(db, Duration::from_millis(50));

    let (first, second) = futures::join!(
        test::call_service(&app, action("I light a torch").to_request()),
        test::call_service(&app, action("I draw my sword").to_request()),
    );
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/campaigns/{}", DRAGONS_HOARD))
        .to_request();
    let campaign: CampaignBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(campaign.story_length, 14);
}

#[actix_web::test]
async fn action_on_campaign_deleted_while_narrating() {
    let db = seeded().await;
    let app = init_app!(db, Duration::from_millis(50));

    let delete = TestRequest::delete()
        .uri(&format!("/campaigns/{}", DRAGONS_HOARD))
        .to_request();
    let (played, deleted) = futures::join!(
        test::call_service(&app, action("I open the chest").to_request()),
        test::call_service(&app, delete),
    );

    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(played.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dashboard_totals_the_story_so_far() {
    let db = seeded().await;
    let app = init_app!(db);

    let req = TestRequest::get().uri("/dashboard").to_request();
    let dashboard: DashboardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(dashboard.campaign_count, 1);
    assert_eq!(dashboard.total_story_length, 12);
    assert_eq!(dashboard.recent[0].id.to_string(), DRAGONS_HOARD);

    let resp = test::call_service(&app, action("I rest by the fire").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/dashboard").to_request();
    let dashboard: DashboardBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(dashboard.total_story_length, 13);
    assert_eq!(dashboard.recent.len(), 1);
}

#[actix_web::test]
async fn dashboard_of_empty_campaign_list() {
    let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
    let app = init_app!(db);

    let req = TestRequest::get().uri("/dashboard").to_request();
    let dashboard: DashboardBody = test::call_and_read_body_json(&app, req).await;

    assert_eq!(dashboard.campaign_count, 0);
    assert_eq!(dashboard.total_story_length, 0);
    assert!(dashboard.recent.is_empty());
}
