use std::str::FromStr;

use chrono::{Duration, Utc};

use crate::campaign::Campaign;
use crate::database::Database;
use crate::error::Error;
use crate::jersey::{Condition, Jersey, Size, Sport};
use crate::typedid::{TypedId, TypedIdMarker};
use crate::wizard::CampaignDraft;

fn fixed_id<T: TypedIdMarker>(id: &str) -> Result<TypedId<T>, Error> {
    TypedId::from_str(id).map_err(|err| Error::ExistentialState(format!("{}: {}", id, err)))
}

pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    db.drop().await?;

    let now = Utc::now();
    let campaign = Campaign {
        id: fixed_id("CPN-16E77539-8873-4C8A-BCA3-2036010474AD")?,
        settings: CampaignDraft {
            title: "The Dragon's Hoard".to_string(),
            description: "Brave heroes infiltrate an ancient dragon's lair to recover stolen treasures and save the kingdom.".to_string(),
            ai_personas: vec!["Jeff's Narrative Flair".to_string()],
            has_companions: true,
            use_default_world: true,
            custom_world_description: String::new(),
        },
        story_length: 12,
        created_at: now - Duration::days(14),
        modified_at: now - Duration::days(2),
        last_played: Some(now - Duration::days(2)),
    };

    db.campaigns().insert_campaign(&campaign).await?;

    let jerseys = vec![
        Jersey {
            id: fixed_id("JRS-5EA81D0A-9788-4B8A-82D9-1A0D636B53CE")?,
            name: "Tom Brady Patriots Home Jersey".to_string(),
            player: "Tom Brady".to_string(),
            team: "New England Patriots".to_string(),
            number: 12,
            sport: Sport::Nfl,
            year: 2007,
            price: 189.99,
            original_price: 249.99,
            size: Size::L,
            condition: Condition::Excellent,
            is_authentic: true,
            is_vintage: false,
            seller_id: "seller-foxborough".to_string(),
            seller_rating: 4.9,
            image_url: "/images/jerseys/brady-patriots-home.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-5C903E93-2524-4876-B4C8-816B98D0C77B")?,
            name: "Michael Jordan Bulls Throwback".to_string(),
            player: "Michael Jordan".to_string(),
            team: "Chicago Bulls".to_string(),
            number: 23,
            sport: Sport::Nba,
            year: 1996,
            price: 299.99,
            original_price: 399.99,
            size: Size::Xl,
            condition: Condition::VeryGood,
            is_authentic: true,
            is_vintage: true,
            seller_id: "seller-windy-city".to_string(),
            seller_rating: 4.7,
            image_url: "/images/jerseys/jordan-bulls-1996.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-33957EB6-0EE7-487F-A087-E55C335BD63C")?,
            name: "Derek Jeter Yankees Pinstripes".to_string(),
            player: "Derek Jeter".to_string(),
            team: "New York Yankees".to_string(),
            number: 2,
            sport: Sport::Mlb,
            year: 2009,
            price: 89.99,
            original_price: 149.99,
            size: Size::M,
            condition: Condition::Good,
            is_authentic: false,
            is_vintage: false,
            seller_id: "seller-bronx".to_string(),
            seller_rating: 4.5,
            image_url: "/images/jerseys/jeter-yankees.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-DE3168FD-2730-47A2-BFE0-E53C79DD57A0")?,
            name: "Wayne Gretzky Oilers Away Jersey".to_string(),
            player: "Wayne Gretzky".to_string(),
            team: "Edmonton Oilers".to_string(),
            number: 99,
            sport: Sport::Nhl,
            year: 1985,
            price: 349.99,
            original_price: 349.99,
            size: Size::Xxl,
            condition: Condition::Fair,
            is_authentic: true,
            is_vintage: true,
            seller_id: "seller-north".to_string(),
            seller_rating: 4.8,
            image_url: "/images/jerseys/gretzky-oilers.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-7B1F2C1E-4D8A-4E3B-9C55-0A6F3B2E91D4")?,
            name: "Lionel Messi Barcelona Home Kit".to_string(),
            player: "Lionel Messi".to_string(),
            team: "FC Barcelona".to_string(),
            number: 10,
            sport: Sport::Soccer,
            year: 2015,
            price: 119.99,
            original_price: 159.99,
            size: Size::S,
            condition: Condition::Excellent,
            is_authentic: true,
            is_vintage: false,
            seller_id: "seller-camp-nou".to_string(),
            seller_rating: 4.6,
            image_url: "/images/jerseys/messi-barcelona.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-A4C2E8B0-1F3D-4A6B-8E2C-5D7F9B1A3C60")?,
            name: "Drew Bledsoe Patriots Replica".to_string(),
            player: "Drew Bledsoe".to_string(),
            team: "New England Patriots".to_string(),
            number: 11,
            sport: Sport::Nfl,
            year: 1997,
            price: 39.99,
            original_price: 79.99,
            size: Size::L,
            condition: Condition::Good,
            is_authentic: false,
            is_vintage: true,
            seller_id: "seller-foxborough".to_string(),
            seller_rating: 4.2,
            image_url: "/images/jerseys/bledsoe-patriots.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-0E9D8C7B-6A5F-4E3D-2C1B-0A9F8E7D6C5B")?,
            name: "LeBron James Lakers Icon Edition".to_string(),
            player: "LeBron James".to_string(),
            team: "Los Angeles Lakers".to_string(),
            number: 23,
            sport: Sport::Nba,
            year: 2020,
            price: 129.99,
            original_price: 139.99,
            size: Size::Xl,
            condition: Condition::Excellent,
            is_authentic: false,
            is_vintage: false,
            seller_id: "seller-hollywood".to_string(),
            seller_rating: 4.4,
            image_url: "/images/jerseys/lebron-lakers.jpg".to_string(),
        },
        Jersey {
            id: fixed_id("JRS-3F6A9C2D-8B1E-4F7A-A0D3-6C9E2B5F8A1D")?,
            name: "Mario Lemieux Penguins Practice Jersey".to_string(),
            player: "Mario Lemieux".to_string(),
            team: "Pittsburgh Penguins".to_string(),
            number: 66,
            sport: Sport::Nhl,
            year: 1992,
            price: 74.99,
            original_price: 119.99,
            size: Size::Xs,
            condition: Condition::VeryGood,
            is_authentic: false,
            is_vintage: true,
            seller_id: "seller-steel-city".to_string(),
            seller_rating: 3.9,
            image_url: "/images/jerseys/lemieux-penguins.jpg".to_string(),
        },
    ];

    db.jerseys().insert_jerseys(&jerseys).await?;

    Ok(())
}
