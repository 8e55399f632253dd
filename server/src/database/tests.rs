use super::*;

use entity::country::CountryModel;
use entity::user::{Role, UserModel};
use entity::user_vote::{UserVoteModel, VoteType};
use sea_orm::DatabaseConnection;

use crate::error::ServerError;
use advisory::risk::RiskIndices;

async fn add_testland(db: &DatabaseConnection) -> CountryModel {
    db.add_country(NewCountry {
        name: "testland".to_string(),
        description: "A test country".to_string(),
        travel_advice: "Exercise caution".to_string(),
        indices: RiskIndices {
            crime_index: 0.5,
            disaster_risk: 0.5,
            corruption_index: 0.5,
            health: 0.5,
        },
    })
    .await
    .unwrap()
}

async fn add_alice(db: &DatabaseConnection) -> UserModel {
    let user = NewUser::new("alice".to_string(), "Abc12345!", Role::Guest)
        .await
        .unwrap();
    db.add_user(user).await.unwrap()
}

fn crime_advice() -> NewAdvice {
    NewAdvice {
        topic: "crime".to_string(),
        description: "Keep valuables out of sight.".to_string(),
        link: Some("https://example.com/crime".to_string()),
    }
}

#[tokio::test]
async fn test_users() {
    let db = test_database().await;

    let alice = add_alice(&db).await;
    assert_eq!("alice", alice.username);
    assert_eq!(Role::Guest, alice.role);
    assert_ne!("Abc12345!", alice.password);

    let duplicate = NewUser::new("alice".to_string(), "Xyz98765?", Role::Guest)
        .await
        .unwrap();
    assert!(matches!(
        db.add_user(duplicate).await,
        Err(ServerError::UserAlreadyExists { .. })
    ));

    let fetched = db.get_user_by_name("alice").await.unwrap().unwrap();
    assert_eq!(alice, fetched);
    assert_eq!(Some(alice.clone()), db.get_user_by_id(alice.id).await.unwrap());
    assert!(db.get_user_by_name("bob").await.unwrap().is_none());

    let promoted = db.set_role(&alice, Role::Admin).await.unwrap();
    assert_eq!(Role::Admin, promoted.role);

    db.remove_user(&alice).await.unwrap();
    assert!(db.get_user_by_name("alice").await.unwrap().is_none());

    // idempotent
    db.remove_user(&alice).await.unwrap();
}

#[tokio::test]
async fn test_validate_user() {
    let db = test_database().await;
    add_alice(&db).await;

    assert!(db.validate_user("alice", "Abc12345!").await.unwrap());
    assert!(!db.validate_user("alice", "abc12345!").await.unwrap());
    assert!(!db.validate_user("bob", "Abc12345!").await.unwrap());
}

#[tokio::test]
async fn test_countries() {
    let db = test_database().await;

    let country = add_testland(&db).await;
    assert_eq!(0.5, country.indices().aggregate());

    // names are not unique
    let twin = add_testland(&db).await;
    assert_ne!(country.id, twin.id);

    let first = db.get_country_by_name("testland").await.unwrap().unwrap();
    assert_eq!(country.id, first.id);

    let all = db.get_all_countries().await.unwrap();
    assert_eq!(2, all.len());
    assert!(all.contains(&country));
    assert!(all.contains(&twin));

    assert_eq!(
        vec!["testland".to_string(), "testland".to_string()],
        db.all_country_names().await.unwrap()
    );
}

#[tokio::test]
async fn test_country_identity() {
    let db = test_database().await;

    let country = add_testland(&db).await;

    // Same ID with different fields is the same country
    let mut edited = country.clone();
    edited.description = "Edited".to_string();
    assert_eq!(country, edited);

    let mut set = std::collections::HashSet::new();
    set.insert(country);
    assert!(set.contains(&edited));
}

#[tokio::test]
async fn test_update_country() {
    let db = test_database().await;

    let mut country = add_testland(&db).await;
    country.travel_advice = "Do not travel".to_string();
    country.set_indices(RiskIndices {
        crime_index: 1.0,
        disaster_risk: 0.0,
        corruption_index: 1.0,
        health: 0.0,
    });

    db.update_country(&country).await.unwrap();

    let fetched = db.get_country_by_id(country.id).await.unwrap().unwrap();
    assert_eq!("Do not travel", fetched.travel_advice);
    assert_eq!(1.0, fetched.crime_index);
    assert_eq!(0.5, fetched.indices().aggregate());
}

#[tokio::test]
async fn test_remove_country() {
    let db = test_database().await;

    let country = add_testland(&db).await;
    let alice = add_alice(&db).await;
    let advice = db.add_advice(crime_advice()).await.unwrap();

    db.add_country_advice(&country, &advice).await.unwrap();
    db.add_vote(UserVoteModel {
        user_id: alice.id,
        country_id: country.id,
        vote_id: VoteType::Upvote,
    })
    .await
    .unwrap();

    db.remove_country(&country).await.unwrap();
    assert!(db.get_country_by_name("testland").await.unwrap().is_none());
    assert!(db.get_all_votes(&country).await.unwrap().is_empty());
    assert!(db.get_advice(&country).await.unwrap().is_empty());

    // The advice itself survives
    assert!(db.get_advice_by_topic("crime").await.unwrap().is_some());

    // idempotent
    db.remove_country(&country).await.unwrap();
}

#[tokio::test]
async fn test_advice() {
    let db = test_database().await;

    let advice = db.add_advice(crime_advice()).await.unwrap();
    assert_eq!(
        Some(advice.clone()),
        db.get_advice_by_topic("crime").await.unwrap()
    );

    assert!(matches!(
        db.add_advice(crime_advice()).await,
        Err(ServerError::AdviceAlreadyExists { .. })
    ));

    // exact match only
    assert!(db.get_advice_by_topic("Crime").await.unwrap().is_none());

    db.remove_advice(&advice).await.unwrap();
    assert!(db.get_advice_by_topic("crime").await.unwrap().is_none());
    db.remove_advice(&advice).await.unwrap();
}

#[tokio::test]
async fn test_country_advice() {
    let db = test_database().await;

    let country = add_testland(&db).await;
    let crime = db.add_advice(crime_advice()).await.unwrap();
    let health = db
        .add_advice(NewAdvice {
            topic: "health".to_string(),
            description: "Check vaccinations before travel.".to_string(),
            link: None,
        })
        .await
        .unwrap();

    db.add_country_advice(&country, &crime).await.unwrap();
    assert_eq!(vec![crime.clone()], db.get_advice(&country).await.unwrap());

    assert!(matches!(
        db.add_country_advice(&country, &crime).await,
        Err(ServerError::CountryAdviceAlreadyExists)
    ));

    db.add_country_advice(&country, &health).await.unwrap();
    assert_eq!(
        vec![crime.clone(), health.clone()],
        db.get_advice(&country).await.unwrap()
    );

    db.remove_country_advice(&country, &crime).await.unwrap();
    db.remove_country_advice(&country, &health).await.unwrap();
    assert!(db.get_advice(&country).await.unwrap().is_empty());

    // idempotent
    db.remove_country_advice(&country, &crime).await.unwrap();
}

#[tokio::test]
async fn test_votes() {
    let db = test_database().await;

    let country = add_testland(&db).await;
    let alice = add_alice(&db).await;
    let bob = db
        .add_user(
            NewUser::new("bob".to_string(), "Xyz98765?", Role::Guest)
                .await
                .unwrap(),
        )
        .await
        .unwrap();

    let upvote = UserVoteModel {
        user_id: alice.id,
        country_id: country.id,
        vote_id: VoteType::Upvote,
    };
    let downvote = UserVoteModel {
        vote_id: VoteType::Downvote,
        ..upvote.clone()
    };

    db.add_vote(upvote.clone()).await.unwrap();
    assert_eq!(
        Some(upvote.clone()),
        db.get_user_vote(&alice, &country).await.unwrap()
    );

    // At most one vote per user and country, in either direction
    assert!(matches!(
        db.add_vote(upvote.clone()).await,
        Err(ServerError::VoteAlreadyExists)
    ));
    assert!(matches!(
        db.add_vote(downvote.clone()).await,
        Err(ServerError::VoteAlreadyExists)
    ));

    db.add_vote(UserVoteModel {
        user_id: bob.id,
        country_id: country.id,
        vote_id: VoteType::Downvote,
    })
    .await
    .unwrap();

    assert_eq!(1, db.get_votes(&country, VoteType::Upvote).await.unwrap().len());
    assert_eq!(1, db.get_votes(&country, VoteType::Downvote).await.unwrap().len());
    assert_eq!(2, db.get_all_votes(&country).await.unwrap().len());

    // Changing a vote is removing then adding
    db.remove_vote(&upvote).await.unwrap();
    assert!(db.get_user_vote(&alice, &country).await.unwrap().is_none());
    db.add_vote(downvote.clone()).await.unwrap();
    assert_eq!(2, db.get_votes(&country, VoteType::Downvote).await.unwrap().len());

    // Removing a missing vote is a no-op
    db.remove_vote(&upvote).await.unwrap();
    db.remove_vote(&downvote).await.unwrap();
    db.remove_vote(&downvote).await.unwrap();
}
