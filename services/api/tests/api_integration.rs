//! Integration tests against a live PostgreSQL database
//!
//! These tests exercise the store-enforced behavior: cascade deletes, the
//! SET NULL rule on motivation removal, and unique-constraint conflicts.
//! They need a reachable database (DATABASE_URL), so they are ignored by
//! default; run them with `cargo test -- --ignored`.

use api::error::is_unique_violation;
use api::models::biohack::{BiohackCategory, BiohackFilterRequest, CreateBiohackRequest};
use api::models::journal::{CreateJournalRequest, UpdateJournalRequest};
use api::models::motivation::CreateMotivationRequest;
use api::models::motivation_biohack::CreateMotivationBiohackRequest;
use api::models::user::{CreateUserRequest, UpdateUserRequest};
use api::repositories::{
    BiohackRepository, JournalRepository, MotivationBiohackRepository, MotivationRepository,
    UserRepository,
};
use api::routes::create_router;
use api::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use common::database::{DatabaseConfig, init_pool};
use serial_test::serial;
use sqlx::PgPool;
use tower::ServiceExt;

async fn setup_pool() -> PgPool {
    let config = DatabaseConfig::from_env().expect("database config");
    let pool = init_pool(&config).await.expect("database connection");
    sqlx::migrate!().run(&pool).await.expect("migrations");
    pool
}

fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}@example.com")
}

fn new_user(tag: &str) -> CreateUserRequest {
    CreateUserRequest {
        first_name: "Test".to_string(),
        last_name: tag.to_string(),
        email: unique_email(tag),
        provider: None,
        external_id: None,
        sub_id: None,
        motivation_id: None,
    }
}

fn new_biohack(title: &str, category: BiohackCategory) -> CreateBiohackRequest {
    CreateBiohackRequest {
        title: title.to_string(),
        technique: Some("habit stacking".to_string()),
        category,
        difficulty: Some("Easy".to_string()),
        time_required: Some("10 minutes".to_string()),
        action: vec!["step one".to_string(), "step two".to_string()],
        mechanism: Some("circadian entrainment".to_string()),
        research_studies: None,
        biology: Some("melatonin timing".to_string()),
        color_gradient: None,
    }
}

#[tokio::test]
#[serial]
#[ignore]
async fn create_then_get_returns_equal_record() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());

    let payload = new_user("roundtrip");
    let created = users.create(&payload).await?;
    let fetched = users.find_by_id(created.id).await?.expect("user exists");

    assert_eq!(fetched.first_name, payload.first_name);
    assert_eq!(fetched.last_name, payload.last_name);
    assert_eq!(fetched.email, payload.email);
    assert_eq!(fetched.created_date, created.created_date);

    users.delete(created.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn partial_update_keeps_other_fields_and_advances_updated_date()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());

    let created = users.create(&new_user("partial")).await?;
    let patch = UpdateUserRequest {
        first_name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = users.update(created.id, &patch).await?.expect("user exists");

    assert_eq!(updated.first_name, "Renamed");
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);
    assert!(updated.updated_date > created.updated_date);

    users.delete(created.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn duplicate_email_is_a_unique_violation() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());

    let mut payload = new_user("dup");
    let created = users.create(&payload).await?;

    payload.last_name = "Second".to_string();
    let err = users.create(&payload).await.expect_err("duplicate email");
    assert!(is_unique_violation(&err));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    users.delete(created.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn deleting_user_cascades_journals() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());
    let biohacks = BiohackRepository::new(pool.clone());
    let journals = JournalRepository::new(pool.clone());

    let user = users.create(&new_user("cascade")).await?;
    let biohack = biohacks
        .create(&new_biohack("Morning light walk", BiohackCategory::Sleep))
        .await?;
    let journal = journals
        .create(&CreateJournalRequest {
            user_id: user.id,
            biohack_id: biohack.id,
            notes: Some("felt great".to_string()),
            rating: Some(8),
            date_time: Utc::now(),
        })
        .await?;

    assert!(users.delete(user.id).await?);
    assert!(journals.find_by_id(journal.id).await?.is_none());

    biohacks.delete(biohack.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn deleting_motivation_nulls_user_link() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());
    let motivations = MotivationRepository::new(pool.clone());

    let motivation = motivations
        .create(&CreateMotivationRequest {
            title: "Sleep better".to_string(),
            description: None,
        })
        .await?;

    let mut payload = new_user("setnull");
    payload.motivation_id = Some(motivation.id);
    let user = users.create(&payload).await?;
    assert_eq!(user.motivation_id, Some(motivation.id));

    assert!(motivations.delete(motivation.id).await?);

    let reloaded = users.find_by_id(user.id).await?.expect("user survives");
    assert!(reloaded.motivation_id.is_none());
    assert!(reloaded.motivation_name.is_none());

    users.delete(user.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn duplicate_relationship_pair_leaves_one_row() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let motivations = MotivationRepository::new(pool.clone());
    let biohacks = BiohackRepository::new(pool.clone());
    let links = MotivationBiohackRepository::new(pool.clone());

    let motivation = motivations
        .create(&CreateMotivationRequest {
            title: "Focus".to_string(),
            description: None,
        })
        .await?;
    let biohack = biohacks
        .create(&new_biohack("Pomodoro blocks", BiohackCategory::CognitiveEnhancement))
        .await?;

    let payload = CreateMotivationBiohackRequest {
        motivation_id: motivation.id,
        biohack_id: biohack.id,
    };
    links.create(&payload).await?;

    assert!(links.exists(motivation.id, biohack.id).await?);
    let err = links.create(&payload).await.expect_err("duplicate pair");
    assert!(is_unique_violation(&err));

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM motivation_biohacks WHERE motivation_id = $1 AND biohack_id = $2",
    )
    .bind(motivation.id)
    .bind(biohack.id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(count, 1);

    motivations.delete(motivation.id).await?;
    biohacks.delete(biohack.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn filter_combines_category_and_search_term() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let biohacks = BiohackRepository::new(pool.clone());

    let mut matching = new_biohack("Deep sleep protocol", BiohackCategory::CognitiveEnhancement);
    matching.biology = Some("sleep pressure and adenosine".to_string());
    let matching = biohacks.create(&matching).await?;

    // Same category, no "sleep" anywhere
    let mut off_topic = new_biohack("Dual n-back", BiohackCategory::CognitiveEnhancement);
    off_topic.mechanism = Some("working memory load".to_string());
    off_topic.biology = Some("prefrontal plasticity".to_string());
    let off_topic = biohacks.create(&off_topic).await?;

    // Matches the search term but not the category
    let other_category = biohacks
        .create(&new_biohack("Sleep hygiene", BiohackCategory::Sleep))
        .await?;

    let results = biohacks
        .filter(&BiohackFilterRequest {
            category: Some(BiohackCategory::CognitiveEnhancement),
            search_term: Some("SLEEP".to_string()),
            ..Default::default()
        })
        .await?;

    let ids: Vec<i32> = results.iter().map(|b| b.id).collect();
    assert!(ids.contains(&matching.id));
    assert!(!ids.contains(&off_topic.id));
    assert!(!ids.contains(&other_category.id));

    for id in [matching.id, off_topic.id, other_category.id] {
        biohacks.delete(id).await?;
    }
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn journals_for_user_and_biohack_are_newest_first() -> Result<(), Box<dyn std::error::Error>>
{
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());
    let biohacks = BiohackRepository::new(pool.clone());
    let journals = JournalRepository::new(pool.clone());

    let user = users.create(&new_user("timeline")).await?;
    let biohack = biohacks
        .create(&new_biohack("Cold plunge", BiohackCategory::ColdExposure))
        .await?;

    let older = Utc::now() - chrono::Duration::days(2);
    let newer = Utc::now() - chrono::Duration::days(1);
    for (when, note) in [(older, "first try"), (newer, "second try")] {
        journals
            .create(&CreateJournalRequest {
                user_id: user.id,
                biohack_id: biohack.id,
                notes: Some(note.to_string()),
                rating: Some(7),
                date_time: when,
            })
            .await?;
    }

    let listed = journals.by_user_and_biohack(user.id, biohack.id).await?;
    assert_eq!(listed.len(), 2);
    assert!(listed[0].date_time > listed[1].date_time);
    assert_eq!(listed[0].notes.as_deref(), Some("second try"));

    users.delete(user.id).await?;
    biohacks.delete(biohack.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn journal_update_refetches_related_names() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());
    let biohacks = BiohackRepository::new(pool.clone());
    let journals = JournalRepository::new(pool.clone());

    let user = users.create(&new_user("names")).await?;
    let first = biohacks
        .create(&new_biohack("Box breathing", BiohackCategory::Breathwork))
        .await?;
    let second = biohacks
        .create(&new_biohack("Sauna session", BiohackCategory::Recovery))
        .await?;

    let journal = journals
        .create(&CreateJournalRequest {
            user_id: user.id,
            biohack_id: first.id,
            notes: None,
            rating: None,
            date_time: Utc::now(),
        })
        .await?;
    assert_eq!(journal.biohack_name, "Box breathing");

    let updated = journals
        .update(
            journal.id,
            &UpdateJournalRequest {
                biohack_id: Some(second.id),
                ..Default::default()
            },
        )
        .await?
        .expect("journal exists");
    assert_eq!(updated.biohack_name, "Sauna session");
    assert_eq!(updated.user_first_name, journal.user_first_name);

    users.delete(user.id).await?;
    biohacks.delete(first.id).await?;
    biohacks.delete(second.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn updating_missing_user_is_not_found_before_reference_checks()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let app = create_router(AppState::new(pool));

    // Both the target id and the referenced motivation are absent; the
    // missing target wins and the response is 404, not 400
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/2000000000")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"motivationId":2000000000}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn updating_missing_journal_is_not_found_before_field_checks()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let app = create_router(AppState::new(pool));

    // Absent target id plus a bad user reference and an out-of-range rating;
    // the missing target still reports first
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/journals/2000000000")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"userId":2000000000,"rating":42}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn updating_existing_journal_with_bad_rating_is_rejected()
-> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let users = UserRepository::new(pool.clone());
    let biohacks = BiohackRepository::new(pool.clone());
    let journals = JournalRepository::new(pool.clone());

    let user = users.create(&new_user("rating")).await?;
    let biohack = biohacks
        .create(&new_biohack("Evening wind-down", BiohackCategory::Sleep))
        .await?;
    let journal = journals
        .create(&CreateJournalRequest {
            user_id: user.id,
            biohack_id: biohack.id,
            notes: None,
            rating: Some(5),
            date_time: Utc::now(),
        })
        .await?;

    let app = create_router(AppState::new(pool));
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/journals/{}", journal.id))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"rating":42}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let unchanged = journals.find_by_id(journal.id).await?.expect("journal exists");
    assert_eq!(unchanged.rating, Some(5));

    users.delete(user.id).await?;
    biohacks.delete(biohack.id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore]
async fn motivation_with_blank_title_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let pool = setup_pool().await;
    let motivations = MotivationRepository::new(pool.clone());

    let app = create_router(AppState::new(pool));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/motivations")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"title":""}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let created: serde_json::Value = serde_json::from_slice(&body)?;
    let id = created["id"].as_i64().expect("id in response") as i32;

    motivations.delete(id).await?;
    Ok(())
}
