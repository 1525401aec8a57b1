#![allow(clippy::disallowed_methods)]

mod common;

use std::error::Error;
use std::time::Duration;

use board_core::{
    FilterParams, JobType, NewPosting, ValidationRules, parse_deadline, parse_new_posting,
};
use serde_json::json;

use db::DbError;
use db::repositories::PostingRepository;

fn backend_engineer() -> NewPosting {
    NewPosting::new("Backend Engineer", "Acme")
        .with_job_type(JobType::FullTime)
        .with_salary(Some(600_000.0), Some(1_000_000.0))
}

async fn reset_db() -> Result<(), DbError> {
    let db_conn = db::get_db()?;
    db_conn.query("DELETE posting;").await?;
    Ok(())
}

async fn total(params: FilterParams) -> Result<u64, Box<dyn Error>> {
    Ok(PostingRepository::list(&params).await?.meta.total)
}

async fn check_listing_scenario() -> Result<(), Box<dyn Error>> {
    let created = PostingRepository::create(backend_engineer()).await?;
    assert_eq!(created.title, "Backend Engineer");
    assert!(created.is_active);

    let page = PostingRepository::list(&FilterParams::default().with_query("backend")).await?;
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].id, created.id);
    assert_eq!(page.data[0].job_type, Some(JobType::FullTime));

    assert_eq!(total(FilterParams::default().with_query("ACME")).await?, 1);
    assert_eq!(total(FilterParams::default().with_job_type("Contract")).await?, 0);
    assert_eq!(total(FilterParams::default().with_job_type("full-time")).await?, 1);
    assert_eq!(total(FilterParams::default().with_job_type("full")).await?, 0);
    assert_eq!(total(FilterParams::default().with_salary_min(1_100_000)).await?, 0);
    assert_eq!(
        total(
            FilterParams::default()
                .with_salary_min(800_000)
                .with_salary_max(1_000_000)
        )
        .await?,
        1
    );
    assert_eq!(total(FilterParams::default().with_salary_max(500_000)).await?, 0);

    // Deactivate directly in storage.
    let db_conn = db::get_db()?;
    db_conn
        .query("UPDATE type::thing('posting', $id) SET is_active = false")
        .bind(("id", created.id.to_string()))
        .await?;

    let filters = [
        FilterParams::default(),
        FilterParams::default().with_query("backend"),
        FilterParams::default().with_job_type("Full-time"),
        FilterParams::default()
            .with_salary_min(600_000)
            .with_salary_max(1_000_000),
    ];
    for params in filters {
        let page = PostingRepository::list(&params).await?;
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 0);
    }

    Ok(())
}

async fn check_pagination_and_ordering() -> Result<(), Box<dyn Error>> {
    let mut ids = Vec::new();
    for n in 0..5 {
        let posting = PostingRepository::create(NewPosting::new(format!("Role {n}"), "Acme")).await?;
        ids.push(posting.id);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let first = PostingRepository::list(&FilterParams::default().with_limit(2)).await?;
    assert_eq!(first.meta.total, 5);
    assert_eq!(first.meta.page, 1);
    assert_eq!(first.meta.limit, 2);
    let first_ids: Vec<_> = first.data.iter().map(|p| p.id).collect();
    assert_eq!(first_ids, vec![ids[4], ids[3]]);

    let last = PostingRepository::list(&FilterParams::default().with_limit(2).with_page(3)).await?;
    assert_eq!(last.data.len(), 1);
    assert_eq!(last.data[0].id, ids[0]);

    let past_end = PostingRepository::list(&FilterParams::default().with_limit(2).with_page(4)).await?;
    assert!(past_end.data.is_empty());
    assert_eq!(past_end.meta.total, 5);

    let clamped = PostingRepository::list(&FilterParams::default().with_page(0).with_limit(0)).await?;
    assert_eq!((clamped.meta.page, clamped.meta.limit), (1, 20));
    assert_eq!(clamped.data.len(), 5);

    Ok(())
}

async fn check_text_filters_are_literal() -> Result<(), Box<dyn Error>> {
    PostingRepository::create(NewPosting::new("Senior C++ Developer", "Acme")).await?;
    PostingRepository::create(NewPosting::new("C Developer", "Initech")).await?;
    PostingRepository::create(
        NewPosting::new("Data Analyst", "a.b*c Labs").with_location("New Delhi"),
    )
    .await?;
    PostingRepository::create(NewPosting::new("Data Engineer", "axbbc").with_location("Mumbai (West)"))
        .await?;

    let page = PostingRepository::list(&FilterParams::default().with_query("C++")).await?;
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].title, "Senior C++ Developer");

    let page = PostingRepository::list(&FilterParams::default().with_query("a.b*c")).await?;
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].company, "a.b*c Labs");

    assert_eq!(total(FilterParams::default().with_location("delhi")).await?, 1);
    assert_eq!(total(FilterParams::default().with_location("(west")).await?, 1);
    assert_eq!(total(FilterParams::default().with_location("a(")).await?, 0);
    assert_eq!(total(FilterParams::default().with_location("   ")).await?, 4);

    Ok(())
}

async fn check_salary_overlap() -> Result<(), Box<dyn Error>> {
    PostingRepository::create(
        NewPosting::new("Mid", "Acme").with_salary(Some(500_000.0), Some(900_000.0)),
    )
    .await?;
    PostingRepository::create(NewPosting::new("Unpaid", "Acme")).await?;
    PostingRepository::create(NewPosting::new("Floor only", "Acme").with_salary(Some(700_000.0), None))
        .await?;

    let band = |min: u64, max: u64| {
        FilterParams::default()
            .with_salary_min(min)
            .with_salary_max(max)
    };

    let page = PostingRepository::list(&band(800_000, 1_000_000)).await?;
    let titles: Vec<_> = page.data.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Mid"]);

    assert_eq!(total(band(1_000_000, 1_200_000)).await?, 0);
    assert_eq!(total(FilterParams::default().with_salary_max(750_000)).await?, 2);
    assert_eq!(total(FilterParams::default().with_salary_min("not a number")).await?, 3);

    Ok(())
}

async fn check_create_fills_generated_fields() -> Result<(), Box<dyn Error>> {
    let deadline = parse_deadline("2026-12-31").ok_or("deadline")?;
    let before = chrono::Utc::now();
    let created = PostingRepository::create(
        backend_engineer()
            .with_location("Remote")
            .with_description("Build APIs.")
            .with_deadline(deadline),
    )
    .await?;

    assert!(created.created_at >= before - chrono::Duration::seconds(1));
    assert!(created.updated_at >= created.created_at);
    assert_eq!(created.deadline, Some(deadline));
    assert_eq!(created.location.as_deref(), Some("Remote"));

    let listed = PostingRepository::list(&FilterParams::default()).await?;
    assert_eq!(listed.data, vec![created]);

    Ok(())
}

async fn check_invalid_payload_persists_nothing() -> Result<(), Box<dyn Error>> {
    let body = json!({ "company": "Acme", "jobType": "Full-time" });
    let result = parse_new_posting(&body, &ValidationRules::default());
    let errors = match result {
        Ok(posting) => {
            PostingRepository::create(posting).await?;
            return Err("payload without a title was accepted".into());
        }
        Err(errors) => errors,
    };
    assert!(errors.has("title"));

    assert_eq!(total(FilterParams::default()).await?, 0);

    Ok(())
}

async fn check_schema_rejection_persists_nothing() -> Result<(), Box<dyn Error>> {
    let db_conn = db::get_db()?;
    db_conn
        .query("DEFINE FIELD OVERWRITE location ON posting TYPE option<int>;")
        .await?
        .check()?;

    let result =
        PostingRepository::create(NewPosting::new("Data Analyst", "Acme").with_location("Pune"))
            .await;

    db_conn
        .query("DEFINE FIELD OVERWRITE location ON posting TYPE option<string>;")
        .await?
        .check()?;

    assert!(
        matches!(result, Err(DbError::Validation(_))),
        "expected a validation error, got {result:?}"
    );
    assert_eq!(total(FilterParams::default()).await?, 0);

    Ok(())
}

async fn check_unreadable_record_fails_listing() -> Result<(), Box<dyn Error>> {
    let db_conn = db::get_db()?;
    db_conn
        .query("CREATE posting:legacy SET title = 'Legacy Role', company = 'Acme';")
        .await?
        .check()?;

    let result = PostingRepository::list(&FilterParams::default()).await;
    assert!(
        matches!(result, Err(DbError::Serialization(_))),
        "expected a serialization error, got {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn test_posting_repository() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    // All sections share one runtime; the connection is bound to it.
    check_listing_scenario().await?;

    reset_db().await?;
    check_pagination_and_ordering().await?;

    reset_db().await?;
    check_text_filters_are_literal().await?;

    reset_db().await?;
    check_salary_overlap().await?;

    reset_db().await?;
    check_create_fills_generated_fields().await?;

    reset_db().await?;
    check_invalid_payload_persists_nothing().await?;

    reset_db().await?;
    check_schema_rejection_persists_nothing().await?;

    reset_db().await?;
    check_unreadable_record_fails_listing().await?;

    reset_db().await?;
    Ok(())
}
