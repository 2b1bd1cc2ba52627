//! Integration tests for the listing store and query builder against SQLite.

mod common;

use common::{insert_listing, insert_many, new_listing, test_pool};
use rentdesk_core::listing::ListingStatus;
use rentdesk_db::models::listing::UpdateListing;
use rentdesk_db::query::ListingQuery;
use rentdesk_db::repositories::ListingRepo;
use rentdesk_db::DbPool;

async fn run(pool: &DbPool, status: &str, search: &str, page: i64) -> (Vec<String>, i64) {
    let query = ListingQuery::parse(status, search, page, 10).unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let (items, total) = ListingRepo::list(&mut conn, &query).await.unwrap();
    (items.into_iter().map(|l| l.title).collect(), total)
}

#[tokio::test]
async fn new_listing_starts_pending_without_provenance() {
    let pool = test_pool().await;
    let listing = insert_listing(&pool, "Toyota Camry 2023", "Toyota", "Camry", "New York, NY").await;

    assert_eq!(listing.status, ListingStatus::Pending);
    assert!(listing.approved_by.is_none());
    assert!(listing.approved_at.is_none());
    assert!(listing.updated_at >= listing.created_at);
}

#[tokio::test]
async fn find_missing_listing_returns_none() {
    let pool = test_pool().await;
    assert!(ListingRepo::find_by_id(&pool, 404).await.unwrap().is_none());
}

#[tokio::test]
async fn second_page_of_fifteen_has_five_items() {
    let pool = test_pool().await;
    insert_many(&pool, 15).await;

    let (first, total) = run(&pool, "all", "", 1).await;
    assert_eq!(first.len(), 10);
    assert_eq!(total, 15);

    let (second, total) = run(&pool, "all", "", 2).await;
    assert_eq!(second.len(), 5);
    assert_eq!(total, 15);

    // Pages do not overlap.
    assert!(second.iter().all(|t| !first.contains(t)));
}

#[tokio::test]
async fn out_of_range_page_is_empty_with_correct_total() {
    let pool = test_pool().await;
    insert_many(&pool, 3).await;

    let (items, total) = run(&pool, "all", "", 9).await;
    assert!(items.is_empty());
    assert_eq!(total, 3);
}

#[tokio::test]
async fn newest_listing_comes_first() {
    let pool = test_pool().await;
    insert_many(&pool, 3).await;

    let (items, _) = run(&pool, "all", "", 1).await;
    assert_eq!(items, vec!["Car 2", "Car 1", "Car 0"]);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let pool = test_pool().await;
    insert_listing(&pool, "Toyota Camry 2023", "Toyota", "Camry", "New York, NY").await;
    insert_listing(&pool, "BMW X5 2022", "BMW", "X5", "Los Angeles, CA").await;

    let (items, total) = run(&pool, "all", "toy", 1).await;
    assert_eq!(items, vec!["Toyota Camry 2023"]);
    assert_eq!(total, 1);

    let (items, _) = run(&pool, "all", "TOY", 1).await;
    assert_eq!(items, vec!["Toyota Camry 2023"]);
}

#[tokio::test]
async fn search_covers_model_and_location() {
    let pool = test_pool().await;
    insert_listing(&pool, "Weekend cruiser", "Ford", "Mustang", "Chicago, IL").await;
    insert_listing(&pool, "City hopper", "Fiat", "500", "Rome").await;

    let (by_model, _) = run(&pool, "all", "musta", 1).await;
    assert_eq!(by_model, vec!["Weekend cruiser"]);

    let (by_location, _) = run(&pool, "all", "chicago", 1).await;
    assert_eq!(by_location, vec!["Weekend cruiser"]);
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let pool = test_pool().await;
    insert_listing(&pool, "Camry", "Toyota", "Camry", "New York, NY").await;

    let (items, total) = run(&pool, "all", "%", 1).await;
    assert!(items.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn status_filter_and_search_combine() {
    let pool = test_pool().await;
    let a = insert_listing(&pool, "Toyota Camry", "Toyota", "Camry", "Boston").await;
    insert_listing(&pool, "Toyota Corolla", "Toyota", "Corolla", "Boston").await;
    ListingRepo::set_status(&pool, a.id, ListingStatus::Approved, "admin")
        .await
        .unwrap();

    let (items, total) = run(&pool, "approved", "toyota", 1).await;
    assert_eq!(items, vec!["Toyota Camry"]);
    assert_eq!(total, 1);

    let (items, _) = run(&pool, "pending", "toyota", 1).await;
    assert_eq!(items, vec!["Toyota Corolla"]);
}

#[tokio::test]
async fn update_fields_applies_only_submitted_values() {
    let pool = test_pool().await;
    let listing = insert_listing(&pool, "Old title", "Honda", "Civic", "Austin, TX").await;

    let patch = UpdateListing {
        title: Some("New title".into()),
        price_per_day: Some(61.5),
        ..Default::default()
    };
    let updated = ListingRepo::update_fields(&pool, listing.id, &patch)
        .await
        .unwrap()
        .expect("listing exists");

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.price_per_day, 61.5);
    assert_eq!(updated.make, "Honda");
    assert_eq!(updated.location, "Austin, TX");
    assert_eq!(updated.status, ListingStatus::Pending);
    assert!(updated.updated_at >= listing.updated_at);
}

#[tokio::test]
async fn submitted_null_clears_image_and_description() {
    let pool = test_pool().await;
    let mut input = new_listing("Civic", "Honda", "Civic", "Austin, TX");
    input.image_url = Some("https://img.example/civic.jpg".into());
    let listing = ListingRepo::create(&pool, &input).await.unwrap();
    assert!(listing.image_url.is_some());
    assert!(listing.description.is_some());

    let patch: UpdateListing =
        serde_json::from_str(r#"{"image_url": null, "description": null}"#).unwrap();
    let updated = ListingRepo::update_fields(&pool, listing.id, &patch)
        .await
        .unwrap()
        .expect("listing exists");

    assert_eq!(updated.image_url, None);
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Civic");
}

#[tokio::test]
async fn omitted_nullable_fields_are_kept() {
    let pool = test_pool().await;
    let mut input = new_listing("Civic", "Honda", "Civic", "Austin, TX");
    input.image_url = Some("https://img.example/civic.jpg".into());
    let listing = ListingRepo::create(&pool, &input).await.unwrap();

    let patch = UpdateListing {
        image_url: Some(Some("https://img.example/civic-2.jpg".into())),
        ..Default::default()
    };
    let updated = ListingRepo::update_fields(&pool, listing.id, &patch)
        .await
        .unwrap()
        .expect("listing exists");

    assert_eq!(updated.image_url.as_deref(), Some("https://img.example/civic-2.jpg"));
    assert_eq!(updated.description, listing.description);
}

#[tokio::test]
async fn update_fields_on_missing_listing_returns_none() {
    let pool = test_pool().await;
    let patch = UpdateListing {
        title: Some("x".into()),
        ..Default::default()
    };
    assert!(ListingRepo::update_fields(&pool, 77, &patch)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn negative_price_is_rejected_by_the_store() {
    let pool = test_pool().await;
    let listing = insert_listing(&pool, "Civic", "Honda", "Civic", "Austin, TX").await;
    let patch = UpdateListing {
        price_per_day: Some(-1.0),
        ..Default::default()
    };
    assert!(ListingRepo::update_fields(&pool, listing.id, &patch).await.is_err());
}

#[tokio::test]
async fn approval_stamps_provenance_and_rejection_keeps_it() {
    let pool = test_pool().await;
    let listing = insert_listing(&pool, "Civic", "Honda", "Civic", "Austin, TX").await;

    let approved = ListingRepo::set_status(&pool, listing.id, ListingStatus::Approved, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, ListingStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("alice"));
    assert!(approved.approved_at.is_some());

    let rejected = ListingRepo::set_status(&pool, listing.id, ListingStatus::Rejected, "bob")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, ListingStatus::Rejected);
    assert_eq!(rejected.approved_by.as_deref(), Some("alice"));
    assert_eq!(rejected.approved_at, approved.approved_at);
}

#[tokio::test]
async fn count_by_status_groups_rows() {
    let pool = test_pool().await;
    let listings = insert_many(&pool, 4).await;
    ListingRepo::set_status(&pool, listings[0].id, ListingStatus::Approved, "admin")
        .await
        .unwrap();
    ListingRepo::set_status(&pool, listings[1].id, ListingStatus::Rejected, "admin")
        .await
        .unwrap();

    let stats = ListingRepo::count_by_status(&pool).await.unwrap();
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.total, 4);
}
