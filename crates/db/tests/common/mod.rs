//! Shared fixtures for repository and moderation integration tests.

#![allow(dead_code)]

use rentdesk_core::actor::Actor;
use rentdesk_db::models::listing::{CreateListing, Listing};
use rentdesk_db::repositories::ListingRepo;
use rentdesk_db::DbPool;

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = rentdesk_db::create_memory_pool()
        .await
        .expect("in-memory pool should open");
    rentdesk_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}

/// File-backed database in a temporary directory, opened through the
/// production pool settings. Keep the returned directory alive for the
/// duration of the test.
pub async fn file_pool() -> (tempfile::TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let url = format!("sqlite://{}", dir.path().join("rentdesk.db").display());
    let pool = rentdesk_db::create_pool(&url)
        .await
        .expect("file pool should open");
    rentdesk_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    (dir, pool)
}

pub fn admin() -> Actor {
    Actor::new(1, "admin", "admin")
}

pub fn new_listing(title: &str, make: &str, model: &str, location: &str) -> CreateListing {
    CreateListing {
        title: title.to_string(),
        description: Some(format!("{make} {model} for rent")),
        make: make.to_string(),
        model: model.to_string(),
        year: 2022,
        price_per_day: 50.0,
        location: location.to_string(),
        image_url: None,
    }
}

/// Insert a pending listing directly through the store (no audit entry).
pub async fn insert_listing(
    pool: &DbPool,
    title: &str,
    make: &str,
    model: &str,
    location: &str,
) -> Listing {
    ListingRepo::create(pool, &new_listing(title, make, model, location))
        .await
        .expect("listing insert should succeed")
}

/// Insert `n` generic pending listings.
pub async fn insert_many(pool: &DbPool, n: usize) -> Vec<Listing> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(insert_listing(pool, &format!("Car {i}"), "Honda", "Civic", "Austin, TX").await);
    }
    out
}
