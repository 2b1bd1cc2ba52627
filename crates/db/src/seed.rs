//! First-run data: a default admin account and a few sample listings.
//!
//! Each part is inserted only when its table is empty, so calling
//! [`seed_defaults`] on every startup is safe.

use rentdesk_core::listing::ListingStatus;
use rentdesk_core::roles::ROLE_ADMIN;

use crate::models::user::CreateUser;
use crate::repositories::{ListingRepo, UserRepo};
use crate::DbPool;

/// A sample listing inserted on first run.
struct SampleListing {
    title: &'static str,
    description: &'static str,
    make: &'static str,
    model: &'static str,
    year: i32,
    price_per_day: f64,
    location: &'static str,
    image_url: &'static str,
    status: ListingStatus,
}

const SAMPLE_LISTINGS: &[SampleListing] = &[
    SampleListing {
        title: "Toyota Camry 2023",
        description: "Reliable sedan perfect for city driving",
        make: "Toyota",
        model: "Camry",
        year: 2023,
        price_per_day: 45.99,
        location: "New York, NY",
        image_url: "https://images.unsplash.com/photo-1621007947382-bb3c3994e3fb?w=2070&auto=format&fit=crop",
        status: ListingStatus::Pending,
    },
    SampleListing {
        title: "BMW X5 2022",
        description: "Luxury SUV with premium features",
        make: "BMW",
        model: "X5",
        year: 2022,
        price_per_day: 89.99,
        location: "Los Angeles, CA",
        image_url: "https://images.unsplash.com/photo-1635990215241-4d2805d729bb?w=2070&auto=format&fit=crop",
        status: ListingStatus::Approved,
    },
    SampleListing {
        title: "Ford Mustang 2021",
        description: "Classic American muscle car",
        make: "Ford",
        model: "Mustang",
        year: 2021,
        price_per_day: 75.0,
        location: "Chicago, IL",
        image_url: "https://images.unsplash.com/photo-1625231334168-35067f8853ed?w=987&auto=format&fit=crop",
        status: ListingStatus::Rejected,
    },
];

/// What a seeding run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub listings_created: usize,
}

/// Insert the default admin account and sample listings if absent.
///
/// `admin_password_hash` must already be a PHC hash string; hashing lives in
/// the API crate. Seeded listings are imports, not moderation actions, so no
/// audit entries are written.
pub async fn seed_defaults(
    pool: &DbPool,
    admin_username: &str,
    admin_password_hash: &str,
) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    if UserRepo::count(&mut *tx).await? == 0 {
        UserRepo::create(
            &mut *tx,
            &CreateUser {
                username: admin_username.to_string(),
                password_hash: admin_password_hash.to_string(),
                role: ROLE_ADMIN.to_string(),
            },
        )
        .await?;
        report.admin_created = true;
    }

    if ListingRepo::count(&mut *tx).await? == 0 {
        for sample in SAMPLE_LISTINGS {
            sqlx::query(
                "INSERT INTO listings
                    (title, description, make, model, year, price_per_day, location, image_url, status)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(sample.title)
            .bind(sample.description)
            .bind(sample.make)
            .bind(sample.model)
            .bind(sample.year)
            .bind(sample.price_per_day)
            .bind(sample.location)
            .bind(sample.image_url)
            .bind(sample.status.as_str())
            .execute(&mut *tx)
            .await?;
            report.listings_created += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        admin_created = report.admin_created,
        listings_created = report.listings_created,
        "Seed data applied",
    );

    Ok(report)
}
