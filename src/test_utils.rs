//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        account::{self, NewUser},
        advertiser::{self, NewAdvertiser},
        category,
        city::{self, NewCity},
        deal::{self, NewDeal},
    },
    entities::{self, CouponStatus, Province, coupon},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an active test city in Ontario.
pub async fn create_test_city(db: &DatabaseConnection, name: &str) -> Result<entities::city::Model> {
    let mut new_city = NewCity::new(name, Province::Ontario);
    new_city.is_active = true;
    city::create_city(db, new_city).await
}

/// Advertiser parameters with valid defaults, located in `city_id`.
pub fn test_new_advertiser(city_id: i64) -> NewAdvertiser {
    NewAdvertiser {
        name: "Test Bistro".to_string(),
        address: "1 King St W".to_string(),
        city_id,
        postal_code: "M5H 1A1".to_string(),
        province: Province::Ontario,
        country_code: "CA".to_string(),
        phone: "416-555-0100".to_string(),
        phone_ext: None,
        cell: "416-555-0101".to_string(),
        fax: "416-555-0102".to_string(),
        contact: Some("Robin".to_string()),
        email: None,
    }
}

/// Registers a test user (and, through registration, their profile).
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    account::register_user(
        db,
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        },
    )
    .await
}

/// The rows every deal needs to reference.
pub struct CatalogFixture {
    /// Active city
    pub city: entities::city::Model,
    /// Advertiser in the city
    pub advertiser: entities::advertiser::Model,
    /// Product category
    pub category: entities::product_category::Model,
}

impl CatalogFixture {
    /// Deal parameters referencing this fixture's rows.
    ///
    /// # Defaults
    /// * title: "Test Deal"
    /// * `auction_duration`: 24 hours
    /// * `tipping_point`: 1
    /// * `max_available`: 100
    pub fn new_deal(&self, date_published: DateTime<Utc>) -> NewDeal {
        NewDeal {
            title: "Test Deal".to_string(),
            advertiser_id: self.advertiser.id,
            city_id: self.city.id,
            category_id: self.category.id,
            date_published,
            retail_price: 50.0,
            deal_price: 25.0,
            discount_percentage: 50.0,
            discount_value: 25.0,
            max_available: 100,
            ..NewDeal::default()
        }
    }
}

/// Sets up a database holding one city, advertiser and category.
pub async fn setup_with_catalog() -> Result<(DatabaseConnection, CatalogFixture)> {
    let db = setup_test_db().await?;
    let city = create_test_city(&db, "Toronto").await?;
    let advertiser = advertiser::create_advertiser(&db, test_new_advertiser(city.id)).await?;
    let category = category::create_category(&db, "Restaurants").await?;
    Ok((
        db,
        CatalogFixture {
            city,
            advertiser,
            category,
        },
    ))
}

/// Creates a 24 hour deal with the given tipping point and inventory.
pub async fn create_test_deal(
    db: &DatabaseConnection,
    fixture: &CatalogFixture,
    date_published: DateTime<Utc>,
    tipping_point: i32,
    max_available: i32,
) -> Result<entities::deal::Model> {
    deal::create_deal(
        db,
        NewDeal {
            tipping_point,
            max_available,
            ..fixture.new_deal(date_published)
        },
    )
    .await
}

/// Inserts an ON_HOLD coupon directly, bypassing purchase checks.
pub async fn insert_test_coupon(
    db: &DatabaseConnection,
    user_id: i64,
    deal_id: i64,
) -> Result<coupon::Model> {
    let now = Utc::now();
    coupon::ActiveModel {
        user_id: Set(user_id),
        deal_id: Set(deal_id),
        status: Set(CouponStatus::OnHold),
        entry_date: Set(now),
        last_mod: Set(now),
        deleted_date: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
