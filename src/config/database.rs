//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. Tables are created parents first so that
//! foreign keys resolve.

use crate::entities::{
    Advertiser, City, Coupon, Deal, EmailSubscription, ProductCategory, Profile, User,
    email_subscription,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use tracing::{debug, info};

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/daily_deals.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back to
/// a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, City).await?;
    create_table(db, &schema, ProductCategory).await?;
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Advertiser).await?;
    create_table(db, &schema, Deal).await?;
    create_table(db, &schema, Coupon).await?;
    create_table(db, &schema, EmailSubscription).await?;
    create_table(db, &schema, Profile).await?;

    // one subscription per address and city
    let subscription_index = Index::create()
        .if_not_exists()
        .name("idx_email_subscriptions_city_email")
        .table(EmailSubscription)
        .col(email_subscription::Column::CityId)
        .col(email_subscription::Column::Email)
        .unique()
        .to_owned();
    db.execute(db.get_database_backend().build(&subscription_index))
        .await?;

    info!("Database tables are ready");
    Ok(())
}
