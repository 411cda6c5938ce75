//! Email subscription business logic - Visitors asking for a city's daily deal by email.

use crate::{
    core::{city::require_city, normalize_email},
    entities::{EmailSubscription, email_subscription},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use tracing::{debug, instrument};

/// Subscribes an address to a city's deals.
///
/// The address is trimmed and lowercased before storing, so the same mailbox
/// cannot subscribe twice with different capitalization.
///
/// # Errors
/// Returns [`Error::InvalidEmail`] for malformed addresses,
/// [`Error::CityNotFound`] for unknown cities and
/// [`Error::DuplicateSubscription`] when the address is already subscribed.
#[instrument(skip(db, email))]
pub async fn subscribe_email(
    db: &DatabaseConnection,
    email: &str,
    city_id: i64,
) -> Result<email_subscription::Model> {
    let email = normalize_email(email)?;
    require_city(db, city_id).await?;

    if find_subscription(db, &email, city_id).await?.is_some() {
        return Err(Error::DuplicateSubscription { email, city_id });
    }

    // a concurrent subscriber can still win the race; the unique index settles it
    let created = email_subscription::ActiveModel {
        email: Set(email.clone()),
        city_id: Set(city_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateSubscription {
            email,
            city_id,
        },
        _ => err.into(),
    })?;
    debug!(subscription_id = created.id, "email subscribed");
    Ok(created)
}

async fn find_subscription(
    db: &DatabaseConnection,
    email: &str,
    city_id: i64,
) -> Result<Option<email_subscription::Model>> {
    EmailSubscription::find()
        .filter(email_subscription::Column::Email.eq(email))
        .filter(email_subscription::Column::CityId.eq(city_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes a subscription. Returns whether one existed.
pub async fn unsubscribe_email(db: &DatabaseConnection, email: &str, city_id: i64) -> Result<bool> {
    let email = normalize_email(email)?;
    let deleted = EmailSubscription::delete_many()
        .filter(email_subscription::Column::Email.eq(email.as_str()))
        .filter(email_subscription::Column::CityId.eq(city_id))
        .exec(db)
        .await?;
    Ok(deleted.rows_affected > 0)
}

/// Subscribed addresses for a city, alphabetically.
pub async fn get_subscribers_for_city(
    db: &DatabaseConnection,
    city_id: i64,
) -> Result<Vec<email_subscription::Model>> {
    EmailSubscription::find()
        .filter(email_subscription::Column::CityId.eq(city_id))
        .order_by_asc(email_subscription::Column::Email)
        .all(db)
        .await
        .map_err(Into::into)
}
