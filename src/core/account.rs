//! Account business logic - User registration and profiles.
//!
//! Every user owns exactly one profile. Registration creates the user row and
//! then calls [`create_profile_for_user`] inside the same transaction, so the
//! profile exists as soon as the user does. Any other code path that creates
//! users must call the same hook.

use crate::{
    core::{city::require_city, normalize_email, required_text},
    entities::{Profile, Province, User, profile, user},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

const MAX_USERNAME_LEN: usize = 150;
const MAX_POSTAL_CODE_LEN: usize = 7;

/// Parameters for a new user account.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    /// May be blank; filled in later from a social login
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Identity details returned by an external login provider.
#[derive(Debug, Clone, Default)]
pub struct SocialProfile {
    /// Email address, if the provider shares one
    pub email: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
}

/// Mailing and contact details a user can edit on their profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileAddress {
    /// Whether the user wants the daily email
    pub is_email_sub: bool,
    /// Street number
    pub street_number: Option<String>,
    /// Street name
    pub street: Option<String>,
    /// Apartment or unit
    pub apt: Option<String>,
    /// Home city, if any
    pub city_id: Option<i64>,
    /// Uppercased on save
    pub postal_code: Option<String>,
    /// Province or territory
    pub province: Option<Province>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    /// Phone number
    pub phone: String,
    /// Phone extension
    pub phone_ext: String,
    /// Mobile number
    pub cell: String,
    /// Fax number
    pub fax: String,
}

fn optional_email(email: &str) -> Result<String> {
    if email.trim().is_empty() {
        Ok(String::new())
    } else {
        normalize_email(email)
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Registers a user and creates their profile.
///
/// # Errors
/// Returns an error if:
/// - The username is blank, too long or already taken
/// - A non-blank email is not a valid address
/// - Either insert fails (nothing is written in that case)
#[instrument(skip(db, new_user), fields(username = %new_user.username))]
pub async fn register_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    let username = required_text("username", &new_user.username, MAX_USERNAME_LEN)?;
    let email = optional_email(&new_user.email)?;

    let txn = db.begin().await?;

    let taken = User::find()
        .filter(user::Column::Username.eq(username.as_str()))
        .one(&txn)
        .await?;
    if taken.is_some() {
        return Err(Error::invalid_input(
            "username",
            format!("'{username}' is already taken"),
        ));
    }

    let created = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        first_name: Set(new_user.first_name.trim().to_string()),
        last_name: Set(new_user.last_name.trim().to_string()),
        date_joined: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    create_profile_for_user(&txn, created.id).await?;

    txn.commit().await?;

    info!(user_id = created.id, "registered user");
    Ok(created)
}

/// Post-registration hook: creates the empty profile for a newly created user.
pub async fn create_profile_for_user<C>(db: &C, user_id: i64) -> Result<profile::Model>
where
    C: ConnectionTrait,
{
    profile::ActiveModel {
        user_id: Set(user_id),
        is_email_sub: Set(false),
        street_number: Set(None),
        street: Set(None),
        apt: Set(None),
        city_id: Set(None),
        postal_code: Set(None),
        province: Set(None),
        country_code: Set(None),
        phone: Set(String::new()),
        phone_ext: Set(String::new()),
        cell: Set(String::new()),
        fax: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Looks up a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Looks up a user by exact username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

pub(crate) async fn require_user<C>(db: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

/// The profile created for `user_id` at registration.
pub async fn get_profile_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<profile::Model>> {
    Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// A profile is complete once the user has an email address and a full name.
#[must_use]
pub fn is_profile_filled(user: &user::Model) -> bool {
    !user.email.trim().is_empty()
        && !user.first_name.trim().is_empty()
        && !user.last_name.trim().is_empty()
}

/// Copies email and name from an external login provider onto the user.
///
/// Values the provider did not supply are cleared.
// TODO: reject an email that already belongs to another user once accounts from different providers can be merged.
pub async fn fill_from_social_profile(
    db: &DatabaseConnection,
    user_id: i64,
    identity: SocialProfile,
) -> Result<user::Model> {
    let email = optional_email(identity.email.as_deref().unwrap_or_default())?;
    let mut user: user::ActiveModel = require_user(db, user_id).await?.into();
    user.email = Set(email);
    user.first_name = Set(identity.first_name.unwrap_or_default().trim().to_string());
    user.last_name = Set(identity.last_name.unwrap_or_default().trim().to_string());
    user.update(db).await.map_err(Into::into)
}

/// Replaces the editable fields of a user's profile.
///
/// # Errors
/// Returns an error if the postal code is longer than 7 characters, the city
/// does not exist, or the user has no profile.
pub async fn update_profile_address(
    db: &DatabaseConnection,
    user_id: i64,
    address: ProfileAddress,
) -> Result<profile::Model> {
    let postal_code = trimmed(address.postal_code).map(|code| code.to_ascii_uppercase());
    if postal_code
        .as_ref()
        .is_some_and(|code| code.chars().count() > MAX_POSTAL_CODE_LEN)
    {
        return Err(Error::invalid_input(
            "postal_code",
            format!("must be at most {MAX_POSTAL_CODE_LEN} characters"),
        ));
    }
    if let Some(city_id) = address.city_id {
        require_city(db, city_id).await?;
    }

    let mut profile: profile::ActiveModel = get_profile_for_user(db, user_id)
        .await?
        .ok_or(Error::ProfileNotFound { user_id })?
        .into();
    profile.is_email_sub = Set(address.is_email_sub);
    profile.street_number = Set(trimmed(address.street_number));
    profile.street = Set(trimmed(address.street));
    profile.apt = Set(trimmed(address.apt));
    profile.city_id = Set(address.city_id);
    profile.postal_code = Set(postal_code);
    profile.province = Set(address.province);
    profile.country_code = Set(trimmed(address.country_code).map(|c| c.to_ascii_uppercase()));
    profile.phone = Set(address.phone.trim().to_string());
    profile.phone_ext = Set(address.phone_ext.trim().to_string());
    profile.cell = Set(address.cell.trim().to_string());
    profile.fax = Set(address.fax.trim().to_string());
    profile.update(db).await.map_err(Into::into)
}
