//! Advertiser business logic - The businesses that publish deals.

use crate::{
    core::{city::require_city, normalize_email, required_text},
    entities::{Advertiser, Province, advertiser},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

const MAX_NAME_LEN: usize = 60;
const MAX_POSTAL_CODE_LEN: usize = 7;

/// Parameters for a new advertiser.
#[derive(Debug, Clone)]
pub struct NewAdvertiser {
    /// Business name
    pub name: String,
    /// Street address
    pub address: String,
    /// City the advertiser operates in
    pub city_id: i64,
    /// Uppercased; at most 7 characters
    pub postal_code: String,
    /// Province or territory
    pub province: Province,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Phone number
    pub phone: String,
    /// Phone extension
    pub phone_ext: Option<String>,
    /// Mobile number
    pub cell: String,
    /// Fax number
    pub fax: String,
    /// Contact person
    pub contact: Option<String>,
    /// Contact email, validated when present
    pub email: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Creates an advertiser in an existing city.
///
/// # Errors
/// Returns an error if:
/// - The name or address is blank or longer than 60 characters
/// - The postal code is blank or longer than 7 characters
/// - The country code is not two letters
/// - A contact email is given but is not a valid address
/// - The city does not exist
#[instrument(skip(db, new_advertiser), fields(name = %new_advertiser.name))]
pub async fn create_advertiser(
    db: &DatabaseConnection,
    new_advertiser: NewAdvertiser,
) -> Result<advertiser::Model> {
    let name = required_text("name", &new_advertiser.name, MAX_NAME_LEN)?;
    let address = required_text("address", &new_advertiser.address, MAX_NAME_LEN)?;
    let postal_code = required_text(
        "postal_code",
        &new_advertiser.postal_code,
        MAX_POSTAL_CODE_LEN,
    )?
    .to_ascii_uppercase();

    let country_code = new_advertiser.country_code.trim().to_ascii_uppercase();
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::invalid_input(
            "country_code",
            format!("expected a two-letter code, got '{}'", new_advertiser.country_code),
        ));
    }

    let email = non_blank(new_advertiser.email)
        .map(|email| normalize_email(&email))
        .transpose()?;

    require_city(db, new_advertiser.city_id).await?;

    let model = advertiser::ActiveModel {
        name: Set(name),
        address: Set(address),
        city_id: Set(new_advertiser.city_id),
        postal_code: Set(postal_code),
        province: Set(new_advertiser.province),
        country_code: Set(country_code),
        phone: Set(new_advertiser.phone.trim().to_string()),
        phone_ext: Set(non_blank(new_advertiser.phone_ext)),
        cell: Set(new_advertiser.cell.trim().to_string()),
        fax: Set(new_advertiser.fax.trim().to_string()),
        contact: Set(non_blank(new_advertiser.contact)),
        email: Set(email),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(advertiser_id = created.id, "registered advertiser");
    Ok(created)
}

/// Looks up an advertiser by id.
pub async fn get_advertiser_by_id(
    db: &DatabaseConnection,
    advertiser_id: i64,
) -> Result<Option<advertiser::Model>> {
    Advertiser::find_by_id(advertiser_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Advertisers located in a city, ordered by name.
pub async fn get_advertisers_for_city(
    db: &DatabaseConnection,
    city_id: i64,
) -> Result<Vec<advertiser::Model>> {
    Advertiser::find()
        .filter(advertiser::Column::CityId.eq(city_id))
        .order_by_asc(advertiser::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

pub(crate) async fn require_advertiser<C>(db: &C, advertiser_id: i64) -> Result<advertiser::Model>
where
    C: ConnectionTrait,
{
    Advertiser::find_by_id(advertiser_id)
        .one(db)
        .await?
        .ok_or(Error::AdvertiserNotFound { id: advertiser_id })
}
