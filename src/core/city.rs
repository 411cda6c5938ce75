//! City business logic - Creating and listing the markets deals are published in.

use crate::{
    core::{required_text, slugify},
    entities::{City, Province, city},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

const MAX_CITY_NAME_LEN: usize = 60;

/// Parameters for a new city.
#[derive(Debug, Clone)]
pub struct NewCity {
    /// Display name
    pub name: String,
    /// Derived from `name` when blank
    pub slug: String,
    /// Province or territory
    pub province: Province,
    /// Whether the city is offered to visitors
    pub is_active: bool,
    /// Position in city listings
    pub sort_order: i32,
}

impl NewCity {
    /// An inactive city sorted first, with a slug derived from its name.
    #[must_use]
    pub fn new(name: &str, province: Province) -> Self {
        Self {
            name: name.to_string(),
            slug: String::new(),
            province,
            is_active: false,
            sort_order: 0,
        }
    }
}

/// Creates a city after validating its name and slug.
///
/// # Errors
/// Returns an error if:
/// - The name is blank or longer than 60 characters
/// - No usable slug can be produced
/// - Another city already uses the name or slug
/// - The database insert fails
#[instrument(skip(db))]
pub async fn create_city(db: &DatabaseConnection, new_city: NewCity) -> Result<city::Model> {
    let name = required_text("name", &new_city.name, MAX_CITY_NAME_LEN)?;
    let slug = if new_city.slug.trim().is_empty() {
        slugify(&name)
    } else {
        slugify(&new_city.slug)
    };
    if slug.is_empty() {
        return Err(Error::invalid_input("slug", "must contain letters or digits"));
    }

    let clash = City::find()
        .filter(
            city::Column::Name
                .eq(name.as_str())
                .or(city::Column::Slug.eq(slug.as_str())),
        )
        .one(db)
        .await?;
    if let Some(existing) = clash {
        return Err(Error::invalid_input(
            "name",
            format!("city '{}' ({}) already exists", existing.name, existing.slug),
        ));
    }

    let model = city::ActiveModel {
        name: Set(name),
        slug: Set(slug),
        is_active: Set(new_city.is_active),
        province: Set(new_city.province),
        sort_order: Set(new_city.sort_order),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    debug!(city_id = created.id, slug = %created.slug, "created city");
    Ok(created)
}

/// Looks up a city by id.
pub async fn get_city_by_id(db: &DatabaseConnection, city_id: i64) -> Result<Option<city::Model>> {
    City::find_by_id(city_id).one(db).await.map_err(Into::into)
}

/// Looks up a city by slug.
pub async fn get_city_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<city::Model>> {
    City::find()
        .filter(city::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads a city or fails with [`Error::CityNotFound`].
pub(crate) async fn require_city<C>(db: &C, city_id: i64) -> Result<city::Model>
where
    C: ConnectionTrait,
{
    City::find_by_id(city_id)
        .one(db)
        .await?
        .ok_or(Error::CityNotFound { id: city_id })
}

/// Cities offered to visitors, ordered by `sort_order` then name.
pub async fn get_active_cities(db: &DatabaseConnection) -> Result<Vec<city::Model>> {
    City::find()
        .filter(city::Column::IsActive.eq(true))
        .order_by_asc(city::Column::SortOrder)
        .order_by_asc(city::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Switches a city on or off for visitors.
pub async fn set_city_active(
    db: &DatabaseConnection,
    city_id: i64,
    is_active: bool,
) -> Result<city::Model> {
    let mut city: city::ActiveModel = require_city(db, city_id).await?.into();
    city.is_active = Set(is_active);
    city.update(db).await.map_err(Into::into)
}
