//! Profile entity - Contact and mailing details attached one-to-one to a user.

use super::choices::Province;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Whether the user asked for deal emails
    pub is_email_sub: bool,
    /// Street number
    pub street_number: Option<String>,
    /// Street name
    pub street: Option<String>,
    /// Apartment or unit
    pub apt: Option<String>,
    /// Home city, if any
    pub city_id: Option<i64>,
    /// Postal code
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

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each profile belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Optional home city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
