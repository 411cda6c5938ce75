//! Advertiser entity - The business offering a deal.

use super::choices::Province;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Advertiser database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisers")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business name
    pub name: String,
    /// Street address
    pub address: String,
    /// City the advertiser operates in
    pub city_id: i64,
    /// Uppercased postal code
    pub postal_code: String,
    /// Province or territory
    pub province: Province,
    /// ISO 3166-1 alpha-2 country code (e.g. `"CA"`)
    pub country_code: String,
    /// Phone number
    pub phone: String,
    /// Phone extension
    pub phone_ext: Option<String>,
    /// Mobile number
    pub cell: String,
    /// Fax number
    pub fax: String,
    /// Advertising contact person
    pub contact: Option<String>,
    /// Email address of the contact
    pub email: Option<String>,
}

/// Defines relationships between Advertiser and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each advertiser belongs to a city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    /// One advertiser has many deals
    #[sea_orm(has_many = "super::deal::Entity")]
    Deals,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::deal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
