//! Deal entity - A time-limited discounted offer published in a city.
//!
//! A deal is open from `date_published` for `auction_duration` hours. Whether
//! it has expired, how many coupons remain and how close it is to tipping are
//! never stored; they are computed by [`crate::core::lifecycle`] from these
//! columns and the number of coupons sold.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
    /// Unique identifier for the deal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline shown on the deal page
    pub title: String,
    /// Advertiser making the offer
    pub advertiser_id: i64,
    /// City the deal is published in
    pub city_id: i64,
    /// URL-safe identifier
    pub slug: String,
    /// Product category
    pub category_id: i64,
    /// Start of the sale window
    pub date_published: DateTimeUtc,
    /// Full retail price in dollars
    pub retail_price: f64,
    /// Price paid for the coupon in dollars
    pub deal_price: f64,
    /// Percentage off retail
    pub discount_percentage: f64,
    /// Dollars off retail
    pub discount_value: f64,
    /// Length of the sale window in hours
    pub auction_duration: i32,
    /// Whether the deal is switched on for display
    pub is_deal_on: bool,
    /// Conditions printed on the coupon
    #[sea_orm(column_type = "Text")]
    pub fine_print: String,
    /// Selling points listed on the deal page
    #[sea_orm(column_type = "Text")]
    pub highlights: String,
    /// Minimum number of coupons that must sell for the deal to go ahead
    pub tipping_point: i32,
    /// When the sold count first reached `tipping_point`
    pub tipped_at: Option<DateTimeUtc>,
    /// Inventory cap
    pub max_available: i32,
    /// Full description of the offer
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// About the advertiser
    #[sea_orm(column_type = "Text")]
    pub company_desc: String,
    /// Comma-separated tags
    pub tags: String,
    /// Map latitude of the offer
    pub latitude: Option<f64>,
    /// Map longitude of the offer
    pub longitude: Option<f64>,
    /// Creation time
    pub entry_date: DateTimeUtc,
    /// Last modification time
    pub last_mod: DateTimeUtc,
    /// Soft delete marker - deleted deals are hidden but their coupons are kept
    pub deleted_date: Option<DateTimeUtc>,
}

/// Defines relationships between Deal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each deal belongs to an advertiser
    #[sea_orm(
        belongs_to = "super::advertiser::Entity",
        from = "Column::AdvertiserId",
        to = "super::advertiser::Column::Id"
    )]
    Advertiser,
    /// Each deal belongs to a city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    /// Each deal belongs to a product category
    #[sea_orm(
        belongs_to = "super::product_category::Entity",
        from = "Column::CategoryId",
        to = "super::product_category::Column::Id"
    )]
    Category,
    /// One deal has many coupons; their count is the number sold
    #[sea_orm(has_many = "super::coupon::Entity")]
    Coupons,
}

impl Related<super::advertiser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advertiser.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coupons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
