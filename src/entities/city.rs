//! City entity - A market in which deals are published.
//!
//! Every deal, advertiser and email subscription belongs to exactly one city.

use super::choices::Province;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// City database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    /// Unique identifier for the city
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across cities
    #[sea_orm(unique)]
    pub name: String,
    /// URL-safe identifier, unique across cities
    #[sea_orm(unique)]
    pub slug: String,
    /// Whether the city is offered to visitors
    pub is_active: bool,
    /// Province or territory
    pub province: Province,
    /// Position in city listings (ascending)
    pub sort_order: i32,
}

/// Defines relationships between City and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One city has many deals
    #[sea_orm(has_many = "super::deal::Entity")]
    Deals,
    /// One city has many advertisers
    #[sea_orm(has_many = "super::advertiser::Entity")]
    Advertisers,
    /// One city has many email subscriptions
    #[sea_orm(has_many = "super::email_subscription::Entity")]
    EmailSubscriptions,
}

impl Related<super::deal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl Related<super::advertiser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advertisers.def()
    }
}

impl Related<super::email_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailSubscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
