//! Email subscription entity - A visitor asking to hear about deals in a city.
//!
//! The pair (`city_id`, `email`) is unique. `config::database::create_tables`
//! adds the composite unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Email subscription database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_subscriptions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Normalized (trimmed, lowercase) address
    pub email: String,
    /// City the address wants deals for
    pub city_id: i64,
}

/// Defines relationships between EmailSubscription and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each subscription belongs to a city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
