//! Product category entity - Groups deals by the kind of product or service offered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_categories")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category name (e.g. "Restaurants", "Spa")
    pub name: String,
}

/// Defines relationships between ProductCategory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many deals
    #[sea_orm(has_many = "super::deal::Entity")]
    Deals,
}

impl Related<super::deal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
