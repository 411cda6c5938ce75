//! Coupon entity - One user's purchase against a deal.
//!
//! Each row is a single sale. Coupons are never deleted; `deleted_date` is
//! reserved for soft deletes.

use super::choices::CouponStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coupon database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    /// Unique identifier for the coupon
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Purchasing user
    pub user_id: i64,
    /// Deal the coupon was bought for
    pub deal_id: i64,
    /// Where the coupon is in its lifecycle
    pub status: CouponStatus,
    /// When the coupon was bought
    pub entry_date: DateTimeUtc,
    /// Last status change
    pub last_mod: DateTimeUtc,
    /// Soft delete marker
    pub deleted_date: Option<DateTimeUtc>,
}

/// Defines relationships between Coupon and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each coupon belongs to its buyer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each coupon belongs to a deal
    #[sea_orm(
        belongs_to = "super::deal::Entity",
        from = "Column::DealId",
        to = "super::deal::Column::Id"
    )]
    Deal,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::deal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
