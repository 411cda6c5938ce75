//! Coupon business logic - Purchasing coupons and moving them through their lifecycle.
//!
//! A coupon starts ON_HOLD when bought, becomes ACTIVE once payment is
//! collected and REDEEMED when used at the advertiser. Inventory is not
//! enforced at purchase time: a deal may be oversold.

use crate::{
    core::{
        account::require_user,
        deal::{record_tip_if_reached, require_live_deal},
        lifecycle::DealTerms,
    },
    entities::{Coupon, CouponStatus, coupon},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponPurchase {
    /// The ON_HOLD coupon that was inserted
    pub coupon: coupon::Model,
    /// Whether this purchase was the one that tipped the deal
    pub tipped_deal: bool,
}

/// Buys one coupon for `user_id` against `deal_id` at `now`.
///
/// The coupon insert and the tipping-point check run in one database
/// transaction, so the coupon that brings the sold count up to the tipping
/// point is the one that stamps the deal's `tipped_at`.
///
/// # Errors
/// Returns an error if:
/// - The user does not exist
/// - The deal does not exist or has been deleted
/// - The deal is not published yet ([`Error::DealNotOpen`])
/// - The deal's sale window has closed ([`Error::DealExpired`])
/// - The deal's stored timing or tipping point is invalid
#[instrument(skip(db))]
pub async fn purchase_coupon(
    db: &DatabaseConnection,
    user_id: i64,
    deal_id: i64,
    now: DateTime<Utc>,
) -> Result<CouponPurchase> {
    let txn = db.begin().await?;

    require_user(&txn, user_id).await?;
    let deal = require_live_deal(&txn, deal_id).await?;

    if now < deal.date_published {
        return Err(Error::DealNotOpen {
            id: deal_id,
            opens_at: deal.date_published,
        });
    }
    let terms = DealTerms::from(&deal);
    if terms.is_expired(now)? {
        return Err(Error::DealExpired {
            id: deal_id,
            expired_at: terms.expires_at()?,
        });
    }

    let coupon = coupon::ActiveModel {
        user_id: Set(user_id),
        deal_id: Set(deal_id),
        status: Set(CouponStatus::OnHold),
        entry_date: Set(now),
        last_mod: Set(now),
        deleted_date: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let tipped_deal = record_tip_if_reached(&txn, deal, now).await?;

    txn.commit().await?;

    info!(coupon_id = coupon.id, tipped_deal, "coupon purchased");
    Ok(CouponPurchase {
        coupon,
        tipped_deal,
    })
}

/// Looks up a coupon by id.
pub async fn get_coupon_by_id(
    db: &DatabaseConnection,
    coupon_id: i64,
) -> Result<Option<coupon::Model>> {
    Coupon::find_by_id(coupon_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// A user's coupons, newest first.
pub async fn get_coupons_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<coupon::Model>> {
    Coupon::find()
        .filter(coupon::Column::UserId.eq(user_id))
        .order_by_desc(coupon::Column::EntryDate)
        .order_by_desc(coupon::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Coupons sold for a deal, newest first.
pub async fn get_coupons_for_deal(
    db: &DatabaseConnection,
    deal_id: i64,
) -> Result<Vec<coupon::Model>> {
    Coupon::find()
        .filter(coupon::Column::DealId.eq(deal_id))
        .order_by_desc(coupon::Column::EntryDate)
        .order_by_desc(coupon::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn transition(
    db: &DatabaseConnection,
    coupon_id: i64,
    from: CouponStatus,
    to: CouponStatus,
    now: DateTime<Utc>,
) -> Result<coupon::Model> {
    let current = Coupon::find_by_id(coupon_id)
        .one(db)
        .await?
        .ok_or(Error::CouponNotFound { id: coupon_id })?;

    if current.status != from {
        return Err(Error::InvalidStatusTransition {
            id: coupon_id,
            from: current.status.name(),
            to: to.name(),
        });
    }

    let mut active: coupon::ActiveModel = current.into();
    active.status = Set(to);
    active.last_mod = Set(now);
    let updated = active.update(db).await?;
    info!(coupon_id, status = to.name(), "coupon status changed");
    Ok(updated)
}

/// Marks payment as collected: ON_HOLD -> ACTIVE.
pub async fn activate_coupon(
    db: &DatabaseConnection,
    coupon_id: i64,
    now: DateTime<Utc>,
) -> Result<coupon::Model> {
    transition(db, coupon_id, CouponStatus::OnHold, CouponStatus::Active, now).await
}

/// Marks the coupon as used at the advertiser: ACTIVE -> REDEEMED.
pub async fn redeem_coupon(
    db: &DatabaseConnection,
    coupon_id: i64,
    now: DateTime<Utc>,
) -> Result<coupon::Model> {
    transition(db, coupon_id, CouponStatus::Active, CouponStatus::Redeemed, now).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::deal::{deal_progress, get_deal_by_id, soft_delete_deal};
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone};

    fn jan_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_purchase_coupon_starts_on_hold() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 5, 10).await?;
        let user = create_test_user(&db, "alice").await?;

        let now = jan_first() + Duration::hours(1);
        let purchase = purchase_coupon(&db, user.id, deal.id, now).await?;
        assert_eq!(purchase.coupon.status, CouponStatus::OnHold);
        assert_eq!(purchase.coupon.user_id, user.id);
        assert_eq!(purchase.coupon.deal_id, deal.id);
        assert_eq!(purchase.coupon.entry_date, now);
        assert!(!purchase.tipped_deal);

        let progress = deal_progress(&db, deal.id, now).await?;
        assert_eq!(progress.num_sold, 1);
        assert_eq!(progress.percentage_sold, 20);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_that_reaches_tipping_point_tips_deal() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 2, 10).await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        let first = jan_first() + Duration::minutes(5);
        let second = jan_first() + Duration::minutes(10);
        let third = jan_first() + Duration::minutes(15);

        assert!(!purchase_coupon(&db, alice.id, deal.id, first).await?.tipped_deal);
        assert!(purchase_coupon(&db, bob.id, deal.id, second).await?.tipped_deal);
        assert!(!purchase_coupon(&db, alice.id, deal.id, third).await?.tipped_deal);

        let stored = get_deal_by_id(&db, deal.id).await?.unwrap();
        assert_eq!(stored.tipped_at, Some(second));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_expired_deal_fails() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 1, 10).await?;
        let user = create_test_user(&db, "alice").await?;

        let result = purchase_coupon(&db, user.id, deal.id, jan_first() + Duration::hours(24)).await;
        assert!(matches!(result, Err(Error::DealExpired { .. })));
        assert!(get_coupons_for_deal(&db, deal.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_before_publish_fails() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let published = jan_first() + Duration::days(9);
        let deal = create_test_deal(&db, &fixture, published, 1, 10).await?;
        let user = create_test_user(&db, "alice").await?;

        let early = purchase_coupon(&db, user.id, deal.id, jan_first() + Duration::days(4)).await;
        assert!(matches!(
            early,
            Err(Error::DealNotOpen { id, opens_at }) if id == deal.id && opens_at == published
        ));
        assert!(get_coupons_for_deal(&db, deal.id).await?.is_empty());
        let stored = get_deal_by_id(&db, deal.id).await?.unwrap();
        assert_eq!(stored.tipped_at, None);

        // the window opens exactly at the publish date
        let purchase = purchase_coupon(&db, user.id, deal.id, published).await?;
        assert!(purchase.tipped_deal);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_allows_overselling() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 1, 1).await?;
        let user = create_test_user(&db, "alice").await?;

        purchase_coupon(&db, user.id, deal.id, jan_first()).await?;
        purchase_coupon(&db, user.id, deal.id, jan_first()).await?;

        let progress = deal_progress(&db, deal.id, jan_first()).await?;
        assert_eq!(progress.num_available, -1);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_requires_user_and_deal() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 1, 10).await?;
        let user = create_test_user(&db, "alice").await?;

        assert!(matches!(
            purchase_coupon(&db, 999, deal.id, jan_first()).await,
            Err(Error::UserNotFound { id: 999 })
        ));
        assert!(matches!(
            purchase_coupon(&db, user.id, 999, jan_first()).await,
            Err(Error::DealNotFound { id: 999 })
        ));

        soft_delete_deal(&db, deal.id, jan_first()).await?;
        assert!(matches!(
            purchase_coupon(&db, user.id, deal.id, jan_first()).await,
            Err(Error::DealNotFound { id }) if id == deal.id
        ));
        assert!(get_coupons_for_deal(&db, deal.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_coupon_status_transitions() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 1, 10).await?;
        let user = create_test_user(&db, "alice").await?;
        let coupon = purchase_coupon(&db, user.id, deal.id, jan_first()).await?.coupon;

        // cannot redeem before payment is collected
        assert!(matches!(
            redeem_coupon(&db, coupon.id, jan_first()).await,
            Err(Error::InvalidStatusTransition {
                from: "ON_HOLD",
                to: "REDEEMED",
                ..
            })
        ));

        let later = jan_first() + Duration::days(2);
        let active = activate_coupon(&db, coupon.id, later).await?;
        assert_eq!(active.status, CouponStatus::Active);
        assert_eq!(active.last_mod, later);

        let redeemed = redeem_coupon(&db, coupon.id, later).await?;
        assert_eq!(redeemed.status, CouponStatus::Redeemed);

        assert!(activate_coupon(&db, coupon.id, later).await.is_err());
        assert!(matches!(
            activate_coupon(&db, 999, later).await,
            Err(Error::CouponNotFound { id: 999 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_coupon_listings_newest_first() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let deal = create_test_deal(&db, &fixture, jan_first(), 1, 10).await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        let early = purchase_coupon(&db, alice.id, deal.id, jan_first()).await?.coupon;
        let middle = purchase_coupon(&db, bob.id, deal.id, jan_first() + Duration::hours(1))
            .await?
            .coupon;
        let late = purchase_coupon(&db, alice.id, deal.id, jan_first() + Duration::hours(2))
            .await?
            .coupon;

        let for_alice = get_coupons_for_user(&db, alice.id).await?;
        assert_eq!(for_alice, vec![late.clone(), early.clone()]);

        let for_deal = get_coupons_for_deal(&db, deal.id).await?;
        assert_eq!(for_deal, vec![late, middle.clone(), early]);

        assert_eq!(get_coupon_by_id(&db, middle.id).await?, Some(middle));

        Ok(())
    }
}
