//! Deal business logic - Publishing deals and reading their live state.
//!
//! Stored columns describe a deal's terms; its sold count comes from the
//! coupons table. The functions here load both and hand them to
//! [`crate::core::lifecycle`] so callers never have to assemble the pieces.

use crate::{
    core::{
        advertiser::require_advertiser,
        category::require_category,
        city::require_city,
        lifecycle::{DealProgress, DealTerms},
        required_text, slugify,
    },
    entities::{Coupon, Deal, coupon, deal},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

const MAX_TITLE_LEN: usize = 256;

/// Sale window used when none is given.
pub const DEFAULT_AUCTION_DURATION_HOURS: i32 = 24;

/// Parameters for a new deal.
#[derive(Debug, Clone)]
pub struct NewDeal {
    /// Headline shown on the deal page
    pub title: String,
    /// Advertiser making the offer
    pub advertiser_id: i64,
    /// City the deal is published in
    pub city_id: i64,
    /// Product category
    pub category_id: i64,
    /// Derived from the title when blank
    pub slug: String,
    /// Start of the sale window
    pub date_published: DateTime<Utc>,
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
    pub fine_print: String,
    /// Selling points listed on the deal page
    pub highlights: String,
    /// Coupons that must sell before the deal goes ahead; at least 1
    pub tipping_point: i32,
    /// Inventory cap
    pub max_available: i32,
    /// Full description of the offer
    pub description: String,
    /// About the advertiser
    pub company_desc: String,
    /// Stored comma-separated
    pub tags: Vec<String>,
    /// Map latitude of the offer
    pub latitude: Option<f64>,
    /// Map longitude of the offer
    pub longitude: Option<f64>,
}

impl Default for NewDeal {
    fn default() -> Self {
        Self {
            title: String::new(),
            advertiser_id: 0,
            city_id: 0,
            category_id: 0,
            slug: String::new(),
            date_published: DateTime::<Utc>::default(),
            retail_price: 0.0,
            deal_price: 0.0,
            discount_percentage: 0.0,
            discount_value: 0.0,
            auction_duration: DEFAULT_AUCTION_DURATION_HOURS,
            is_deal_on: false,
            fine_print: String::new(),
            highlights: String::new(),
            tipping_point: 1,
            max_available: 0,
            description: String::new(),
            company_desc: String::new(),
            tags: Vec::new(),
            latitude: None,
            longitude: None,
        }
    }
}

fn validate_price(amount: f64) -> Result<f64> {
    if amount < 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a deal's stored tag string back into individual tags.
#[must_use]
pub fn deal_tags(deal: &deal::Model) -> Vec<String> {
    deal.tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Creates a deal after validating its terms and references.
///
/// # Errors
/// Returns an error if:
/// - The title is blank or longer than 256 characters
/// - Any price is negative or not finite
/// - The tipping point is below 1 ([`Error::InvalidConfiguration`])
/// - The auction duration or inventory cap is negative
/// - The advertiser, city or category does not exist
/// - The database insert fails
#[instrument(skip(db, new_deal), fields(title = %new_deal.title))]
pub async fn create_deal(db: &DatabaseConnection, new_deal: NewDeal) -> Result<deal::Model> {
    let title = required_text("title", &new_deal.title, MAX_TITLE_LEN)?;
    let slug = if new_deal.slug.trim().is_empty() {
        slugify(&title)
    } else {
        slugify(&new_deal.slug)
    };
    if slug.is_empty() {
        return Err(Error::invalid_input("slug", "must contain letters or digits"));
    }

    let retail_price = validate_price(new_deal.retail_price)?;
    let deal_price = validate_price(new_deal.deal_price)?;
    let discount_percentage = validate_price(new_deal.discount_percentage)?;
    let discount_value = validate_price(new_deal.discount_value)?;

    if new_deal.tipping_point < 1 {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "tipping point must be at least 1, got {}",
                new_deal.tipping_point
            ),
        });
    }
    if new_deal.auction_duration < 0 {
        return Err(Error::invalid_input(
            "auction_duration",
            "duration must not be negative",
        ));
    }
    if new_deal.max_available < 0 {
        return Err(Error::invalid_input(
            "max_available",
            "inventory must not be negative",
        ));
    }

    require_advertiser(db, new_deal.advertiser_id).await?;
    require_city(db, new_deal.city_id).await?;
    require_category(db, new_deal.category_id).await?;

    let now = Utc::now();
    let model = deal::ActiveModel {
        title: Set(title),
        advertiser_id: Set(new_deal.advertiser_id),
        city_id: Set(new_deal.city_id),
        slug: Set(slug),
        category_id: Set(new_deal.category_id),
        date_published: Set(new_deal.date_published),
        retail_price: Set(retail_price),
        deal_price: Set(deal_price),
        discount_percentage: Set(discount_percentage),
        discount_value: Set(discount_value),
        auction_duration: Set(new_deal.auction_duration),
        is_deal_on: Set(new_deal.is_deal_on),
        fine_print: Set(new_deal.fine_print),
        highlights: Set(new_deal.highlights),
        tipping_point: Set(new_deal.tipping_point),
        tipped_at: Set(None),
        max_available: Set(new_deal.max_available),
        description: Set(new_deal.description),
        company_desc: Set(new_deal.company_desc),
        tags: Set(join_tags(&new_deal.tags)),
        latitude: Set(new_deal.latitude),
        longitude: Set(new_deal.longitude),
        entry_date: Set(now),
        last_mod: Set(now),
        deleted_date: Set(None),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(deal_id = created.id, slug = %created.slug, "published deal");
    Ok(created)
}

/// Looks up a deal by id, including soft-deleted deals.
pub async fn get_deal_by_id(db: &DatabaseConnection, deal_id: i64) -> Result<Option<deal::Model>> {
    Deal::find_by_id(deal_id).one(db).await.map_err(Into::into)
}

/// Finds a deal by slug, ignoring soft-deleted deals.
pub async fn get_deal_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<deal::Model>> {
    Deal::find()
        .filter(deal::Column::Slug.eq(slug))
        .filter(deal::Column::DeletedDate.is_null())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads a deal that has not been soft-deleted, or fails with [`Error::DealNotFound`].
pub(crate) async fn require_live_deal<C>(db: &C, deal_id: i64) -> Result<deal::Model>
where
    C: ConnectionTrait,
{
    Deal::find_by_id(deal_id)
        .one(db)
        .await?
        .filter(|deal| deal.deleted_date.is_none())
        .ok_or(Error::DealNotFound { id: deal_id })
}

/// Deals a visitor in `city_id` can buy at `now`: switched on, already
/// published, not deleted and not yet expired. Ordered by publish date.
#[instrument(skip(db))]
pub async fn get_open_deals_for_city(
    db: &DatabaseConnection,
    city_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<deal::Model>> {
    let candidates = Deal::find()
        .filter(deal::Column::CityId.eq(city_id))
        .filter(deal::Column::IsDealOn.eq(true))
        .filter(deal::Column::DeletedDate.is_null())
        .filter(deal::Column::DatePublished.lte(now))
        .order_by_asc(deal::Column::DatePublished)
        .order_by_asc(deal::Column::Id)
        .all(db)
        .await?;

    let mut open = Vec::with_capacity(candidates.len());
    for deal in candidates {
        if !DealTerms::from(&deal).is_expired(now)? {
            open.push(deal);
        }
    }
    debug!(count = open.len(), "open deals");
    Ok(open)
}

/// Number of coupons sold for a deal.
pub async fn num_sold<C>(db: &C, deal_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let count = Coupon::find()
        .filter(coupon::Column::DealId.eq(deal_id))
        .count(db)
        .await?;
    Ok(i64::try_from(count)?)
}

/// Current derived state of a deal: sold, available, progress and time left.
///
/// # Errors
/// Returns [`Error::DealNotFound`] for unknown or deleted deals and
/// [`Error::InvalidConfiguration`] if the stored tipping point is below 1.
pub async fn deal_progress(
    db: &DatabaseConnection,
    deal_id: i64,
    now: DateTime<Utc>,
) -> Result<DealProgress> {
    let deal = require_live_deal(db, deal_id).await?;
    let sold = num_sold(db, deal_id).await?;
    DealTerms::from(&deal).progress(sold, now)
}

/// Switches a deal on or off for display.
pub async fn set_deal_on(
    db: &DatabaseConnection,
    deal_id: i64,
    is_deal_on: bool,
) -> Result<deal::Model> {
    let mut deal: deal::ActiveModel = require_live_deal(db, deal_id).await?.into();
    deal.is_deal_on = Set(is_deal_on);
    deal.last_mod = Set(Utc::now());
    deal.update(db).await.map_err(Into::into)
}

/// Stamps `tipped_at` the first time the sold count reaches the tipping point.
///
/// Returns `true` only when this call recorded the tip.
pub(crate) async fn record_tip_if_reached<C>(
    db: &C,
    deal: deal::Model,
    now: DateTime<Utc>,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    if deal.tipped_at.is_some() {
        return Ok(false);
    }
    let sold = num_sold(db, deal.id).await?;
    if !DealTerms::from(&deal).is_tipped(sold)? {
        return Ok(false);
    }

    let deal_id = deal.id;
    let mut active: deal::ActiveModel = deal.into();
    active.tipped_at = Set(Some(now));
    active.last_mod = Set(now);
    active.update(db).await?;
    info!(deal_id, sold, "deal tipped");
    Ok(true)
}

/// Soft-deletes a deal. Its coupons are kept.
pub async fn soft_delete_deal(
    db: &DatabaseConnection,
    deal_id: i64,
    now: DateTime<Utc>,
) -> Result<deal::Model> {
    let mut deal: deal::ActiveModel = require_live_deal(db, deal_id).await?.into();
    deal.deleted_date = Set(Some(now));
    deal.last_mod = Set(now);
    let deleted = deal.update(db).await?;
    info!(deal_id, "deal deleted");
    Ok(deleted)
}
