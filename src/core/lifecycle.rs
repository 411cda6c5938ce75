//! Deal lifecycle computations.
//!
//! Everything here is pure: a deal's stored terms, the number of coupons sold
//! and the current time go in; derived facts come out. The sold count is read
//! from the database by [`crate::core::deal`] and the clock is always injected,
//! so these functions are deterministic and never touch persistence.
//!
//! A deal is open until `date_published + auction_duration` hours and expired
//! from that instant on. Nothing is stored to mark the transition.

use crate::{
    entities::deal,
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Text shown once a deal can no longer be bought.
pub const REQUEST_CLOSED: &str = "Request closed";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// The stored attributes of a deal that its lifecycle depends on.
///
/// The timing fields are optional so that callers holding partially loaded or
/// hand-built data get an [`Error::InvalidInput`] instead of a bogus answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealTerms {
    /// Start of the sale window
    pub date_published: Option<DateTime<Utc>>,
    /// Length of the sale window in hours
    pub auction_duration_hours: Option<i64>,
    /// Coupons that must sell before the deal goes ahead
    pub tipping_point: i64,
    /// Inventory cap
    pub max_available: i64,
}

impl From<&deal::Model> for DealTerms {
    fn from(deal: &deal::Model) -> Self {
        Self {
            date_published: Some(deal.date_published),
            auction_duration_hours: Some(i64::from(deal.auction_duration)),
            tipping_point: i64::from(deal.tipping_point),
            max_available: i64::from(deal.max_available),
        }
    }
}

impl DealTerms {
    /// Coupons still available. Negative when the deal is oversold.
    #[must_use]
    pub const fn num_available(&self, num_sold: i64) -> i64 {
        self.max_available - num_sold
    }

    /// Progress toward the tipping point, in whole percent.
    pub fn percentage_sold(&self, num_sold: i64) -> Result<u8> {
        percentage_sold(self.tipping_point, num_sold)
    }

    /// Coupons that still have to sell before the deal tips.
    pub fn num_needed(&self, num_sold: i64) -> Result<i64> {
        num_needed(self.tipping_point, num_sold)
    }

    /// Whether `num_sold` has reached the tipping point.
    pub fn is_tipped(&self, num_sold: i64) -> Result<bool> {
        is_tipped(self.tipping_point, num_sold)
    }

    /// The instant the sale window closes.
    pub fn expires_at(&self) -> Result<DateTime<Utc>> {
        let published = self
            .date_published
            .ok_or_else(|| Error::invalid_input("date_published", "a publish date is required"))?;
        let hours = self.auction_duration_hours.ok_or_else(|| {
            Error::invalid_input("auction_duration", "an auction duration is required")
        })?;
        if hours < 0 {
            return Err(Error::invalid_input(
                "auction_duration",
                format!("duration must not be negative, got {hours}"),
            ));
        }

        Duration::try_hours(hours)
            .and_then(|duration| published.checked_add_signed(duration))
            .ok_or_else(|| {
                Error::invalid_input("auction_duration", format!("{hours} hours is out of range"))
            })
    }

    /// Whether the sale window has closed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(now >= self.expires_at()?)
    }

    /// Human-readable time remaining, or [`REQUEST_CLOSED`] once expired.
    pub fn time_left(&self, now: DateTime<Utc>) -> Result<String> {
        let expires_at = self.expires_at()?;
        if now >= expires_at {
            return Ok(REQUEST_CLOSED.to_string());
        }
        Ok(format_time_left(expires_at - now))
    }

    /// Computes every derived value at once.
    pub fn progress(&self, num_sold: i64, now: DateTime<Utc>) -> Result<DealProgress> {
        Ok(DealProgress {
            num_sold,
            num_available: self.num_available(num_sold),
            percentage_sold: self.percentage_sold(num_sold)?,
            num_needed: self.num_needed(num_sold)?,
            is_tipped: self.is_tipped(num_sold)?,
            expires_at: self.expires_at()?,
            is_expired: self.is_expired(now)?,
            time_left: self.time_left(now)?,
        })
    }
}

/// Snapshot of a deal's derived state at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealProgress {
    /// Coupons sold so far
    pub num_sold: i64,
    /// May be negative when oversold
    pub num_available: i64,
    /// Progress toward the tipping point, 0 to 100
    pub percentage_sold: u8,
    /// Coupons still needed to tip
    pub num_needed: i64,
    /// Whether the tipping point has been reached
    pub is_tipped: bool,
    /// End of the sale window
    pub expires_at: DateTime<Utc>,
    /// Whether the sale window has closed
    pub is_expired: bool,
    /// Human readable remaining time, or "Request closed"
    pub time_left: String,
}

fn validate_counts(tipping_point: i64, num_sold: i64) -> Result<()> {
    if tipping_point <= 0 {
        return Err(Error::InvalidConfiguration {
            message: format!("tipping point must be at least 1, got {tipping_point}"),
        });
    }
    if num_sold < 0 {
        return Err(Error::invalid_input(
            "num_sold",
            format!("sold count must not be negative, got {num_sold}"),
        ));
    }
    Ok(())
}

/// `floor(100 * num_sold / tipping_point)`, capped at 100.
pub fn percentage_sold(tipping_point: i64, num_sold: i64) -> Result<u8> {
    validate_counts(tipping_point, num_sold)?;
    if num_sold >= tipping_point {
        return Ok(100);
    }
    // num_sold < tipping_point here, so the quotient is below 100
    let percent = i128::from(num_sold) * 100 / i128::from(tipping_point);
    Ok(u8::try_from(percent).unwrap_or(100))
}

/// Coupons still needed before the deal tips; never negative.
pub fn num_needed(tipping_point: i64, num_sold: i64) -> Result<i64> {
    validate_counts(tipping_point, num_sold)?;
    Ok((tipping_point - num_sold).max(0))
}

/// A deal tips once its sold count reaches the tipping point.
pub fn is_tipped(tipping_point: i64, num_sold: i64) -> Result<bool> {
    validate_counts(tipping_point, num_sold)?;
    Ok(num_sold >= tipping_point)
}

/// Formats a remaining duration with the most significant units first.
///
/// Hours and minutes come from the part of the duration left over after whole
/// days are removed, and every unit is truncated rather than rounded:
///
/// | remaining        | output                       |
/// |------------------|------------------------------|
/// | under 1 second   | `Request closed`             |
/// | under 1 minute   | `{s} seconds`                |
/// | under 1 hour     | `{m} minutes`                |
/// | under 1 day      | `{h} hours, {m} minutes`     |
/// | days, 0 hours    | `{d} days`                   |
/// | days and hours   | `{d} days, {h} hours`        |
#[must_use]
pub fn format_time_left(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds();
    if total_seconds < 1 {
        return REQUEST_CLOSED.to_string();
    }

    let days = total_seconds / SECONDS_PER_DAY;
    let day_remainder = total_seconds % SECONDS_PER_DAY;
    let hours = day_remainder / SECONDS_PER_HOUR;
    let minutes = (day_remainder % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{day_remainder} seconds"),
        (0, 0, _) => format!("{minutes} minutes"),
        (0, _, _) => format!("{hours} hours, {minutes} minutes"),
        (_, 0, _) => format!("{days} days"),
        _ => format!("{days} days, {hours} hours"),
    }
}
