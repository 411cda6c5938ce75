//! Unified error type for the daily deals crate.

use thiserror::Error;

/// Everything that can go wrong in the daily deals crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The seed file or environment could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// A query or statement failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable could not be read.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A row count did not fit the target integer type.
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),

    /// A deal's stored parameters make a derived value undefined
    /// (e.g. a tipping point of zero).
    #[error("Invalid deal configuration: {message}")]
    InvalidConfiguration {
        /// Which parameter is unusable and why
        message: String,
    },

    /// A required input is missing or out of range.
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// A price was negative or not finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// An email address failed validation.
    #[error("Invalid email address: {email}")]
    InvalidEmail {
        /// The rejected address
        email: String,
    },

    /// No city has this id.
    #[error("City not found: {id}")]
    CityNotFound {
        /// Requested city id
        id: i64,
    },

    /// No advertiser has this id.
    #[error("Advertiser not found: {id}")]
    AdvertiserNotFound {
        /// Requested advertiser id
        id: i64,
    },

    /// No product category has this id.
    #[error("Product category not found: {id}")]
    CategoryNotFound {
        /// Requested category id
        id: i64,
    },

    /// The deal does not exist or has been soft-deleted.
    #[error("Deal not found: {id}")]
    DealNotFound {
        /// Requested deal id
        id: i64,
    },

    /// The deal's sale window has not started yet.
    #[error("Deal {id} opens at {opens_at}")]
    DealNotOpen {
        /// The deal
        id: i64,
        /// Its publish date
        opens_at: chrono::DateTime<chrono::Utc>,
    },

    /// The deal's sale window has closed.
    #[error("Deal {id} expired at {expired_at}")]
    DealExpired {
        /// The deal
        id: i64,
        /// End of its sale window
        expired_at: chrono::DateTime<chrono::Utc>,
    },

    /// No coupon has this id.
    #[error("Coupon not found: {id}")]
    CouponNotFound {
        /// Requested coupon id
        id: i64,
    },

    /// Coupons only move ON_HOLD -> ACTIVE -> REDEEMED.
    #[error("Cannot move coupon {id} from {from} to {to}")]
    InvalidStatusTransition {
        /// The coupon
        id: i64,
        /// Its current status
        from: &'static str,
        /// The status that was asked for
        to: &'static str,
    },

    /// No user has this id.
    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested user id
        id: i64,
    },

    /// The user has no profile row.
    #[error("Profile not found for user {user_id}")]
    ProfileNotFound {
        /// Owner of the missing profile
        user_id: i64,
    },

    /// The (city, email) pair is already subscribed.
    #[error("{email} is already subscribed to city {city_id}")]
    DuplicateSubscription {
        /// Normalized address
        email: String,
        /// City it is subscribed to
        city_id: i64,
    },

    /// A stored or supplied code does not match any choice.
    #[error("Unknown {kind} code: {code}")]
    UnknownChoice {
        /// Which kind of choice was looked up
        kind: &'static str,
        /// The unmatched code
        code: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
