//! Reference-data enumerations.
//!
//! Each choice set stores a compact code (an integer or a two-letter string) and
//! carries a human-readable label for display. Coupon status and province are
//! persisted through SeaORM's `DeriveActiveEnum`; card types and weekdays are
//! plain lookups used by presentation code.

use crate::errors::{Error, Result};
use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Lifecycle of a purchased coupon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum CouponStatus {
    /// Purchased, payment not yet collected
    #[sea_orm(num_value = 1)]
    OnHold,
    /// Purchased, money collected
    #[sea_orm(num_value = 2)]
    Active,
    /// Used at the advertiser
    #[sea_orm(num_value = 3)]
    Redeemed,
}

impl CouponStatus {
    /// Stored integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::OnHold => 1,
            Self::Active => 2,
            Self::Redeemed => 3,
        }
    }

    /// Human readable label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnHold => "Purchased - ON HOLD",
            Self::Active => "Purchased - Money Collected",
            Self::Redeemed => "Redeemed",
        }
    }

    /// Short name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OnHold => "ON_HOLD",
            Self::Active => "ACTIVE",
            Self::Redeemed => "REDEEMED",
        }
    }

    /// Looks up a status by its stored code.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| Error::UnknownChoice {
                kind: "coupon status",
                code: code.to_string(),
            })
    }
}

/// Canadian provinces and territories, stored by postal abbreviation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum Province {
    /// Ontario (`ON`)
    #[sea_orm(string_value = "ON")]
    #[serde(rename = "ON")]
    Ontario,
    /// Quebec (`QC`)
    #[sea_orm(string_value = "QC")]
    #[serde(rename = "QC")]
    Quebec,
    /// Nova Scotia (`NS`)
    #[sea_orm(string_value = "NS")]
    #[serde(rename = "NS")]
    NovaScotia,
    /// New Brunswick (`NB`)
    #[sea_orm(string_value = "NB")]
    #[serde(rename = "NB")]
    NewBrunswick,
    /// Manitoba (`MB`)
    #[sea_orm(string_value = "MB")]
    #[serde(rename = "MB")]
    Manitoba,
    /// British Columbia (`BC`)
    #[sea_orm(string_value = "BC")]
    #[serde(rename = "BC")]
    BritishColumbia,
    /// Prince Edward Island (`PE`)
    #[sea_orm(string_value = "PE")]
    #[serde(rename = "PE")]
    PrinceEdwardIsland,
    /// Saskatchewan (`SK`)
    #[sea_orm(string_value = "SK")]
    #[serde(rename = "SK")]
    Saskatchewan,
    /// Alberta (`AB`)
    #[sea_orm(string_value = "AB")]
    #[serde(rename = "AB")]
    Alberta,
    /// Newfoundland And Labrador (`NL`)
    #[sea_orm(string_value = "NL")]
    #[serde(rename = "NL")]
    NewfoundlandAndLabrador,
    /// Yukon (`YT`)
    #[sea_orm(string_value = "YT")]
    #[serde(rename = "YT")]
    Yukon,
    /// Northwest Territories (`NT`)
    #[sea_orm(string_value = "NT")]
    #[serde(rename = "NT")]
    NorthwestTerritories,
    /// Nunavut (`NU`)
    #[sea_orm(string_value = "NU")]
    #[serde(rename = "NU")]
    Nunavut,
}

// Same order as the `Province` variants.
const PROVINCE_LABELS: [(Province, &str, &str); 13] = [
    (Province::Ontario, "ON", "Ontario"),
    (Province::Quebec, "QC", "Quebec"),
    (Province::NovaScotia, "NS", "Nova Scotia"),
    (Province::NewBrunswick, "NB", "New Brunswick"),
    (Province::Manitoba, "MB", "Manitoba"),
    (Province::BritishColumbia, "BC", "British Columbia"),
    (Province::PrinceEdwardIsland, "PE", "Prince Edward Island"),
    (Province::Saskatchewan, "SK", "Saskatchewan"),
    (Province::Alberta, "AB", "Alberta"),
    (Province::NewfoundlandAndLabrador, "NL", "Newfoundland and Labrador"),
    (Province::Yukon, "YT", "Yukon Territory"),
    (Province::NorthwestTerritories, "NT", "Northwest Territories"),
    (Province::Nunavut, "NU", "Nunavut"),
];

impl Province {
    const fn entry(self) -> (Self, &'static str, &'static str) {
        PROVINCE_LABELS[self as usize]
    }

    /// Two-letter postal abbreviation.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.entry().1
    }

    /// Full province name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.entry().2
    }

    /// Looks a province up by its abbreviation, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Result<Self> {
        let wanted = code.trim().to_ascii_uppercase();
        PROVINCE_LABELS
            .iter()
            .find(|(_, abbreviation, _)| *abbreviation == wanted)
            .map(|(province, _, _)| *province)
            .ok_or_else(|| Error::UnknownChoice {
                kind: "province",
                code: code.to_string(),
            })
    }

    /// All provinces in display order, paired with their labels.
    #[must_use]
    pub fn choices() -> Vec<(&'static str, &'static str)> {
        PROVINCE_LABELS
            .iter()
            .map(|(_, code, label)| (*code, *label))
            .collect()
    }
}

/// Payment card brands accepted at checkout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Visa
    Visa,
    /// Mastercard
    Mastercard,
    /// American Express
    AmericanExpress,
}

impl CardType {
    /// Every card type in display order.
    pub const ALL: [Self; 3] = [Self::Visa, Self::Mastercard, Self::AmericanExpress];

    /// Stored code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Visa => 1,
            Self::Mastercard => 2,
            Self::AmericanExpress => 3,
        }
    }

    /// Human readable label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
        }
    }

    /// Looks up a card type by its stored code.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|card| card.code() == code)
            .ok_or_else(|| Error::UnknownChoice {
                kind: "card type",
                code: code.to_string(),
            })
    }
}

/// Day of the week, numbered from Monday = 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// Monday through Sunday.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Stored code, Monday is 1.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    /// Human readable label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Looks up a weekday by its stored code.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.code() == code)
            .ok_or_else(|| Error::UnknownChoice {
                kind: "weekday",
                code: code.to_string(),
            })
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_coupon_status_codes_and_labels() {
        assert_eq!(CouponStatus::OnHold.code(), 1);
        assert_eq!(CouponStatus::Active.code(), 2);
        assert_eq!(CouponStatus::Redeemed.code(), 3);
        assert_eq!(CouponStatus::Active.label(), "Purchased - Money Collected");
        assert_eq!(CouponStatus::from_code(3).unwrap(), CouponStatus::Redeemed);
        assert!(matches!(
            CouponStatus::from_code(0),
            Err(Error::UnknownChoice { kind: "coupon status", .. })
        ));
    }

    #[test]
    fn test_coupon_status_matches_stored_value() {
        for status in CouponStatus::iter() {
            assert_eq!(status.to_value(), status.code());
        }
    }

    #[test]
    fn test_province_lookup() {
        assert_eq!(Province::from_code("ON").unwrap(), Province::Ontario);
        assert_eq!(Province::from_code(" pe ").unwrap(), Province::PrinceEdwardIsland);
        assert_eq!(Province::Yukon.label(), "Yukon Territory");
        assert_eq!(Province::NewfoundlandAndLabrador.code(), "NL");
        assert!(Province::from_code("XX").is_err());
    }

    #[test]
    fn test_province_table_covers_every_variant() {
        assert_eq!(Province::choices().len(), 13);
        for province in Province::iter() {
            assert_eq!(province.entry().0, province);
            assert_eq!(province.to_value(), province.code());
            assert!(!province.label().is_empty());
        }
    }

    #[test]
    fn test_card_types() {
        assert_eq!(CardType::from_code(3).unwrap(), CardType::AmericanExpress);
        assert_eq!(CardType::Visa.label(), "Visa");
        assert!(CardType::from_code(4).is_err());
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(Weekday::from_code(1).unwrap(), Weekday::Monday);
        assert_eq!(Weekday::from_code(7).unwrap().label(), "Sunday");
        assert!(Weekday::from_code(0).is_err());
        assert_eq!(Weekday::from(chrono::Weekday::Wed), Weekday::Wednesday);
    }
}
