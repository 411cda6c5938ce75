//! Reference data loading from config.toml
//!
//! Cities and product categories are listed in a TOML file and inserted on
//! startup. Seeding is idempotent: entries that already exist (matched by city
//! slug or category name) are left untouched.

use crate::{
    core::{
        category::{create_category, get_category_by_name},
        city::{NewCity, create_city, get_city_by_slug},
        slugify,
    },
    entities::Province,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct SeedConfig {
    /// Cities to create
    #[serde(default)]
    pub cities: Vec<CitySeed>,
    /// Product categories to create
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

/// Configuration for a single city
#[derive(Debug, Deserialize, Clone)]
pub struct CitySeed {
    /// Display name
    pub name: String,
    /// Derived from the name when omitted
    #[serde(default)]
    pub slug: Option<String>,
    /// Two-letter province code, e.g. `"ON"`
    pub province: Province,
    /// Whether visitors can pick the city
    #[serde(default)]
    pub is_active: bool,
    /// Position in city listings
    #[serde(default)]
    pub order: i32,
}

/// Configuration for a single product category
#[derive(Debug, Deserialize, Clone)]
pub struct CategorySeed {
    /// Display name
    pub name: String,
}

/// Counts of rows inserted by [`seed_reference_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Cities inserted by this run
    pub cities_created: usize,
    /// Categories inserted by this run
    pub categories_created: usize,
}

/// Parses seed configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or a province code is unknown
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    debug!("Loading seed configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Inserts configured cities and categories that are not in the database yet.
#[instrument(skip(db, config))]
pub async fn seed_reference_data(
    db: &DatabaseConnection,
    config: &SeedConfig,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for seed in &config.cities {
        let slug = slugify(seed.slug.as_deref().unwrap_or(&seed.name));
        if get_city_by_slug(db, &slug).await?.is_some() {
            debug!("City '{}' already exists. Skipping.", slug);
            continue;
        }
        create_city(
            db,
            NewCity {
                name: seed.name.clone(),
                slug,
                province: seed.province,
                is_active: seed.is_active,
                sort_order: seed.order,
            },
        )
        .await?;
        report.cities_created += 1;
    }

    for seed in &config.categories {
        if get_category_by_name(db, &seed.name).await?.is_some() {
            debug!("Category '{}' already exists. Skipping.", seed.name);
            continue;
        }
        create_category(db, &seed.name).await?;
        report.categories_created += 1;
    }

    info!(
        "Seeded {} cities and {} categories",
        report.cities_created, report.categories_created
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{category::get_all_categories, city::get_active_cities};
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[cities]]
        name = "Toronto"
        province = "ON"
        is_active = true
        order = 1

        [[cities]]
        name = "Quebec City"
        slug = "quebec"
        province = "QC"

        [[categories]]
        name = "Restaurants"

        [[categories]]
        name = "Spa"
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.cities.len(), 2);
        assert_eq!(config.cities[0].name, "Toronto");
        assert_eq!(config.cities[0].province, Province::Ontario);
        assert!(config.cities[0].is_active);
        assert_eq!(config.cities[0].order, 1);
        assert_eq!(config.cities[1].slug.as_deref(), Some("quebec"));
        assert!(!config.cities[1].is_active);
        assert_eq!(config.categories.len(), 2);
    }

    #[test]
    fn test_parse_rejects_unknown_province() {
        let result = parse_config(
            r#"
            [[cities]]
            name = "Nowhere"
            province = "ZZ"
        "#,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_config_is_allowed() {
        let config = parse_config("").unwrap();
        assert!(config.cities.is_empty());
        assert!(config.categories.is_empty());
    }

    #[tokio::test]
    async fn test_seed_reference_data_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SAMPLE)?;

        let first = seed_reference_data(&db, &config).await?;
        assert_eq!(
            first,
            SeedReport {
                cities_created: 2,
                categories_created: 2
            }
        );

        let second = seed_reference_data(&db, &config).await?;
        assert_eq!(second, SeedReport::default());

        let active = get_active_cities(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].slug, "toronto");
        assert_eq!(get_all_categories(&db).await?.len(), 2);

        Ok(())
    }
}
