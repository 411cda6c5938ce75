//! Product category business logic.

use crate::{
    core::required_text,
    entities::{ProductCategory, product_category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const MAX_CATEGORY_NAME_LEN: usize = 60;

/// Creates a product category, trimming the name.
///
/// # Errors
/// Returns an error if the name is blank or too long, or if the insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<product_category::Model> {
    let name = required_text("name", name, MAX_CATEGORY_NAME_LEN)?;
    product_category::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Looks up a category by exact name.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product_category::Model>> {
    ProductCategory::find()
        .filter(product_category::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// All categories ordered alphabetically.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<product_category::Model>> {
    ProductCategory::find()
        .order_by_asc(product_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

pub(crate) async fn require_category<C>(db: &C, category_id: i64) -> Result<product_category::Model>
where
    C: ConnectionTrait,
{
    ProductCategory::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_categories() -> Result<()> {
        let db = setup_test_db().await?;

        let spa = create_category(&db, " Spa ").await?;
        let food = create_category(&db, "Restaurants").await?;
        assert_eq!(spa.name, "Spa");

        let all = get_all_categories(&db).await?;
        assert_eq!(all, vec![food, spa.clone()]);

        assert_eq!(get_category_by_name(&db, "Spa").await?, Some(spa));
        assert!(get_category_by_name(&db, "Travel").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_rejects_blank_name() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_category(&db, "  ").await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        Ok(())
    }
}
