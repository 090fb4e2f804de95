//! Local dish store - `SQLite` implementation of [`DishBackend`].
//!
//! Runs the dashboard offline and backs the test suite. It honours the same
//! contract as the REST backend: tax is always derived from the selling price,
//! soft-deleted rows remain in the table, and listings are unfiltered.

use crate::{
    client::{DishBackend, Outlet},
    config::database,
    core::{
        catalog::CatalogTag,
        derive::tax_for,
        dish::{ImageData, ItemId, MenuItem, OutletId},
        payload::{DishPatch, NewDish},
    },
    entities::{Dish, DishColumn, DishModel, dish},
    errors::{Error, Result, ValidationError},
};
use async_trait::async_trait;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

fn to_real(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn from_real(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

fn check_price_ordering(vendor_price: Decimal, base_price: Decimal) -> Result<()> {
    if vendor_price > base_price {
        return Err(ValidationError::PriceOrdering {
            vendor_price: vendor_price.to_string(),
            base_price: base_price.to_string(),
        }
        .into());
    }
    Ok(())
}

impl From<DishModel> for MenuItem {
    fn from(model: DishModel) -> Self {
        Self {
            item_id: model.item_id,
            item_name: model.item_name,
            description: model.description,
            base_price: from_real(model.base_price),
            vendor_price: from_real(model.vendor_price),
            tax: from_real(model.tax),
            status: model.status.into(),
            outlet_id: model.outlet_id,
            opening_time: model.opening_time,
            closing_time: model.closing_time,
            is_vegetarian: model.is_vegetarian,
            cuisine: CatalogTag::parse(&model.cuisine),
            food_type: CatalogTag::parse(&model.food_type),
            bulk_only: model.bulk_only,
            image: ImageData::from_wire(Some(&model.image)),
            verified: model.verified,
            change_type: model.change_type,
            station_code: None,
        }
    }
}

/// Dish rows kept in a local database.
#[derive(Debug, Clone)]
pub struct LocalDishStore {
    db: DatabaseConnection,
}

impl LocalDishStore {
    /// Wraps an existing connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connects to `database_url` and creates missing tables.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = database::create_connection(database_url).await?;
        info!("Local dish store ready");
        Ok(Self::new(db))
    }

    /// Looks up one row by id, including soft-deleted ones.
    pub async fn find_dish(&self, item_id: ItemId) -> Result<Option<MenuItem>> {
        let model = Dish::find_by_id(item_id).one(&self.db).await?;
        Ok(model.map(MenuItem::from))
    }

    /// Inserts a dish and returns the stored row.
    pub async fn insert_dish(&self, new: &NewDish) -> Result<MenuItem> {
        check_price_ordering(new.vendor_price, new.base_price)?;
        let now = chrono::Utc::now();
        let row = dish::ActiveModel {
            item_name: Set(new.item_name.clone()),
            description: Set((!new.description.is_empty()).then(|| new.description.clone())),
            base_price: Set(to_real(new.base_price)),
            vendor_price: Set(to_real(new.vendor_price)),
            tax: Set(to_real(tax_for(new.vendor_price))),
            status: Set(new.status.code()),
            outlet_id: Set(new.outlet_id),
            opening_time: Set(new.opening_time.clone()),
            closing_time: Set(new.closing_time.clone()),
            is_vegetarian: Set(new.is_vegetarian),
            cuisine: Set(new.cuisine.as_ref().to_string()),
            food_type: Set(new.food_type.as_ref().to_string()),
            bulk_only: Set(new.bulk_only),
            image: Set(new.image.as_wire().to_string()),
            verified: Set(new.verified),
            change_type: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = row.insert(&self.db).await?;
        debug!("Stored dish {} ({})", model.item_id, model.item_name);
        Ok(model.into())
    }
}

#[async_trait]
impl DishBackend for LocalDishStore {
    #[instrument(skip(self, dish), fields(item = %dish.item_name))]
    async fn create_dish(&self, dish: &NewDish) -> Result<()> {
        self.insert_dish(dish).await.map(|_| ())
    }

    #[instrument(skip(self, patch))]
    async fn update_dish(&self, item_id: ItemId, patch: &DishPatch) -> Result<()> {
        let current = Dish::find_by_id(item_id)
            .one(&self.db)
            .await?
            .ok_or(Error::DishNotFound { id: item_id })?;
        if patch.vendor_price.is_some() || patch.base_price.is_some() {
            check_price_ordering(
                patch.vendor_price.unwrap_or_else(|| from_real(current.vendor_price)),
                patch.base_price.unwrap_or_else(|| from_real(current.base_price)),
            )?;
        }
        let mut row: dish::ActiveModel = current.into();

        if let Some(name) = &patch.item_name {
            row.item_name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            row.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.base_price {
            row.base_price = Set(to_real(price));
        }
        if let Some(price) = patch.vendor_price {
            row.vendor_price = Set(to_real(price));
            row.tax = Set(to_real(tax_for(price)));
        }
        if let Some(time) = &patch.opening_time {
            row.opening_time = Set(time.clone());
        }
        if let Some(time) = &patch.closing_time {
            row.closing_time = Set(time.clone());
        }
        if let Some(flag) = patch.is_vegetarian {
            row.is_vegetarian = Set(flag);
        }
        if let Some(cuisine) = patch.cuisine {
            row.cuisine = Set(cuisine.as_ref().to_string());
        }
        if let Some(food_type) = patch.food_type {
            row.food_type = Set(food_type.as_ref().to_string());
        }
        if let Some(flag) = patch.bulk_only {
            row.bulk_only = Set(flag);
        }
        if let Some(image) = &patch.image {
            row.image = Set(image.as_wire().to_string());
        }
        if let Some(status) = patch.status {
            row.status = Set(status.code());
        }
        if let Some(verified) = patch.verified {
            row.verified = Set(verified);
        }
        if let Some(change_type) = patch.change_type {
            row.change_type = Set(Some(change_type));
        }
        row.updated_at = Set(patch.updated_at.unwrap_or_else(chrono::Utc::now));

        row.update(&self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_dishes(&self, outlet_id: OutletId) -> Result<Vec<MenuItem>> {
        let rows = Dish::find()
            .filter(DishColumn::OutletId.eq(outlet_id))
            .order_by_asc(DishColumn::ItemId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn fetch_outlet(&self, outlet_id: OutletId) -> Result<Option<Outlet>> {
        let known = Dish::find()
            .filter(DishColumn::OutletId.eq(outlet_id))
            .count(&self.db)
            .await?;
        Ok((known > 0).then(|| Outlet {
            outlet_id,
            outlet_name: None,
            extra: serde_json::Map::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            catalog::{Cuisine, FoodType},
            dish::{CHANGE_TYPE_STATUS, DishStatus},
        },
        test_utils::{create_test_dish, new_dish, setup_test_store},
    };
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_insert_derives_tax() -> Result<()> {
        let store = setup_test_store().await?;
        let dish = create_test_dish(&store, 1, "Masala Chai", dec!(40)).await?;

        assert_eq!(dish.item_name, "Masala Chai");
        assert_eq!(dish.tax, dec!(2.00));
        assert_eq!(dish.status, DishStatus::Active);
        assert_eq!(dish.cuisine.known(), Some(Cuisine::NorthIndian));
        assert_eq!(dish.food_type.known(), Some(FoodType::Thali));
        assert!(!dish.image.is_present());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_outlet() -> Result<()> {
        let store = setup_test_store().await?;
        create_test_dish(&store, 1, "Tea", dec!(20)).await?;
        create_test_dish(&store, 2, "Coffee", dec!(30)).await?;
        create_test_dish(&store, 1, "Samosa", dec!(15)).await?;

        let rows = store.list_dishes(1).await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_name, "Tea");
        assert_eq!(rows[1].item_name, "Samosa");
        assert!(store.list_dishes(3).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_patch_recomputes_tax() -> Result<()> {
        let store = setup_test_store().await?;
        let dish = create_test_dish(&store, 1, "Thali", dec!(120)).await?;

        let patch = DishPatch {
            vendor_price: Some(dec!(99.90)),
            item_name: Some("Veg Thali".to_string()),
            ..DishPatch::default()
        };
        store.update_dish(dish.item_id, &patch).await?;

        let stored = store.find_dish(dish.item_id).await?.unwrap();
        assert_eq!(stored.item_name, "Veg Thali");
        assert_eq!(stored.vendor_price, dec!(99.90));
        assert_eq!(stored.tax, dec!(5.00));
        assert_eq!(stored.base_price, dec!(120));
        Ok(())
    }

    #[tokio::test]
    async fn test_price_above_mrp_refused() -> Result<()> {
        let store = setup_test_store().await?;
        let dish = create_test_dish(&store, 1, "Thali", dec!(120)).await?;

        let patch = DishPatch {
            vendor_price: Some(dec!(150)),
            ..DishPatch::default()
        };
        let result = store.update_dish(dish.item_id, &patch).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::PriceOrdering { .. }))
        ));
        let stored = store.find_dish(dish.item_id).await?.unwrap();
        assert_eq!(stored.vendor_price, dec!(120));

        let patch = DishPatch {
            base_price: Some(dec!(100)),
            ..DishPatch::default()
        };
        assert!(store.update_dish(dish.item_id, &patch).await.is_err());

        let mut new = new_dish(1, "Kheer", dec!(80));
        new.base_price = dec!(60);
        assert!(store.insert_dish(&new).await.is_err());
        assert_eq!(store.list_dishes(1).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_removal_keeps_row() -> Result<()> {
        let store = setup_test_store().await?;
        let dish = create_test_dish(&store, 1, "Vada", dec!(25)).await?;

        store.update_dish(dish.item_id, &DishPatch::removal()).await?;

        let rows = store.list_dishes(1).await?;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_removed());
        assert_eq!(rows[0].change_type, Some(CHANGE_TYPE_STATUS));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_dish() -> Result<()> {
        let store = setup_test_store().await?;
        let result = store.update_dish(42, &DishPatch::removal()).await;
        assert!(matches!(result, Err(Error::DishNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_outlet_needs_dishes() -> Result<()> {
        let store = setup_test_store().await?;
        assert!(store.fetch_outlet(1).await?.is_none());
        create_test_dish(&store, 1, "Tea", dec!(20)).await?;
        assert_eq!(store.fetch_outlet(1).await?.unwrap().outlet_id, 1);
        Ok(())
    }

    #[test]
    fn test_real_conversion_rounds_to_paise() {
        assert_eq!(from_real(4.995_000_1), dec!(5.00));
        assert_eq!(from_real(2.0), dec!(2));
        assert!((to_real(dec!(12.35)) - 12.35).abs() < f64::EPSILON);
    }
}
