//! Shared test utilities for `menu-desk`.
//!
//! This module provides common helper functions for setting up an in-memory dish
//! store and building dishes with sensible defaults.

use crate::{
    core::{
        catalog::{CatalogTag, Cuisine, FoodType},
        derive::tax_for,
        dish::{DishStatus, ImageData, ItemId, MenuItem, OutletId},
        payload::NewDish,
    },
    errors::Result,
    store::LocalDishStore,
};
use rust_decimal::Decimal;

/// Creates an in-memory `SQLite` store with all tables initialized.
/// This is the standard setup for all store-backed tests.
pub async fn setup_test_store() -> Result<LocalDishStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(LocalDishStore::new(db))
}

/// Builds a dish without touching any store.
///
/// # Defaults
/// * `base_price`: same as `vendor_price` (no discount)
/// * `outlet_id`: 1
/// * cuisine `NORTH_INDIAN`, food type `THALI`
/// * open 09:00 to 22:00, vegetarian, no image
pub fn sample_item(
    item_id: ItemId,
    name: &str,
    vendor_price: Decimal,
    status: DishStatus,
) -> MenuItem {
    MenuItem {
        item_id,
        item_name: name.to_string(),
        description: None,
        base_price: vendor_price,
        vendor_price,
        tax: tax_for(vendor_price),
        status,
        outlet_id: 1,
        opening_time: "09:00".to_string(),
        closing_time: "22:00".to_string(),
        is_vegetarian: true,
        cuisine: CatalogTag::Known(Cuisine::NorthIndian),
        food_type: CatalogTag::Known(FoodType::Thali),
        bulk_only: false,
        image: ImageData::Absent,
        verified: false,
        change_type: None,
        station_code: None,
    }
}

/// Creation payload with the same defaults as [`sample_item`].
pub fn new_dish(outlet_id: OutletId, name: &str, vendor_price: Decimal) -> NewDish {
    NewDish {
        item_name: name.to_string(),
        base_price: vendor_price,
        vendor_price,
        status: DishStatus::Active,
        outlet_id,
        description: String::new(),
        opening_time: "09:00".to_string(),
        closing_time: "22:00".to_string(),
        is_vegetarian: true,
        image: ImageData::Absent,
        cuisine: Cuisine::NorthIndian,
        food_type: FoodType::Thali,
        bulk_only: false,
        tax: tax_for(vendor_price),
        tax_percentage: None,
        verified: false,
    }
}

/// Stores an active dish for an outlet and returns the stored row.
pub async fn create_test_dish(
    store: &LocalDishStore,
    outlet_id: OutletId,
    name: &str,
    vendor_price: Decimal,
) -> Result<MenuItem> {
    store.insert_dish(&new_dish(outlet_id, name, vendor_price)).await
}
