//! Dish entity - Local mirror of the backend's dish row.
//!
//! Prices are stored as `REAL`; the conversion to decimals happens at the store
//! boundary. Soft-deleted rows stay in the table with status 3 and change type 3.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dish database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dishes")]
pub struct Model {
    /// Unique identifier for the dish
    #[sea_orm(primary_key)]
    pub item_id: i64,
    /// Dish name (e.g., "Masala Dosa")
    pub item_name: String,
    /// Optional description
    pub description: Option<String>,
    /// MRP
    pub base_price: f64,
    /// Selling price
    pub vendor_price: f64,
    /// Tax derived from the selling price
    pub tax: f64,
    /// Status code (0 inactive, 1 active, 2 closed, 3 pending/removed)
    pub status: i32,
    /// Owning outlet
    pub outlet_id: i64,
    /// "HH:MM"
    pub opening_time: String,
    /// "HH:MM"
    pub closing_time: String,
    /// Vegetarian flag
    pub is_vegetarian: bool,
    /// Cuisine tag
    pub cuisine: String,
    /// Food type tag
    pub food_type: String,
    /// Sold only in bulk
    pub bulk_only: bool,
    /// Inline data URL or `"NULL"`
    pub image: String,
    /// Whether the last edit was verified
    pub verified: bool,
    /// Last audit marker
    pub change_type: Option<i32>,
    /// When the dish was created
    pub created_at: DateTimeUtc,
    /// When the dish was last modified
    pub updated_at: DateTimeUtc,
}

/// `Dish` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
