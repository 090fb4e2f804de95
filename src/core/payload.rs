//! Request bodies for the dish resource.

use crate::core::{
    catalog::{Cuisine, FoodType},
    dish::{CHANGE_TYPE_STATUS, DishStatus, ImageData, OutletId, int_flag},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Full payload for creating a dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDish {
    /// Dish name
    pub item_name: String,
    /// MRP
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    /// Selling price
    #[serde(with = "rust_decimal::serde::float")]
    pub vendor_price: Decimal,
    /// Initial status
    pub status: DishStatus,
    /// Owning outlet
    pub outlet_id: OutletId,
    /// Description
    pub description: String,
    /// "HH:MM"
    pub opening_time: String,
    /// "HH:MM"
    pub closing_time: String,
    /// Vegetarian flag
    #[serde(rename = "is_vegeterian", with = "int_flag")]
    pub is_vegetarian: bool,
    /// Picture or the `"NULL"` sentinel
    pub image: ImageData,
    /// Cuisine tag
    pub cuisine: Cuisine,
    /// Food type tag
    pub food_type: FoodType,
    /// Sold only in bulk
    #[serde(with = "int_flag")]
    pub bulk_only: bool,
    /// Tax derived from the selling price
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    /// Always null from this client
    #[serde(with = "rust_decimal::serde::float_option")]
    pub tax_percentage: Option<Decimal>,
    /// New dishes start unverified
    pub verified: bool,
}

fn flag_option<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(flag) => int_flag::serialize(flag, serializer),
        None => serializer.serialize_none(),
    }
}

/// Partial update keyed by item id. Only `Some` fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DishPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[allow(missing_docs)]
    pub base_price: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[allow(missing_docs)]
    pub vendor_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub closing_time: Option<String>,
    #[serde(
        rename = "is_vegeterian",
        skip_serializing_if = "Option::is_none",
        serialize_with = "flag_option"
    )]
    #[allow(missing_docs)]
    pub is_vegetarian: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub cuisine: Option<Cuisine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub food_type: Option<FoodType>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "flag_option")]
    #[allow(missing_docs)]
    pub bulk_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub image: Option<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub status: Option<DishStatus>,
    /// Marks the edit as owner-verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Audit marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<i32>,
    /// Client timestamp of a status change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DishPatch {
    /// Status change with the status audit marker and a timestamp.
    #[must_use]
    pub fn status_change(status: DishStatus, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            change_type: Some(CHANGE_TYPE_STATUS),
            updated_at: Some(at),
            ..Self::default()
        }
    }

    /// Soft delete: the terminal status with the status audit marker.
    #[must_use]
    pub fn removal() -> Self {
        Self {
            status: Some(DishStatus::PendingApproval),
            change_type: Some(CHANGE_TYPE_STATUS),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_removal_body() {
        let body = serde_json::to_value(DishPatch::removal()).unwrap();
        assert_eq!(body, json!({"status": 3, "change_type": 3}));
    }

    #[test]
    fn test_status_change_body() {
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let body = serde_json::to_value(DishPatch::status_change(DishStatus::Closed, at)).unwrap();
        assert_eq!(body["status"], 2);
        assert_eq!(body["change_type"], 3);
        assert_eq!(body["updated_at"], "2026-01-02T03:04:05Z");
        assert!(body.get("item_name").is_none());
    }

    #[test]
    fn test_new_dish_body_uses_numbers() {
        let dish = NewDish {
            item_name: "Tea".to_string(),
            base_price: dec!(50),
            vendor_price: dec!(40),
            status: DishStatus::Active,
            outlet_id: 7,
            description: String::new(),
            opening_time: "09:00".to_string(),
            closing_time: "22:00".to_string(),
            is_vegetarian: true,
            image: ImageData::Absent,
            cuisine: Cuisine::NorthIndian,
            food_type: FoodType::Beverage,
            bulk_only: false,
            tax: dec!(2.00),
            tax_percentage: None,
            verified: false,
        };
        let body = serde_json::to_value(&dish).unwrap();
        assert_eq!(body["vendor_price"], json!(40.0));
        assert_eq!(body["tax"], json!(2.0));
        assert_eq!(body["is_vegeterian"], 1);
        assert_eq!(body["bulk_only"], 0);
        assert_eq!(body["image"], "NULL");
        assert_eq!(body["cuisine"], "NORTH_INDIAN");
        assert!(body["tax_percentage"].is_null());
    }
}
