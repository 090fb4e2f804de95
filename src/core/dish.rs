//! The dish record as the backend serves it.
//!
//! Field names follow the backend's JSON (including its `is_vegeterian`
//! spelling) so rows deserialize directly.

use crate::core::catalog::{CatalogTag, Cuisine, FoodType};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned dish identifier.
pub type ItemId = i64;

/// Owning outlet identifier.
pub type OutletId = i64;

/// Audit marker sent with full edits.
pub const CHANGE_TYPE_EDIT: i32 = 1;

/// Audit marker sent with status changes and soft deletes.
pub const CHANGE_TYPE_STATUS: i32 = 3;

/// Image value the backend uses for "no image".
pub const IMAGE_SENTINEL: &str = "NULL";

/// Availability of a dish.
///
/// Integers the client does not know are preserved in [`DishStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum DishStatus {
    /// Hidden from customers (0)
    Inactive,
    /// Orderable (1)
    Active,
    /// Temporarily closed (2)
    Closed,
    /// Awaiting approval, or removed when paired with the status audit marker (3)
    PendingApproval,
    /// Any other value the backend returned
    Other(i32),
}

impl DishStatus {
    /// Statuses an owner can pick directly.
    pub const SELECTABLE: [Self; 3] = [Self::Active, Self::Closed, Self::Inactive];

    /// Wire value
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
            Self::Closed => 2,
            Self::PendingApproval => 3,
            Self::Other(code) => code,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Inactive => "Inactive".to_string(),
            Self::Active => "Active".to_string(),
            Self::Closed => "Closed".to_string(),
            Self::PendingApproval => "Pending Approval".to_string(),
            Self::Other(code) => format!("Unknown ({code})"),
        }
    }
}

impl From<i32> for DishStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Inactive,
            1 => Self::Active,
            2 => Self::Closed,
            3 => Self::PendingApproval,
            other => Self::Other(other),
        }
    }
}

impl From<DishStatus> for i32 {
    fn from(status: DishStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for DishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Dish picture: an inline data URL, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageData {
    /// Self-describing `data:<mime>;base64,...` string
    Inline(String),
    /// Sent as the `"NULL"` sentinel
    #[default]
    Absent,
}

impl ImageData {
    /// Wire form
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Inline(data) => data,
            Self::Absent => IMAGE_SENTINEL,
        }
    }

    /// Reads the wire form; empty strings and the sentinel both mean "no image".
    #[must_use]
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            None | Some("" | IMAGE_SENTINEL) => Self::Absent,
            Some(data) => Self::Inline(data.to_string()),
        }
    }

    /// True if a picture is present
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_wire(raw.as_deref()))
    }
}

/// Booleans the backend carries as `0`/`1` (sometimes `true`/`false` or `null`).
pub mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use serde_json::Value;

    /// Writes `1` or `0`
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    /// Accepts integers, booleans and `null` (false)
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(flag)) => Ok(flag),
            Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Some(other) => Err(D::Error::custom(format!("expected 0/1 flag, got {other}"))),
        }
    }
}

/// One dish offered by an outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Server-assigned identifier
    pub item_id: ItemId,
    /// Dish name
    pub item_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// MRP, the price ceiling
    pub base_price: Decimal,
    /// Selling price, never above `base_price`
    pub vendor_price: Decimal,
    /// Tax derived from `vendor_price`
    #[serde(default)]
    pub tax: Decimal,
    /// Availability
    pub status: DishStatus,
    /// Owning outlet
    pub outlet_id: OutletId,
    /// "HH:MM"
    #[serde(default)]
    pub opening_time: String,
    /// "HH:MM"
    #[serde(default)]
    pub closing_time: String,
    /// Vegetarian flag
    #[serde(rename = "is_vegeterian", with = "int_flag", default)]
    pub is_vegetarian: bool,
    /// Cuisine tag
    #[serde(default)]
    pub cuisine: CatalogTag<Cuisine>,
    /// Food type tag
    #[serde(default)]
    pub food_type: CatalogTag<FoodType>,
    /// Sold only in bulk
    #[serde(with = "int_flag", default)]
    pub bulk_only: bool,
    /// Picture
    #[serde(default)]
    pub image: ImageData,
    /// Whether the backend has verified the last edit
    #[serde(default)]
    pub verified: bool,
    /// Last audit marker written by the backend
    #[serde(default)]
    pub change_type: Option<i32>,
    /// Kitchen station, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_code: Option<String>,
}

impl MenuItem {
    /// Description or empty text
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// True once the item has been soft deleted
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.status == DishStatus::PendingApproval && self.change_type == Some(CHANGE_TYPE_STATUS)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        for code in 0..4 {
            assert_eq!(DishStatus::from(code).code(), code);
        }
        assert_eq!(DishStatus::from(7), DishStatus::Other(7));
        assert_eq!(DishStatus::Closed.to_string(), "Closed");
    }

    #[test]
    fn test_deserialize_backend_row() {
        let json = r#"{
            "item_id": 12,
            "item_name": "Paneer Tikka",
            "base_price": 250,
            "vendor_price": "240.50",
            "tax": 12.03,
            "status": 1,
            "outlet_id": 4,
            "description": null,
            "opening_time": "09:00",
            "closing_time": "22:00",
            "is_vegeterian": 1,
            "image": "NULL",
            "cuisine": "PUNJABI",
            "food_type": "STARTERS",
            "bulk_only": null,
            "customisations": [],
            "verified": false,
            "change_type": null,
            "station_code": "NDLS"
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, 12);
        assert_eq!(item.vendor_price, dec!(240.50));
        assert_eq!(item.base_price, dec!(250));
        assert_eq!(item.status, DishStatus::Active);
        assert!(item.is_vegetarian);
        assert!(!item.bulk_only);
        assert_eq!(item.image, ImageData::Absent);
        assert_eq!(item.cuisine.known(), Some(Cuisine::Punjabi));
        assert_eq!(item.description_text(), "");
        assert_eq!(item.station_code.as_deref(), Some("NDLS"));
    }

    #[test]
    fn test_serialize_uses_backend_spelling() {
        let item = crate::test_utils::sample_item(1, "Tea", dec!(40), DishStatus::Active);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["is_vegeterian"], 1);
        assert_eq!(value["image"], "NULL");
        assert_eq!(value["status"], 1);
    }

    #[test]
    fn test_removed_needs_both_markers() {
        let mut item = crate::test_utils::sample_item(1, "Tea", dec!(40), DishStatus::PendingApproval);
        assert!(!item.is_removed());
        item.change_type = Some(CHANGE_TYPE_STATUS);
        assert!(item.is_removed());
    }

    #[test]
    fn test_image_wire_forms() {
        assert_eq!(ImageData::from_wire(Some("")), ImageData::Absent);
        assert_eq!(ImageData::from_wire(None), ImageData::Absent);
        let inline = ImageData::from_wire(Some("data:image/png;base64,AAAA"));
        assert!(inline.is_present());
        assert_eq!(inline.as_wire(), "data:image/png;base64,AAAA");
    }
}
