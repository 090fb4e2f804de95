//! Cuisine and food-type catalogs.
//!
//! Both are closed enumerations of upper-snake tags as the backend stores them.
//! Rows coming back from the backend may still carry a tag this client does not
//! know (or an empty one), so stored records use [`CatalogTag`], which keeps such
//! values verbatim instead of failing the whole listing.

use crate::core::derive::tag_label;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Cuisine a dish belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Cuisine {
    SouthIndian,
    Punjabi,
    NorthIndian,
    Mughalai,
    Bengali,
    Goan,
    Tamil,
    Andhra,
    Kerala,
    IndianChinese,
    Chinese,
    Awadhi,
    Malaysian,
    Maharashtrian,
    Tibetan,
    SriLankan,
    Sikkimese,
    TasteOfBihar,
    Assamese,
    BakeryConfectionery,
    Continental,
    Italian,
    Mexican,
    Lebanese,
    Mongolian,
    Malabari,
    Hyderabadi,
    Odiya,
    Marathi,
    Gujrati,
    Rajasthani,
    American,
}

/// Course or kind of a dish.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum FoodType {
    Snacks,
    Breakfast,
    Starters,
    Mains,
    MainsGravy,
    Breads,
    Thali,
    Combo,
    Desserts,
    Soup,
    Beverage,
    NavratriSpecial,
    Diet,
    BakeryConfectionery,
    HealthyDiet,
    Sweets,
    DiwaliSpecial,
    Biryani,
    Bulk,
    SpecialityItem,
    Chaats,
    Namkeens,
    Salads,
    MouthFreshenerDigestive,
    Pizza,
    Burger,
    HoliSpecial,
    Pastas,
    Tacos,
    Quesadillas,
    Sides,
    JainFood,
}

/// Shared behaviour of the two catalogs.
pub trait CatalogEntry: Copy + Eq + AsRef<str> + FromStr + IntoEnumIterator + 'static {
    /// Name of the catalog, used in messages
    const KIND: &'static str;

    /// Human readable label, e.g. `SRI_LANKAN` -> `Sri Lankan`
    fn label(self) -> String {
        tag_label(self.as_ref())
    }

    /// Every entry in declaration order
    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl CatalogEntry for Cuisine {
    const KIND: &'static str = "Cuisine";
}

impl CatalogEntry for FoodType {
    const KIND: &'static str = "Food type";
}

/// A catalog value as found on a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogTag<T> {
    /// A tag from the closed enumeration
    Known(T),
    /// Anything else the backend sent, kept as-is (may be empty)
    Unrecognized(String),
}

impl<T: CatalogEntry> CatalogTag<T> {
    /// Parses a raw tag; never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        T::from_str(raw).map_or_else(|_| Self::Unrecognized(raw.to_string()), Self::Known)
    }

    /// The tag exactly as the backend stores it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(value) => value.as_ref(),
            Self::Unrecognized(raw) => raw,
        }
    }

    /// The known value, if any
    #[must_use]
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Display label; unknown tags are labelled the same way
    #[must_use]
    pub fn label(&self) -> String {
        tag_label(self.as_str())
    }

    /// True when the tag is missing altogether
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl<T> Default for CatalogTag<T> {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl<T> From<T> for CatalogTag<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: CatalogEntry> fmt::Display for CatalogTag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: CatalogEntry> Serialize for CatalogTag<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: CatalogEntry> Deserialize<'de> for CatalogTag<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or_else(|| Self::Unrecognized(String::new()), |raw| Self::parse(&raw)))
    }
}
