//! Filtering, ordering and summarising the menu listing.
//!
//! The displayed sequence is always derived from scratch: [`apply_query`] takes the
//! full item set and an immutable [`MenuQuery`] and returns a new `Vec`. Nothing is
//! cached between calls.

use crate::core::{
    catalog::{CatalogEntry, CatalogTag, Cuisine, FoodType},
    dish::{CHANGE_TYPE_STATUS, DishStatus, MenuItem},
};
use std::{cmp::Ordering, str::FromStr};
use strum::{Display, EnumString};

/// Which status lifecycle the dashboard runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusLifecycle {
    /// Active / Closed / Inactive; rows with status 3 or the status-change
    /// marker never surface
    #[default]
    ThreeState,
    /// Adds Pending Approval as a read-only gate that surfaces in the listing
    PendingGate,
}

impl StatusLifecycle {
    /// Ranking used when ordering freshly fetched rows
    #[must_use]
    pub const fn ranking(self) -> StatusRanking {
        match self {
            Self::ThreeState => StatusRanking::ACTIVE_FIRST,
            Self::PendingGate => StatusRanking::PENDING_FIRST,
        }
    }

    /// Whether a fetched row belongs in the listing at all
    #[must_use]
    pub fn is_listed(self, item: &MenuItem) -> bool {
        match self {
            Self::ThreeState => {
                item.status != DishStatus::PendingApproval
                    && item.change_type != Some(CHANGE_TYPE_STATUS)
            }
            Self::PendingGate => !item.is_removed(),
        }
    }

    /// Whether edits and status changes are refused for this item
    #[must_use]
    pub fn is_locked(self, item: &MenuItem) -> bool {
        self == Self::PendingGate && item.status == DishStatus::PendingApproval
    }
}

/// A fixed priority order over statuses. Statuses not in the order sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRanking(&'static [DishStatus]);

impl StatusRanking {
    /// Active, then Closed, then Inactive
    pub const ACTIVE_FIRST: Self =
        Self(&[DishStatus::Active, DishStatus::Closed, DishStatus::Inactive]);

    /// Pending Approval, then Active, Closed, Inactive
    pub const PENDING_FIRST: Self = Self(&[
        DishStatus::PendingApproval,
        DishStatus::Active,
        DishStatus::Closed,
        DishStatus::Inactive,
    ]);

    /// Position of a status in this ranking
    #[must_use]
    pub fn rank(self, status: DishStatus) -> usize {
        self.0
            .iter()
            .position(|ranked| *ranked == status)
            .unwrap_or(self.0.len())
    }

    /// Compares two statuses by rank
    #[must_use]
    pub fn compare(self, a: DishStatus, b: DishStatus) -> Ordering {
        self.rank(a).cmp(&self.rank(b))
    }
}

impl Default for StatusRanking {
    fn default() -> Self {
        Self::ACTIVE_FIRST
    }
}

/// Constraint on one catalog field.
///
/// Tags are compared as stored, so a tag outside the catalog that shows up in
/// [`MenuStats`] can still be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter<T> {
    /// No constraint
    All,
    /// Exact tag equality
    Only(CatalogTag<T>),
}

impl<T> Default for CategoryFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: CatalogEntry> CategoryFilter<T> {
    /// True if the tag passes the filter
    #[must_use]
    pub fn matches(&self, tag: &CatalogTag<T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => tag.as_str() == wanted.as_str(),
        }
    }

    /// True if this filter constrains anything
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }
}

impl<T: CatalogEntry> FromStr for CategoryFilter<T> {
    type Err = String;

    /// `"all"` (any case) means no constraint. Catalog tags match in any case;
    /// other tags are kept verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(format!("empty {} filter", T::KIND.to_lowercase()));
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let tag = T::from_str(&s.to_ascii_uppercase())
            .map_or_else(|_| CatalogTag::parse(s), CatalogTag::Known);
        Ok(Self::Only(tag))
    }
}

/// Sort order of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    /// Name, lexicographic
    #[default]
    Name,
    /// Selling price, ascending
    Price,
    /// Cuisine tag, lexicographic
    Cuisine,
    /// Status ranking
    Status,
}

/// Everything that shapes the displayed listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuQuery {
    /// Free-text search over name and description
    pub search: String,
    /// Cuisine constraint
    pub cuisine: CategoryFilter<Cuisine>,
    /// Food type constraint
    pub food_type: CategoryFilter<FoodType>,
    /// Sort order
    pub sort: SortKey,
    /// Ranking used when sorting by status
    pub ranking: StatusRanking,
}

impl MenuQuery {
    /// Number of constraints in effect (search counts as one)
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.cuisine.is_active())
            + usize::from(self.food_type.is_active())
            + usize::from(!self.search.trim().is_empty())
    }

    fn matches(&self, item: &MenuItem, needle: Option<&str>) -> bool {
        if !self.food_type.matches(&item.food_type) || !self.cuisine.matches(&item.cuisine) {
            return false;
        }
        needle.is_none_or(|needle| {
            item.item_name.to_lowercase().contains(needle)
                || item.description_text().to_lowercase().contains(needle)
        })
    }

    fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self.sort {
            SortKey::Name => a.item_name.cmp(&b.item_name),
            SortKey::Price => a.vendor_price.cmp(&b.vendor_price),
            SortKey::Cuisine => a.cuisine.as_str().cmp(b.cuisine.as_str()),
            SortKey::Status => self.ranking.compare(a.status, b.status),
        }
    }
}

/// Derives the displayed sequence from the full item set.
#[must_use]
pub fn apply_query(items: &[MenuItem], query: &MenuQuery) -> Vec<MenuItem> {
    // Blank searches are ignored; others match as typed, surrounding spaces included
    let needle = (!query.search.trim().is_empty()).then(|| query.search.to_lowercase());
    let needle = needle.as_deref();

    let mut shown: Vec<MenuItem> = items
        .iter()
        .filter(|item| query.matches(item, needle))
        .cloned()
        .collect();
    shown.sort_by(|a, b| query.compare(a, b));
    shown
}

/// Orders items by a status ranking, keeping the relative order within a rank.
pub fn sort_by_status(items: &mut [MenuItem], ranking: StatusRanking) {
    items.sort_by(|a, b| ranking.compare(a.status, b.status));
}

/// Headline numbers for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuStats {
    /// Total items in the collection
    pub total: usize,
    /// Items with status Active
    pub active: usize,
    /// Items with status Closed
    pub closed: usize,
    /// Items with status Inactive
    pub inactive: usize,
    /// Items awaiting approval
    pub pending: usize,
    /// Distinct cuisine tags present, first-seen order
    pub cuisines: Vec<String>,
    /// Distinct food type tags present, first-seen order
    pub food_types: Vec<String>,
}

impl MenuStats {
    /// Summarises the full (unfiltered) item set.
    #[must_use]
    pub fn collect(items: &[MenuItem]) -> Self {
        let mut stats = Self {
            total: items.len(),
            ..Self::default()
        };
        for item in items {
            match item.status {
                DishStatus::Active => stats.active += 1,
                DishStatus::Closed => stats.closed += 1,
                DishStatus::Inactive => stats.inactive += 1,
                DishStatus::PendingApproval => stats.pending += 1,
                DishStatus::Other(_) => {}
            }
            push_distinct(&mut stats.cuisines, item.cuisine.as_str());
            push_distinct(&mut stats.food_types, item.food_type.as_str());
        }
        stats
    }
}

fn push_distinct(seen: &mut Vec<String>, tag: &str) {
    if !tag.is_empty() && !seen.iter().any(|s| s == tag) {
        seen.push(tag.to_string());
    }
}
