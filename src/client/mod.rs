//! Backend access for the dish resource.
//!
//! [`DishBackend`] is the seam between the menu board and wherever dishes live:
//! the REST backend ([`http::HttpDishClient`]) or the local SQLite store
//! ([`crate::store::LocalDishStore`]).

/// reqwest implementation against the REST backend
pub mod http;

use crate::{
    core::{
        dish::{ItemId, MenuItem, OutletId},
        payload::{DishPatch, NewDish},
    },
    errors::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// CRUD surface of the dish resource.
#[async_trait]
pub trait DishBackend: Send + Sync {
    /// Creates a dish from a full payload.
    async fn create_dish(&self, dish: &NewDish) -> Result<()>;

    /// Applies a partial update to one dish.
    async fn update_dish(&self, item_id: ItemId, patch: &DishPatch) -> Result<()>;

    /// Every dish row of an outlet, unfiltered.
    async fn list_dishes(&self, outlet_id: OutletId) -> Result<Vec<MenuItem>>;

    /// Outlet profile, when the backend serves one.
    async fn fetch_outlet(&self, _outlet_id: OutletId) -> Result<Option<Outlet>> {
        Ok(None)
    }
}

/// Outlet profile shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    /// Outlet identifier
    pub outlet_id: OutletId,
    /// Display name
    #[serde(default)]
    pub outlet_name: Option<String>,
    /// Everything else the backend sends
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response envelope used by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Application-level success flag (`1` = success)
    #[serde(default)]
    pub status: Option<i64>,
    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Payload
    #[serde(default)]
    pub data: Option<T>,
}

/// Row-set payload of list endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Rows<T> {
    /// Rows returned
    #[serde(default)]
    pub rows: Vec<T>,
}

impl<T> ApiEnvelope<Rows<T>> {
    /// Rows of a list response; a missing payload means no rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<T> {
        self.data.map(|data| data.rows).unwrap_or_default()
    }
}

/// Success contract shared by create and update: HTTP 200/201, or an
/// application-level `status == 1` in the body.
#[must_use]
pub fn is_success(http_status: u16, body_status: Option<i64>) -> bool {
    matches!(http_status, 200 | 201) || body_status == Some(1)
}
