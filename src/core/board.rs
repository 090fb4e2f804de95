//! Menu board - the owner's live view of an outlet's dishes.
//!
//! The board keeps the last fetched collection and applies status changes to it
//! optimistically. The backend stays authoritative: whenever a change is refused
//! the whole collection is fetched again, and removals and form submissions always
//! end with a fetch. Every method takes `&self`, so changes to different dishes can
//! be awaited side by side; a second change to the same dish is refused while the
//! first is in flight.

use crate::{
    client::{DishBackend, Outlet},
    core::{
        dish::{DishStatus, ItemId, MenuItem, OutletId},
        form::{DishForm, FormMode},
        listing::{MenuQuery, MenuStats, StatusLifecycle, apply_query, sort_by_status},
        payload::DishPatch,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use dashmap::DashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Marks one dish as busy until dropped.
struct BusyGuard<'a> {
    busy: &'a DashSet<ItemId>,
    item_id: ItemId,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.remove(&self.item_id);
    }
}

/// Live menu of one outlet.
pub struct MenuBoard {
    backend: Arc<dyn DishBackend>,
    outlet_id: OutletId,
    lifecycle: StatusLifecycle,
    items: RwLock<Vec<MenuItem>>,
    busy: DashSet<ItemId>,
}

impl MenuBoard {
    /// Empty board; call [`MenuBoard::refresh`] to load it.
    #[must_use]
    pub fn new(backend: Arc<dyn DishBackend>, outlet_id: OutletId, lifecycle: StatusLifecycle) -> Self {
        Self {
            backend,
            outlet_id,
            lifecycle,
            items: RwLock::new(Vec::new()),
            busy: DashSet::new(),
        }
    }

    /// Builds a board and performs the first fetch.
    pub async fn load(
        backend: Arc<dyn DishBackend>,
        outlet_id: OutletId,
        lifecycle: StatusLifecycle,
    ) -> Result<Self> {
        let board = Self::new(backend, outlet_id, lifecycle);
        board.refresh().await?;
        Ok(board)
    }

    /// Outlet this board administers
    #[must_use]
    pub const fn outlet_id(&self) -> OutletId {
        self.outlet_id
    }

    /// Lifecycle in effect
    #[must_use]
    pub const fn lifecycle(&self) -> StatusLifecycle {
        self.lifecycle
    }

    /// Replaces the collection with the backend's current listing.
    ///
    /// Rows hidden by the lifecycle are dropped and the rest ordered by its
    /// status ranking. On failure the previous collection is kept.
    pub async fn refresh(&self) -> Result<()> {
        let fetched = self.backend.list_dishes(self.outlet_id).await?;
        let fetched_count = fetched.len();
        let mut listed: Vec<MenuItem> = fetched
            .into_iter()
            .filter(|item| self.lifecycle.is_listed(item))
            .collect();
        sort_by_status(&mut listed, self.lifecycle.ranking());

        debug!(
            "Outlet {}: {} rows fetched, {} listed",
            self.outlet_id,
            fetched_count,
            listed.len()
        );
        *self.items.write().await = listed;
        Ok(())
    }

    /// Snapshot of the full collection.
    pub async fn items(&self) -> Vec<MenuItem> {
        self.items.read().await.clone()
    }

    /// One dish from the collection.
    pub async fn item(&self, item_id: ItemId) -> Option<MenuItem> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.item_id == item_id)
            .cloned()
    }

    /// Displayed sequence for a query.
    pub async fn view(&self, query: &MenuQuery) -> Vec<MenuItem> {
        apply_query(&self.items.read().await, query)
    }

    /// Headline numbers over the full collection.
    pub async fn stats(&self) -> MenuStats {
        MenuStats::collect(&self.items.read().await)
    }

    /// Outlet profile from the backend.
    pub async fn outlet(&self) -> Result<Option<Outlet>> {
        self.backend.fetch_outlet(self.outlet_id).await
    }

    /// Whether a change to this dish is in flight
    #[must_use]
    pub fn is_busy(&self, item_id: ItemId) -> bool {
        self.busy.contains(&item_id)
    }

    fn claim(&self, item_id: ItemId) -> Result<BusyGuard<'_>> {
        if !self.busy.insert(item_id) {
            return Err(Error::Busy { id: item_id });
        }
        Ok(BusyGuard {
            busy: &self.busy,
            item_id,
        })
    }

    /// Blank creation form for this outlet.
    #[must_use]
    pub fn create_form(&self) -> DishForm {
        DishForm::create(self.outlet_id)
    }

    /// Edit form pre-filled from a listed dish.
    ///
    /// # Errors
    /// Returns [`Error::DishNotFound`] if the dish is not in the collection.
    pub async fn edit_form(&self, item_id: ItemId) -> Result<DishForm> {
        self.item(item_id)
            .await
            .map(|item| DishForm::edit(&item, self.lifecycle))
            .ok_or(Error::DishNotFound { id: item_id })
    }

    /// Changes a dish's status.
    ///
    /// The local copy changes before the request is sent. If the backend refuses,
    /// the collection is fetched again and the backend's error is returned.
    ///
    /// # Errors
    /// - [`Error::Busy`] while another change to the dish is in flight
    /// - [`Error::DishNotFound`] if the dish is not listed
    /// - [`Error::PendingApproval`] if the dish is gated
    /// - [`Error::Form`] for a status the owner cannot pick
    /// - the backend's error when the request fails
    pub async fn transition(&self, item_id: ItemId, status: DishStatus) -> Result<()> {
        if !DishStatus::SELECTABLE.contains(&status) {
            return Err(Error::Form {
                message: format!("Status '{status}' cannot be set directly"),
            });
        }
        let _guard = self.claim(item_id)?;

        {
            let mut items = self.items.write().await;
            let item = items
                .iter_mut()
                .find(|item| item.item_id == item_id)
                .ok_or(Error::DishNotFound { id: item_id })?;
            if self.lifecycle.is_locked(item) {
                return Err(Error::PendingApproval { id: item_id });
            }
            item.status = status;
        }

        let patch = DishPatch::status_change(status, Utc::now());
        if let Err(e) = self.backend.update_dish(item_id, &patch).await {
            warn!("Status change for dish {} failed: {}", item_id, e);
            self.resync().await;
            return Err(e);
        }

        info!("Dish {} is now {}", item_id, status);
        Ok(())
    }

    /// Soft deletes a dish, then reloads the collection whatever the outcome.
    ///
    /// # Errors
    /// Same guards as [`MenuBoard::transition`], then the backend's error.
    pub async fn remove(&self, item_id: ItemId) -> Result<()> {
        let _guard = self.claim(item_id)?;

        let item = self
            .item(item_id)
            .await
            .ok_or(Error::DishNotFound { id: item_id })?;
        if self.lifecycle.is_locked(&item) {
            return Err(Error::PendingApproval { id: item_id });
        }

        let result = self.backend.update_dish(item_id, &DishPatch::removal()).await;
        match &result {
            Ok(()) => info!("Dish {} ({}) removed", item_id, item.item_name),
            Err(e) => warn!("Removing dish {} failed: {}", item_id, e),
        }
        self.resync().await;
        result
    }

    /// Submits a creation form.
    ///
    /// Validation failures and backend refusals are also recorded as the form's
    /// error message.
    ///
    /// # Errors
    /// - [`Error::SubmissionInFlight`] if the form is already submitting
    /// - [`Error::Form`] if the form belongs to the edit flow
    /// - [`Error::Validation`] when the gate refuses; no request is sent
    /// - the backend's error when the request fails
    pub async fn create(&self, form: &mut DishForm) -> Result<()> {
        if form.is_submitting() {
            return Err(Error::SubmissionInFlight);
        }
        let FormMode::Create { outlet_id } = form.mode() else {
            return Err(Error::Form {
                message: "Form was opened for editing, not creation".to_string(),
            });
        };
        let valid = form.check()?;
        form.begin_submit()?;

        let dish = valid.into_new_dish(outlet_id);
        let result = self.backend.create_dish(&dish).await;
        self.finish(form, result, "Failed to create item. Please try again.")
            .await?;
        info!("Created dish '{}' for outlet {}", dish.item_name, outlet_id);
        Ok(())
    }

    /// Submits an edit form as a full-edit patch.
    ///
    /// # Errors
    /// As [`MenuBoard::create`], plus [`Error::PendingApproval`] for a locked form
    /// and [`Error::Busy`] while a status change to the dish is in flight.
    pub async fn update(&self, form: &mut DishForm) -> Result<()> {
        if form.is_submitting() {
            return Err(Error::SubmissionInFlight);
        }
        let FormMode::Edit { item_id, locked } = form.mode() else {
            return Err(Error::Form {
                message: "Form was opened for creation, not editing".to_string(),
            });
        };
        if locked {
            return Err(Error::PendingApproval { id: item_id });
        }
        let valid = form.check()?;
        let _guard = self.claim(item_id)?;
        form.begin_submit()?;

        let result = self.backend.update_dish(item_id, &valid.into_patch()).await;
        self.finish(form, result, "Failed to update menu item. Please try again.")
            .await?;
        info!("Updated dish {}", item_id);
        Ok(())
    }

    async fn finish(&self, form: &mut DishForm, result: Result<()>, fallback: &str) -> Result<()> {
        match result {
            Ok(()) => {
                form.finish_submit(None);
                self.refresh().await
            }
            Err(e) => {
                let message = match &e {
                    Error::Api { message, .. } if !message.trim().is_empty() => message.clone(),
                    _ => fallback.to_string(),
                };
                form.finish_submit(Some(message));
                Err(e)
            }
        }
    }

    async fn resync(&self) {
        if let Err(e) = self.refresh().await {
            error!("Reloading outlet {} failed: {}", self.outlet_id, e);
        }
    }
}
