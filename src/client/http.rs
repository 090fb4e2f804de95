//! REST client for the dish resource.

use crate::{
    client::{ApiEnvelope, DishBackend, Outlet, Rows, is_success},
    core::{
        dish::{ItemId, MenuItem, OutletId},
        payload::{DishPatch, NewDish},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use tracing::{debug, instrument, warn};

/// Dish backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDishClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDishClient {
    /// Builds a client for `base_url`, sending `token` as a bearer token when set.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("menu-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Applies the create/update success contract to a response.
    async fn expect_success(response: Response, action: &str) -> Result<()> {
        let status = response.status();
        let text = response.text().await?;
        let envelope = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text).ok();
        let (body_status, message) = envelope.map_or((None, None), |e| (e.status, e.message));

        if status.is_success() && is_success(status.as_u16(), body_status) {
            return Ok(());
        }

        let message = message.unwrap_or_else(|| format!("{action} failed"));
        warn!("{} rejected with {}: {}", action, status, message);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Reads a row-set response, failing on non-2xx statuses.
    async fn read_rows<T: serde::de::DeserializeOwned>(
        response: Response,
        action: &str,
    ) -> Result<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("{action} failed"));
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        let envelope: ApiEnvelope<Rows<T>> = response.json().await?;
        Ok(envelope.into_rows())
    }
}

#[async_trait]
impl DishBackend for HttpDishClient {
    #[instrument(skip(self, dish), fields(item = %dish.item_name))]
    async fn create_dish(&self, dish: &NewDish) -> Result<()> {
        let response = self.request(Method::POST, "dish").json(dish).send().await?;
        Self::expect_success(response, "Creating dish").await
    }

    #[instrument(skip(self, patch))]
    async fn update_dish(&self, item_id: ItemId, patch: &DishPatch) -> Result<()> {
        let response = self
            .request(Method::PUT, &format!("dish/{item_id}"))
            .json(patch)
            .send()
            .await?;
        Self::expect_success(response, "Updating dish").await
    }

    #[instrument(skip(self))]
    async fn list_dishes(&self, outlet_id: OutletId) -> Result<Vec<MenuItem>> {
        let response = self
            .request(Method::GET, "dishes/")
            .query(&[("outlet_id", outlet_id)])
            .send()
            .await?;
        let rows = Self::read_rows(response, "Listing dishes").await?;
        debug!("Fetched {} dish rows", rows.len());
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn fetch_outlet(&self, outlet_id: OutletId) -> Result<Option<Outlet>> {
        let response = self
            .request(Method::GET, "restraunts")
            .query(&[("outlet_id", outlet_id)])
            .send()
            .await?;
        let rows: Vec<Outlet> = Self::read_rows(response, "Fetching outlet").await?;
        Ok(rows.into_iter().next())
    }
}
