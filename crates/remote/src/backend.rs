//! The backend port and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;

use gatehouse_core::types::DbId;

use crate::dto::{BookingUpdate, RemoteSnapshot};
use crate::error::RemoteError;

/// Default timeout for a single backend call. The unit must keep
/// answering door requests while the uplink is down, so calls fail fast.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Remote booking backend as seen by the core.
///
/// Exactly two operations: pull the site snapshot, push one booking
/// update. No retry at this layer — the synchronizer's schedule and the
/// pending queue own retry policy.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// `GET /bookings/{site_id}` — fetch the authoritative snapshot.
    async fn fetch_snapshot(&self, site_id: DbId) -> Result<RemoteSnapshot, RemoteError>;

    /// `PUT /update-booking/{booking_id}` — push one state change.
    /// Any 2xx is success; everything else is failure.
    async fn push_update(
        &self,
        booking_id: DbId,
        update: &BookingUpdate,
    ) -> Result<(), RemoteError>;
}

/// reqwest-backed [`RemoteBackend`] implementation.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpBackend {
    /// Create a client for a backend base URL, e.g.
    /// `http://172.16.6.12:8000/api/devices`.
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            bearer_token,
        }
    }

    /// Attach the bearer token when configured.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Ensure the response has a success status code, otherwise turn it
    /// into a [`RemoteError::HttpStatus`] carrying the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteBackend for HttpBackend {
    async fn fetch_snapshot(&self, site_id: DbId) -> Result<RemoteSnapshot, RemoteError> {
        let url = format!("{}/bookings/{}", self.base_url, site_id);
        tracing::debug!(%url, "Fetching site snapshot");

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<RemoteSnapshot>().await?)
    }

    async fn push_update(
        &self,
        booking_id: DbId,
        update: &BookingUpdate,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/update-booking/{}", self.base_url, booking_id);
        tracing::debug!(%url, booking_id, "Pushing booking update");

        let response = self
            .authorize(self.client.put(&url))
            .json(update)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
