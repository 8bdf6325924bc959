//! Sheet-backed record store client
//!
//! Speaks the deployed web-app protocol of the school's booking sheet: a
//! GET returns the full row list as JSON, mutations are POSTs carrying an
//! `action` discriminator. Rows written by spreadsheet formulas are not
//! always well-typed, so reads coerce defensively and skip anything
//! unusable rather than failing the whole snapshot.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    config::SheetConfig,
    error::{AppError, AppResult},
    models::{Booking, BookingStatus},
    sync::RecordStore,
};

#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    url: String,
}

impl SheetClient {
    pub fn new(config: &SheetConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            url: config.url.trim().to_string(),
        })
    }

    /// The sheet URL is optional; without it the server runs purely
    /// in-memory (useful for local development and tests).
    fn configured(&self) -> bool {
        !self.url.is_empty()
    }

    async fn post_action(&self, body: Value) -> AppResult<()> {
        if !self.configured() {
            tracing::debug!("sheet URL not set; skipping remote write");
            return Ok(());
        }
        let response = self.http.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "remote record store returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Best-effort conversion of one remote row into a [`Booking`].
///
/// Numeric fields may arrive as strings and the asset-code array may be
/// missing entirely; those are tolerated by the model's deserializer. A row
/// without a usable id/date/time shape is dropped.
fn coerce_row(row: Value) -> Option<Booking> {
    match serde_json::from_value::<Booking>(row) {
        Ok(booking) if !booking.id.trim().is_empty() => Some(booking),
        Ok(_) => {
            tracing::warn!("skipping sheet row with empty id");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed sheet row");
            None
        }
    }
}

#[async_trait]
impl RecordStore for SheetClient {
    async fn fetch_all(&self) -> AppResult<Vec<Booking>> {
        if !self.configured() {
            tracing::warn!("sheet URL not set; starting with an empty booking list");
            return Ok(Vec::new());
        }
        let rows: Vec<Value> = self.http.get(&self.url).send().await?.json().await?;
        let total = rows.len();
        let bookings: Vec<Booking> = rows.into_iter().filter_map(coerce_row).collect();
        if bookings.len() < total {
            tracing::warn!(
                kept = bookings.len(),
                total,
                "some sheet rows could not be parsed"
            );
        }
        Ok(bookings)
    }

    async fn create(&self, booking: &Booking) -> AppResult<()> {
        let mut body = serde_json::to_value(booking)
            .map_err(|e| AppError::Internal(format!("failed to encode booking: {}", e)))?;
        if let Some(map) = body.as_object_mut() {
            map.insert("action".to_string(), json!("CREATE"));
        }
        self.post_action(body).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        approved_by: Option<String>,
        returned_at: Option<String>,
    ) -> AppResult<()> {
        // The sheet script expects empty strings, not nulls, for the
        // untouched lifecycle fields.
        self.post_action(json!({
            "action": "UPDATE",
            "id": id,
            "status": status,
            "approvedBy": approved_by.as_deref().unwrap_or(""),
            "returnedAt": returned_at.as_deref().unwrap_or(""),
        }))
        .await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.post_action(json!({ "action": "DELETE", "id": id })).await
    }
}
