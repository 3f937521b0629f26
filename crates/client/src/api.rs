//! REST client for the irrigation controller's HTTP endpoints.
//!
//! Wraps the job-control API (`/status`, `/start`, `/stop`) and the
//! telemetry endpoints (`/counter`, `/valves`, `/gpm`) using [`reqwest`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use zonectl_core::status::StatusPayload;
use zonectl_core::telemetry::{CounterResponse, GpmResponse, TelemetrySnapshot, ValveStates};

/// Errors from the controller REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The controller returned a non-2xx status code.
    #[error("Controller API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Job-control operations the panel controller depends on.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// `GET /status`.
    async fn status(&self) -> Result<StatusPayload, ApiError>;

    /// `POST /start` with the `hours` form field.
    async fn start(&self, hours: u32) -> Result<(), ApiError>;

    /// `POST /stop` with an empty form.
    async fn stop(&self) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: JobApi + ?Sized> JobApi for Arc<T> {
    async fn status(&self) -> Result<StatusPayload, ApiError> {
        (**self).status().await
    }

    async fn start(&self, hours: u32) -> Result<(), ApiError> {
        (**self).start(hours).await
    }

    async fn stop(&self) -> Result<(), ApiError> {
        (**self).stop().await
    }
}

/// Read-only controller telemetry.
#[async_trait]
pub trait TelemetryApi: Send + Sync {
    async fn telemetry(&self) -> Result<TelemetrySnapshot, ApiError>;
}

#[async_trait]
impl<T: TelemetryApi + ?Sized> TelemetryApi for Arc<T> {
    async fn telemetry(&self) -> Result<TelemetrySnapshot, ApiError> {
        (**self).telemetry().await
    }
}

/// HTTP client for a single irrigation controller.
pub struct HttpJobApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://irrigation1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the water meter pulse counter (`GET /counter`).
    pub async fn water_counter(&self) -> Result<u64, ApiError> {
        let body: CounterResponse = self.get_json("counter").await?;
        Ok(body.counter)
    }

    /// Read the current flow rate in gallons per minute (`GET /gpm`).
    pub async fn gpm(&self) -> Result<f64, ApiError> {
        let body: GpmResponse = self.get_json("gpm").await?;
        Ok(body.gpm)
    }

    /// Read the open/closed state of every valve (`GET /valves`).
    pub async fn valves(&self) -> Result<ValveStates, ApiError> {
        self.get_json("valves").await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    /// POST a multipart form and require a JSON body back. The shape of
    /// the body is not inspected.
    async fn post_form(&self, path: &str, form: Form) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;

        let _: serde_json::Value = Self::parse_response(response).await?;
        Ok(())
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn status(&self) -> Result<StatusPayload, ApiError> {
        self.get_json("status").await
    }

    async fn start(&self, hours: u32) -> Result<(), ApiError> {
        tracing::debug!(hours, "Sending start request");
        let form = Form::new().text("hours", hours.to_string());
        self.post_form("start", form).await
    }

    async fn stop(&self) -> Result<(), ApiError> {
        tracing::debug!("Sending stop request");
        self.post_form("stop", Form::new()).await
    }
}

#[async_trait]
impl TelemetryApi for HttpJobApi {
    /// Query all telemetry endpoints concurrently.
    async fn telemetry(&self) -> Result<TelemetrySnapshot, ApiError> {
        let (water_counter, gpm, valves) =
            tokio::try_join!(self.water_counter(), self.gpm(), self.valves())?;

        Ok(TelemetrySnapshot {
            water_counter,
            gpm,
            valves,
        })
    }
}
