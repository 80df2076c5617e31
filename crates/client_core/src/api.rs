use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AccessToken, EventId},
    error::{ApiErrorBody, ErrorCode},
    protocol::{
        event_route, events_route, healthz_route, participants_route, CreateEventRequest,
        CreateEventResponse, EventView, HealthResponse, SubmitAvailabilityRequest,
        SubmitAvailabilityResponse,
    },
};
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    settings::{normalize_base_url, ClientSettings},
};

/// The backend operations the screens depend on.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn create_event(
        &self,
        request: &CreateEventRequest,
    ) -> Result<CreateEventResponse, ClientError>;

    async fn fetch_event(
        &self,
        event_id: &EventId,
        token: &AccessToken,
    ) -> Result<EventView, ClientError>;

    async fn submit_availability(
        &self,
        event_id: &EventId,
        request: &SubmitAvailabilityRequest,
    ) -> Result<SubmitAvailabilityResponse, ClientError>;
}

pub struct HttpEventsClient {
    http: Client,
    base_url: String,
}

impl HttpEventsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&settings.api_base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, healthz_route()))
            .send()
            .await?;
        decode_json(response).await
    }
}

#[async_trait]
impl EventsApi for HttpEventsClient {
    async fn create_event(
        &self,
        request: &CreateEventRequest,
    ) -> Result<CreateEventResponse, ClientError> {
        debug!(
            candidates = request.candidate_datetimes.len(),
            "creating event"
        );
        let response = self
            .http
            .post(format!("{}{}", self.base_url, events_route()))
            .json(request)
            .send()
            .await?;
        decode_json(response).await
    }

    async fn fetch_event(
        &self,
        event_id: &EventId,
        token: &AccessToken,
    ) -> Result<EventView, ClientError> {
        debug!(%event_id, "fetching event");
        let response = self
            .http
            .get(format!("{}{}", self.base_url, event_route(event_id)))
            .query(&[("token", token.as_str())])
            .send()
            .await?;
        decode_json(response).await
    }

    async fn submit_availability(
        &self,
        event_id: &EventId,
        request: &SubmitAvailabilityRequest,
    ) -> Result<SubmitAvailabilityResponse, ClientError> {
        debug!(
            %event_id,
            answers = request.availabilities.len(),
            "submitting availability"
        );
        let response = self
            .http
            .post(format!("{}{}", self.base_url, participants_route(event_id)))
            .json(request)
            .send()
            .await?;
        decode_json_or_default(response).await
    }
}

async fn read_success_body(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .map(|body| body.message());
        warn!(status = status.as_u16(), ?detail, "backend returned an error");
        return Err(ClientError::Status {
            status: status.as_u16(),
            code: ErrorCode::from_status(status.as_u16()),
            detail,
        });
    }

    Ok(body.to_vec())
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = read_success_body(response).await?;
    Ok(serde_json::from_slice(&body)?)
}

// Success responses without a body decode to the default value.
async fn decode_json_or_default<T: DeserializeOwned + Default>(
    response: Response,
) -> Result<T, ClientError> {
    let body = read_success_body(response).await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
