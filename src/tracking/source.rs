use super::SearchParams;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::lookup_get::LookupRequest;
use crate::http_handler::http_request::request_common::NoBodyHTTPRequestType;
use crate::http_handler::http_response::lookup::{CelestialCoordinates, LookupResponse};
use crate::http_handler::http_response::response_common::ResponseError;
use async_trait::async_trait;
use std::sync::Arc;

/// Seam over the lookup backend so the poller can be exercised against a
/// scripted source in tests.
#[async_trait]
pub trait CoordinateSource: Send + Sync {
    async fn lookup(&self, params: &SearchParams) -> Result<CelestialCoordinates, ResponseError>;
}

/// Production [`CoordinateSource`] backed by the `/api/lookup` endpoint.
pub struct LookupGateway {
    client: Arc<HTTPClient>,
}

impl LookupGateway {
    pub fn new(client: Arc<HTTPClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CoordinateSource for LookupGateway {
    async fn lookup(&self, params: &SearchParams) -> Result<CelestialCoordinates, ResponseError> {
        let request = LookupRequest {
            target: params.target.clone(),
            lat: params.lat,
            lon: params.lon,
        };
        // A 2xx body can still carry a domain error; fold it into the
        // error taxonomy here so callers see one failure type.
        match request.send_request(&self.client).await? {
            LookupResponse::Coordinates(coords) => Ok(coords),
            LookupResponse::Error(body) => Err(ResponseError::Application(body)),
        }
    }
}
