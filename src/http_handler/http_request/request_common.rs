use super::super::http_client::HTTPClient;
use super::super::http_response::response_common::{HTTPResponseType, ResponseError};
use strum_macros::Display;

#[derive(Debug, Copy, Clone, Display)]
pub enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

pub trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> &str;
    fn request_method(&self) -> HTTPRequestMethod;
    /// Query string key/value pairs appended to the endpoint URL.
    fn query_params(&self) -> Vec<(&'static str, String)> { Vec::new() }
    fn header_params(&self) -> reqwest::header::HeaderMap {
        reqwest::header::HeaderMap::default()
    }
}

/// Requests without a payload. Provides the shared send path: build the URL
/// from the client's base, attach query/header params, dispatch, and hand the
/// raw response to the response type for status unwrapping and JSON parsing.
pub trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, ResponseError> {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Put => client.client().put(url),
            HTTPRequestMethod::Delete => client.client().delete(url),
        };
        let response = builder
            .query(&self.query_params())
            .headers(self.header_params())
            .send()
            .await?;
        Self::Response::read_response(response).await
    }
}
