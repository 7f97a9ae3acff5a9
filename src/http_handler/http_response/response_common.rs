use std::fmt;

pub trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker trait for response types that are plain serde-deserializable JSON
/// bodies. Blanket impls below wire such types into [`HTTPResponseType`].
pub trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    /// Maps every non-success HTTP status onto [`ResponseError::Status`],
    /// keeping the numeric code for display.
    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ResponseError::Status(response.status().as_u16()))
        }
    }
}

/// Application-level error body the lookup backend may return with a 2xx
/// status: `{ "error": ..., "raw_response": ... }`. The raw payload is a
/// diagnostic snippet of the upstream Horizons response and is preserved
/// verbatim for display.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LookupErrorBody {
    pub error: String,
    pub raw_response: Option<String>,
}

/// Error taxonomy for a completed (or failed) lookup exchange.
#[derive(Debug, Clone)]
pub enum ResponseError {
    /// The request could not be sent or completed.
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    Status(u16),
    /// The backend answered 2xx but the payload encodes a domain error.
    Application(LookupErrorBody),
}

impl ResponseError {
    /// Raw diagnostic payload carried by application-level errors, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ResponseError::Application(body) => body.raw_response.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Transport(msg) => write!(f, "{msg}"),
            ResponseError::Status(code) => write!(f, "Server status: {code}"),
            ResponseError::Application(body) => write!(f, "{}", body.error),
        }
    }
}

impl std::error::Error for ResponseError {}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => ResponseError::Status(status.as_u16()),
            None => ResponseError::Transport(value.to_string()),
        }
    }
}
