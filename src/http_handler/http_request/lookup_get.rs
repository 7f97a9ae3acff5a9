use super::super::http_response::lookup::LookupResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// `GET /api/lookup`: resolve the apparent azimuth/altitude of `target` as
/// seen from the given observer location. Altitude above sea level is fixed
/// at zero for now, matching the backend's default.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub target: String,
    pub lat: f64,
    pub lon: f64,
}

impl NoBodyHTTPRequestType for LookupRequest {}

impl HTTPRequestType for LookupRequest {
    type Response = LookupResponse;
    fn endpoint(&self) -> &str {
        "/api/lookup"
    }
    fn request_method(&self) -> HTTPRequestMethod {
        HTTPRequestMethod::Get
    }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("target", self.target.clone()),
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("alt", String::from("0")),
        ]
    }
}
