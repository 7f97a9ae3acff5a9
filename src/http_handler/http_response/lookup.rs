use super::response_common::{LookupErrorBody, SerdeJSONBodyHTTPResponseType};
use serde::{Deserialize, Deserializer};

/// Body of a 2xx `/api/lookup` answer. The backend reuses the success status
/// for domain errors, so the payload itself is a union: either resolved
/// coordinates or an error object with an optional raw Horizons snippet.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum LookupResponse {
    Coordinates(CelestialCoordinates),
    Error(LookupErrorBody),
}

impl SerdeJSONBodyHTTPResponseType for LookupResponse {}

/// Resolved horizontal coordinates for a target body.
#[derive(Deserialize, Debug, Clone)]
pub struct CelestialCoordinates {
    target: String,
    data: HorizontalCoordinates,
}

impl CelestialCoordinates {
    pub fn target(&self) -> &str { self.target.as_str() }
    pub fn azimuth(&self) -> f64 { self.data.azimuth }
    pub fn altitude(&self) -> f64 { self.data.altitude }

    #[cfg(test)]
    pub(crate) fn test(target: &str, azimuth: f64, altitude: f64) -> Self {
        Self {
            target: String::from(target),
            data: HorizontalCoordinates { azimuth, altitude },
        }
    }
}

/// Apparent azimuth/elevation pair. The Horizons proxy has emitted these both
/// as JSON numbers and as numeric strings, so both are accepted.
#[derive(Deserialize, Debug, Clone)]
pub struct HorizontalCoordinates {
    #[serde(deserialize_with = "angle_degrees")]
    azimuth: f64,
    #[serde(deserialize_with = "angle_degrees")]
    altitude: f64,
}

fn angle_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where D: Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAngle {
        Number(f64),
        Text(String),
    }
    match RawAngle::deserialize(deserializer)? {
        RawAngle::Number(v) => Ok(v),
        RawAngle::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_string_angles() {
        let body = r#"{"target":"Mars","data":{"azimuth":"120.5","altitude":"45.2"}}"#;
        let parsed: LookupResponse = serde_json::from_str(body).unwrap();
        match parsed {
            LookupResponse::Coordinates(c) => {
                assert_eq!(c.target(), "Mars");
                assert!((c.azimuth() - 120.5).abs() < f64::EPSILON);
                assert!((c.altitude() - 45.2).abs() < f64::EPSILON);
            }
            LookupResponse::Error(_) => panic!("expected coordinates"),
        }
    }

    #[test]
    fn parses_float_angles() {
        let body = r#"{"target":"301","data":{"azimuth":253.123456,"altitude":-12.5}}"#;
        let parsed: LookupResponse = serde_json::from_str(body).unwrap();
        match parsed {
            LookupResponse::Coordinates(c) => {
                assert!((c.azimuth() - 253.123_456).abs() < f64::EPSILON);
                assert!((c.altitude() + 12.5).abs() < f64::EPSILON);
            }
            LookupResponse::Error(_) => panic!("expected coordinates"),
        }
    }

    #[test]
    fn parses_application_error_body() {
        let body = r#"{"error":"Target ambiguous. Please try a more specific ID (e.g., '499' for Mars).","raw_response":"Multiple major-bodies match string"}"#;
        let parsed: LookupResponse = serde_json::from_str(body).unwrap();
        match parsed {
            LookupResponse::Error(e) => {
                assert!(e.error.starts_with("Target ambiguous"));
                assert!(e.raw_response.is_some());
            }
            LookupResponse::Coordinates(_) => panic!("expected error body"),
        }
    }
}
