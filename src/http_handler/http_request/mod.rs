pub mod lookup_get;
pub mod request_common;
