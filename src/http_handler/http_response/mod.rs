pub mod lookup;
pub mod response_common;
