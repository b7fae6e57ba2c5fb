mod error;
mod log;
pub mod midware;
pub mod routes;
pub mod types;

pub use error::{ClientError, Error, WebResult, NOT_CONFIGURED_MSG};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
