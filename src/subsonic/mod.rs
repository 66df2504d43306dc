//! Subsonic wire shapes: view objects and the response envelope.

mod response;
pub mod views;

pub use response::{ErrorCode, ErrorView, ResponseBody, SubsonicResponse, API_VERSION};
