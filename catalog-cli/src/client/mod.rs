mod api;
mod error;
mod http;

pub use api::*;
pub use error::*;
pub use http::*;
