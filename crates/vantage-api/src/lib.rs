mod error;
pub use error::ApiError;

mod envelope;
pub use envelope::{Envelope, Meta};

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::DiscoveryApiAdapter;

mod http;
pub use http::{HttpApi, ORG_HEADER, OrgContext};

pub use axum;
