//! video-service: health check plus a single proxied lookup against the user-service.

pub mod client;
pub mod routes;
pub mod startup;

pub use client::{FetchOutcome, UserServiceClient};
pub use routes::build_router;
pub use startup::run;
