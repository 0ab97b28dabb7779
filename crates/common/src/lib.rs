//! Shared building blocks for the user and video services: response types,
//! logging setup and process lifecycle helpers.

pub mod types;
pub mod utils;
pub mod lifecycle;
