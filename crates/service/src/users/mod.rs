//! Users module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::UserStoreError;
pub use repository::UserStore;
pub use service::UserService;
