//! Generic CRUD and query-by-example endpoints for sea-orm entities, served with axum.
//!
//! A record type opts in by deriving `Record` and implementing [`Resource`]; the
//! [`add_crud`] and [`add_find_api`] helpers then mount its endpoints on a router whose state
//! is a `sea_orm::DatabaseConnection`.

extern crate self as crudkit;

pub mod config;
pub mod errors;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod query;
pub mod record;
pub mod routes;
pub mod traits;

pub use crudkit_derive::Record;
pub use errors::ApiError;
pub use pagination::Pagination;
pub use record::Record;
pub use routes::{GroupMutator, add_crud, add_find_api, api_builder};
pub use traits::{RecordId, Resource};
