//! Custom extractors for Axum handlers.
//!
//! Wrappers around axum's `Json` and `Query` whose rejections are rendered
//! through [`AppError`](crate::errors::AppError), so malformed requests get
//! the same error envelope as every other failure.

pub mod json_body;
pub mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
