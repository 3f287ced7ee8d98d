//! HTTP access to the blog API.

mod client;
mod error;

pub use client::{ApiClient, Catalog};
pub use error::ApiError;
