//! REST API client module for the Carelink telehealth service.
//!
//! The API speaks JSON over HTTPS and requires a fixed `APPID` header
//! on every call. Authenticated endpoints take a bearer token obtained
//! from the `/login` endpoint. Responses carry an explicit `success`
//! flag which is validated here at the boundary.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, AuthError, FavoritesError};
