//! Google Sheets v4 client.
//!
//! Provides service-account credential parsing, OAuth2 access-token
//! minting with caching, and a values API wrapper that implements
//! [`rangesync_core::store::ValueStore`].

pub mod api;
pub mod auth;
pub mod credentials;
pub mod error;

pub use api::SheetsApi;
pub use error::SheetsError;
