//! # folderwalk-api
//!
//! Panopto REST client implementing [`folderwalk_core::FolderService`].
//!
//! Listings are paginated by page number until an empty page comes back.
//! Requests carry an OAuth2 bearer token obtained with the client-credentials
//! grant; a rejected token is refreshed once per request.

mod auth;
mod client;
mod config;

pub use auth::TokenProvider;
pub use client::PanoptoClient;
pub use config::ClientConfig;
