//! Read-only client for the ord recursive endpoints (`/r/...`).
//!
//! The client issues plain HTTP GET requests against a caller-supplied
//! origin and reshapes the responses into the types of `recursive-did`.
//! Listings that the server splits into numbered pages are walked to
//! completion by [`pagination::collect_pages`].

pub mod client;
pub mod error;
pub mod metadata;
pub mod pagination;

pub use client::RecursiveClient;
pub use error::{ClientError, Result};
