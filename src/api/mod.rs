//! API client for the GitHub REST API.
//!
//! This module provides the authenticated request wrapper (`ApiClient`), the
//! transport seam it sends through, and the request/response types.

mod client;
mod http;
mod types;
mod user;

pub use client::{ApiClient, DEFAULT_API_URL};
#[cfg(test)]
pub use http::{HttpRequest, HttpResponse, Transport};
pub(crate) use types::{CreateRepoRequest, EnablePagesRequest, PutContentRequest};
pub use types::{ContentFile, PagesInfo, PagesSource, RepositoryMetadata, RequestError};
