//! HTTP access for the repository strategy.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction ([`HttpClient`])
//! - A reqwest-backed client with a body size ceiling ([`ReqwestClient`])

mod client;
mod error;
mod http;


pub use client::{DEFAULT_MAX_BODY_BYTES, ReqwestClient};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
