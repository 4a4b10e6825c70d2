//! Quill HTTP client
//!
//! Two channels talk to the blog backend:
//!
//! * the public channel ([`PublicClient`]) for the token endpoints and public
//!   reads, sent straight to the transport;
//! * the authenticated channel ([`AuthenticatedClient`]) which runs every call
//!   through a [`Pipeline`] whose [`RequestCoordinator`] attaches the access
//!   token and renews it, once, when the backend answers 401.
//!
//! [`BlogClient`] wires both channels to one [`SessionManager`].

#[macro_use]
extern crate tracing;

pub mod client;
pub mod error;
pub mod middleware;
pub mod request;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{AuthenticatedClient, BlogClient, PublicClient};
pub use error::{ClientError, Result};
pub use middleware::{
    CredentialSource, Middleware, Next, Pipeline, RequestCoordinator, TraceMiddleware,
};
pub use request::{ApiRequest, ApiResponse};
pub use session::{SessionManager, SessionStatus};
pub use transport::{ReqwestTransport, Transport};

pub use reqwest::{Method, StatusCode};
