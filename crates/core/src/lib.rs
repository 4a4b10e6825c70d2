//! Quill core types and utilities
//!
//! Everything here is transport-agnostic: the credential pair and its storage
//! seam, identity extraction from access tokens, navigation targets, post types
//! and API configuration. The HTTP machinery lives in `quill-http`.

pub mod config;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod store;
pub mod types;

pub use config::ApiConfig;
pub use credentials::{CredentialPair, Credentials};
pub use error::{ConfigError, IdentityError, StoreError};
pub use identity::{Identity, TokenClaims, decode_claims, extract_identity};
pub use navigation::Navigator;
pub use store::{CredentialStore, MemoryCredentialStore};
pub use types::{Post, PostDraft, PostPatch};
