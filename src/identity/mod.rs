//! User identity for session-scoped content management.
//!
//! Identity issuance itself is an external collaborator; this module
//! carries only the domain shape of a signed-in user, the provider port
//! consumed at session start, and an in-memory adapter for tests and
//! local deterministic sessions.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryIdentityProvider;
pub use domain::{Credential, IdentityDomainError, User, UserId};
pub use ports::{IdentityProvider, IdentityProviderError, IdentityResult};
