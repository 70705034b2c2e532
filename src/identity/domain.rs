//! Domain types for user identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is missing its domain separator.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The credential token is empty after trimming.
    #[error("credential must not be empty")]
    EmptyCredential,
}

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-in user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Creates a validated user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUserName`] when the name is
    /// blank or [`IdentityDomainError::InvalidEmail`] when the email lacks
    /// an `@` separator.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IdentityDomainError::EmptyUserName);
        }
        let email = email.into();
        if !email.contains('@') {
            return Err(IdentityDomainError::InvalidEmail(email));
        }
        Ok(Self { id, name, email })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Opaque login credential presented to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Creates a validated credential token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCredential`] when the token is
    /// empty after trimming.
    pub fn new(token: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(IdentityDomainError::EmptyCredential);
        }
        Ok(Self(token))
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
