//! # Identity Provider
//!
//! Wallet/account authentication is an external collaborator: the core only
//! needs a caller address per operation. [`IdentityProvider`] models that
//! contract; [`StaticIdentity`] is the embedding/test implementation that
//! always answers with a fixed address.

use thiserror::Error;

use cbf_core::AddressId;

/// Errors from resolving the current caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// No caller is authenticated for this operation.
    #[error("no authenticated caller: {0}")]
    Unauthenticated(String),

    /// The identity provider cannot serve requests.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Yields the address of the caller invoking the current operation.
pub trait IdentityProvider: Send + Sync {
    /// The authenticated caller's address.
    fn current_caller(&self) -> Result<AddressId, IdentityError>;
}

/// An identity provider pinned to one address.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    caller: AddressId,
}

impl StaticIdentity {
    /// Pin the provider to `caller`.
    pub fn new(caller: AddressId) -> Self {
        Self { caller }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_caller(&self) -> Result<AddressId, IdentityError> {
        Ok(self.caller.clone())
    }
}
