//! Identity context: the current principal and bearer-token retrieval.
//!
//! SYSTEM CONTEXT
//! ==============
//! Token issuance belongs to the external identity provider. This module only
//! defines the seam the store client reads tokens through, plus a static
//! implementation for the CLI and tests.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// The authenticated user as reported by the identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Supplies bearer tokens for store requests. Implementations must be safe
/// to call re-entrantly from concurrent requests.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid ID token, or `None` when signed out.
    async fn id_token(&self) -> Option<String>;

    /// The signed-in principal, if any.
    fn principal(&self) -> Option<Principal>;
}

/// A fixed token, e.g. one pasted from the browser into the CLI.
#[derive(Clone, Debug, Default)]
pub struct StaticToken {
    token: Option<String>,
    principal: Option<Principal>,
}

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), principal: None }
    }

    /// A provider with no session; every authenticated call fails fast.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticToken {
    async fn id_token(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.trim().is_empty())
    }

    fn principal(&self) -> Option<Principal> {
        self.principal.clone()
    }
}
