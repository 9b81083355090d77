//! Credential provider for API authentication.

use std::fmt;
use std::sync::Arc;

/// Source of the bearer credential attached to every API request.
///
/// Either a literal token or a zero-argument resolver invoked at request
/// time, so short-lived tokens (e.g. minted by an auth helper) stay fresh
/// for the lifetime of a client.
#[derive(Clone)]
pub enum Credential {
    /// A literal token string.
    Token(String),
    /// A callback producing the current token on demand.
    Resolver(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Credential {
    /// Creates a literal token credential.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Creates a credential backed by a resolver callback.
    #[must_use]
    pub fn from_fn<F>(resolver: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(resolver))
    }

    /// Resolves the current token value.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::Token(token) => token.clone(),
            Self::Resolver(resolver) => resolver(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print token material.
        match self {
            Self::Token(_) => f.write_str("Credential::Token(***)"),
            Self::Resolver(_) => f.write_str("Credential::Resolver(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn literal_token_resolves_to_itself() {
        assert_eq!(Credential::token("ghp_abc").resolve(), "ghp_abc");
    }

    #[test]
    fn resolver_is_invoked_per_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let credential = Credential::from_fn(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            format!("token-{n}")
        });

        assert_eq!(credential.resolve(), "token-0");
        assert_eq!(credential.resolve(), "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debug_redacts_token_material() {
        let rendered = format!("{:?}", Credential::token("ghp_secret"));
        assert!(!rendered.contains("ghp_secret"));
    }
}
