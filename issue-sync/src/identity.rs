//! Resolves and caches the authenticated account's login.

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::transport::{Method, Transport, TransportError};

/// Lazily resolved identity of the authenticated account.
///
/// The first call to [`login`][IdentityResolver::login] issues `GET user`
/// and caches the login name; later calls return the cached value without a
/// network round-trip. One resolver lives inside each [`SyncRunner`], so the
/// cache scope is the runner, not a process-wide global.
///
/// [`SyncRunner`]: crate::sync::SyncRunner
#[derive(Default)]
pub struct IdentityResolver {
    login: OnceCell<String>,
}

impl IdentityResolver {
    /// Creates an unresolved identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the authenticated login, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates transport failures unchanged; no retry. Returns
    /// [`TransportError::Malformed`] if the response has no `login` field.
    pub async fn login(&self, transport: &dyn Transport) -> Result<String, TransportError> {
        let login = self
            .login
            .get_or_try_init(|| async {
                debug!("Resolving authenticated user");
                let response = transport.send(Method::Get, "user", None).await?;
                response
                    .get("login")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        TransportError::Malformed("GET user response has no login field".to_string())
                    })
            })
            .await?;
        Ok(login.clone())
    }
}
