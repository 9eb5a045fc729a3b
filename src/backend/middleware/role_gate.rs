/**
 * Role Gate
 *
 * `Authorized<P>` is a `RequestIdentity` that has also passed policy `P`.
 * Its fields are private. As an extractor it runs the auth extractor
 * first, so a gated handler cannot be reached without a verified token.
 *
 * Every decision is audit-logged: denials at `warn`, grants at `info`.
 */

use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::auth::sessions::{RequestIdentity, TokenKeys};
use crate::backend::error::ApiError;
use crate::shared::Role;

/// A set of roles allowed through a gate
pub trait RolePolicy {
    /// Name used in audit logs
    const NAME: &'static str;
    const ALLOWED: &'static [Role];
}

/// Admins only
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const NAME: &'static str = "admin-only";
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Sellers and admins
#[derive(Debug, Clone, Copy)]
pub struct SellerOrAdmin;

impl RolePolicy for SellerOrAdmin {
    const NAME: &'static str = "seller-or-admin";
    const ALLOWED: &'static [Role] = &[Role::Seller, Role::Admin];
}

/// Check `identity` against an allow-list
pub fn authorize(
    identity: RequestIdentity,
    allowed: &[Role],
    route: &str,
) -> Result<RequestIdentity, ApiError> {
    if !allowed.contains(&identity.role) {
        tracing::warn!(
            user_id = identity.id,
            username = %identity.username,
            role = %identity.role,
            route,
            "Access denied: insufficient role"
        );
        return Err(ApiError::forbidden("Access denied."));
    }

    tracing::info!(
        user_id = identity.id,
        role = %identity.role,
        route,
        "Access granted"
    );
    Ok(identity)
}

/// A verified identity whose role satisfies `P`
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    identity: RequestIdentity,
    _policy: PhantomData<fn() -> P>,
}

impl<P: RolePolicy> Authorized<P> {
    /// Apply policy `P` to an already-verified identity
    pub fn check(identity: RequestIdentity, route: &str) -> Result<Self, ApiError> {
        let identity = authorize(identity, P::ALLOWED, route)?;
        Ok(Self {
            identity,
            _policy: PhantomData,
        })
    }

    pub fn identity(&self) -> &RequestIdentity {
        &self.identity
    }

    pub fn into_identity(self) -> RequestIdentity {
        self.identity
    }
}

impl<P> Deref for Authorized<P> {
    type Target = RequestIdentity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

impl<S, P> FromRequestParts<S> for Authorized<P>
where
    P: RolePolicy,
    Arc<TokenKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = RequestIdentity::from_request_parts(parts, state).await?;
        tracing::debug!(policy = P::NAME, "Checking role gate");
        Self::check(identity, parts.uri.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output for one test
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    fn identity(role: Role) -> RequestIdentity {
        RequestIdentity {
            id: 1,
            username: "carol".to_string(),
            role,
        }
    }

    #[test]
    fn test_admin_only() {
        assert!(Authorized::<AdminOnly>::check(identity(Role::Admin), "/api/admin/users").is_ok());
        assert_matches!(
            Authorized::<AdminOnly>::check(identity(Role::Buyer), "/api/admin/users"),
            Err(ApiError::Forbidden(_))
        );
        assert_matches!(
            Authorized::<AdminOnly>::check(identity(Role::Seller), "/api/admin/users"),
            Err(ApiError::Forbidden(_))
        );
    }

    #[test]
    fn test_seller_or_admin() {
        for role in [Role::Seller, Role::Admin] {
            let gate = Authorized::<SellerOrAdmin>::check(identity(role), "/api/seller/inbox").unwrap();
            assert_eq!(gate.role, role);
        }
        assert!(Authorized::<SellerOrAdmin>::check(identity(Role::Buyer), "/api/seller/inbox").is_err());
    }

    #[test]
    fn test_authorize_returns_same_identity() {
        let granted = authorize(identity(Role::Seller), SellerOrAdmin::ALLOWED, "/x").unwrap();
        assert_eq!(granted, identity(Role::Seller));
    }

    #[test]
    fn test_denial_is_audit_logged() {
        let (result, logs) =
            with_logs(|| Authorized::<AdminOnly>::check(identity(Role::Buyer), "/api/admin/users"));
        assert!(result.is_err());

        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Access denied"), "{logs}");
        assert!(logs.contains("user_id=1"), "{logs}");
        assert!(logs.contains("role=buyer"), "{logs}");
        assert!(logs.contains("/api/admin/users"), "{logs}");
        assert!(!logs.contains("Access granted"), "{logs}");
    }

    #[test]
    fn test_grant_is_audit_logged() {
        let (result, logs) = with_logs(|| {
            Authorized::<SellerOrAdmin>::check(identity(Role::Seller), "/api/seller/inbox")
        });
        assert!(result.is_ok());

        assert!(logs.contains("INFO"), "{logs}");
        assert!(logs.contains("Access granted"), "{logs}");
        assert!(logs.contains("role=seller"), "{logs}");
        assert!(logs.contains("/api/seller/inbox"), "{logs}");
        assert!(!logs.contains("Access denied"), "{logs}");
    }
}
