//! The gateway trait the session core is written against.

use crate::{LoginOutcome, LoginRequest};
use portal_types::{GatewayResult, Notification, Profile, Role};

/// Logical calls the session and notification subsystems require from the
/// portal backend.
///
/// `GatewayClient` is the production implementation; tests substitute
/// scripted fakes. Implementations are stateless request/response adapters:
/// all session state lives on the caller's side.
#[async_trait::async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Role-specific login. Returns the issued token pair and profile.
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginOutcome>;

    /// Resolve the identity behind an access token.
    async fn whoami(&self, access_token: &str) -> GatewayResult<Profile>;

    /// Invalidate one refresh token server-side.
    async fn logout(&self, refresh_token: &str) -> GatewayResult<()>;

    /// Invalidate every refresh token issued to the account.
    async fn logout_all(&self, refresh_token: &str) -> GatewayResult<()>;

    /// Fetch the notification list for one role-scoped mailbox.
    async fn notifications(
        &self,
        role: Role,
        access_token: &str,
    ) -> GatewayResult<Vec<Notification>>;

    /// Mark one notification read. Idempotent server-side.
    async fn mark_read(
        &self,
        role: Role,
        access_token: &str,
        notification_id: i64,
    ) -> GatewayResult<()>;
}

#[async_trait::async_trait]
impl<G: CredentialGateway + ?Sized> CredentialGateway for std::sync::Arc<G> {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginOutcome> {
        (**self).login(request).await
    }

    async fn whoami(&self, access_token: &str) -> GatewayResult<Profile> {
        (**self).whoami(access_token).await
    }

    async fn logout(&self, refresh_token: &str) -> GatewayResult<()> {
        (**self).logout(refresh_token).await
    }

    async fn logout_all(&self, refresh_token: &str) -> GatewayResult<()> {
        (**self).logout_all(refresh_token).await
    }

    async fn notifications(
        &self,
        role: Role,
        access_token: &str,
    ) -> GatewayResult<Vec<Notification>> {
        (**self).notifications(role, access_token).await
    }

    async fn mark_read(
        &self,
        role: Role,
        access_token: &str,
        notification_id: i64,
    ) -> GatewayResult<()> {
        (**self).mark_read(role, access_token, notification_id).await
    }
}
