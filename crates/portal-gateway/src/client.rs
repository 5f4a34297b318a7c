//! Portal REST API client.

use crate::{CredentialGateway, LoginOutcome, LoginRequest};
use portal_types::{
    AdminProfile, FacilityProfile, GatewayError, GatewayResult, Notification, OrganiserProfile,
    Profile, Role, TokenPair, UserProfile,
};
use serde::Deserialize;
use std::time::Duration;

/// Portal REST API client.
#[derive(Clone)]
pub struct GatewayClient {
    http_client: reqwest::Client,
    api_url: String,
}

/// Error body the portal attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

/// The discriminated credential response. Exactly one detail key is present
/// on a well-formed response; it is decoded into `Profile` here and nowhere
/// else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleDetails {
    #[serde(default)]
    user_details: Option<UserProfile>,
    #[serde(default)]
    organiser_details: Option<OrganiserProfile>,
    #[serde(default)]
    facility_details: Option<FacilityProfile>,
    #[serde(default)]
    admin_details: Option<AdminProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    #[serde(flatten)]
    details: RoleDetails,
}

fn decode_role_details(details: RoleDetails) -> GatewayResult<Profile> {
    match (
        details.user_details,
        details.organiser_details,
        details.facility_details,
        details.admin_details,
    ) {
        (Some(profile), None, None, None) => Ok(Profile::User(profile)),
        (None, Some(profile), None, None) => Ok(Profile::Organiser(profile)),
        (None, None, Some(profile), None) => Ok(Profile::Facility(profile)),
        (None, None, None, Some(profile)) => Ok(Profile::Admin(profile)),
        _ => Err(GatewayError::Unknown(
            "credential response did not contain exactly one role detail".to_string(),
        )),
    }
}

fn decode_whoami(body: &str) -> GatewayResult<Profile> {
    let details: RoleDetails = serde_json::from_str(body)
        .map_err(|err| GatewayError::Unknown(format!("malformed credential response: {err}")))?;
    decode_role_details(details)
}

fn decode_login(body: &str) -> GatewayResult<LoginOutcome> {
    let response: LoginResponse = serde_json::from_str(body)
        .map_err(|err| GatewayError::Unknown(format!("malformed login response: {err}")))?;
    let profile = decode_role_details(response.details)?;
    Ok(LoginOutcome {
        tokens: TokenPair::new(response.access_token, response.refresh_token),
        profile,
    })
}

/// Map a non-success response to a taxonomy kind.
///
/// A decodable error body wins; otherwise fall back on the status class so
/// a misbehaving proxy still yields something actionable.
fn decode_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    if let Ok(wire) = serde_json::from_str::<WireError>(body) {
        return GatewayError::from_wire(&wire.error, &wire.message);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        GatewayError::NoAuth
    } else if status.is_server_error() {
        GatewayError::Service(format!("HTTP {status}"))
    } else {
        GatewayError::Unknown(format!("HTTP {status}"))
    }
}

impl GatewayClient {
    /// Create a new client against the given portal API base URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Create a new client with a per-request timeout.
    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GatewayError::Service(err.to_string()))?;
        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    /// Build a full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Send a request and return the success body, mapping transport and
    /// portal errors into the taxonomy.
    async fn send(&self, request: reqwest::RequestBuilder) -> GatewayResult<String> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Service(err.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::debug!(status = %status, "Portal request failed");
            return Err(decode_error(status, &body));
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl CredentialGateway for GatewayClient {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginOutcome> {
        let url = self.url(&format!("/auth/{}/login", request.role()));
        tracing::debug!(role = %request.role(), "Logging in to portal");

        let body = self
            .send(self.http_client.post(&url).json(&request.body()))
            .await?;

        let outcome = decode_login(&body)?;
        if outcome.profile.role() != request.role() {
            return Err(GatewayError::Unknown(format!(
                "login response carried a {} profile for a {} login",
                outcome.profile.role(),
                request.role()
            )));
        }

        tracing::info!(role = %request.role(), account = %outcome.profile.id(), "Portal login successful");
        Ok(outcome)
    }

    async fn whoami(&self, access_token: &str) -> GatewayResult<Profile> {
        let url = self.url("/auth/whoami");

        let body = self
            .send(
                self.http_client
                    .get(&url)
                    .header("Authorization", format!("Bearer {access_token}"))
                    .header("Accept", "application/json"),
            )
            .await?;

        decode_whoami(&body)
    }

    async fn logout(&self, refresh_token: &str) -> GatewayResult<()> {
        let url = self.url("/auth/logout");

        self.send(
            self.http_client
                .post(&url)
                .json(&serde_json::json!({ "refreshToken": refresh_token })),
        )
        .await?;

        Ok(())
    }

    async fn logout_all(&self, refresh_token: &str) -> GatewayResult<()> {
        let url = self.url("/auth/logout-all");

        self.send(
            self.http_client
                .post(&url)
                .json(&serde_json::json!({ "refreshToken": refresh_token })),
        )
        .await?;

        Ok(())
    }

    async fn notifications(
        &self,
        role: Role,
        access_token: &str,
    ) -> GatewayResult<Vec<Notification>> {
        let url = self.url(&format!("/{}-notifications", role));

        let body = self
            .send(
                self.http_client
                    .get(&url)
                    .header("Authorization", format!("Bearer {access_token}"))
                    .header("Accept", "application/json"),
            )
            .await?;

        let notifications: Vec<Notification> = serde_json::from_str(&body)
            .map_err(|err| GatewayError::Unknown(format!("malformed notification list: {err}")))?;
        tracing::debug!(role = %role, count = notifications.len(), "Fetched notifications");
        Ok(notifications)
    }

    async fn mark_read(
        &self,
        role: Role,
        access_token: &str,
        notification_id: i64,
    ) -> GatewayResult<()> {
        let url = self.url(&format!("/{}-notifications", role));

        self.send(
            self.http_client
                .patch(&url)
                .header("Authorization", format!("Bearer {access_token}"))
                .json(&serde_json::json!({ "notificationId": notification_id })),
        )
        .await?;

        Ok(())
    }
}
