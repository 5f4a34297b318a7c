//! Error taxonomy shared by every portal operation.

use thiserror::Error;

/// Result type for gateway-facing operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Typed failure returned by the Credential Gateway.
///
/// Two groups matter to the session core: kinds that invalidate the current
/// identity (the session manager drops to anonymous) and kinds attributable
/// to a specific login field (surfaced inline next to that field). Every
/// other kind is reported to the user and otherwise left alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No credentials were presented or accepted.
    #[error("not authenticated")]
    NoAuth,

    /// The presented credentials were valid once but have expired.
    #[error("session expired")]
    SessionExpired,

    /// Password did not match the account.
    #[error("incorrect password")]
    IncorrectPassword,

    /// No donor account exists for the given IC number.
    #[error("no account found for IC number {0}")]
    IcNotFound(String),

    /// No account exists for the given email.
    #[error("no account found for email {0}")]
    EmailNotFound(String),

    /// A registration or update collided with an existing record.
    #[error("duplicate record: {0}")]
    DuplicateRecord(String),

    /// Profile update rejected because the current password was wrong.
    #[error("current password does not match")]
    CurrentPasswordNotMatching,

    /// The portal reported a server-side failure, or the request never
    /// reached it.
    #[error("service error: {0}")]
    Service(String),

    /// Anything the client does not recognize.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl GatewayError {
    /// True for kinds that invalidate the current identity. The session
    /// manager reacts by clearing tokens and dropping to anonymous.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, GatewayError::NoAuth | GatewayError::SessionExpired)
    }

    /// True for login failures attributable to a specific form field.
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            GatewayError::IncorrectPassword
                | GatewayError::IcNotFound(_)
                | GatewayError::EmailNotFound(_)
        )
    }

    /// Decode a portal wire error code into a taxonomy kind.
    ///
    /// Unrecognized codes degrade to `Unknown` rather than failing: the
    /// error channel must always deliver something displayable.
    pub fn from_wire(code: &str, detail: &str) -> Self {
        match code {
            "NO_AUTH" => GatewayError::NoAuth,
            "SESSION_EXPIRED" => GatewayError::SessionExpired,
            "INCORRECT_PASSWORD" => GatewayError::IncorrectPassword,
            "IC_NOT_FOUND" => GatewayError::IcNotFound(detail.to_string()),
            "EMAIL_NOT_FOUND" => GatewayError::EmailNotFound(detail.to_string()),
            "DUPLICATE_RECORD" => GatewayError::DuplicateRecord(detail.to_string()),
            "CURRENT_PASSWORD_NOT_MATCHING" => GatewayError::CurrentPasswordNotMatching,
            "SERVICE_ERROR" => GatewayError::Service(detail.to_string()),
            _ => GatewayError::Unknown(if detail.is_empty() {
                code.to_string()
            } else {
                format!("{} ({})", detail, code)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_invalidating_kinds() {
        assert!(GatewayError::NoAuth.invalidates_session());
        assert!(GatewayError::SessionExpired.invalidates_session());
        assert!(!GatewayError::IncorrectPassword.invalidates_session());
        assert!(!GatewayError::Service("down".into()).invalidates_session());
    }

    #[test]
    fn field_attributable_kinds() {
        assert!(GatewayError::IncorrectPassword.is_field_error());
        assert!(GatewayError::IcNotFound("990101".into()).is_field_error());
        assert!(GatewayError::EmailNotFound("a@b.c".into()).is_field_error());
        assert!(!GatewayError::NoAuth.is_field_error());
        assert!(!GatewayError::DuplicateRecord("email".into()).is_field_error());
    }

    #[test]
    fn wire_codes_decode() {
        assert_eq!(
            GatewayError::from_wire("SESSION_EXPIRED", ""),
            GatewayError::SessionExpired
        );
        assert_eq!(
            GatewayError::from_wire("IC_NOT_FOUND", "990101-14-5678"),
            GatewayError::IcNotFound("990101-14-5678".to_string())
        );
        assert_eq!(
            GatewayError::from_wire("DUPLICATE_RECORD", "email already registered"),
            GatewayError::DuplicateRecord("email already registered".to_string())
        );
    }

    #[test]
    fn unknown_codes_degrade() {
        let err = GatewayError::from_wire("TEAPOT", "short and stout");
        assert_eq!(
            err,
            GatewayError::Unknown("short and stout (TEAPOT)".to_string())
        );
        let bare = GatewayError::from_wire("TEAPOT", "");
        assert_eq!(bare, GatewayError::Unknown("TEAPOT".to_string()));
    }
}
