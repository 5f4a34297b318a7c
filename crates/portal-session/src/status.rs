//! Session status machine.

/// Resolution status of the process-wide session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Stored tokens exist but no resolution has run yet.
    Unresolved,
    /// A "who am I" resolution is in flight.
    Resolving,
    /// An identity is resolved and a profile is available.
    Authenticated,
    /// No usable credentials.
    Anonymous,
}

impl SessionStatus {
    /// True while a resolution is pending. Role-gated pages must not
    /// redirect while this holds.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Unresolved | SessionStatus::Resolving)
    }
}

/// Whether `from -> to` is a legal status transition.
///
/// `Anonymous` is reachable from anywhere (logout is unconditional, and an
/// identity-invalidating resolution drops the session). `Authenticated` is
/// only entered through a successful login or resolution. `Unresolved` is
/// only re-entered when a bootstrap resolution fails transiently and rolls
/// back.
pub fn is_valid_transition(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (_, Anonymous) => true,
        (Unresolved | Anonymous | Authenticated, Resolving) => true,
        (Resolving, Authenticated | Unresolved) => true,
        (Unresolved | Anonymous, Authenticated) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    #[test]
    fn anonymous_reachable_from_anywhere() {
        for from in [Unresolved, Resolving, Authenticated, Anonymous] {
            assert!(is_valid_transition(from, Anonymous));
        }
    }

    #[test]
    fn resolution_paths() {
        assert!(is_valid_transition(Unresolved, Resolving));
        assert!(is_valid_transition(Anonymous, Resolving));
        assert!(is_valid_transition(Authenticated, Resolving));
        assert!(is_valid_transition(Resolving, Authenticated));
        assert!(is_valid_transition(Resolving, Anonymous));
        // Transient bootstrap failure rolls back to Unresolved.
        assert!(is_valid_transition(Resolving, Unresolved));
    }

    #[test]
    fn login_enters_authenticated_directly() {
        assert!(is_valid_transition(Anonymous, Authenticated));
        assert!(is_valid_transition(Unresolved, Authenticated));
    }

    #[test]
    fn unresolved_is_not_reentered_from_settled_states() {
        assert!(!is_valid_transition(Authenticated, Unresolved));
        assert!(!is_valid_transition(Anonymous, Unresolved));
    }

    #[test]
    fn loading_covers_pending_states() {
        assert!(Unresolved.is_loading());
        assert!(Resolving.is_loading());
        assert!(!Authenticated.is_loading());
        assert!(!Anonymous.is_loading());
    }
}
