//! Admin gate for the management surface.
//!
//! The admin routes are only rendered for accounts flagged as
//! administrators. The gate is a three-state machine: it starts `Unknown`
//! while the session check is in flight and settles into either
//! `Authorized` or `Redirect`. Evaluation happens once per entry; there is
//! no live subscription to session changes while the surface stays open.

use crate::{AuthClient, Session};

/// Outcome of the admin check.
#[derive(Debug, Clone)]
pub enum GateState {
    /// Session check still in flight.
    Unknown,
    /// A live session whose user carries the admin flag.
    Authorized(Session),
    /// No session, an expired one, or a non-admin account.
    Redirect,
}

impl GateState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateState::Authorized(_))
    }
}

/// One-shot gate over a shared [`AuthClient`].
pub struct AdminGate<'a> {
    auth: &'a AuthClient,
}

impl<'a> AdminGate<'a> {
    pub fn new(auth: &'a AuthClient) -> Self {
        Self { auth }
    }

    /// Resolve `Unknown` into `Authorized` or `Redirect`.
    ///
    /// Missing or expired sessions redirect without a network call. The
    /// user record is re-fetched rather than trusted from the cached
    /// session, so a flag revoked server-side takes effect on next entry.
    pub async fn evaluate(&self) -> GateState {
        let session = match self.auth.current_session() {
            Some(session) if !session.is_expired() => session,
            _ => return GateState::Redirect,
        };

        match self.auth.get_user().await {
            Ok(user) if user.is_admin() => GateState::Authorized(session),
            Ok(_) => GateState::Redirect,
            Err(err) => {
                log::warn!("admin gate user lookup failed: {}", err);
                GateState::Redirect
            }
        }
    }
}
