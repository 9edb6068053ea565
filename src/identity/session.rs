use std::sync::Arc;

use crate::identity::profile::{Role, UserProfile};
use crate::identity::store::CredentialStore;
use crate::routing::Route;
use crate::tprintln;

/// What the client currently knows about who is signed in. The two slots
/// move together: a token without a profile (or the reverse) never leaves
/// this module, it collapses to anonymous on the next rehydrate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<UserProfile>,
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self { Self::default() }

    pub fn authenticated(user: UserProfile, token: String) -> Self {
        Self { user: Some(user), token: Some(token) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> { self.user.as_ref() }

    pub fn token(&self) -> Option<&str> { self.token.as_deref() }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Where this session lands when it has nowhere specific to go.
    /// Technicians live in their visit list, everyone else on the home panel.
    pub fn default_landing(&self) -> Route {
        match self.role() {
            Some(Role::Technician) => Route::MyVisits,
            _ => Route::Home,
        }
    }
}

/// Session plus the store it persists through. Construction rehydrates, so a
/// fresh state already reflects credentials a previous run left behind.
pub struct SessionState {
    session: Session,
    store: Arc<dyn CredentialStore>,
}

impl SessionState {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let mut state = Self { session: Session::anonymous(), store };
        state.rehydrate();
        state
    }

    pub fn session(&self) -> &Session { &self.session }

    pub fn is_authenticated(&self) -> bool { self.session.is_authenticated() }

    pub fn role(&self) -> Option<Role> { self.session.role() }

    pub fn default_landing(&self) -> Route { self.session.default_landing() }

    /// Reload from the store. Only a complete pair counts; a lone profile or
    /// lone token reads as signed out.
    pub fn rehydrate(&mut self) {
        let stored = self.store.read();
        self.session = match (stored.user, stored.token) {
            (Some(user), Some(token)) => Session::authenticated(user, token),
            _ => Session::anonymous(),
        };
    }

    /// Adopt freshly exchanged credentials and persist them. Returns the
    /// route the signed-in user should land on. Persistence failure keeps
    /// the in-memory session valid; the next run just starts anonymous.
    pub fn login(&mut self, user: UserProfile, token: String) -> Route {
        if let Err(e) = self.store.write(&user, &token) {
            tracing::warn!(target: "techvisit::session", "credential persist failed: {e:#}");
        }
        tprintln!("session.login user={} role={}", user.login, user.role);
        self.session = Session::authenticated(user, token);
        self.session.default_landing()
    }

    /// Drop credentials everywhere and return the route to send the user to.
    pub fn logout(&mut self) -> Route {
        if let Some(u) = self.session.user() {
            tprintln!("session.logout user={}", u.login);
        }
        self.store.clear();
        self.session = Session::anonymous();
        Route::Login
    }
}
