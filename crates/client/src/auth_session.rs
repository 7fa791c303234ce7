//! Authentication session with persistence across reloads.

use alm_core::realtime::SessionSnapshot;
use alm_shared::{to_ws_origin, ApiError, LoginRequest, UserSummary};
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::config::fallback_api_base;
use crate::storage::{self, API_BASE_KEY, SESSION_KEY};
use crate::stores::close_modal;

/// Authentication context provided to the app.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    pub session: Signal<Option<AuthSession>>,
    pub api_base: Signal<String>,
}

/// Stored session data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserSummary,
}

/// Provider component that sets up the auth context and keeps it persisted.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(|| storage::load::<AuthSession>(SESSION_KEY));
    let api_base = use_signal(|| {
        storage::load::<String>(API_BASE_KEY)
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(fallback_api_base)
    });

    use_effect(move || match session.read().as_ref() {
        Some(current) => {
            storage::save(SESSION_KEY, current);
        }
        None => storage::remove(SESSION_KEY),
    });

    use_effect(move || {
        storage::save(API_BASE_KEY, &*api_base.read());
    });

    use_context_provider(|| AuthContext { session, api_base });

    children
}

impl AuthContext {
    /// Exchange credentials for a bearer token and start the session.
    pub async fn login(&mut self, email: String, password: String) -> Result<(), ApiError> {
        let request = LoginRequest { email, password };
        let response = self.client().with_token(None).login(&request).await?;
        crate::log_info!("signed in as {}", response.user.email);
        self.session.set(Some(AuthSession {
            token: response.token,
            user: response.user,
        }));
        Ok(())
    }

    /// Clear the session. Any open modal belongs to the old session and
    /// closes first; the realtime bridge observes the change and tears down.
    pub fn logout(&mut self) {
        close_modal();
        storage::remove(SESSION_KEY);
        self.session.set(None);
    }

    /// API client configured for the current session.
    pub fn client(&self) -> ApiClient {
        ApiClient::new()
            .with_base_url(self.api_base.read().clone())
            .with_token(self.token())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.session.read().as_ref().map(|s| s.user.clone())
    }

    /// What the realtime bridge needs. Reading this subscribes the caller
    /// to session and API base changes.
    pub fn snapshot(&self) -> SessionSnapshot {
        let token = self.token();
        SessionSnapshot {
            authenticated: token.is_some(),
            token,
            ws_origin: to_ws_origin(&self.api_base.read()),
        }
    }
}
