use super::{FALLBACK_MESSAGE, rejection_message};
use crate::api::ApiClient;
use crate::routes::Route;
use crate::session::TokenStore;

/// Result of a logout: where to go, and an optional message to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub route: Route,
    pub message: Option<String>,
}

/// Header logout action.
///
/// The local session is always torn down, whatever the server says.
pub struct LogoutFlow {
    api: ApiClient,
    store: TokenStore,
}

impl LogoutFlow {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self { api, store }
    }

    pub async fn submit(&self) -> LogoutOutcome {
        let Some(access_token) = self.store.access_token() else {
            tracing::debug!("logout without a session");
            return LogoutOutcome {
                route: Route::Home,
                message: None,
            };
        };

        // Local teardown first: a slow or cancelled request must not keep the session.
        self.store.clear();
        let result = self.api.logout(&access_token).await;

        let message = match result {
            Ok(response) if response.is_ok() => {
                tracing::info!("logged out");
                None
            }
            Ok(response) => {
                tracing::info!(status = %response.status, "logout rejected by server");
                Some(rejection_message(&response, "message"))
            }
            Err(err) => {
                tracing::warn!(error = %err, "logout request failed");
                Some(FALLBACK_MESSAGE.to_string())
            }
        };

        LogoutOutcome {
            route: Route::Home,
            message,
        }
    }
}
