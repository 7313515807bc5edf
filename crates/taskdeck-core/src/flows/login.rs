use serde::Deserialize;

use super::{FALLBACK_MESSAGE, FlowState, FormStatus, Outcome, rejection_message};
use crate::api::ApiClient;
use crate::forms::{LoginForm, Validate};
use crate::routes::Route;
use crate::session::TokenStore;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

/// Login page flow: validate, POST credentials, install tokens, go to the dashboard.
pub struct LoginFlow {
    api: ApiClient,
    store: TokenStore,
    status: FormStatus,
}

impl LoginFlow {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self {
            api,
            store,
            status: FormStatus::default(),
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Submits the form once.
    ///
    /// Only the ok status decides success; any error field on an ok response
    /// is ignored. The token store is written only on success.
    pub async fn submit(&self, form: &LoginForm) -> Outcome {
        let input = match form.validate() {
            Ok(input) => input,
            Err(errors) => return Outcome::Invalid(errors),
        };
        let Some(guard) = self.status.begin() else {
            return Outcome::Busy;
        };

        let result = match self.api.login(&input).await {
            Ok(response) if response.is_ok() => match response.parse::<TokenResponse>() {
                Ok(tokens) => {
                    self.store.set(tokens.access_token, tokens.refresh_token);
                    tracing::info!("logged in");
                    Ok(Route::Dashboard)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "login succeeded without usable tokens");
                    Err(FALLBACK_MESSAGE.to_string())
                }
            },
            Ok(response) => {
                tracing::info!(status = %response.status, "login rejected");
                Err(rejection_message(&response, "error"))
            }
            Err(err) => {
                tracing::warn!(error = %err, "login request failed");
                Err(FALLBACK_MESSAGE.to_string())
            }
        };

        match result {
            Ok(route) => {
                self.status.finish(guard, FlowState::Succeeded(route.clone()));
                Outcome::Navigate(route)
            }
            Err(message) => {
                self.status.finish(guard, FlowState::Failed(message.clone()));
                Outcome::Failed(message)
            }
        }
    }
}
