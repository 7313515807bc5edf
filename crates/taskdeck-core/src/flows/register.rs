use super::{FALLBACK_MESSAGE, FlowState, FormStatus, Outcome, rejection_message};
use crate::api::ApiClient;
use crate::forms::{RegisterForm, Validate};
use crate::routes::Route;

/// Registration page flow: validate, POST the account, send the user to login.
pub struct RegisterFlow {
    api: ApiClient,
    status: FormStatus,
}

impl RegisterFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            status: FormStatus::default(),
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Submits the form once. No tokens are installed on success.
    pub async fn submit(&self, form: &RegisterForm) -> Outcome {
        let input = match form.validate() {
            Ok(input) => input,
            Err(errors) => return Outcome::Invalid(errors),
        };
        let Some(guard) = self.status.begin() else {
            return Outcome::Busy;
        };

        let message = match self.api.register(&input).await {
            Ok(response) if response.is_ok() => {
                tracing::info!(username = %input.username, "registered");
                self.status
                    .finish(guard, FlowState::Succeeded(Route::Login));
                return Outcome::Navigate(Route::Login);
            }
            Ok(response) => {
                tracing::info!(status = %response.status, "registration rejected");
                rejection_message(&response, "error")
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration request failed");
                FALLBACK_MESSAGE.to_string()
            }
        };

        self.status.finish(guard, FlowState::Failed(message.clone()));
        Outcome::Failed(message)
    }
}
