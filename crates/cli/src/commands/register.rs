//! Register command creating a new account.
//!
//! Runs before any session exists, so it talks to the auth client
//! directly instead of the view model.

use clap::Args;

use ticklist_app::AppResult;
use ticklist_store::AuthClient;

/// Create a new account
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Email address for the new account
    #[arg(required = true)]
    pub email: String,

    /// Password for the new account
    #[arg(required = true)]
    pub password: String,
}

impl RegisterCommand {
    pub async fn execute(&self, auth: &AuthClient) -> AppResult<String> {
        auth.sign_up(&self.email, &self.password).await?;
        Ok(format!(
            "Registered {}. Confirm the address if required, then sign in.",
            self.email
        ))
    }
}
