//! Sign-in page

use tracing::{info, warn};

use crate::DashboardState;
use crate::error::DashboardResult;
use crate::models::auth::{LoginErrors, LoginForm, UserProfile, email_error};
use crate::services::auth::ResetOutcome;

/// Validate the form, then ask the auth gate. Field errors stop the
/// submission before the gate sees it.
pub fn submit(state: &DashboardState, form: &LoginForm) -> DashboardResult<Result<UserProfile, LoginErrors>> {
    if let Err(errors) = form.validate() {
        warn!(email = %form.email, "Login form rejected");
        return Ok(Err(errors));
    }

    let outcome = state.auth.login(&form.credentials())?;
    if !outcome.success {
        let message = outcome.error.unwrap_or_else(|| "Login failed".to_string());
        return Ok(Err(LoginErrors::general(message)));
    }

    match state.auth.current_user() {
        Some(user) => {
            info!(user = %user.username, "Login page submitted");
            Ok(Ok(user))
        }
        None => Ok(Err(LoginErrors::general("Login failed"))),
    }
}

pub fn forgot_password(state: &DashboardState, email: &str) -> Result<ResetOutcome, LoginErrors> {
    match email_error(email) {
        None => Ok(state.auth.reset_password(email)),
        Some(message) => Err(LoginErrors {
            email: Some(message),
            ..LoginErrors::default()
        }),
    }
}

pub fn logout(state: &DashboardState) -> DashboardResult<()> {
    state.auth.logout()
}
