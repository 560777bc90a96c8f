//! Sign-in and sign-up

use crate::api::HealthApi;
use crate::error::ClientResult;
use crate::session::Session;
use tracing::info;
use vitaprev_shared::validation::{validate_signin, validate_signup};
use vitaprev_shared::{SigninRequest, SignupRequest};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Validate credentials and open a session
    pub async fn signin(api: &dyn HealthApi, email: &str, password: &str) -> ClientResult<Session> {
        let request = SigninRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate_signin(&request)?;
        api.signin(&request).await
    }

    /// Validate and submit a registration, then open a session
    ///
    /// The request is normalized before it is sent.
    pub async fn signup(
        api: &dyn HealthApi,
        request: SignupRequest,
        confirm_password: &str,
    ) -> ClientResult<Session> {
        validate_signup(&request, confirm_password)?;
        let request = request.normalized();
        info!(email = %request.email, "Registering");
        api.signup(&request).await
    }
}
