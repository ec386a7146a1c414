use shared_types::{AppError, LoginRequest, Role, StudentSignupRequest, TokenResponse};

use crate::ApiClient;

impl ApiClient {
    /// Sign in to the portal for `role`.
    ///
    /// The token response is returned as-is; storing it is the caller's job.
    pub async fn login(
        &self,
        role: Role,
        email_id: &str,
        password: &str,
    ) -> Result<TokenResponse, AppError> {
        let body = LoginRequest {
            email_id: email_id.to_string(),
            password: password.to_string(),
        };
        let path = format!("/api/auth/{}/login", role.as_str());
        let response: TokenResponse = self.post(&path, &body).await?;
        tracing::info!(role = %role, user_id = response.user_id, "login succeeded");
        Ok(response)
    }

    pub async fn signup_student(
        &self,
        request: &StudentSignupRequest,
    ) -> Result<TokenResponse, AppError> {
        let response: TokenResponse = self.post("/api/auth/student/signup", request).await?;
        tracing::info!(user_id = response.user_id, "student signup succeeded");
        Ok(response)
    }
}
