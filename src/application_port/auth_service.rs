use crate::application_port::{ServiceError, SessionTokens};
use crate::domain_model::{Company, CompanyId};

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub website: String,
    pub headquarter: String,
    pub logo: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub company_id: CompanyId,
    pub tokens: SessionTokens,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Create the account and send the verification mail. A duplicate email
    /// succeeds silently so signup cannot be used as an existence oracle.
    async fn signup(&self, input: SignupInput) -> Result<(), ServiceError>;

    /// `presented_refresh` is the refresh cookie a returning client may
    /// still carry; if it resolves, the row is consumed before the new
    /// session starts.
    async fn login(
        &self,
        input: LoginInput,
        presented_refresh: Option<&str>,
    ) -> Result<LoginResult, ServiceError>;

    /// Refresh rotation with reuse detection: a blacklisted row revokes the
    /// owner's whole refresh family.
    async fn refresh_session(&self, refresh_envelope: &str) -> Result<SessionTokens, ServiceError>;

    /// Consume the presented refresh row, if any.
    async fn logout(&self, refresh_envelope: Option<&str>) -> Result<(), ServiceError>;

    /// One-shot: consume the verification token, then flag the email.
    async fn verify_email(&self, token_envelope: &str) -> Result<(), ServiceError>;

    /// One-shot: consume the reset token, then store the new password hash.
    async fn reset_password(
        &self,
        token_envelope: &str,
        new_password: &str,
    ) -> Result<(), ServiceError>;

    /// Verify the old password, rehash, then revoke every refresh token.
    async fn change_password(
        &self,
        company_id: CompanyId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError>;

    /// Silently succeeds for unknown addresses.
    async fn forgot_password(&self, email: &str) -> Result<(), ServiceError>;

    /// Silently succeeds when the email is already verified.
    async fn send_verification_email(&self, company_id: CompanyId) -> Result<(), ServiceError>;

    /// Authentication guard: verify the bearer credential and resolve its
    /// owner. Every failure mode is the same `Unauthenticated` error.
    async fn authenticate(
        &self,
        bearer: Option<&str>,
        require_verified: bool,
    ) -> Result<Company, ServiceError>;
}
