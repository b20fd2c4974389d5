use crate::application_port::{
    AuthService, CredentialHasher, LoginInput, LoginResult, ServiceError, SessionTokens,
    SignupInput, TokenService,
};
use crate::domain_model::{Company, CompanyId, TokenKind};
use crate::domain_port::{CompanyRepo, Mailer};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| ServiceError::Internal(format!("invalid PHC hash: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(ServiceError::Internal(format!("verify error: {}", e))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub email_verification_ttl: Duration,
    pub reset_password_ttl: Duration,
}

pub struct RealAuthService {
    company_repo: Arc<dyn CompanyRepo>,
    token_service: Arc<dyn TokenService>,
    credential_hasher: Arc<dyn CredentialHasher>,
    mailer: Arc<dyn Mailer>,
    cfg: AuthConfig,
}

impl RealAuthService {
    pub fn new(
        company_repo: Arc<dyn CompanyRepo>,
        token_service: Arc<dyn TokenService>,
        credential_hasher: Arc<dyn CredentialHasher>,
        mailer: Arc<dyn Mailer>,
        cfg: AuthConfig,
    ) -> Self {
        Self {
            company_repo,
            token_service,
            credential_hasher,
            mailer,
            cfg,
        }
    }

    fn invalid_credentials() -> ServiceError {
        ServiceError::BadUserInput("Invalid email or password".to_string())
    }

    async fn mail_verification_token(&self, company: &Company) -> Result<(), ServiceError> {
        let token = self
            .token_service
            .issue_stateful_token(
                company.id,
                TokenKind::EmailVerification,
                self.cfg.email_verification_ttl,
            )
            .await?;
        self.mailer
            .send_verification_email(&company.email, &token)
            .await
    }

    /// The whole refresh family becomes unusable; logged internally, the
    /// caller still sees the ordinary invalid-token message.
    async fn handle_refresh_reuse(&self, company_id: CompanyId) -> Result<(), ServiceError> {
        let revoked = self
            .token_service
            .revoke_all_for(company_id, TokenKind::Refresh)
            .await?;
        warn!(%company_id, revoked, "refresh token reuse detected, session family revoked");
        Ok(())
    }

    async fn consume_presented_refresh(&self, envelope: &str) -> Result<(), ServiceError> {
        if let Some(row) = self
            .token_service
            .resolve_stateful_token(envelope, TokenKind::Refresh)
            .await?
        {
            self.token_service.consume(row.id).await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn signup(&self, input: SignupInput) -> Result<(), ServiceError> {
        let SignupInput {
            name,
            email,
            password,
            website,
            headquarter,
            logo,
            description,
        } = input;

        let password_hash = self.credential_hasher.hash_password(&password).await?;
        let company = Company {
            id: CompanyId(Uuid::new_v4()),
            name,
            email,
            password_hash,
            website,
            headquarter,
            logo,
            description,
            email_verified_at: None,
            created_at: Utc::now(),
        };

        // A taken email succeeds silently: signup must not reveal which
        // addresses have accounts.
        if !self.company_repo.insert(&company).await? {
            debug!("signup with already registered email");
            return Ok(());
        }

        self.mail_verification_token(&company).await
    }

    async fn login(
        &self,
        input: LoginInput,
        presented_refresh: Option<&str>,
    ) -> Result<LoginResult, ServiceError> {
        let company = self
            .company_repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        let ok = self
            .credential_hasher
            .verify_password(&input.password, &company.password_hash)
            .await?;
        if !ok {
            return Err(Self::invalid_credentials());
        }

        // A leftover session cookie is retired before the new session
        // starts; delete, not blacklist, since no rotation evidence is
        // needed here.
        if let Some(envelope) = presented_refresh {
            self.consume_presented_refresh(envelope).await?;
        }

        let tokens = self.token_service.issue_session(company.id).await?;
        Ok(LoginResult {
            company_id: company.id,
            tokens,
        })
    }

    async fn refresh_session(&self, refresh_envelope: &str) -> Result<SessionTokens, ServiceError> {
        let row = self
            .token_service
            .resolve_stateful_token(refresh_envelope, TokenKind::Refresh)
            .await?
            .ok_or_else(ServiceError::invalid_token)?;

        if row.blacklisted {
            // Replay of an already-rotated token: credential theft signal.
            self.handle_refresh_reuse(row.company_id).await?;
            return Err(ServiceError::invalid_token());
        }

        if row.is_expired(Utc::now()) {
            self.token_service.consume(row.id).await?;
            return Err(ServiceError::invalid_token());
        }

        // Atomic transition; losing it means a concurrent request already
        // spent this token, which is the same reuse signal.
        if !self.token_service.blacklist_if_active(row.id).await? {
            self.handle_refresh_reuse(row.company_id).await?;
            return Err(ServiceError::invalid_token());
        }

        self.token_service.issue_session(row.company_id).await
    }

    async fn logout(&self, refresh_envelope: Option<&str>) -> Result<(), ServiceError> {
        if let Some(envelope) = refresh_envelope {
            self.consume_presented_refresh(envelope).await?;
        }
        Ok(())
    }

    async fn verify_email(&self, token_envelope: &str) -> Result<(), ServiceError> {
        let failed = || ServiceError::Token("Email verification failed".to_string());

        let row = self
            .token_service
            .resolve_stateful_token(token_envelope, TokenKind::EmailVerification)
            .await?
            .ok_or_else(failed)?;

        // One-shot: gone after the first presentation, valid or not.
        self.token_service.consume(row.id).await?;

        if row.is_expired(Utc::now()) {
            return Err(failed());
        }

        self.company_repo
            .mark_email_verified(row.company_id, Utc::now())
            .await
    }

    async fn reset_password(
        &self,
        token_envelope: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let failed = || ServiceError::Token("Password reset failed".to_string());

        let row = self
            .token_service
            .resolve_stateful_token(token_envelope, TokenKind::ResetPassword)
            .await?
            .ok_or_else(failed)?;

        self.token_service.consume(row.id).await?;

        if row.is_expired(Utc::now()) {
            return Err(failed());
        }

        let password_hash = self.credential_hasher.hash_password(new_password).await?;
        self.company_repo
            .update_password(row.company_id, &password_hash)
            .await
    }

    async fn change_password(
        &self,
        company_id: CompanyId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let failed = || ServiceError::BadUserInput("Password change failed".to_string());

        let company = self.company_repo.find(company_id).await?.ok_or_else(failed)?;

        let ok = self
            .credential_hasher
            .verify_password(old_password, &company.password_hash)
            .await?;
        if !ok {
            return Err(failed());
        }

        let password_hash = self.credential_hasher.hash_password(new_password).await?;
        self.company_repo
            .update_password(company_id, &password_hash)
            .await?;

        // Every open session has to re-authenticate with the new password.
        self.token_service
            .revoke_all_for(company_id, TokenKind::Refresh)
            .await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ServiceError> {
        let Some(company) = self.company_repo.find_by_email(email).await? else {
            return Ok(());
        };

        let token = self
            .token_service
            .issue_stateful_token(
                company.id,
                TokenKind::ResetPassword,
                self.cfg.reset_password_ttl,
            )
            .await?;
        self.mailer
            .send_reset_password_email(&company.email, &token)
            .await
    }

    async fn send_verification_email(&self, company_id: CompanyId) -> Result<(), ServiceError> {
        let Some(company) = self.company_repo.find(company_id).await? else {
            return Ok(());
        };
        if company.is_verified() {
            return Ok(());
        }
        self.mail_verification_token(&company).await
    }

    async fn authenticate(
        &self,
        bearer: Option<&str>,
        require_verified: bool,
    ) -> Result<Company, ServiceError> {
        let token = bearer.ok_or(ServiceError::Unauthenticated)?;
        let company_id = self
            .token_service
            .verify_access_token(token)
            .ok_or(ServiceError::Unauthenticated)?;

        let company = self
            .company_repo
            .find(company_id)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        // Same error as a bad token, so callers cannot tell "unverified"
        // from "does not exist".
        if require_verified && !company.is_verified() {
            return Err(ServiceError::Unauthenticated);
        }

        Ok(company)
    }
}
