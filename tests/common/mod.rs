#![allow(dead_code)]

use chrono::Duration;
use jobdeck::application_impl::*;
use jobdeck::application_port::*;
use jobdeck::domain_model::CompanyId;
use jobdeck::domain_port::CompanyRepo;
use jobdeck::infra_memory::*;
use std::sync::Arc;

pub const ENVELOPE_KEY: [u8; 32] = [7u8; 32];

pub struct TestEnv {
    pub token_repo: Arc<MemoryTokenRepo>,
    pub company_repo: Arc<MemoryCompanyRepo>,
    pub mailer: Arc<MemoryMailer>,
    pub tokens: Arc<dyn TokenService>,
    pub auth: Arc<dyn AuthService>,
}

pub fn env() -> TestEnv {
    env_with_access_ttl(Duration::minutes(15))
}

pub fn env_with_access_ttl(access_ttl: Duration) -> TestEnv {
    let token_repo = Arc::new(MemoryTokenRepo::new());
    let company_repo = Arc::new(MemoryCompanyRepo::new());
    let mailer = Arc::new(MemoryMailer::new());

    let tokens: Arc<dyn TokenService> = Arc::new(TokenManager::new(
        token_repo.clone(),
        EnvelopeCodec::new(&ENVELOPE_KEY),
        TokenConfig {
            access_secret: b"test-signing-secret".to_vec(),
            access_ttl,
            refresh_ttl: Duration::days(7),
        },
    ));

    let auth: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
        company_repo.clone(),
        tokens.clone(),
        Arc::new(Argon2PasswordHasher),
        mailer.clone(),
        AuthConfig {
            email_verification_ttl: Duration::hours(24),
            reset_password_ttl: Duration::hours(1),
        },
    ));

    TestEnv {
        token_repo,
        company_repo,
        mailer,
        tokens,
        auth,
    }
}

pub fn signup_input(email: &str) -> SignupInput {
    SignupInput {
        name: "Acme".to_string(),
        email: email.to_string(),
        password: "hunter2hunter2".to_string(),
        website: "https://acme.example".to_string(),
        headquarter: "Berlin".to_string(),
        logo: "https://acme.example/logo.png".to_string(),
        description: "We make everything".to_string(),
    }
}

impl TestEnv {
    /// Signup, then follow the emailed verification token, returning the
    /// new account's id.
    pub async fn signup_verified(&self, email: &str) -> CompanyId {
        self.auth.signup(signup_input(email)).await.unwrap();
        let token = self.mailer.last_token(MailKind::Verification).unwrap();
        self.auth.verify_email(&token).await.unwrap();
        self.company_repo
            .find_by_email(email)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    pub async fn login(&self, email: &str) -> LoginResult {
        self.auth
            .login(
                LoginInput {
                    email: email.to_string(),
                    password: "hunter2hunter2".to_string(),
                },
                None,
            )
            .await
            .unwrap()
    }
}
