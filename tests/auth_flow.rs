mod common;

use common::{env, signup_input};
use jobdeck::application_port::{AuthService, LoginInput, ServiceError};
use jobdeck::domain_model::TokenKind;
use jobdeck::domain_port::CompanyRepo;
use jobdeck::infra_memory::MailKind;

#[tokio::test]
async fn login_failures_are_uniform_and_mint_nothing() {
    let env = env();
    env.signup_verified("uniform@acme.example").await;

    let unknown = env
        .auth
        .login(
            LoginInput {
                email: "nobody@acme.example".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            None,
        )
        .await
        .unwrap_err();
    let wrong_password = env
        .auth
        .login(
            LoginInput {
                email: "uniform@acme.example".to_string(),
                password: "not-the-password".to_string(),
            },
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(unknown.to_string(), wrong_password.to_string());
    assert!(matches!(unknown, ServiceError::BadUserInput(_)));

    // No refresh row was created by either failure.
    assert_eq!(env.token_repo.row_count(), 0);
}

#[tokio::test]
async fn duplicate_signup_is_silent_and_sends_no_second_mail() {
    let env = env();
    env.auth.signup(signup_input("dup@acme.example")).await.unwrap();
    env.auth.signup(signup_input("dup@acme.example")).await.unwrap();
    assert_eq!(env.mailer.sent_count(), 1);
}

#[tokio::test]
async fn verification_token_is_one_shot() {
    let env = env();
    env.auth
        .signup(signup_input("oneshot@acme.example"))
        .await
        .unwrap();
    let token = env.mailer.last_token(MailKind::Verification).unwrap();

    env.auth.verify_email(&token).await.unwrap();
    let company = env
        .company_repo
        .find_by_email("oneshot@acme.example")
        .await
        .unwrap()
        .unwrap();
    assert!(company.is_verified());

    let err = env.auth.verify_email(&token).await.unwrap_err();
    assert!(matches!(err, ServiceError::Token(_)));
}

#[tokio::test]
async fn reset_token_is_one_shot_and_rebinds_the_password() {
    let env = env();
    env.signup_verified("reset@acme.example").await;

    env.auth.forgot_password("reset@acme.example").await.unwrap();
    let token = env.mailer.last_token(MailKind::ResetPassword).unwrap();

    env.auth.reset_password(&token, "a-new-password-42").await.unwrap();

    // Old credential is dead, new one works.
    env.auth
        .login(
            LoginInput {
                email: "reset@acme.example".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            None,
        )
        .await
        .unwrap_err();
    env.auth
        .login(
            LoginInput {
                email: "reset@acme.example".to_string(),
                password: "a-new-password-42".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    // Second presentation of the same token fails.
    let err = env
        .auth
        .reset_password(&token, "yet-another-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Token(_)));
}

#[tokio::test]
async fn forgot_password_stays_silent_for_unknown_addresses() {
    let env = env();
    env.auth.forgot_password("ghost@acme.example").await.unwrap();
    assert_eq!(env.mailer.sent_count(), 0);
    assert_eq!(env.token_repo.row_count(), 0);
}

#[tokio::test]
async fn change_password_logs_out_every_session() {
    let env = env();
    let id = env.signup_verified("rotatepw@acme.example").await;
    let first = env.login("rotatepw@acme.example").await;
    let second = env.login("rotatepw@acme.example").await;
    assert_eq!(env.token_repo.rows_for(id, TokenKind::Refresh).len(), 2);

    env.auth
        .change_password(id, "hunter2hunter2", "brand-new-password")
        .await
        .unwrap();

    assert!(env.token_repo.rows_for(id, TokenKind::Refresh).is_empty());
    env.auth
        .refresh_session(&first.tokens.refresh_token)
        .await
        .unwrap_err();
    env.auth
        .refresh_session(&second.tokens.refresh_token)
        .await
        .unwrap_err();
}

#[tokio::test]
async fn login_consumes_a_presented_leftover_refresh() {
    let env = env();
    let id = env.signup_verified("leftover@acme.example").await;
    let first = env.login("leftover@acme.example").await;

    env.auth
        .login(
            LoginInput {
                email: "leftover@acme.example".to_string(),
                password: "hunter2hunter2".to_string(),
            },
            Some(&first.tokens.refresh_token),
        )
        .await
        .unwrap();

    // The stale cookie's row is gone, only the fresh session remains.
    assert_eq!(env.token_repo.rows_for(id, TokenKind::Refresh).len(), 1);
}

#[tokio::test]
async fn logout_retires_the_presented_session() {
    let env = env();
    let id = env.signup_verified("logout@acme.example").await;
    let session = env.login("logout@acme.example").await;

    env.auth
        .logout(Some(&session.tokens.refresh_token))
        .await
        .unwrap();
    assert!(env.token_repo.rows_for(id, TokenKind::Refresh).is_empty());

    // No cookie at all is fine too.
    env.auth.logout(None).await.unwrap();
}

#[tokio::test]
async fn authenticate_resolves_the_owner_or_fails_uniformly() {
    let env = env();
    let id = env.signup_verified("bearer@acme.example").await;
    let session = env.login("bearer@acme.example").await;

    let company = env
        .auth
        .authenticate(Some(&session.tokens.access_token), true)
        .await
        .unwrap();
    assert_eq!(company.id, id);

    for bad in [None, Some("garbage")] {
        let err = env.auth.authenticate(bad, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated));
    }
}

#[tokio::test]
async fn unverified_accounts_fail_the_verified_guard_uniformly() {
    let env = env();
    env.auth
        .signup(signup_input("unverified@acme.example"))
        .await
        .unwrap();
    let session = env.login("unverified@acme.example").await;

    // Passes the plain guard, fails the verified one with the same error a
    // bad token would get.
    env.auth
        .authenticate(Some(&session.tokens.access_token), false)
        .await
        .unwrap();
    let err = env
        .auth
        .authenticate(Some(&session.tokens.access_token), true)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthenticated));
}
