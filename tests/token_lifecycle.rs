mod common;

use chrono::Duration;
use common::{env, env_with_access_ttl};
use jobdeck::application_port::{AuthService, ServiceError, TokenService};
use jobdeck::domain_model::TokenKind;

#[tokio::test]
async fn refresh_rotation_mints_new_pair_and_retires_old() {
    let env = env();
    let id = env.signup_verified("rotate@acme.example").await;
    let first = env.login("rotate@acme.example").await;

    let second = env
        .auth
        .refresh_session(&first.tokens.refresh_token)
        .await
        .unwrap();
    assert_ne!(second.refresh_token, first.tokens.refresh_token);
    assert_ne!(second.access_token, first.tokens.access_token);

    // Old row sticks around as rotation evidence, flagged instead of gone.
    let rows = env.token_repo.rows_for(id, TokenKind::Refresh);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.iter().filter(|r| r.blacklisted).count(), 1);

    // The new refresh still works.
    env.auth
        .refresh_session(&second.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
async fn replaying_a_rotated_refresh_revokes_the_whole_family() {
    let env = env();
    let id = env.signup_verified("replay@acme.example").await;
    let first = env.login("replay@acme.example").await;

    let second = env
        .auth
        .refresh_session(&first.tokens.refresh_token)
        .await
        .unwrap();

    // Replay of the spent token: same message as any bad token.
    let err = env
        .auth
        .refresh_session(&first.tokens.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Token(ref m) if m == "Invalid token"));

    // Every refresh row for the owner is gone, the fresh one included.
    assert!(env.token_repo.rows_for(id, TokenKind::Refresh).is_empty());
    env.auth
        .refresh_session(&second.refresh_token)
        .await
        .unwrap_err();
}

#[tokio::test]
async fn expired_refresh_fails_and_the_row_is_deleted() {
    let env = env();
    let id = env.signup_verified("expired@acme.example").await;

    let stale = env
        .tokens
        .issue_stateful_token(id, TokenKind::Refresh, Duration::seconds(-5))
        .await
        .unwrap();

    let err = env.auth.refresh_session(&stale).await.unwrap_err();
    assert!(matches!(err, ServiceError::Token(_)));
    assert!(env.token_repo.rows_for(id, TokenKind::Refresh).is_empty());
}

#[tokio::test]
async fn zero_or_negative_access_ttl_never_verifies() {
    for ttl in [Duration::seconds(0), Duration::seconds(-30)] {
        let env = env_with_access_ttl(ttl);
        let id = env.signup_verified("shortlived@acme.example").await;
        let access = env.tokens.issue_access_token(id).unwrap();
        assert_eq!(env.tokens.verify_access_token(&access), None);
    }
}

#[tokio::test]
async fn garbage_envelopes_resolve_to_nothing() {
    let env = env();
    env.signup_verified("garbage@acme.example").await;

    let resolved = env
        .tokens
        .resolve_stateful_token("not-an-envelope", TokenKind::Refresh)
        .await
        .unwrap();
    assert!(resolved.is_none());

    let err = env.auth.refresh_session("not-an-envelope").await.unwrap_err();
    assert!(matches!(err, ServiceError::Token(_)));

    assert_eq!(env.tokens.verify_access_token("not-an-envelope"), None);
}

#[tokio::test]
async fn blacklist_transition_has_a_single_winner() {
    let env = env();
    let id = env.signup_verified("race@acme.example").await;

    let envelope = env
        .tokens
        .issue_stateful_token(id, TokenKind::Refresh, Duration::days(7))
        .await
        .unwrap();
    let row = env
        .tokens
        .resolve_stateful_token(&envelope, TokenKind::Refresh)
        .await
        .unwrap()
        .unwrap();

    assert!(env.tokens.blacklist_if_active(row.id).await.unwrap());
    assert!(!env.tokens.blacklist_if_active(row.id).await.unwrap());
}

#[tokio::test]
async fn access_tokens_are_stateless() {
    let env = env();
    let id = env.signup_verified("stateless@acme.example").await;
    let session = env.login("stateless@acme.example").await;

    // Wiping the store does not touch access token verification.
    env.tokens
        .revoke_all_for(id, TokenKind::Refresh)
        .await
        .unwrap();
    assert_eq!(
        env.tokens.verify_access_token(&session.tokens.access_token),
        Some(id)
    );
}
