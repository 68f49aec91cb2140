//! Sign-in state machine and rank handling

mod common;

use std::sync::Arc;

use common::demo_gateway;
use libris_client::ClientError;
use libris_client::domains::auth::{
    AuthSession, AuthState, RankUpdate, UserId, VisibilityFlags, visibility_for,
};
use libris_client::error::ValidationError;
use libris_client::infrastructure::services::commands;
use libris_model::Rank;

#[tokio::test]
async fn negative_id_is_rejected_before_any_call() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    let err = session.login(-5_i64, "pw").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::InvalidUserId(_))
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(session.state(), &AuthState::Anonymous);
}

#[tokio::test]
async fn malformed_text_id_is_rejected_before_any_call() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    for raw in ["", "abc", "0", "-5", "12x"] {
        assert!(session.login(raw, "pw").await.is_err(), "{raw:?}");
    }
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn oversized_id_names_the_limit() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    let err = session.login("5000000000", "pw").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::UserIdOutOfRange(ref raw)) if raw == "5000000000"
    ));
    assert!(err.to_string().contains(&u32::MAX.to_string()));
    assert!(gateway.calls().is_empty());
    assert_eq!(session.state(), &AuthState::Anonymous);
}

#[tokio::test]
async fn successful_login_resolves_rank_and_visibility() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    assert!(session.login("3", "manager").await.unwrap());
    assert!(session.is_authenticated());
    assert_eq!(session.rank(), Some(Rank::Manager));
    assert_eq!(session.visibility(), visibility_for(Rank::Manager));
    assert_eq!(gateway.calls(), [commands::AUTHENTICATE, commands::GET_RANK]);
}

#[tokio::test]
async fn rejected_credentials_return_to_anonymous() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    assert!(!session.login("3", "wrong").await.unwrap());
    assert_eq!(session.state(), &AuthState::Anonymous);
    assert_eq!(gateway.calls(), [commands::AUTHENTICATE]);
}

#[tokio::test]
async fn transport_failure_returns_to_anonymous() {
    let gateway = demo_gateway();
    gateway.fail_next(commands::AUTHENTICATE, "refused");
    let mut session = AuthSession::new(Arc::new(gateway));

    let err = session.login("3", "manager").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(session.state(), &AuthState::Anonymous);
}

#[tokio::test]
async fn authenticating_state_is_observable() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway));

    let attempt = session.begin_login("4").unwrap();
    assert_eq!(
        session.state(),
        &AuthState::Authenticating {
            user_id: UserId::try_from(4_i64).unwrap()
        }
    );
    assert_eq!(session.visibility(), VisibilityFlags::HIDDEN);

    assert!(session.finish_login(attempt, Ok(true)).unwrap());
    assert!(session.is_authenticated());
    // signed in, rank not known yet
    assert_eq!(session.rank(), None);
    assert_eq!(session.visibility(), VisibilityFlags::HIDDEN);
}

#[tokio::test]
async fn rank_resolving_after_logout_is_discarded() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    let attempt = session.begin_login("4").unwrap();
    let verdict = Ok(true);
    gateway_sign_in(&gateway, 4, "admin").await;
    session.finish_login(attempt, verdict).unwrap();

    let pending = session.begin_rank_fetch().unwrap();
    session.logout();
    let resolved = pending.resolve().await;

    assert_eq!(session.apply_rank(resolved).unwrap(), RankUpdate::Discarded);
    assert_eq!(session.state(), &AuthState::Anonymous);
    assert_eq!(session.visibility(), VisibilityFlags::HIDDEN);
}

#[tokio::test]
async fn rank_from_superseded_login_is_discarded() {
    let gateway = demo_gateway();
    let mut session = AuthSession::new(Arc::new(gateway.clone()));

    gateway_sign_in(&gateway, 5, "dev").await;
    let first = session.begin_login("5").unwrap();
    session.finish_login(first, Ok(true)).unwrap();
    let stale_rank = session.begin_rank_fetch().unwrap();

    assert!(session.login("1", "basic").await.unwrap());
    assert_eq!(session.rank(), Some(Rank::Basic));

    let resolved = stale_rank.resolve().await;
    assert_eq!(session.apply_rank(resolved).unwrap(), RankUpdate::Discarded);
    assert_eq!(session.rank(), Some(Rank::Basic));
}

#[tokio::test]
async fn rank_fetch_requires_session() {
    let gateway = demo_gateway();
    let session = AuthSession::new(Arc::new(gateway));
    assert!(matches!(
        session.begin_rank_fetch(),
        Err(ClientError::NotAuthenticated)
    ));
}

/// Establish the service-side session without going through AuthSession.
async fn gateway_sign_in(
    gateway: &libris_client::infrastructure::testing::TestCatalogGateway,
    id: u32,
    password: &str,
) {
    use libris_client::infrastructure::services::CatalogGateway;
    assert!(gateway.authenticate(id, password).await.unwrap());
}
