//! Session lifecycle against the mock backend.

#![allow(clippy::unwrap_used)]

use aurelia_client::{ApiError, AppState, ClientConfig, SessionError};
use aurelia_core::UserProfile;
use aurelia_integration_tests::TestBackend;

fn state_at(url: &str, dir: &tempfile::TempDir) -> AppState {
    AppState::new(ClientConfig::new(url, dir.path())).unwrap()
}

#[tokio::test]
async fn register_login_logout_roundtrip() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = state_at(&backend.url, &dir);

    state.restore_session().await.unwrap();
    assert!(!state.is_authenticated());
    assert!(state.is_restored());

    state
        .register("Alex", "alex.doe@example.com", "hunter2")
        .await
        .unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.current_user().unwrap().email, "alex.doe@example.com");

    state.logout().unwrap();
    assert!(!state.is_authenticated());
    assert!(state.store().auth_token().unwrap().is_none());
    // Logging out twice is a no-op
    state.logout().unwrap();

    state
        .login("alex.doe@example.com", "hunter2")
        .await
        .unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.current_user().unwrap().name, "Alex");
}

#[tokio::test]
async fn rejected_credentials_surface_as_errors() {
    let backend = TestBackend::spawn().await;
    backend.seed_user("Alex", "alex.doe@example.com", "hunter2");
    let dir = tempfile::tempdir().unwrap();
    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();

    let err = state
        .login("alex.doe@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Api(ApiError::Rejected { status: 401, .. })
    ));
    assert!(!state.is_authenticated());

    // Duplicate registration is a rejection too
    let err = state
        .register("Alex", "alex.doe@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Api(ApiError::Rejected { status: 409, .. })
    ));
}

#[tokio::test]
async fn restore_resumes_a_stored_session() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let state = state_at(&backend.url, &dir);
        state.restore_session().await.unwrap();
        state
            .register("Alex", "alex.doe@example.com", "hunter2")
            .await
            .unwrap();
    }

    // A fresh process picks the session back up from the stored token
    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.current_user().unwrap().email, "alex.doe@example.com");
}

#[tokio::test]
async fn restore_with_rejected_token_fails_closed() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let state = state_at(&backend.url, &dir);
        state.store().set_auth_token("bogus-token").unwrap();
    }

    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();

    assert!(state.is_restored());
    assert!(!state.is_authenticated());
    // The dead credential is gone, not lingering for the next restart
    assert!(state.store().auth_token().unwrap().is_none());
}

#[tokio::test]
async fn social_login_signs_in() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();

    let user = aurelia_client::SocialUser {
        provider: "google".to_owned(),
        provider_id: Some("g-123".to_owned()),
        name: "Alex Doe".to_owned(),
        email: "alex.doe@example.com".to_owned(),
        avatar: None,
        access_token: Some("google-token".to_owned()),
    };
    state.social_login(&user).await.unwrap();

    assert!(state.is_authenticated());
    assert_eq!(state.current_user().unwrap().name, "Alex Doe");
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();
    state
        .register("Alex", "alex.doe@example.com", "hunter2")
        .await
        .unwrap();

    let err = state
        .change_password("not-my-password", "new-password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Api(ApiError::Rejected { status: 400, .. })
    ));

    state
        .change_password("hunter2", "new-password")
        .await
        .unwrap();

    state.logout().unwrap();
    assert!(state.login("alex.doe@example.com", "hunter2").await.is_err());
    state
        .login("alex.doe@example.com", "new-password")
        .await
        .unwrap();
}

#[tokio::test]
async fn updated_profile_survives_a_restart() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let state = state_at(&backend.url, &dir);
        state.restore_session().await.unwrap();
        state
            .register("Alex", "alex.doe@example.com", "hunter2")
            .await
            .unwrap();

        let profile = UserProfile {
            shipping_address: Some("7 Gemstone Way".to_owned()),
            ..state.profile().unwrap()
        };
        state.update_profile(profile).await.unwrap();
    }

    let state = state_at(&backend.url, &dir);
    state.restore_session().await.unwrap();
    assert_eq!(
        state.profile().unwrap().shipping_address.as_deref(),
        Some("7 Gemstone Way")
    );
}
