//! AuthService tests
//!
//! Signup, login and session issuing against a real SQLite file.

use std::sync::Arc;

use shortly::config::DatabaseConfig;
use shortly::errors::ShortlyError;
use shortly::services::{AuthService, SessionService};
use shortly::storage::backend::SeaOrmStorage;
use shortly::utils::password::is_argon2_hash;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

const TEST_SECRET: &str = "auth-service-test-secret";

async fn create_test_service() -> (AuthService, Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("auth.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };

    let storage = Arc::new(
        SeaOrmStorage::new(&config, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    let sessions = Arc::new(SessionService::new(TEST_SECRET, 60));
    let service = AuthService::new(storage.clone(), sessions);

    (service, storage, temp_dir)
}

// =============================================================================
// signup
// =============================================================================

mod signup_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_creates_user() {
        let (service, storage, _dir) = create_test_service().await;

        let issued = service.signup("Phillip", "Phillip").await.unwrap();

        assert_eq!(issued.session.username, "Phillip");
        assert!(!issued.token.is_empty());
        assert_eq!(storage.count_users().await.unwrap(), 1);

        let user = storage.find_user("Phillip").await.unwrap().unwrap();
        assert_eq!(user.id, issued.session.user_id);
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let (service, storage, _dir) = create_test_service().await;

        service.signup("Svnh", "hunter2").await.unwrap();

        let user = storage.find_user("Svnh").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "hunter2");
        assert!(is_argon2_hash(&user.password_hash));
    }

    #[tokio::test]
    async fn test_signup_token_is_valid_session() {
        let (service, _storage, _dir) = create_test_service().await;

        let issued = service.signup("Phillip", "Phillip").await.unwrap();
        let session = service.sessions().validate(&issued.token).unwrap();

        assert_eq!(session, issued.session);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let (service, storage, _dir) = create_test_service().await;

        service.signup("Phillip", "Phillip").await.unwrap();
        let result = service.signup("Phillip", "different").await;

        assert!(matches!(result, Err(ShortlyError::DuplicateUser(_))));
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_username_is_trimmed() {
        let (service, storage, _dir) = create_test_service().await;

        service.signup("  Phillip ", "Phillip").await.unwrap();
        assert!(storage.find_user("Phillip").await.unwrap().is_some());

        let result = service.signup("Phillip", "Phillip").await;
        assert!(matches!(result, Err(ShortlyError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let (service, storage, _dir) = create_test_service().await;

        for (username, password) in [("", "secret"), ("   ", "secret"), ("Phillip", "")] {
            let result = service.signup(username, password).await;
            assert!(
                matches!(result, Err(ShortlyError::Validation(_))),
                "expected Validation for {:?}/{:?}",
                username,
                password
            );
        }

        assert_eq!(storage.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overlong_username_rejected() {
        let (service, _storage, _dir) = create_test_service().await;

        let result = service.signup(&"u".repeat(65), "secret").await;
        assert!(matches!(result, Err(ShortlyError::Validation(_))));
    }
}

// =============================================================================
// login / logout
// =============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_success() {
        let (service, _storage, _dir) = create_test_service().await;
        service.signup("Phillip", "Phillip").await.unwrap();

        let issued = service.login("Phillip", "Phillip").await.unwrap();
        assert_eq!(issued.session.username, "Phillip");

        let session = service.sessions().validate(&issued.token).unwrap();
        assert_eq!(session.username, "Phillip");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _storage, _dir) = create_test_service().await;
        service.signup("Phillip", "Phillip").await.unwrap();

        let result = service.login("Phillip", "wrong").await;
        assert!(matches!(result, Err(ShortlyError::AuthFailed(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, _storage, _dir) = create_test_service().await;

        let result = service.login("Fred", "Fred").await;
        assert!(matches!(result, Err(ShortlyError::AuthFailed(_))));
    }

    #[tokio::test]
    async fn test_login_empty_credentials() {
        let (service, _storage, _dir) = create_test_service().await;

        assert!(matches!(
            service.login("", "").await,
            Err(ShortlyError::AuthFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failures_are_user_facing() {
        let (service, _storage, _dir) = create_test_service().await;

        let err = service.login("Fred", "Fred").await.unwrap_err();
        assert!(err.is_user_facing());
    }

    #[tokio::test]
    async fn test_removed_user_cannot_login() {
        let (service, storage, _dir) = create_test_service().await;
        service.signup("Phillip", "Phillip").await.unwrap();

        storage.remove_user("Phillip").await.unwrap();

        assert_eq!(storage.count_users().await.unwrap(), 0);
        assert!(matches!(
            service.login("Phillip", "Phillip").await,
            Err(ShortlyError::AuthFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_accepts_missing_session() {
        let (service, _storage, _dir) = create_test_service().await;
        let issued = service.signup("Phillip", "Phillip").await.unwrap();

        service.logout(Some(&issued.session));
        service.logout(None);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let (service, _storage, _dir) = create_test_service().await;
        let issued = service.signup("Phillip", "Phillip").await.unwrap();

        let other = SessionService::new("another-secret", 60);
        assert!(matches!(
            other.validate(&issued.token),
            Err(ShortlyError::SessionToken(_))
        ));
    }
}
