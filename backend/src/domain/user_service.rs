//! User profile service.
//!
//! Credentials live with the external identity provider; this service only
//! maintains the local profile row keyed by the provider's uid, creating it
//! the first time a uid is seen so every login ends with a profile row.

use anyhow::{anyhow, Result};
use chrono::Utc;
use shared::{RegisterUserRequest, UpdateProfileRequest, User};
use tracing::info;

use crate::domain::session::Session;
use crate::storage::{DbConnection, UserRepository};

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            user_repository: UserRepository::new(db),
        }
    }

    /// Fetch the caller's profile, creating it when the uid is new.
    /// A missing display name falls back to the email's local part.
    pub async fn register_user(&self, session: &Session, request: RegisterUserRequest) -> Result<User> {
        if let Some(existing) = self.user_repository.get_user(session.user_id()).await? {
            return Ok(existing);
        }

        let email = request.email.trim();
        if email.is_empty() {
            return Err(anyhow!("Email must not be empty"));
        }
        let name = request.name.trim();
        let name = if name.is_empty() {
            email.split('@').next().unwrap_or(email).to_string()
        } else {
            name.to_string()
        };

        let now = Utc::now();
        let user = User {
            id: session.user_id().to_string(),
            name,
            email: email.to_string(),
            photo_url: request.photo_url,
            university: None,
            major: None,
            semester: None,
            created_at: now,
            updated_at: now,
        };

        self.user_repository.upsert_user(&user).await?;
        info!("Created profile for user {}", session.user_id());

        Ok(user)
    }

    /// Fetch the caller's profile, if one exists
    pub async fn get_profile(&self, session: &Session) -> Result<Option<User>> {
        self.user_repository.get_user(session.user_id()).await
    }

    /// Update the caller's editable profile fields.
    /// Returns None when the profile has never been registered.
    pub async fn update_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name must not be empty"));
        }

        let updated = self
            .user_repository
            .update_profile(
                session.user_id(),
                name,
                request.photo_url.as_deref(),
                request.university.as_deref(),
                request.major.as_deref(),
                request.semester.as_deref(),
                Utc::now(),
            )
            .await?;

        if !updated {
            return Ok(None);
        }

        info!("Updated profile for user {}", session.user_id());
        self.user_repository.get_user(session.user_id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_service() -> UserService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        UserService::new(db)
    }

    fn session() -> Session {
        Session::new("uid-1").unwrap()
    }

    fn register_request(name: &str, email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_profile() {
        let service = create_test_service().await;

        let user = service
            .register_user(&session(), register_request("Ana", "ana@example.com"))
            .await
            .unwrap();

        assert_eq!(user.id, "uid-1");
        assert_eq!(user.name, "Ana");
        assert_eq!(service.get_profile(&session()).await.unwrap().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let service = create_test_service().await;

        service
            .register_user(&session(), register_request("Ana", "ana@example.com"))
            .await
            .unwrap();
        // A second register with different data returns the existing profile
        let user = service
            .register_user(&session(), register_request("Other", "other@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_register_derives_name_from_email() {
        let service = create_test_service().await;

        let user = service
            .register_user(&session(), register_request("", "ana.perez@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "ana.perez");
    }

    #[tokio::test]
    async fn test_register_requires_email() {
        let service = create_test_service().await;

        assert!(service
            .register_user(&session(), register_request("Ana", "  "))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = create_test_service().await;
        service
            .register_user(&session(), register_request("Ana", "ana@example.com"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &session(),
                UpdateProfileRequest {
                    name: "Ana María".to_string(),
                    photo_url: None,
                    university: Some("UCA".to_string()),
                    major: Some("Ingeniería".to_string()),
                    semester: Some("3er Semestre".to_string()),
                },
            )
            .await
            .unwrap()
            .expect("Profile should exist");

        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.university.as_deref(), Some("UCA"));
    }

    #[tokio::test]
    async fn test_update_profile_unknown_user_is_none() {
        let service = create_test_service().await;

        let result = service
            .update_profile(
                &session(),
                UpdateProfileRequest {
                    name: "Nobody".to_string(),
                    photo_url: None,
                    university: None,
                    major: None,
                    semester: None,
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_profile_missing_is_none() {
        let service = create_test_service().await;

        assert!(service.get_profile(&session()).await.unwrap().is_none());
    }
}
