//! # REST API for User Profiles
//!
//! Endpoints for registering and maintaining the local profile attached to
//! an identity-provider uid.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::session_from_headers;
use crate::AppState;
use shared::{RegisterUserRequest, UpdateProfileRequest};

/// Fetch the caller's profile
pub async fn get_profile(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/profile");

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.user_service.get_profile(&session).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            error!("Failed to fetch profile: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching profile").into_response()
        }
    }
}

/// Register the caller's profile, or return the existing one
pub async fn register_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/profile - email: {}", request.email);

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.user_service.register_user(&session, request).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => {
            error!("Failed to register user: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Update the caller's editable profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile");

    let session = match session_from_headers(&headers) {
        Ok(session) => session,
        Err(rejection) => return rejection.into_response(),
    };

    match state.user_service.update_profile(&session, request).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            error!("Failed to update profile: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::USER_ID_HEADER;
    use crate::testing::setup_test_state;
    use axum::http::HeaderValue;

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("test-user"));
        headers
    }

    fn register_request() -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_get_profile() {
        let state = setup_test_state().await;

        let created =
            register_user(State(state.clone()), auth_headers(), Json(register_request())).await;
        assert_eq!(created.into_response().status(), StatusCode::CREATED);

        let fetched = get_profile(State(state), auth_headers()).await;
        assert_eq!(fetched.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_profile_before_registration() {
        let state = setup_test_state().await;

        let response = get_profile(State(state), auth_headers()).await;

        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_profile_before_registration() {
        let state = setup_test_state().await;

        let request = UpdateProfileRequest {
            name: "Ana".to_string(),
            photo_url: None,
            university: None,
            major: None,
            semester: None,
        };
        let response = update_profile(State(state), auth_headers(), Json(request)).await;

        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let state = setup_test_state().await;

        let response = get_profile(State(state), HeaderMap::new()).await;

        assert_eq!(response.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
