//! Request extractor for the authenticated user.

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        // Sessions are bearer tokens: Authorization: Bearer <jwt>
        let auth_header = match parts.headers.get(axum::http::header::AUTHORIZATION) {
            Some(header) => header,
            None => {
                trace!("No authentication credentials found in request");
                return Err(Error::Unauthenticated { message: None });
            }
        };

        let auth_str = auth_header.to_str().map_err(|e| Error::BadRequest {
            message: format!("Invalid authorization header: {e}"),
        })?;

        let token = match auth_str.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                trace!("Authorization header is not a Bearer token");
                return Err(Error::Unauthenticated { message: None });
            }
        };

        session::verify_session_token(token, &state.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::session::create_session_token,
        test_utils::{create_test_config, create_test_current_user},
    };
    use axum::extract::FromRequestParts as _;
    use sqlx::postgres::PgPoolOptions;

    fn create_test_state() -> AppState {
        // connect_lazy never touches the database unless a query runs
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/haven_test")
            .unwrap();
        AppState::builder().db(pool).config(create_test_config()).build()
    }

    fn parts_with_authorization(value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .unwrap();

        let (parts, _body) = request.into_parts();
        parts
    }

    #[test_log::test(tokio::test)]
    async fn test_valid_bearer_token() {
        let state = create_test_state();
        let user = create_test_current_user(7, "Jane Realtor");
        let token = create_session_token(&user, &state.config).unwrap();

        let mut parts = parts_with_authorization(&format!("Bearer {token}"));
        let extracted = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(extracted.id, user.id);
        assert_eq!(extracted.name, user.name);
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_header_returns_unauthorized() {
        let state = create_test_state();

        let request = axum::http::Request::builder().uri("http://localhost/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(tokio::test)]
    async fn test_non_bearer_header_returns_unauthorized() {
        let state = create_test_state();

        let mut parts = parts_with_authorization("Basic dXNlcjpwYXNz");
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(tokio::test)]
    async fn test_garbage_token_returns_unauthorized() {
        let state = create_test_state();

        let mut parts = parts_with_authorization("Bearer not.a.jwt");
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
