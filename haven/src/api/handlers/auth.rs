use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        auth::{GenerateProductKeyRequest, ProductKeyResponse, SigninRequest, SignupRequest, TokenResponse},
        users::{CurrentUser, UserType},
    },
    auth::{password, product_key, session},
    db::{handlers::Users, models::users::UserCreateDBRequest},
    errors::Error,
};

/// Register a new account
///
/// Buyers register freely; any other account type must present a product key
/// issued for its email.
#[utoipa::path(
    post,
    path = "/auth/signup/{user_type}",
    request_body = SignupRequest,
    tag = "auth",
    params(
        ("user_type" = UserType, Path, description = "Account type to register"),
    ),
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing or invalid product key"),
        (status = 409, description = "Email already registered"),
    )
)]
#[tracing::instrument(skip_all, fields(user_type = %user_type))]
pub async fn signup(
    State(state): State<AppState>,
    Path(user_type): Path<UserType>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), Error> {
    request.validate(&state.config.auth.password)?;

    // Non-buyer accounts are gated before anything is written
    if user_type != UserType::Buyer {
        let key = request.product_key.clone().ok_or(Error::Unauthenticated {
            message: Some("A product key is required for this account type".to_string()),
        })?;

        let email = request.email.clone();
        let config = state.config.clone();
        let valid = tokio::task::spawn_blocking(move || product_key::verify_product_key(&key, &email, user_type, &config))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn product key verification task: {e}"),
            })??;

        if !valid {
            return Err(Error::Unauthenticated {
                message: Some("Invalid product key".to_string()),
            });
        }
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    if user_repo.get_by_email(&request.email).await?.is_some() {
        return Err(Error::Conflict {
            message: "An account with this email address already exists".to_string(),
        });
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let plaintext = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&plaintext))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let created = user_repo
        .create(&UserCreateDBRequest {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
            user_type,
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let token = session::create_session_token(
        &CurrentUser {
            id: created.id,
            name: created.name,
        },
        &state.config,
    )?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No account for this email"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn signin(State(state): State<AppState>, Json(request): Json<SigninRequest>) -> Result<Json<TokenResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo.get_by_email(&request.email).await?.ok_or(Error::NotFound {
        resource: "user".to_string(),
    })?;

    let plaintext = request.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || password::verify_string(&plaintext, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        });
    }

    let token = session::create_session_token(
        &CurrentUser {
            id: user.id,
            name: user.name,
        },
        &state.config,
    )?;

    Ok(Json(TokenResponse { token }))
}

/// Issue a product key for a prospective account
#[utoipa::path(
    post,
    path = "/auth/key",
    request_body = GenerateProductKeyRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Product key issued", body = ProductKeyResponse),
        (status = 400, description = "Invalid input"),
    )
)]
#[tracing::instrument(skip_all, fields(user_type = %request.user_type))]
pub async fn generate_product_key(
    State(state): State<AppState>,
    Json(request): Json<GenerateProductKeyRequest>,
) -> Result<Json<ProductKeyResponse>, Error> {
    request.validate()?;

    let config = state.config.clone();
    let key = tokio::task::spawn_blocking(move || product_key::generate_product_key(&request.email, request.user_type, &config))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn product key generation task: {e}"),
        })??;

    Ok(Json(ProductKeyResponse { key }))
}

/// The current session's user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = CurrentUser),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn me(current_user: CurrentUser) -> Json<CurrentUser> {
    Json(current_user)
}
