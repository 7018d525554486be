//! Real-estate listing backend.
//!
//! A REST service for browsing, listing and inquiring about homes. Buyers
//! register freely, browse listings with conjunctive filters and send
//! inquiries; realtors register with a product key and manage their own
//! listings. Sessions are stateless JWTs carried as bearer tokens.
//!
//! The crate is organised in three layers:
//! - [`api`]: axum handlers and their wire types
//! - [`auth`]: password hashing, sessions, product keys and preconditions
//! - [`db`]: repositories over PostgreSQL, with their own record types

use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{get, post},
};
use bon::Builder;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use types::{HomeId, MessageId, UserId};

use crate::{
    api::handlers::{auth as auth_handlers, homes as home_handlers},
    openapi::ApiDoc,
};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let origin = if cors_config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            origins.push(origin.parse::<HeaderValue>()?);
        }
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(cors_config.allow_credentials)
        .max_age(cors_config.max_age))
}

async fn healthz() -> &'static str {
    "OK"
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let auth_routes = Router::new()
        .route("/signup/{user_type}", post(auth_handlers::signup))
        .route("/signin", post(auth_handlers::signin))
        .route("/key", post(auth_handlers::generate_product_key))
        .route("/me", get(auth_handlers::me));

    let home_routes = Router::new()
        .route("/", get(home_handlers::list_homes).post(home_handlers::create_home))
        .route(
            "/{id}",
            get(home_handlers::get_home)
                .put(home_handlers::update_home)
                .delete(home_handlers::delete_home),
        )
        .route("/{id}/inquire", post(home_handlers::inquire))
        .route("/{id}/messages", get(home_handlers::list_home_messages));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/auth", auth_routes)
        .nest("/home", home_routes)
        .with_state(state)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting haven with configuration: {:#?}", config);

        let url = config
            .database
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("database.url is not configured"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(url)
            .await?;

        info!("Running database migrations...");
        migrator().run(&pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Haven listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::models::users::CurrentUser,
        auth::session::create_session_token,
        test_utils::{create_test_config, create_test_current_user},
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;

    /// Server over the full router with a lazy pool: routes that never touch
    /// the database are testable without PostgreSQL.
    fn create_test_server() -> (TestServer, Config) {
        let config = create_test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(config.database.url.as_deref().unwrap())
            .unwrap();
        let state = AppState::builder().db(pool).config(config.clone()).build();
        let router = build_router(state).unwrap();
        (TestServer::new(router).unwrap(), config)
    }

    #[test_log::test(tokio::test)]
    async fn test_healthz() {
        let (server, _config) = create_test_server();

        let response = server.get("/healthz").await;
        response.assert_status(StatusCode::OK);
        response.assert_text("OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_openapi_json_served() {
        let (server, _config) = create_test_server();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status(StatusCode::OK);

        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/home"].is_object());
    }

    #[test_log::test(tokio::test)]
    async fn test_me_with_valid_token() {
        let (server, config) = create_test_server();

        let user = create_test_current_user(3, "Jane Realtor");
        let token = create_session_token(&user, &config).unwrap();

        let response = server.get("/auth/me").authorization_bearer(&token).await;
        response.assert_status(StatusCode::OK);

        let body: CurrentUser = response.json();
        assert_eq!(body, user);
    }

    #[test_log::test(tokio::test)]
    async fn test_me_without_token_is_unauthorized() {
        let (server, _config) = create_test_server();

        let response = server.get("/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(tokio::test)]
    async fn test_me_with_garbage_token_is_unauthorized() {
        let (server, _config) = create_test_server();

        let response = server.get("/auth/me").authorization_bearer("not.a.jwt").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_homes_ignores_empty_query_values() {
        let (server, _config) = create_test_server();

        // Empty values must not be rejected at deserialization; the request
        // proceeds as if the filters were absent.
        let response = server.get("/home?property_type=&city=&minPrice=").await;
        assert_ne!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_rejects_bad_origin_url() {
        let mut config = create_test_config();
        config.auth.security.cors.allowed_origins = vec!["not a header value\n".to_string()];
        assert!(create_cors_layer(&config).is_err());
    }
}
