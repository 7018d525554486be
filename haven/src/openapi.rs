//! OpenAPI documentation, served as JSON at `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api::models::{
    auth::{GenerateProductKeyRequest, ProductKeyResponse, SigninRequest, SignupRequest, TokenResponse},
    homes::{CreateHomeRequest, HomeResponse, ImageUrl, PropertyType, UpdateHomeRequest},
    messages::{HomeMessageResponse, InquireRequest, MessageBuyer, MessageResponse},
    users::{CurrentUser, UserType},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Haven API",
        description = "Real-estate listing backend: home CRUD, buyer/realtor accounts, and inquiry messaging."
    ),
    paths(
        crate::api::handlers::auth::signup,
        crate::api::handlers::auth::signin,
        crate::api::handlers::auth::generate_product_key,
        crate::api::handlers::auth::me,
        crate::api::handlers::homes::list_homes,
        crate::api::handlers::homes::get_home,
        crate::api::handlers::homes::create_home,
        crate::api::handlers::homes::update_home,
        crate::api::handlers::homes::delete_home,
        crate::api::handlers::homes::inquire,
        crate::api::handlers::homes::list_home_messages,
    ),
    components(schemas(
        SignupRequest,
        SigninRequest,
        GenerateProductKeyRequest,
        TokenResponse,
        ProductKeyResponse,
        CurrentUser,
        UserType,
        PropertyType,
        ImageUrl,
        CreateHomeRequest,
        UpdateHomeRequest,
        HomeResponse,
        InquireRequest,
        MessageResponse,
        MessageBuyer,
        HomeMessageResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Account registration, sessions and product keys"),
        (name = "homes", description = "Home listings and inquiries"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}
