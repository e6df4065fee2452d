use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        crate::api::routes::auth::login_link,
        crate::api::routes::auth::establish_session,
        crate::api::routes::auth::logout,
        crate::api::routes::auth::me,
        // Category endpoints
        crate::api::routes::categories::list_categories,
        crate::api::routes::categories::category_tree,
        crate::api::routes::categories::get_category,
        crate::api::routes::categories::category_listings,
        // Listing endpoints
        crate::api::routes::listings::search_listings,
        crate::api::routes::listings::get_listing,
        crate::api::routes::listings::create_listing,
        crate::api::routes::listings::delete_listing,
        crate::api::routes::users::my_listings,
        // Health check
        crate::api::routes::health,
        crate::api::routes::ready,
    ),
    components(
        schemas(
            crate::api::dtos::auth_dto::LoginLinkRequest,
            crate::api::dtos::auth_dto::EstablishSessionRequest,
            crate::api::dtos::auth_dto::SessionUserResponse,
            crate::api::dtos::category_dto::CategoryResponse,
            crate::api::dtos::category_dto::CategoryTreeResponse,
            crate::api::dtos::listing_dto::CreateListingRequest,
            crate::api::dtos::listing_dto::ListingResponse,
            crate::api::dtos::listing_dto::SearchResponse,
            crate::api::dtos::common::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Passwordless email-link authentication"),
        (name = "categories", description = "Category taxonomy and browsing"),
        (name = "listings", description = "Listing search, creation and removal"),
        (name = "users", description = "The signed-in user's own data"),
        (name = "health", description = "Health and readiness checks"),
    ),
    info(
        title = "Classifieds Backend API",
        version = "0.1.0",
        description = "Classifieds marketplace backend: categories, listings and passwordless auth",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
