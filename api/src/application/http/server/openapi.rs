use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::application::http::{
    diet_plan::router::DietPlanApiDoc, health::router::HealthApiDoc, menu::router::MenuApiDoc,
    profile::router::ProfileApiDoc, recommendation::router::RecommendationApiDoc,
};

/// Merges `DietPlanApiDoc` at the root path (equivalent to nesting with an
/// empty prefix, which the `nest(...)` attribute does not accept).
struct DietPlanRoot;

impl Modify for DietPlanRoot {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(DietPlanApiDoc::openapi());
    }
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dietplate API"
    ),
    modifiers(&DietPlanRoot, &BearerSecurity),
    nest(
        (path = "/health", api = HealthApiDoc),
        (path = "/users", api = ProfileApiDoc),
        (path = "/menu-items", api = MenuApiDoc),
        (path = "/recommendations", api = RecommendationApiDoc),
    )
)]
pub struct ApiDoc;
