//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "CRUD over schemaless event documents stored in MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/v3/app/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "events", description = "Schemaless event documents stored in MongoDB")
    )
)]
pub struct ApiDoc;
