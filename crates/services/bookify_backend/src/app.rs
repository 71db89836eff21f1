// File: services/bookify_backend/src/app.rs
use axum::{routing::get, Json, Router};
use bookify_common::StatusResponse;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service_factory::BookifyServiceFactory;

async fn liveness() -> Json<StatusResponse> {
    Json(StatusResponse::ok("Bookify API is running 🚀"))
}

/// The full application router.
pub fn build_app(factory: &BookifyServiceFactory) -> Router {
    let config = factory.config();
    let gcal_state = factory.gcal_state();

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .route("/", get(liveness))
        .merge(bookify_gcal::routes::routes(gcal_state.clone()))
        .merge(bookify_fulfillment::routes(config, gcal_state));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use bookify_fulfillment::doc::FulfillmentApiDoc;
        use bookify_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookify API",
                version = "0.1.0",
                description = "Appointment booking on Google Calendar"
            ),
            tags((name = "Bookify", description = "Core service endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(GcalApiDoc::openapi());
        openapi_doc.merge(FulfillmentApiDoc::openapi());
        tracing::info!("📖 Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    // Any origin: the booking page and the agent are hosted elsewhere.
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
