pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::editor::handlers as editor;
use crate::schemas::handlers as schemas;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Schema registry
        .route("/api/v1/schemas", get(schemas::handle_list_schemas))
        .route("/api/v1/schemas/:id", get(schemas::handle_get_schema))
        .route(
            "/api/v1/schemas/:id/fields/:field",
            get(schemas::handle_get_field),
        )
        // Documents
        .route(
            "/api/v1/documents/migrate",
            post(documents::handle_migrate),
        )
        .route(
            "/api/v1/documents/validate",
            post(documents::handle_validate),
        )
        // Field editor
        .route("/api/v1/roles/resolve", post(editor::handle_resolve_roles))
        .route("/api/v1/context", post(editor::handle_build_context))
        .with_state(state)
}
