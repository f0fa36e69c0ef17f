use axum::{
    extract::{Path, State},
    Json,
};
use resume_schema::models::{FieldSchema, SectionSchema};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/schemas
/// All registered section schemas in registration order.
pub async fn handle_list_schemas(State(state): State<AppState>) -> Json<Vec<SectionSchema>> {
    Json(state.registry.get_all_section_schemas().to_vec())
}

/// GET /api/v1/schemas/:id
pub async fn handle_get_schema(
    State(state): State<AppState>,
    Path(schema_id): Path<String>,
) -> Result<Json<SectionSchema>, AppError> {
    state
        .registry
        .get_section_schema(&schema_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Section schema '{schema_id}'")))
}

/// GET /api/v1/schemas/:id/fields/:field
pub async fn handle_get_field(
    State(state): State<AppState>,
    Path((schema_id, field_id)): Path<(String, String)>,
) -> Result<Json<FieldSchema>, AppError> {
    state
        .registry
        .get_field_schema(&schema_id, &field_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Field '{field_id}' in schema '{schema_id}'")))
}
