use axum::{extract::State, Json};
use resume_schema::models::{FieldRole, SectionSchema};
use resume_schema::{
    build_ai_context, get_item_date_range, get_item_description, get_item_organization,
    get_item_title, pick_field_by_role, pick_fields_by_role, ContextRequest, Field,
    FieldData, Migrator, ResumeDocument,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRolesRequest {
    pub data: FieldData,
    pub role: FieldRole,
    /// Without a schema only the key heuristics apply.
    pub schema_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedField {
    pub key: String,
    pub value: Value,
}

impl From<Field<'_>> for ResolvedField {
    fn from(field: Field<'_>) -> Self {
        Self {
            key: field.key.to_string(),
            value: field.value.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRolesResponse {
    pub field: Option<ResolvedField>,
    pub fields: Vec<ResolvedField>,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub date_range: String,
    /// Keys the schema does not declare. Empty without a schema.
    pub undeclared_keys: Vec<String>,
    /// Required fields that are absent or blank. Empty without a schema.
    pub missing_required: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextBuildRequest {
    pub section_type: Option<String>,
    pub field_id: Option<String>,
    pub current_item_data: Option<FieldData>,
    /// Either document shape; legacy documents are migrated before use.
    pub all_document_data: Option<Value>,
    pub current_item_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContextBuildResponse {
    pub context: String,
}

/// POST /api/v1/roles/resolve
pub async fn handle_resolve_roles(
    State(state): State<AppState>,
    Json(req): Json<ResolveRolesRequest>,
) -> Result<Json<ResolveRolesResponse>, AppError> {
    let schema: Option<&SectionSchema> = match req.schema_id.as_deref() {
        Some(schema_id) => Some(
            state
                .registry
                .get_section_schema(schema_id)
                .ok_or_else(|| AppError::NotFound(format!("Section schema '{schema_id}'")))?,
        ),
        None => None,
    };
    let role_map = schema.and_then(|s| s.role_map.as_ref());

    let data = &req.data;
    let view = data.view(schema);
    Ok(Json(ResolveRolesResponse {
        field: pick_field_by_role(data, req.role, role_map).map(ResolvedField::from),
        fields: pick_fields_by_role(data, req.role, role_map)
            .into_iter()
            .map(ResolvedField::from)
            .collect(),
        title: get_item_title(data, role_map),
        organization: get_item_organization(data, role_map),
        description: get_item_description(data, role_map),
        date_range: get_item_date_range(data, role_map),
        undeclared_keys: view.undeclared_keys().into_iter().map(str::to_string).collect(),
        missing_required: view.missing_required().into_iter().map(str::to_string).collect(),
    }))
}

/// POST /api/v1/context
/// Composes the context string for a generation request. Never fails on
/// partial input; an unreadable document is ignored.
pub async fn handle_build_context(
    State(state): State<AppState>,
    Json(req): Json<ContextBuildRequest>,
) -> Json<ContextBuildResponse> {
    let document = req.all_document_data.and_then(|raw| {
        match serde_json::from_value::<ResumeDocument>(raw) {
            Ok(doc) => Some(Migrator::new(&state.registry).migrate_if_needed(doc)),
            Err(e) => {
                warn!("Ignoring unreadable document in context request: {e}");
                None
            }
        }
    });

    let context = build_ai_context(
        &state.registry,
        &ContextRequest {
            section_type: req.section_type.as_deref(),
            field_id: req.field_id.as_deref(),
            current_item: req.current_item_data.as_ref(),
            document: document.as_ref(),
            current_item_context: req.current_item_context.as_deref(),
        },
    );

    Json(ContextBuildResponse { context })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_request_accepts_partial_body() {
        let req: ContextBuildRequest =
            serde_json::from_value(json!({ "sectionType": "skills" })).unwrap();
        assert_eq!(req.section_type.as_deref(), Some("skills"));
        assert!(req.current_item_data.is_none());
        assert!(req.all_document_data.is_none());
    }

    #[test]
    fn test_resolved_field_owns_its_value() {
        let data: FieldData = serde_json::from_value(json!({ "company": "Acme" })).unwrap();
        let field = pick_field_by_role(&data, FieldRole::Organization, None).unwrap();
        let resolved = ResolvedField::from(field);
        assert_eq!(resolved.key, "company");
        assert_eq!(resolved.value, json!("Acme"));
    }
}
