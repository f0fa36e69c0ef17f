use axum::{extract::State, Json};
use resume_schema::migration::needs_migration_value;
use resume_schema::{check_equivalence, stable_hash, ExtendedDocument, LegacyDocument, Migrator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateResponse {
    pub document: ExtendedDocument,
    /// False when the submitted document was already in the extended format.
    pub migrated: bool,
    /// Present only when the equivalence check ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub original: LegacyDocument,
    pub migrated: ExtendedDocument,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// POST /api/v1/documents/migrate
/// Accepts a document in either shape and returns it in the extended format.
pub async fn handle_migrate(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<MigrateResponse>, AppError> {
    if !raw.is_object() {
        return Err(AppError::Validation(
            "Document must be a JSON object".to_string(),
        ));
    }

    if !needs_migration_value(&raw) {
        let document: ExtendedDocument = serde_json::from_value(raw)
            .map_err(|e| AppError::Validation(format!("Invalid extended document: {e}")))?;
        return Ok(Json(MigrateResponse {
            document,
            migrated: false,
            valid: None,
        }));
    }

    let key = stable_hash(&raw);
    if let Some(hit) = state.migration_cache.lock().await.get(&key).cloned() {
        debug!("Migration cache hit ({} byte key)", key.len());
        return Ok(Json(hit));
    }

    let legacy: LegacyDocument = serde_json::from_value(raw)
        .map_err(|e| AppError::Validation(format!("Invalid legacy document: {e}")))?;
    let document = Migrator::new(&state.registry).migrate(&legacy);

    let valid = if state.config.validate_migrations {
        check_equivalence(&legacy, &document).map_err(|e| {
            AppError::UnprocessableEntity(format!("Migrated document failed validation: {e}"))
        })?;
        Some(true)
    } else {
        None
    };

    let response = MigrateResponse {
        document,
        migrated: true,
        valid,
    };

    let mut cache = state.migration_cache.lock().await;
    if cache.set(key, response.clone()).is_some() {
        debug!("Migration cache full, evicted least recently used entry");
    }

    Ok(Json(response))
}

/// POST /api/v1/documents/validate
/// Compares a legacy document with its migrated counterpart.
pub async fn handle_validate(Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    match check_equivalence(&req.original, &req.migrated) {
        Ok(()) => Json(ValidateResponse {
            valid: true,
            reason: None,
        }),
        Err(e) => Json(ValidateResponse {
            valid: false,
            reason: Some(e.to_string()),
        }),
    }
}
