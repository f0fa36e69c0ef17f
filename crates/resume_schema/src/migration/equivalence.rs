//! Equivalence Validator: structural sanity check of a migration.
//!
//! Compares document-level fields and per-section identity only; item data is
//! not diffed.

use tracing::warn;

use crate::error::EquivalenceError;
use crate::models::{ExtendedDocument, LegacyDocument};

/// Returns the first structural difference between `original` and `migrated`.
pub fn check_equivalence(
    original: &LegacyDocument,
    migrated: &ExtendedDocument,
) -> Result<(), EquivalenceError> {
    if migrated.schema_version.is_empty() {
        return Err(EquivalenceError::MissingSchemaVersion);
    }

    if original.sections.len() != migrated.sections.len() {
        return Err(EquivalenceError::SectionCount {
            original: original.sections.len(),
            migrated: migrated.sections.len(),
        });
    }

    if original.template_id != migrated.template_id {
        return Err(EquivalenceError::TemplateId {
            original: original.template_id.clone(),
            migrated: migrated.template_id.clone(),
        });
    }

    let before = original
        .personal_details
        .to_fields()
        .map_err(|e| EquivalenceError::Comparison(e.to_string()))?;
    let after = migrated
        .personal_details
        .to_fields()
        .map_err(|e| EquivalenceError::Comparison(e.to_string()))?;
    for (key, value) in &before {
        if after.get(key) != Some(value) {
            return Err(EquivalenceError::PersonalDetail(key.clone()));
        }
    }

    for (index, (a, b)) in original.sections.iter().zip(&migrated.sections).enumerate() {
        let property = if a.id != b.id() {
            "id"
        } else if a.title != b.title() {
            "title"
        } else if a.visible != b.visible() {
            "visible"
        } else {
            continue;
        };
        return Err(EquivalenceError::Section { index, property });
    }

    Ok(())
}

/// `true` when the migration preserved every structural invariant. Failures
/// are logged, never propagated.
pub fn validate_migration(original: &LegacyDocument, migrated: &ExtendedDocument) -> bool {
    match check_equivalence(original, migrated) {
        Ok(()) => true,
        Err(e) => {
            warn!("Migration validation failed: {e}");
            false
        }
    }
}
