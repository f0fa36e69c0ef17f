//! Migration Engine: converts legacy documents into the extended format.
//!
//! Per section, in order:
//! - a schema exists for `type` and is flagged legacy-equivalent → dynamic
//!   section, items projected through the [`ProjectorTable`]
//! - otherwise → the legacy section is carried over unchanged
//!
//! Section count, order, ids, titles and visibility are preserved, as are
//! `personalDetails` and `templateId`. Malformed items degrade to empty-string
//! field values; migration never fails on well-formed input.

pub mod equivalence;
pub mod projectors;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    AiOptimizationLevel, DocumentMetadata, DynamicItem, DynamicSection, ExtendedDocument,
    ItemMetadata, LegacyDocument, LegacyItem, LegacySection, ResumeDocument, Section,
    SectionMetadata, SectionSchema,
};
use crate::registry::SchemaRegistry;

pub use projectors::{Projector, ProjectorTable};

/// Version stamped on every freshly migrated document.
pub const INITIAL_SCHEMA_VERSION: &str = "1.0.0";

/// Counts from one migration run.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub converted_sections: usize,
    pub passthrough_sections: usize,
    pub converted_items: usize,
    pub generated_item_ids: usize,
}

/// True iff the document carries no `schemaVersion`.
pub fn needs_migration(document: &ResumeDocument) -> bool {
    document.schema_version().is_none()
}

/// Same check on a raw JSON document, before it is typed. An explicit
/// `null` counts as absent.
pub fn needs_migration_value(document: &Value) -> bool {
    matches!(document.get("schemaVersion"), None | Some(Value::Null))
}

pub struct Migrator<'r> {
    registry: &'r SchemaRegistry,
    projectors: ProjectorTable,
}

impl<'r> Migrator<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            projectors: ProjectorTable::default(),
        }
    }

    pub fn with_projectors(registry: &'r SchemaRegistry, projectors: ProjectorTable) -> Self {
        Self {
            registry,
            projectors,
        }
    }

    /// Migrates `legacy`, stamping the current time.
    pub fn migrate(&self, legacy: &LegacyDocument) -> ExtendedDocument {
        self.migrate_at(legacy, Utc::now()).0
    }

    /// Migrates `legacy`, stamping `at` on the document and every converted item.
    pub fn migrate_at(
        &self,
        legacy: &LegacyDocument,
        at: DateTime<Utc>,
    ) -> (ExtendedDocument, MigrationReport) {
        let mut report = MigrationReport::default();

        let sections = legacy
            .sections
            .iter()
            .map(|section| {
                let schema = self
                    .registry
                    .get_section_schema(&section.section_type)
                    .filter(|_| self.registry.is_legacy_section_type(&section.section_type));
                match schema {
                    Some(schema) => {
                        report.converted_sections += 1;
                        Section::Dynamic(self.convert_section(section, schema, at, &mut report))
                    }
                    None => {
                        report.passthrough_sections += 1;
                        Section::Legacy(section.clone())
                    }
                }
            })
            .collect();

        let document = ExtendedDocument {
            personal_details: legacy.personal_details.clone(),
            sections,
            template_id: legacy.template_id.clone(),
            schema_version: INITIAL_SCHEMA_VERSION.to_string(),
            metadata: DocumentMetadata {
                last_ai_review: at,
                ai_optimization_level: AiOptimizationLevel::Basic,
            },
        };

        info!(
            converted = report.converted_sections,
            passthrough = report.passthrough_sections,
            items = report.converted_items,
            "Migrated legacy document to schema version {INITIAL_SCHEMA_VERSION}"
        );

        (document, report)
    }

    /// Returns versioned documents untouched; migrates the rest.
    pub fn migrate_if_needed(&self, document: ResumeDocument) -> ExtendedDocument {
        match document {
            ResumeDocument::Extended(doc) => doc,
            ResumeDocument::Legacy(doc) => self.migrate(&doc),
        }
    }

    fn convert_section(
        &self,
        section: &LegacySection,
        schema: &SectionSchema,
        at: DateTime<Utc>,
        report: &mut MigrationReport,
    ) -> DynamicSection {
        let items = section
            .items
            .iter()
            .map(|item| {
                let (id, generated) = item_id(item);
                if generated {
                    report.generated_item_ids += 1;
                }
                report.converted_items += 1;
                DynamicItem {
                    id,
                    schema_id: section.section_type.clone(),
                    data: self.projectors.project(&section.section_type, item),
                    metadata: ItemMetadata::stamped(at),
                }
            })
            .collect();

        DynamicSection {
            id: section.id.clone(),
            schema_id: section.section_type.clone(),
            title: section.title.clone(),
            visible: section.visible,
            items,
            metadata: SectionMetadata {
                custom_title: section.title != schema.name,
                ai_optimized: false,
            },
        }
    }
}

/// Reuses the legacy item's id; generates one when it is missing or unusable.
fn item_id(item: &LegacyItem) -> (String, bool) {
    match item.get("id") {
        Some(Value::String(id)) if !id.is_empty() => (id.clone(), false),
        Some(Value::Number(n)) => (n.to_string(), false),
        _ => (Uuid::new_v4().to_string(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::equivalence::validate_migration;
    use chrono::TimeZone;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builtin().unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn legacy_document() -> LegacyDocument {
        serde_json::from_value(json!({
            "personalDetails": {
                "name": "Ada Lovelace",
                "jobTitle": "Engineer",
                "email": "ada@example.com",
                "phone": "",
                "address": "London"
            },
            "templateId": "classic",
            "sections": [
                {
                    "id": "sec-summary",
                    "title": "Summary",
                    "type": "summary",
                    "visible": true,
                    "isList": false,
                    "items": [{ "id": "sum-1", "content": "Analytical engine enthusiast" }]
                },
                {
                    "id": "sec-exp",
                    "title": "Work History",
                    "type": "experience",
                    "visible": true,
                    "isList": true,
                    "items": [
                        { "id": "exp-1", "jobTitle": "Engineer", "company": "Acme", "startDate": "2020" },
                        { "jobTitle": "Intern" }
                    ]
                },
                {
                    "id": "sec-widget",
                    "title": "Widgets",
                    "type": "customWidget",
                    "visible": false,
                    "isList": true,
                    "items": [{ "id": "w1", "color": "red" }],
                    "layout": "grid"
                },
                {
                    "id": "sec-projects",
                    "title": "Projects",
                    "type": "projects",
                    "visible": true,
                    "isList": true,
                    "items": [{ "id": "p1", "name": "Difference Engine" }]
                },
                {
                    "id": "sec-skills",
                    "title": "Skills",
                    "type": "skills",
                    "visible": false,
                    "isList": true,
                    "items": [{ "id": "sk1", "name": "Math", "level": "Expert" }]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_needs_migration_before_and_after() {
        let registry = registry();
        let legacy = legacy_document();
        assert!(needs_migration(&ResumeDocument::Legacy(legacy.clone())));

        let migrated = Migrator::new(&registry).migrate(&legacy);
        assert!(!needs_migration(&ResumeDocument::Extended(migrated)));
    }

    #[test]
    fn test_needs_migration_value_checks_presence_only() {
        assert!(needs_migration_value(&json!({ "sections": [] })));
        assert!(!needs_migration_value(&json!({ "schemaVersion": "0.0.1" })));
        assert!(!needs_migration_value(&json!({ "schemaVersion": "not-semver" })));
        assert!(!needs_migration_value(&json!({ "schemaVersion": 2 })));
        assert!(needs_migration_value(&json!({ "schemaVersion": null })));
    }

    #[test]
    fn test_migration_preserves_section_order_and_identity() {
        let registry = registry();
        let legacy = legacy_document();
        let migrated = Migrator::new(&registry).migrate(&legacy);

        let original_ids: Vec<_> = legacy.sections.iter().map(|s| s.id.as_str()).collect();
        let migrated_ids: Vec<_> = migrated.sections.iter().map(Section::id).collect();
        assert_eq!(original_ids, migrated_ids);

        for (before, after) in legacy.sections.iter().zip(&migrated.sections) {
            assert_eq!(before.title, after.title());
            assert_eq!(before.visible, after.visible());
        }
        assert_eq!(migrated.personal_details, legacy.personal_details);
        assert_eq!(migrated.template_id, "classic");
        assert!(validate_migration(&legacy, &migrated));
    }

    #[test]
    fn test_known_types_become_dynamic() {
        let registry = registry();
        let (migrated, report) = Migrator::new(&registry).migrate_at(&legacy_document(), fixed_time());

        let experience = migrated.sections[1].as_dynamic().expect("dynamic experience");
        assert_eq!(experience.schema_id, "experience");
        assert_eq!(experience.items.len(), 2);
        assert_eq!(experience.items[0].id, "exp-1");
        assert_eq!(experience.items[0].schema_id, "experience");
        assert_eq!(experience.items[0].data.get_str("company"), Some("Acme"));
        assert_eq!(experience.items[0].data.get_str("endDate"), Some(""));
        assert_eq!(experience.items[0].metadata, ItemMetadata::stamped(fixed_time()));
        assert!(experience.metadata.custom_title, "'Work History' differs from 'Experience'");

        // The second item had no id and no company.
        assert!(!experience.items[1].id.is_empty());
        assert_eq!(experience.items[1].data.get_str("company"), Some(""));

        let summary = migrated.sections[0].as_dynamic().expect("dynamic summary");
        assert!(!summary.metadata.custom_title);
        assert_eq!(
            summary.items[0].data.get_str("content"),
            Some("Analytical engine enthusiast")
        );

        assert_eq!(
            report,
            MigrationReport {
                converted_sections: 3,
                passthrough_sections: 2,
                converted_items: 4,
                generated_item_ids: 1,
            }
        );
    }

    #[test]
    fn test_unknown_type_passes_through_unchanged() {
        let registry = registry();
        let legacy = legacy_document();
        let migrated = Migrator::new(&registry).migrate(&legacy);

        assert_eq!(migrated.sections[2], Section::Legacy(legacy.sections[2].clone()));
        let raw = serde_json::to_value(&migrated.sections[2]).unwrap();
        assert_eq!(raw["layout"], "grid");
        assert_eq!(raw["items"][0]["id"], "w1");
    }

    #[test]
    fn test_registered_but_not_legacy_type_passes_through() {
        let registry = registry();
        let legacy = legacy_document();
        let migrated = Migrator::new(&registry).migrate(&legacy);
        assert_eq!(migrated.sections[3], Section::Legacy(legacy.sections[3].clone()));
    }

    #[test]
    fn test_document_stamps() {
        let registry = registry();
        let (migrated, _) = Migrator::new(&registry).migrate_at(&legacy_document(), fixed_time());
        assert_eq!(migrated.schema_version, INITIAL_SCHEMA_VERSION);
        assert_eq!(migrated.metadata.last_ai_review, fixed_time());
        assert_eq!(migrated.metadata.ai_optimization_level, AiOptimizationLevel::Basic);
    }

    #[test]
    fn test_migrate_if_needed_is_idempotent() {
        let registry = registry();
        let migrator = Migrator::new(&registry);
        let once = migrator.migrate_if_needed(legacy_document().into());
        let twice = migrator.migrate_if_needed(once.clone().into());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_migrated_document_round_trips_as_extended() {
        let registry = registry();
        let migrated = Migrator::new(&registry).migrate(&legacy_document());
        let raw = serde_json::to_value(&migrated).unwrap();
        assert_eq!(raw["schemaVersion"], "1.0.0");
        assert_eq!(raw["sections"][1]["schemaId"], "experience");
        assert_eq!(raw["sections"][2]["type"], "customWidget");

        let reloaded = ResumeDocument::from_value(raw).unwrap();
        assert_eq!(reloaded, ResumeDocument::Extended(migrated));
    }

    #[test]
    fn test_empty_document_migrates() {
        let registry = registry();
        let migrated = Migrator::new(&registry).migrate(&LegacyDocument::default());
        assert!(migrated.sections.is_empty());
        assert!(validate_migration(&LegacyDocument::default(), &migrated));
    }

    #[test]
    fn test_custom_projector_table() {
        let registry = registry();
        let migrator = Migrator::with_projectors(&registry, ProjectorTable::empty());
        let migrated = migrator.migrate(&legacy_document());
        let experience = migrated.sections[1].as_dynamic().unwrap();
        // Pass-through keeps only the properties the item actually had.
        assert_eq!(experience.items[0].data.len(), 3);
    }
}
