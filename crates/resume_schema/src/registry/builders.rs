//! Built-in item-context builders.
//!
//! Builders read values through the role resolver, so they keep working when a
//! schema renames its fields as long as the role map follows.

use crate::error::BuilderFailure;
use crate::models::{ExtendedDocument, FieldData, FieldRole, RoleMap, Section};
use crate::registry::builtin::{
    CERTIFICATIONS_BUILDER, EDUCATION_BUILDER, EXPERIENCE_BUILDER, PROJECTS_BUILDER,
    SKILLS_BUILDER,
};
use crate::registry::{ItemContextBuilder, SchemaRegistry};
use crate::roles::{
    get_item_date_range, get_item_organization, get_item_title, pick_field_by_role,
    pick_fields_by_role,
};

/// Most other skills listed in a skills context line.
const MAX_RELATED_SKILLS: usize = 12;

/// Registers the built-in builders. Each builder reads items through the role
/// map of the schema that references it by name.
pub(crate) fn register_builtin_builders(registry: &mut SchemaRegistry) {
    let entries = [
        (EXPERIENCE_BUILDER, "Role"),
        (EDUCATION_BUILDER, "Degree"),
        (PROJECTS_BUILDER, "Project"),
        (CERTIFICATIONS_BUILDER, "Certification"),
    ];
    for (name, noun) in entries {
        let role_map = registry
            .schema_for_builder(name)
            .and_then(|schema| schema.role_map.clone());
        registry.register_builder(name, EntryContextBuilder { noun, role_map });
    }

    let (schema_id, role_map) = match registry.schema_for_builder(SKILLS_BUILDER) {
        Some(schema) => (schema.id.clone(), schema.role_map.clone()),
        None => (SKILLS_BUILDER.to_string(), None),
    };
    registry.register_builder(
        SKILLS_BUILDER,
        SkillsContextBuilder {
            schema_id,
            role_map,
        },
    );
}

/// Describes a dated entry: "Role: Engineer at Acme (2020 - Present)".
pub struct EntryContextBuilder {
    pub noun: &'static str,
    pub role_map: Option<RoleMap>,
}

impl ItemContextBuilder for EntryContextBuilder {
    fn build(
        &self,
        item: &FieldData,
        _document: &ExtendedDocument,
    ) -> Result<String, BuilderFailure> {
        let map = self.role_map.as_ref();
        let title = get_item_title(item, map);
        let organization = get_item_organization(item, map);
        if title.trim().is_empty() && organization.trim().is_empty() {
            return Err(BuilderFailure(format!(
                "{} item has neither a title nor an organization",
                self.noun.to_lowercase()
            )));
        }

        let mut line = format!("{}: {}", self.noun, title.trim());
        if !organization.trim().is_empty() {
            if title.trim().is_empty() {
                line.push_str(organization.trim());
            } else {
                line.push_str(&format!(" at {}", organization.trim()));
            }
        }

        let dates = get_item_date_range(item, map);
        if !dates.is_empty() {
            line.push_str(&format!(" ({dates})"));
        }

        if let Some(location) = pick_field_by_role(item, FieldRole::Location, map) {
            let location = location.text();
            if !location.trim().is_empty() {
                line.push_str(&format!(", {}", location.trim()));
            }
        }

        let skills: Vec<String> = pick_fields_by_role(item, FieldRole::Skills, map)
            .iter()
            .map(|f| f.text())
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !skills.is_empty() {
            line.push_str(&format!(". Technologies: {}", skills.join(", ")));
        }

        Ok(line)
    }
}

/// Names the skill under edit and lists the other skills in the document.
pub struct SkillsContextBuilder {
    /// Sections of this schema are scanned for the other skills.
    pub schema_id: String,
    pub role_map: Option<RoleMap>,
}

impl ItemContextBuilder for SkillsContextBuilder {
    fn build(
        &self,
        item: &FieldData,
        document: &ExtendedDocument,
    ) -> Result<String, BuilderFailure> {
        let map = self.role_map.as_ref();
        let name = get_item_title(item, map);
        if name.trim().is_empty() {
            return Err(BuilderFailure("skill item has no name".to_string()));
        }

        let mut line = format!("Skill: {}", name.trim());
        if let Some(level) = pick_field_by_role(item, FieldRole::Level, map) {
            let level = level.text();
            if !level.trim().is_empty() {
                line.push_str(&format!(" ({})", level.trim()));
            }
        }

        let related: Vec<String> = document
            .sections
            .iter()
            .filter_map(Section::as_dynamic)
            .filter(|s| s.schema_id == self.schema_id)
            .flat_map(|s| s.items.iter())
            .map(|i| get_item_title(&i.data, map))
            .filter(|other| !other.trim().is_empty() && other.trim() != name.trim())
            .take(MAX_RELATED_SKILLS)
            .collect();
        if !related.is_empty() {
            line.push_str(&format!(". Other listed skills: {}", related.join(", ")));
        }

        Ok(line)
    }
}
