//! The standard resume catalog.
//!
//! The first five schemas share their id with a legacy section `type` and are
//! flagged `legacy_equivalent`, so the migrator converts those sections. The
//! rest only exist in the extended format.

use crate::models::{
    AiContextConfig, FieldRole, FieldSchema, FieldType, RoleMap, RoleMapping, SchemaKind,
    SectionSchema, UiConfig,
};

pub const EXPERIENCE_BUILDER: &str = "experience";
pub const EDUCATION_BUILDER: &str = "education";
pub const SKILLS_BUILDER: &str = "skills";
pub const PROJECTS_BUILDER: &str = "projects";
pub const CERTIFICATIONS_BUILDER: &str = "certifications";

const DESCRIPTION_HINTS: &[&str] = &[
    "Start each bullet with a strong action verb",
    "Quantify outcomes with numbers, percentages or time saved",
    "Keep each bullet to one or two lines",
];

fn one(role: FieldRole) -> RoleMapping {
    RoleMapping::One(role)
}

fn ui(icon: &str, item_label: Option<&str>) -> Option<UiConfig> {
    Some(UiConfig {
        icon: Some(icon.to_string()),
        item_label: item_label.map(str::to_string),
        allow_reorder: item_label.is_some(),
    })
}

fn ai(description: &str, builder: Option<&str>) -> Option<AiContextConfig> {
    Some(AiContextConfig {
        section_description: Some(description.to_string()),
        item_context_builder: builder.map(str::to_string),
    })
}

pub fn builtin_schemas() -> Vec<SectionSchema> {
    vec![
        summary(),
        experience(),
        education(),
        skills(),
        custom_text(),
        projects(),
        certifications(),
        languages(),
    ]
}

fn summary() -> SectionSchema {
    SectionSchema {
        id: "summary".to_string(),
        name: "Summary".to_string(),
        kind: SchemaKind::Single,
        fields: vec![FieldSchema::new("content", "Summary", FieldType::RichText)
            .placeholder("A short overview of your experience and goals")
            .hints(&[
                "Lead with years of experience and core specialty",
                "Tailor the summary to the target role",
            ])],
        ui_config: ui("user", None),
        ai_context: ai("Professional summary at the top of the resume", None),
        role_map: Some(RoleMap::new().with("content", one(FieldRole::Description))),
        legacy_equivalent: true,
    }
}

fn experience() -> SectionSchema {
    SectionSchema {
        id: "experience".to_string(),
        name: "Experience".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("jobTitle", "Job title", FieldType::Text).required(),
            FieldSchema::new("company", "Company", FieldType::Text).required(),
            FieldSchema::new("location", "Location", FieldType::Text),
            FieldSchema::new("startDate", "Start date", FieldType::Date),
            FieldSchema::new("endDate", "End date", FieldType::Date).placeholder("Present"),
            FieldSchema::new("description", "Description", FieldType::RichText)
                .hints(DESCRIPTION_HINTS),
        ],
        ui_config: ui("briefcase", Some("Position")),
        ai_context: ai("Work history, most recent first", Some(EXPERIENCE_BUILDER)),
        role_map: Some(
            RoleMap::new()
                .with("jobTitle", one(FieldRole::Title))
                .with("company", one(FieldRole::Organization))
                .with("location", one(FieldRole::Location))
                .with("startDate", one(FieldRole::StartDate))
                .with("endDate", one(FieldRole::EndDate))
                .with("description", one(FieldRole::Description)),
        ),
        legacy_equivalent: true,
    }
}

fn education() -> SectionSchema {
    SectionSchema {
        id: "education".to_string(),
        name: "Education".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("degree", "Degree", FieldType::Text).required(),
            FieldSchema::new("school", "School", FieldType::Text).required(),
            FieldSchema::new("location", "Location", FieldType::Text),
            FieldSchema::new("startDate", "Start date", FieldType::Date),
            FieldSchema::new("endDate", "End date", FieldType::Date),
            FieldSchema::new("description", "Description", FieldType::RichText)
                .hints(&["Mention honors, relevant coursework or thesis topic"]),
        ],
        ui_config: ui("graduation-cap", Some("School")),
        ai_context: ai("Degrees and academic background", Some(EDUCATION_BUILDER)),
        role_map: Some(
            RoleMap::new()
                .with("degree", one(FieldRole::Title))
                .with("school", one(FieldRole::Organization))
                .with("location", one(FieldRole::Location))
                .with("startDate", one(FieldRole::StartDate))
                .with("endDate", one(FieldRole::EndDate))
                .with("description", one(FieldRole::Description)),
        ),
        legacy_equivalent: true,
    }
}

fn skills() -> SectionSchema {
    SectionSchema {
        id: "skills".to_string(),
        name: "Skills".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("name", "Skill", FieldType::Text).required(),
            FieldSchema::new("level", "Level", FieldType::Select),
        ],
        ui_config: ui("wrench", Some("Skill")),
        ai_context: ai("Technical and professional skills", Some(SKILLS_BUILDER)),
        role_map: Some(
            RoleMap::new()
                .with(
                    "name",
                    RoleMapping::Many(vec![FieldRole::Title, FieldRole::Skills]),
                )
                .with("level", one(FieldRole::Level)),
        ),
        legacy_equivalent: true,
    }
}

fn custom_text() -> SectionSchema {
    SectionSchema {
        id: "customText".to_string(),
        name: "Custom Section".to_string(),
        kind: SchemaKind::Single,
        fields: vec![FieldSchema::new("content", "Content", FieldType::RichText)],
        ui_config: ui("text", None),
        ai_context: ai("Free-form section with a user-chosen title", None),
        role_map: Some(RoleMap::new().with("content", one(FieldRole::Description))),
        legacy_equivalent: true,
    }
}

fn projects() -> SectionSchema {
    SectionSchema {
        id: "projects".to_string(),
        name: "Projects".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("name", "Project name", FieldType::Text).required(),
            FieldSchema::new("role", "Your role", FieldType::Text),
            FieldSchema::new("url", "Link", FieldType::Url),
            FieldSchema::new("startDate", "Start date", FieldType::Date),
            FieldSchema::new("endDate", "End date", FieldType::Date),
            FieldSchema::new("technologies", "Technologies", FieldType::Tags),
            FieldSchema::new("description", "Description", FieldType::RichText)
                .hints(DESCRIPTION_HINTS),
        ],
        ui_config: ui("folder", Some("Project")),
        ai_context: ai("Personal, academic or open-source projects", Some(PROJECTS_BUILDER)),
        role_map: Some(
            RoleMap::new()
                .with("name", one(FieldRole::Title))
                .with("role", one(FieldRole::Other))
                .with("url", one(FieldRole::Url))
                .with("startDate", one(FieldRole::StartDate))
                .with("endDate", one(FieldRole::EndDate))
                .with("technologies", one(FieldRole::Skills))
                .with("description", one(FieldRole::Description)),
        ),
        legacy_equivalent: false,
    }
}

fn certifications() -> SectionSchema {
    SectionSchema {
        id: "certifications".to_string(),
        name: "Certifications".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("name", "Certification", FieldType::Text).required(),
            FieldSchema::new("issuer", "Issuer", FieldType::Text),
            FieldSchema::new("issueDate", "Issued", FieldType::Date),
            FieldSchema::new("credentialId", "Credential ID", FieldType::Text),
            FieldSchema::new("url", "Verification link", FieldType::Url),
        ],
        ui_config: ui("award", Some("Certification")),
        ai_context: ai("Professional certifications and licenses", Some(CERTIFICATIONS_BUILDER)),
        role_map: Some(
            RoleMap::new()
                .with("name", one(FieldRole::Title))
                .with("issuer", one(FieldRole::Organization))
                .with("issueDate", one(FieldRole::DateRange))
                .with("credentialId", one(FieldRole::Identifier))
                .with("url", one(FieldRole::Url)),
        ),
        legacy_equivalent: false,
    }
}

fn languages() -> SectionSchema {
    SectionSchema {
        id: "languages".to_string(),
        name: "Languages".to_string(),
        kind: SchemaKind::List,
        fields: vec![
            FieldSchema::new("language", "Language", FieldType::Text).required(),
            FieldSchema::new("proficiency", "Proficiency", FieldType::Select),
        ],
        ui_config: ui("globe", Some("Language")),
        ai_context: None,
        role_map: Some(
            RoleMap::new()
                .with("language", one(FieldRole::Title))
                .with("proficiency", one(FieldRole::Level)),
        ),
        legacy_equivalent: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_ids_are_unique() {
        let schemas = builtin_schemas();
        let ids: HashSet<_> = schemas.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), schemas.len());
    }

    #[test]
    fn test_role_maps_only_reference_declared_fields() {
        for schema in builtin_schemas() {
            if let Some(map) = &schema.role_map {
                for key in map.field_mappings.keys() {
                    assert!(schema.declares(key), "{}: {} not declared", schema.id, key);
                }
            }
        }
    }

    #[test]
    fn test_experience_description_has_hints() {
        let schema = experience();
        let field = schema.field("description").unwrap();
        assert_eq!(field.improvement_prompts().len(), DESCRIPTION_HINTS.len());
    }
}
