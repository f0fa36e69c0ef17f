use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a section holds one block of content or a list of items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    Single,
    List,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Textarea,
    RichText,
    Date,
    Email,
    Url,
    Select,
    Tags,
    Number,
}

/// Semantic category of a field, independent of how its key is spelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum FieldRole {
    Title,
    Organization,
    Description,
    StartDate,
    EndDate,
    Location,
    DateRange,
    Url,
    Skills,
    Level,
    Identifier,
    Other,
}

impl FieldRole {
    pub const ALL: [FieldRole; 12] = [
        FieldRole::Title,
        FieldRole::Organization,
        FieldRole::Description,
        FieldRole::StartDate,
        FieldRole::EndDate,
        FieldRole::Location,
        FieldRole::DateRange,
        FieldRole::Url,
        FieldRole::Skills,
        FieldRole::Level,
        FieldRole::Identifier,
        FieldRole::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Title => "title",
            FieldRole::Organization => "organization",
            FieldRole::Description => "description",
            FieldRole::StartDate => "startDate",
            FieldRole::EndDate => "endDate",
            FieldRole::Location => "location",
            FieldRole::DateRange => "dateRange",
            FieldRole::Url => "url",
            FieldRole::Skills => "skills",
            FieldRole::Level => "level",
            FieldRole::Identifier => "identifier",
            FieldRole::Other => "other",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role map entry: one role, or several for fields that carry more than one meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleMapping {
    One(FieldRole),
    Many(Vec<FieldRole>),
}

impl RoleMapping {
    pub fn includes(&self, role: FieldRole) -> bool {
        match self {
            RoleMapping::One(r) => *r == role,
            RoleMapping::Many(roles) => roles.contains(&role),
        }
    }

    pub fn roles(&self) -> &[FieldRole] {
        match self {
            RoleMapping::One(r) => std::slice::from_ref(r),
            RoleMapping::Many(roles) => roles,
        }
    }
}

/// Per-schema declaration of which field keys carry which roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleMap {
    pub field_mappings: BTreeMap<String, RoleMapping>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper used by the built-in catalog.
    pub fn with(mut self, key: &str, mapping: RoleMapping) -> Self {
        self.field_mappings.insert(key.to_string(), mapping);
        self
    }

    pub fn maps(&self, key: &str, role: FieldRole) -> bool {
        self.field_mappings
            .get(key)
            .is_some_and(|mapping| mapping.includes(role))
    }

    /// True if `key` is mapped to any role other than [`FieldRole::Other`].
    pub fn claims(&self, key: &str) -> bool {
        self.field_mappings
            .get(key)
            .is_some_and(|mapping| mapping.roles().iter().any(|r| *r != FieldRole::Other))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiHints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvement_prompts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_hints: Option<AiHints>,
}

impl FieldSchema {
    pub fn new(key: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            placeholder: None,
            ai_hints: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn hints(mut self, prompts: &[&str]) -> Self {
        self.ai_hints = Some(AiHints {
            improvement_prompts: prompts.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    pub fn improvement_prompts(&self) -> &[String] {
        self.ai_hints
            .as_ref()
            .map(|h| h.improvement_prompts.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_label: Option<String>,
    #[serde(default)]
    pub allow_reorder: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiContextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_description: Option<String>,
    /// Name of a builder registered with the schema registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_context_builder: Option<String>,
}

/// Registry entry describing a section's fields and semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionSchema {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    pub fields: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_config: Option<UiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_context: Option<AiContextConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_map: Option<RoleMap>,
    /// Set when `id` doubles as a legacy section `type` the migrator may convert.
    #[serde(default)]
    pub legacy_equivalent: bool,
}

impl SectionSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn declares(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn item_context_builder(&self) -> Option<&str> {
        self.ai_context
            .as_ref()
            .and_then(|ctx| ctx.item_context_builder.as_deref())
    }

    pub fn section_description(&self) -> Option<&str> {
        self.ai_context
            .as_ref()
            .and_then(|ctx| ctx.section_description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_mapping_accepts_single_or_many() {
        let map: RoleMap = serde_json::from_value(json!({
            "fieldMappings": {
                "jobTitle": "title",
                "period": ["dateRange", "other"]
            }
        }))
        .unwrap();

        assert!(map.maps("jobTitle", FieldRole::Title));
        assert!(map.maps("period", FieldRole::DateRange));
        assert!(map.maps("period", FieldRole::Other));
        assert!(!map.maps("jobTitle", FieldRole::Organization));
        assert!(!map.maps("missing", FieldRole::Title));
    }

    #[test]
    fn test_claims_ignores_other_only_mappings() {
        let map = RoleMap::new()
            .with("notes", RoleMapping::One(FieldRole::Other))
            .with("employer", RoleMapping::One(FieldRole::Organization));
        assert!(!map.claims("notes"));
        assert!(map.claims("employer"));
    }

    #[test]
    fn test_field_schema_serializes_type_key() {
        let field = FieldSchema::new("startDate", "Start date", FieldType::Date);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "date");
        assert_eq!(value["key"], "startDate");
        assert!(value.get("aiHints").is_none());
    }
}
