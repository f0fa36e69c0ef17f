use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::field_data::FieldData;

/// A loosely-typed legacy item. Its shape is implied by the section `type`.
pub type LegacyItem = Map<String, Value>;

/// Pre-dynamic section with a hard-coded `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacySection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub items: Vec<LegacyItem>,
    /// Properties this model does not name; kept so pass-through is lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionMetadata {
    #[serde(default)]
    pub custom_title: bool,
    #[serde(default)]
    pub ai_optimized: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub ai_generated: bool,
}

impl ItemMetadata {
    pub fn stamped(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            updated_at: at,
            ai_generated: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicItem {
    pub id: String,
    pub schema_id: String,
    #[serde(default)]
    pub data: FieldData,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

/// Section whose structure comes from a registered schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSection {
    pub id: String,
    pub schema_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<DynamicItem>,
    #[serde(default)]
    pub metadata: SectionMetadata,
}

/// A section of an extended document: schema-aware, or carried over unchanged.
///
/// Dynamic sections are recognised by their `schemaId`; anything else with a
/// `type` is a legacy pass-through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Section {
    Dynamic(DynamicSection),
    Legacy(LegacySection),
}

impl Section {
    pub fn id(&self) -> &str {
        match self {
            Section::Dynamic(s) => &s.id,
            Section::Legacy(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Section::Dynamic(s) => &s.title,
            Section::Legacy(s) => &s.title,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Section::Dynamic(s) => s.visible,
            Section::Legacy(s) => s.visible,
        }
    }

    /// The schema id for dynamic sections, the legacy `type` otherwise.
    pub fn type_id(&self) -> &str {
        match self {
            Section::Dynamic(s) => &s.schema_id,
            Section::Legacy(s) => &s.section_type,
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicSection> {
        match self {
            Section::Dynamic(s) => Some(s),
            Section::Legacy(_) => None,
        }
    }

    pub fn as_legacy(&self) -> Option<&LegacySection> {
        match self {
            Section::Legacy(s) => Some(s),
            Section::Dynamic(_) => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Section::Dynamic(_))
    }
}
