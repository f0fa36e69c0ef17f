use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::migration::{needs_migration_value, INITIAL_SCHEMA_VERSION};
use crate::models::section::{LegacySection, Section};

/// Contact and profile fields. Every named field defaults to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonalDetails {
    /// All populated keys as a JSON object, including unnamed extras.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "personal details serialized to a non-object: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AiOptimizationLevel {
    #[default]
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(rename = "lastAIReview", default)]
    pub last_ai_review: DateTime<Utc>,
    #[serde(default)]
    pub ai_optimization_level: AiOptimizationLevel,
}

/// Pre-dynamic document: fixed section types and no version marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    #[serde(default)]
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub sections: Vec<LegacySection>,
    #[serde(default)]
    pub template_id: String,
}

/// Versioned document whose sections may be dynamic or legacy pass-through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDocument {
    #[serde(default)]
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub template_id: String,
    #[serde(deserialize_with = "version_string")]
    pub schema_version: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl ExtendedDocument {
    /// A versioned document with no content.
    pub fn blank() -> Self {
        Self {
            personal_details: PersonalDetails::default(),
            sections: Vec::new(),
            template_id: String::new(),
            schema_version: INITIAL_SCHEMA_VERSION.to_string(),
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }
}

/// Accepts any scalar version marker; only its presence matters.
fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "schemaVersion must be a scalar, found {other}"
        ))),
    }
}

/// A document as loaded from storage. The presence of `schemaVersion`
/// decides which shape it is; a versioned document that does not fit the
/// extended shape is an error, never a legacy document.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResumeDocument {
    Extended(ExtendedDocument),
    Legacy(LegacyDocument),
}

impl<'de> Deserialize<'de> for ResumeDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if needs_migration_value(&value) {
            LegacyDocument::deserialize(value)
                .map(ResumeDocument::Legacy)
                .map_err(D::Error::custom)
        } else {
            ExtendedDocument::deserialize(value)
                .map(ResumeDocument::Extended)
                .map_err(D::Error::custom)
        }
    }
}

impl ResumeDocument {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn schema_version(&self) -> Option<&str> {
        match self {
            ResumeDocument::Extended(doc) => Some(&doc.schema_version),
            ResumeDocument::Legacy(_) => None,
        }
    }

    pub fn template_id(&self) -> &str {
        match self {
            ResumeDocument::Extended(doc) => &doc.template_id,
            ResumeDocument::Legacy(doc) => &doc.template_id,
        }
    }
}

impl From<LegacyDocument> for ResumeDocument {
    fn from(doc: LegacyDocument) -> Self {
        ResumeDocument::Legacy(doc)
    }
}

impl From<ExtendedDocument> for ResumeDocument {
    fn from(doc: ExtendedDocument) -> Self {
        ResumeDocument::Extended(doc)
    }
}
