//! Per-type field projection for legacy items.
//!
//! Known legacy types keep a fixed subset of properties, with missing ones
//! defaulted to an empty string. Any other type copies every property except
//! `id` verbatim.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::models::{FieldData, LegacyItem};

/// Projects a legacy item into dynamic field data.
pub type Projector = fn(&LegacyItem) -> FieldData;

const EXPERIENCE_FIELDS: &[&str] = &[
    "jobTitle",
    "company",
    "location",
    "startDate",
    "endDate",
    "description",
];
const EDUCATION_FIELDS: &[&str] = &[
    "degree",
    "school",
    "location",
    "startDate",
    "endDate",
    "description",
];
const SKILL_FIELDS: &[&str] = &["name", "level"];
const TEXT_FIELDS: &[&str] = &["content"];

fn pick(item: &LegacyItem, keys: &[&str]) -> FieldData {
    keys.iter()
        .map(|&key| {
            let value = match item.get(key) {
                None | Some(Value::Null) => Value::String(String::new()),
                Some(v) => v.clone(),
            };
            (key.to_string(), value)
        })
        .collect()
}

pub fn project_experience(item: &LegacyItem) -> FieldData {
    pick(item, EXPERIENCE_FIELDS)
}

pub fn project_education(item: &LegacyItem) -> FieldData {
    pick(item, EDUCATION_FIELDS)
}

pub fn project_skill(item: &LegacyItem) -> FieldData {
    pick(item, SKILL_FIELDS)
}

pub fn project_text(item: &LegacyItem) -> FieldData {
    pick(item, TEXT_FIELDS)
}

/// Default strategy for types without a dedicated projector.
pub fn project_passthrough(item: &LegacyItem) -> FieldData {
    item.iter()
        .filter(|(key, _)| key.as_str() != "id")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Legacy section type → projector, with pass-through as the fallback.
#[derive(Clone)]
pub struct ProjectorTable {
    projectors: HashMap<String, Projector>,
}

impl ProjectorTable {
    /// A table with no dedicated projectors: every type passes through.
    pub fn empty() -> Self {
        Self {
            projectors: HashMap::new(),
        }
    }

    pub fn register(&mut self, section_type: &str, projector: Projector) {
        self.projectors.insert(section_type.to_string(), projector);
    }

    pub fn has_projector(&self, section_type: &str) -> bool {
        self.projectors.contains_key(section_type)
    }

    pub fn project(&self, section_type: &str, item: &LegacyItem) -> FieldData {
        let projector = self
            .projectors
            .get(section_type)
            .copied()
            .unwrap_or(project_passthrough as Projector);
        projector(item)
    }
}

impl fmt::Debug for ProjectorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.projectors.keys().collect();
        types.sort();
        f.debug_struct("ProjectorTable").field("types", &types).finish()
    }
}

impl Default for ProjectorTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("experience", project_experience);
        table.register("education", project_education);
        table.register("skills", project_skill);
        table.register("summary", project_text);
        table.register("customText", project_text);
        table
    }
}
