//! Role resolution: finds the field that plays a semantic role in an item.
//!
//! Resolution order, which must not be reordered:
//! 1. Declared role map, scanning the item's fields in stored order.
//! 2. Legacy heuristic table of conventional key spellings.
//! 3. For [`FieldRole::Other`]: the first field no other role claims.
//!
//! A miss is never an error: `None` or an empty `Vec`.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::models::{FieldData, FieldRole, RoleMap};

/// Conventional key spellings per role, used when no role map entry matches.
const LEGACY_ROLE_KEYS: &[(FieldRole, &[&str])] = &[
    (
        FieldRole::Title,
        &["jobTitle", "position", "role", "degree", "title", "name"],
    ),
    (
        FieldRole::Organization,
        &[
            "company",
            "employer",
            "organization",
            "institution",
            "school",
            "university",
            "issuer",
        ],
    ),
    (
        FieldRole::Description,
        &["description", "summary", "content", "details"],
    ),
    (FieldRole::StartDate, &["startDate", "from", "start"]),
    (FieldRole::EndDate, &["endDate", "to", "end"]),
    (FieldRole::Location, &["location", "city", "place"]),
    (
        FieldRole::DateRange,
        &["dateRange", "dates", "period", "duration"],
    ),
    (FieldRole::Url, &["url", "link", "website"]),
    (FieldRole::Skills, &["skills", "keywords", "technologies"]),
    (FieldRole::Level, &["level", "proficiency"]),
    (FieldRole::Identifier, &["credentialId", "identifier"]),
];

/// A field of an item: its key and stored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}

impl Field<'_> {
    pub fn text(&self) -> String {
        value_text(self.value)
    }
}

pub fn legacy_keys_for(role: FieldRole) -> &'static [&'static str] {
    LEGACY_ROLE_KEYS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

/// Returns the first field of `item` that plays `role`.
pub fn pick_field_by_role<'a>(
    item: &'a FieldData,
    role: FieldRole,
    role_map: Option<&RoleMap>,
) -> Option<Field<'a>> {
    if let Some(map) = role_map {
        if let Some(field) = fields(item).find(|f| map.maps(f.key, role)) {
            return Some(field);
        }
    }

    if role == FieldRole::Other {
        let claimed = claimed_keys(role_map);
        return fields(item).find(|f| !claimed.contains(f.key));
    }

    let keys = legacy_keys_for(role);
    fields(item).find(|f| keys.contains(&f.key))
}

/// Returns every field of `item` that plays `role`, in stored order.
///
/// Falls through the same stages as [`pick_field_by_role`], stopping at the
/// first stage that yields any field.
pub fn pick_fields_by_role<'a>(
    item: &'a FieldData,
    role: FieldRole,
    role_map: Option<&RoleMap>,
) -> Vec<Field<'a>> {
    if let Some(map) = role_map {
        let mapped: Vec<_> = fields(item).filter(|f| map.maps(f.key, role)).collect();
        if !mapped.is_empty() {
            return mapped;
        }
    }

    if role == FieldRole::Other {
        let claimed = claimed_keys(role_map);
        return fields(item).filter(|f| !claimed.contains(f.key)).collect();
    }

    let keys = legacy_keys_for(role);
    fields(item).filter(|f| keys.contains(&f.key)).collect()
}

/// Keys owned by some role other than `other`: role map claims plus every
/// heuristic spelling, whether or not that role matched on this item.
fn claimed_keys(role_map: Option<&RoleMap>) -> HashSet<&str> {
    let mut claimed: HashSet<&str> = LEGACY_ROLE_KEYS
        .iter()
        .flat_map(|(_, keys)| keys.iter().copied())
        .collect();
    if let Some(map) = role_map {
        claimed.extend(
            map.field_mappings
                .keys()
                .filter(|k| map.claims(k))
                .map(String::as_str),
        );
    }
    claimed
}

fn fields(item: &FieldData) -> impl Iterator<Item = Field<'_>> {
    item.iter().map(|(key, value)| Field { key, value })
}

/// Renders a field value as display text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn role_text(item: &FieldData, role: FieldRole, role_map: Option<&RoleMap>) -> String {
    pick_field_by_role(item, role, role_map)
        .map(|f| f.text())
        .unwrap_or_default()
}

pub fn get_item_title(item: &FieldData, role_map: Option<&RoleMap>) -> String {
    role_text(item, FieldRole::Title, role_map)
}

pub fn get_item_organization(item: &FieldData, role_map: Option<&RoleMap>) -> String {
    role_text(item, FieldRole::Organization, role_map)
}

pub fn get_item_description(item: &FieldData, role_map: Option<&RoleMap>) -> String {
    role_text(item, FieldRole::Description, role_map)
}

/// A `dateRange` field wins; otherwise start and end are combined, with an
/// open end shown as "Present". Empty values count as absent.
pub fn get_item_date_range(item: &FieldData, role_map: Option<&RoleMap>) -> String {
    let range = role_text(item, FieldRole::DateRange, role_map);
    if !range.trim().is_empty() {
        return range;
    }

    let start = role_text(item, FieldRole::StartDate, role_map);
    let end = role_text(item, FieldRole::EndDate, role_map);
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => format!("{start} - Present"),
        (true, false) => end,
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleMapping;
    use serde_json::json;

    fn item(value: Value) -> FieldData {
        serde_json::from_value(value).unwrap()
    }

    fn map(entries: &[(&str, FieldRole)]) -> RoleMap {
        entries.iter().fold(RoleMap::new(), |m, (k, r)| {
            m.with(k, RoleMapping::One(*r))
        })
    }

    #[test]
    fn test_role_map_beats_heuristic() {
        let data = item(json!({ "title": "Ignored", "jobTitle": "Engineer" }));
        let roles = map(&[("jobTitle", FieldRole::Title)]);
        let field = pick_field_by_role(&data, FieldRole::Title, Some(&roles)).unwrap();
        assert_eq!(field.key, "jobTitle");
        assert_eq!(field.text(), "Engineer");
    }

    #[test]
    fn test_role_map_match_follows_item_order() {
        let data = item(json!({ "b": "second", "a": "first" }));
        let roles = map(&[("a", FieldRole::Title), ("b", FieldRole::Title)]);
        assert_eq!(
            pick_field_by_role(&data, FieldRole::Title, Some(&roles)).unwrap().key,
            "b"
        );
    }

    #[test]
    fn test_heuristic_used_without_role_map() {
        let data = item(json!({ "description": "x", "company": "Acme" }));
        let field = pick_field_by_role(&data, FieldRole::Organization, None).unwrap();
        assert_eq!(field.key, "company");
    }

    #[test]
    fn test_heuristic_used_when_role_map_has_no_match() {
        let data = item(json!({ "employer": "Acme" }));
        let roles = map(&[("jobTitle", FieldRole::Title)]);
        let field = pick_field_by_role(&data, FieldRole::Organization, Some(&roles)).unwrap();
        assert_eq!(field.key, "employer");
    }

    #[test]
    fn test_multi_valued_mapping_matches_each_role() {
        let data = item(json!({ "period": "2019 - 2021" }));
        let roles = RoleMap::new().with(
            "period",
            RoleMapping::Many(vec![FieldRole::DateRange, FieldRole::Description]),
        );
        assert!(pick_field_by_role(&data, FieldRole::DateRange, Some(&roles)).is_some());
        assert!(pick_field_by_role(&data, FieldRole::Description, Some(&roles)).is_some());
    }

    #[test]
    fn test_no_match_is_none_not_error() {
        let data = item(json!({ "foo": "bar" }));
        assert!(pick_field_by_role(&data, FieldRole::Url, None).is_none());
        assert!(pick_fields_by_role(&data, FieldRole::Url, None).is_empty());
    }

    #[test]
    fn test_plural_collects_all_mapped_fields() {
        let data = item(json!({ "frontend": "React", "name": "x", "backend": "Rust" }));
        let roles = map(&[("frontend", FieldRole::Skills), ("backend", FieldRole::Skills)]);
        let keys: Vec<_> = pick_fields_by_role(&data, FieldRole::Skills, Some(&roles))
            .iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(keys, vec!["frontend", "backend"]);
    }

    #[test]
    fn test_other_is_first_unclaimed_field() {
        let data = item(json!({ "jobTitle": "Dev", "company": "Acme", "hobby": "chess" }));
        let field = pick_field_by_role(&data, FieldRole::Other, None).unwrap();
        assert_eq!(field.key, "hobby");
    }

    #[test]
    fn test_other_excludes_heuristic_keys_even_when_role_unmatched() {
        // `company` stays excluded even though no organization role is in play.
        let data = item(json!({ "company": "Acme" }));
        assert!(pick_field_by_role(&data, FieldRole::Other, None).is_none());
    }

    #[test]
    fn test_other_excludes_role_map_claims() {
        let data = item(json!({ "headline": "Lead", "notes": "n/a" }));
        let roles = map(&[("headline", FieldRole::Title)]);
        let field = pick_field_by_role(&data, FieldRole::Other, Some(&roles)).unwrap();
        assert_eq!(field.key, "notes");
    }

    #[test]
    fn test_date_range_both_ends() {
        let data = item(json!({ "startDate": "2020", "endDate": "2022" }));
        assert_eq!(get_item_date_range(&data, None), "2020 - 2022");
    }

    #[test]
    fn test_date_range_open_end_is_present() {
        let data = item(json!({ "startDate": "2020", "endDate": "" }));
        assert_eq!(get_item_date_range(&data, None), "2020 - Present");
    }

    #[test]
    fn test_date_range_end_only() {
        let data = item(json!({ "endDate": "2022" }));
        assert_eq!(get_item_date_range(&data, None), "2022");
    }

    #[test]
    fn test_date_range_empty_item() {
        assert_eq!(get_item_date_range(&FieldData::new(), None), "");
    }

    #[test]
    fn test_date_range_field_wins() {
        let data = item(json!({ "startDate": "2020", "dateRange": "Summer 2019" }));
        assert_eq!(get_item_date_range(&data, None), "Summer 2019");
    }

    #[test]
    fn test_title_and_organization_helpers() {
        let data = item(json!({ "degree": "BSc", "school": "MIT" }));
        assert_eq!(get_item_title(&data, None), "BSc");
        assert_eq!(get_item_organization(&data, None), "MIT");
        assert_eq!(get_item_description(&data, None), "");
    }

    #[test]
    fn test_value_text_joins_arrays() {
        assert_eq!(value_text(&json!(["Rust", "Go", ""])), "Rust, Go");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&Value::Null), "");
    }
}
