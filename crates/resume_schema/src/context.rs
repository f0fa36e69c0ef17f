//! Context Builder: composes the context string sent along with a
//! text-generation request for a field under edit.
//!
//! Every input is optional. Builder failures are logged and the item context
//! line is left out; this function never fails.

use tracing::warn;

use crate::models::{ExtendedDocument, FieldData};
use crate::registry::SchemaRegistry;

/// What the field editor knows when it asks for help.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextRequest<'a> {
    pub section_type: Option<&'a str>,
    pub field_id: Option<&'a str>,
    pub current_item: Option<&'a FieldData>,
    pub document: Option<&'a ExtendedDocument>,
    /// Caller-supplied description, used when no schema builder applies.
    pub current_item_context: Option<&'a str>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn build_ai_context(registry: &SchemaRegistry, request: &ContextRequest<'_>) -> String {
    let mut lines = Vec::new();

    if let Some(document) = request.document {
        if let Some(role) = non_empty(Some(document.personal_details.job_title.as_str())) {
            lines.push(format!("Target role: {role}"));
        }
    }

    let section_type = non_empty(request.section_type);
    let schema = section_type.and_then(|t| registry.get_section_schema(t));

    match (schema, section_type) {
        (Some(schema), _) => {
            lines.push(format!("Section: {} ({})", schema.name, schema.id));
            if let Some(focus) = non_empty(schema.section_description()) {
                lines.push(format!("Section focus: {focus}"));
            }
        }
        (None, Some(raw)) => lines.push(format!("Section type: {raw}")),
        (None, None) => {}
    }

    if let Some(field_id) = non_empty(request.field_id) {
        match schema.and_then(|s| s.field(field_id)) {
            Some(field) => {
                lines.push(format!("Field: {}", field.label));
                let hints = field.improvement_prompts();
                if !hints.is_empty() {
                    lines.push(format!("Improvement hints: {}", hints.join("; ")));
                }
            }
            None => lines.push(format!("Field: {field_id}")),
        }
    }

    let builder = schema.and_then(|s| s.item_context_builder());
    if let Some(item_context) = item_context(registry, request, builder) {
        lines.push(format!("Item context: {item_context}"));
    }

    lines.join("\n")
}

fn item_context(
    registry: &SchemaRegistry,
    request: &ContextRequest<'_>,
    builder: Option<&str>,
) -> Option<String> {
    let fallback = || non_empty(request.current_item_context).map(str::to_string);

    let (Some(builder), Some(item)) = (builder, request.current_item) else {
        return fallback();
    };

    let blank;
    let document = match request.document {
        Some(document) => document,
        None => {
            blank = ExtendedDocument::blank();
            &blank
        }
    };

    match registry.build_context(builder, item, document) {
        Ok(context) => non_empty(Some(context.as_str())).map(str::to_string),
        Err(e) => {
            warn!("Item context omitted: {e}");
            None
        }
    }
}
