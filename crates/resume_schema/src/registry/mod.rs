//! Schema Registry: catalog of section schemas and named item-context builders.
//!
//! Constructed once by the application and shared read-only afterwards
//! (typically behind an `Arc`). Lookups are exact string matches; a miss is
//! `None`, never an error.

pub mod builders;
pub mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{BuilderFailure, ContextBuildError, RegistryError};
use crate::models::{ExtendedDocument, FieldData, FieldSchema, RoleMap, SectionSchema};

/// Turns one item's data, plus the whole document for cross-section context,
/// into a text snippet for text-generation requests.
///
/// Held by the registry as `Arc<dyn ItemContextBuilder>`; plain closures work too.
pub trait ItemContextBuilder: Send + Sync {
    fn build(&self, item: &FieldData, document: &ExtendedDocument)
        -> Result<String, BuilderFailure>;
}

impl<F> ItemContextBuilder for F
where
    F: Fn(&FieldData, &ExtendedDocument) -> Result<String, BuilderFailure> + Send + Sync,
{
    fn build(
        &self,
        item: &FieldData,
        document: &ExtendedDocument,
    ) -> Result<String, BuilderFailure> {
        self(item, document)
    }
}

#[derive(Default)]
pub struct SchemaRegistry {
    schemas: Vec<SectionSchema>,
    index: HashMap<String, usize>,
    builders: HashMap<String, Arc<dyn ItemContextBuilder>>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard resume catalog with its context builders.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for schema in builtin::builtin_schemas() {
            registry.register(schema)?;
        }
        builders::register_builtin_builders(&mut registry);
        debug!(
            schemas = registry.schemas.len(),
            builders = registry.builders.len(),
            "Built-in schema registry constructed"
        );
        Ok(registry)
    }

    /// Adds a schema. Schemas are immutable once registered, so a second
    /// schema with the same id is rejected.
    pub fn register(&mut self, schema: SectionSchema) -> Result<(), RegistryError> {
        if schema.id.is_empty() {
            return Err(RegistryError::EmptySchemaId);
        }
        if self.index.contains_key(&schema.id) {
            return Err(RegistryError::DuplicateSchema(schema.id));
        }
        self.index.insert(schema.id.clone(), self.schemas.len());
        self.schemas.push(schema);
        Ok(())
    }

    /// Adds or replaces the builder registered under `name`.
    pub fn register_builder(&mut self, name: &str, builder: impl ItemContextBuilder + 'static) {
        self.builders.insert(name.to_string(), Arc::new(builder));
    }

    pub fn get_section_schema(&self, schema_id: &str) -> Option<&SectionSchema> {
        self.index.get(schema_id).map(|&i| &self.schemas[i])
    }

    pub fn get_field_schema(&self, schema_id: &str, field_id: &str) -> Option<&FieldSchema> {
        self.get_section_schema(schema_id)
            .and_then(|schema| schema.field(field_id))
    }

    /// All schemas in registration order.
    pub fn get_all_section_schemas(&self) -> &[SectionSchema] {
        &self.schemas
    }

    pub fn role_map(&self, schema_id: &str) -> Option<&RoleMap> {
        self.get_section_schema(schema_id)
            .and_then(|schema| schema.role_map.as_ref())
    }

    /// The first schema, in registration order, whose item context names
    /// `builder_ref`.
    pub fn schema_for_builder(&self, builder_ref: &str) -> Option<&SectionSchema> {
        self.schemas
            .iter()
            .find(|schema| schema.item_context_builder() == Some(builder_ref))
    }

    /// True iff a schema with this id exists and is flagged as standing in
    /// for the legacy section type of the same name.
    pub fn is_legacy_section_type(&self, section_type: &str) -> bool {
        self.get_section_schema(section_type)
            .is_some_and(|schema| schema.legacy_equivalent)
    }

    pub fn has_builder(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Runs the builder registered under `builder_ref`.
    pub fn build_context(
        &self,
        builder_ref: &str,
        item: &FieldData,
        document: &ExtendedDocument,
    ) -> Result<String, ContextBuildError> {
        let builder = self
            .builders
            .get(builder_ref)
            .ok_or_else(|| ContextBuildError::UnknownBuilder(builder_ref.to_string()))?;
        builder
            .build(item, document)
            .map_err(|failure| ContextBuildError::Builder {
                name: builder_ref.to_string(),
                message: failure.0,
            })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builders: Vec<_> = self.builders.keys().collect();
        builders.sort();
        f.debug_struct("SchemaRegistry")
            .field(
                "schemas",
                &self.schemas.iter().map(|s| &s.id).collect::<Vec<_>>(),
            )
            .field("builders", &builders)
            .finish()
    }
}
