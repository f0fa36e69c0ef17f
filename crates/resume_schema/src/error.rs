use thiserror::Error;

/// Errors raised while populating a [`crate::SchemaRegistry`].
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Section schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("Section schema id must not be empty")]
    EmptySchemaId,
}

/// Failure to produce an item context string.
///
/// Callers treat this as non-fatal: log it and continue without the context.
#[derive(Debug, Error, PartialEq)]
pub enum ContextBuildError {
    #[error("No context builder registered under '{0}'")]
    UnknownBuilder(String),

    #[error("Context builder '{name}' failed: {message}")]
    Builder { name: String, message: String },
}

/// First structural difference found between a legacy document and its
/// migrated counterpart.
#[derive(Debug, Error, PartialEq)]
pub enum EquivalenceError {
    #[error("Migrated document has no schemaVersion")]
    MissingSchemaVersion,

    #[error("Section count differs: original {original}, migrated {migrated}")]
    SectionCount { original: usize, migrated: usize },

    #[error("templateId differs: original '{original}', migrated '{migrated}'")]
    TemplateId { original: String, migrated: String },

    #[error("personalDetails.{0} differs")]
    PersonalDetail(String),

    #[error("Section {index}: {property} differs")]
    Section { index: usize, property: &'static str },

    #[error("Could not compare documents: {0}")]
    Comparison(String),
}

/// Failure reported by an individual context builder.
#[derive(Debug, Error, PartialEq)]
#[error("{0}")]
pub struct BuilderFailure(pub String);
