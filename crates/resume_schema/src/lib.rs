//! Dynamic section schemas for resume documents.
//!
//! The registry describes what a section and its fields are. Legacy documents
//! (fixed section types, no `schemaVersion`) are migrated into the extended
//! format, where each section references a registered schema. The role
//! resolver and context builder let generic code pull meaningful values
//! (a title, a date range) out of arbitrarily shaped item data.
//!
//! Everything in this crate is synchronous and performs no I/O.

pub mod cache;
pub mod context;
pub mod error;
pub mod hash;
pub mod migration;
pub mod models;
pub mod registry;
pub mod roles;

pub use cache::BoundedCache;
pub use context::{build_ai_context, ContextRequest};
pub use error::{ContextBuildError, EquivalenceError, RegistryError};
pub use hash::stable_hash;
pub use migration::equivalence::{check_equivalence, validate_migration};
pub use migration::{needs_migration, MigrationReport, Migrator, INITIAL_SCHEMA_VERSION};
pub use models::{
    AiOptimizationLevel, DocumentMetadata, DynamicItem, DynamicSection, ExtendedDocument,
    FieldData, ItemMetadata, LegacyDocument, LegacyItem, LegacySection, PersonalDetails,
    ResumeDocument, Section, SectionMetadata,
};
pub use registry::{ItemContextBuilder, SchemaRegistry};
pub use roles::{
    get_item_date_range, get_item_description, get_item_organization, get_item_title,
    pick_field_by_role, pick_fields_by_role, Field,
};
