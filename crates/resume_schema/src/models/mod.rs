pub mod document;
pub mod field_data;
pub mod schema;
pub mod section;

pub use document::{
    AiOptimizationLevel, DocumentMetadata, ExtendedDocument, LegacyDocument, PersonalDetails,
    ResumeDocument,
};
pub use field_data::{FieldData, ItemDataView};
pub use schema::{
    AiContextConfig, AiHints, FieldRole, FieldSchema, FieldType, RoleMap, RoleMapping,
    SchemaKind, SectionSchema, UiConfig,
};
pub use section::{
    DynamicItem, DynamicSection, ItemMetadata, LegacyItem, LegacySection, Section,
    SectionMetadata,
};
