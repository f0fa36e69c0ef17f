pub mod handlers;

use resume_schema::BoundedCache;

pub use handlers::MigrateResponse;

/// Migration results keyed by the stable hash of the submitted legacy document.
pub type MigrationCache = BoundedCache<String, MigrateResponse>;
