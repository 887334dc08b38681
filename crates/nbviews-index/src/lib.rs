// SQLite-backed storage for notebook views
// The database is the durable copy; NotebookViewsStore holds pending edits until commit

mod db;
mod error;
mod queries;
mod records;
mod schema;
mod store;
mod views_store;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::{NotebookRecord, NotebookSummary};
pub use schema::SCHEMA_VERSION;
pub use store::ViewExtensionStore;
pub use views_store::NotebookViewsStore;
