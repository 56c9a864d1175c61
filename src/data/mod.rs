//! Data module - billing export loading, typed records, session state

mod loader;
mod model;
mod session;

pub use loader::{ExportLoader, LoadedExport, LoaderError, REQUIRED_COLUMNS};
pub use model::{non_empty, ResourceRecord, TagStatus, TAG_FIELDS};
pub use session::{SessionData, TagEdit};
