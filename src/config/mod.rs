pub mod app;
pub mod catalog;

pub use app::AnalysisConfig;
pub use catalog::{ReferenceCatalog, BUILTIN_CATALOG_VERSION};
