mod loader;

pub use loader::{CatalogLoaderError, PlanCatalogLoader, PlanRecord};
