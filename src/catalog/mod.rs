pub mod loader;
pub mod models;

pub use loader::{load_catalog, load_default_plans};
pub use models::{Category, DefaultPlanMap, PlanUnit, PriceCatalog, Service, ServicePlan};
