use crate::catalog::models::{DefaultPlanMap, PriceCatalog};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Load the price catalog document from a JSON file.
///
/// The document is an ordered list of
/// `{categoryName, services: [{serviceName, plans: [{planName, price, unit}]}]}`
/// objects. Duplicate service names within a category or plan names within a
/// service violate the catalog invariant; they are reported but tolerated,
/// since lookups take the first match anyway.
pub fn load_catalog(path: &Path) -> Result<PriceCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read price catalog: {}", path.display()))?;

    let catalog: PriceCatalog = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse price catalog: {}", path.display()))?;

    if catalog.is_empty() {
        warn!("Price catalog {} contains no categories", path.display());
    }

    check_name_invariants(&catalog);

    let service_count: usize = catalog
        .categories()
        .iter()
        .map(|c| c.services.len())
        .sum();
    info!(
        "Loaded price catalog: {} categories, {} services",
        catalog.categories().len(),
        service_count
    );

    Ok(catalog)
}

/// Load the service-name → default-plan-name mapping from a JSON file.
///
/// Values are not validated against the catalog: a mapping to a missing
/// plan yields "no price found" at calculation time, same as the original
/// document behaved.
pub fn load_default_plans(path: &Path) -> Result<DefaultPlanMap> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read default plans: {}", path.display()))?;

    let defaults: DefaultPlanMap = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse default plans: {}", path.display()))?;

    info!("Loaded {} default plan mappings", defaults.len());
    Ok(defaults)
}

fn check_name_invariants(catalog: &PriceCatalog) {
    for category in catalog.categories() {
        let mut seen_services = HashSet::new();
        for service in &category.services {
            if !seen_services.insert(service.service_name.as_str()) {
                warn!(
                    "Duplicate service '{}' in category '{}'",
                    service.service_name, category.category_name
                );
            }

            let mut seen_plans = HashSet::new();
            for plan in &service.plans {
                if !seen_plans.insert(plan.plan_name.as_str()) {
                    warn!(
                        "Duplicate plan '{}' under service '{}'",
                        plan.plan_name, service.service_name
                    );
                }
            }
        }
    }
}
