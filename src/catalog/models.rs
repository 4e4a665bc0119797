use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Billing unit for a plan price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanUnit {
    #[serde(rename = "per_user_per_year")]
    PerUserPerYear,
    #[serde(rename = "per_organization_per_year")]
    PerOrganizationPerYear,
}

/// A priced tier offered by a service
///
/// Prices are annual amounts in yen (integer, no fractional unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    #[serde(rename = "planName")]
    pub plan_name: String,
    pub price: i64,
    pub unit: PlanUnit,
}

/// A named service with its plan list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub plans: Vec<ServicePlan>,
}

/// A tooling category grouping related services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName")]
    pub category_name: String,
    pub services: Vec<Service>,
}

/// Read-only price reference data, loaded once at startup
///
/// Wraps the catalog document: an ordered list of categories, each with an
/// ordered list of services and plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCatalog {
    categories: Vec<Category>,
}

impl PriceCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up the annual unit price for a (service, plan) pair.
    ///
    /// The scan covers ALL categories in document order and returns the
    /// first match; it is intentionally not scoped to the category the
    /// caller selected the service under. If two categories list the same
    /// service and plan names, the earlier category wins.
    pub fn price_for(&self, service_name: &str, plan_name: &str) -> Option<i64> {
        for category in &self.categories {
            if let Some(service) = category
                .services
                .iter()
                .find(|s| s.service_name == service_name)
            {
                if let Some(plan) = service.plans.iter().find(|p| p.plan_name == plan_name) {
                    return Some(plan.price);
                }
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Fallback plan per service, applied when the user does not know
/// their current plan
///
/// Values are not checked against the catalog at load time; a mapping to a
/// plan the service does not carry simply produces no price downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultPlanMap(HashMap<String, String>);

impl DefaultPlanMap {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self(map)
    }

    pub fn get(&self, service_name: &str) -> Option<&str> {
        self.0.get(service_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for DefaultPlanMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
