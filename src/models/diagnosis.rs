use serde::{Deserialize, Serialize};

/// One resolved line item contributing to the current annual cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedService {
    pub category_name: String,
    pub service_name: String,
    pub plan_name: String,
    pub license_count: i64,
    /// Annual unit price in yen
    pub price: i64,
}

impl SelectedService {
    /// Annual cost of this line (unit price × licenses).
    pub fn line_cost(&self) -> i64 {
        self.price * self.license_count
    }
}

/// Aggregate cost comparison for one submission
///
/// `savings` is signed: positive means switching to the bundle is cheaper
/// than the current stack. Line order follows the fixed category sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub current_cost: i64,
    pub gws_cost: i64,
    pub savings: i64,
    pub selected_services: Vec<SelectedService>,
    pub employee_count: i64,
}

/// A diagnosis result flattened for persistence
///
/// Column shape mirrors the `diagnosis_results` table; field names are
/// snake_case on the wire, matching the original save payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub company_name: String,
    pub employee_count: i64,
    pub email: String,
    pub name: String,
    pub current_services: Vec<SelectedService>,
    pub current_cost: i64,
    pub gws_cost: i64,
    pub savings: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_comparison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
