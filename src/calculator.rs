//! Annual cost comparison against the fixed-price bundle.
//!
//! Pure functions only: the catalog, default-plan map, and bundle price
//! are injected, and every malformed or missing input degrades to a
//! skipped or unpriced line instead of an error. The public-facing form
//! must always produce a result.

use crate::catalog::{DefaultPlanMap, PriceCatalog};
use crate::models::{CostSummary, DiagnosisForm, SelectedService};
use serde::Serialize;

/// Sentinel: the user does not use this category.
pub const NOT_USED: &str = "利用していない";
/// Sentinel: the user does not know their current plan.
pub const PLAN_UNKNOWN: &str = "プランが分からない";
/// Sentinel: storage is an in-house server rather than a SaaS product.
pub const ON_PREMISE_SERVER: &str = "社内サーバー";

/// The eight surveyed categories, in the fixed order that line items are
/// produced in. Consumers display and store lines in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Groupware,
    VideoConference,
    BusinessChat,
    Storage,
    GenerativeAi,
    BiTool,
    CrmTool,
    NocodeTool,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 8] = [
        ServiceCategory::Groupware,
        ServiceCategory::VideoConference,
        ServiceCategory::BusinessChat,
        ServiceCategory::Storage,
        ServiceCategory::GenerativeAi,
        ServiceCategory::BiTool,
        ServiceCategory::CrmTool,
        ServiceCategory::NocodeTool,
    ];

    /// Category name as it appears in the catalog document and in
    /// persisted line items.
    pub fn display_name(self) -> &'static str {
        match self {
            ServiceCategory::Groupware => "グループウェア",
            ServiceCategory::VideoConference => "ビデオ会議",
            ServiceCategory::BusinessChat => "ビジネスチャット",
            ServiceCategory::Storage => "クラウドストレージ",
            ServiceCategory::GenerativeAi => "生成AI",
            ServiceCategory::BiTool => "BIツール",
            ServiceCategory::CrmTool => "CRMツール",
            ServiceCategory::NocodeTool => "ノーコード/ローコード",
        }
    }
}

/// How one category resolved during calculation.
///
/// `Unpriced` names the lookup-miss case explicitly: the user selected a
/// service but the (service, plan) pair has no catalog price, so the line
/// contributes nothing. The aggregate output is identical to the user
/// opting out, but callers can tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Category absent or set to the "not used" sentinel.
    NotUsed,
    /// Resolved to a priced line item.
    Priced(SelectedService),
    /// Selected, but no catalog price for the resolved pair.
    Unpriced {
        category: ServiceCategory,
        service_name: String,
        plan_name: String,
    },
}

/// Full result of one calculation: the aggregate summary plus the
/// per-category resolution trail, one entry per category in fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOutcome {
    pub summary: CostSummary,
    pub lines: Vec<LineOutcome>,
}

impl DiagnosisOutcome {
    /// Lines that were selected but found no catalog price.
    pub fn unpriced(&self) -> impl Iterator<Item = &LineOutcome> {
        self.lines
            .iter()
            .filter(|l| matches!(l, LineOutcome::Unpriced { .. }))
    }
}

/// Compute the annual cost comparison for one form submission.
///
/// Deterministic and infallible: identical inputs always produce an
/// identical outcome, and no input can make it fail.
pub fn calculate(
    form: &DiagnosisForm,
    catalog: &PriceCatalog,
    defaults: &DefaultPlanMap,
    bundle_price_per_user: i64,
) -> DiagnosisOutcome {
    let mut lines = Vec::with_capacity(ServiceCategory::ALL.len());
    let mut selected_services = Vec::new();
    let mut current_cost = 0i64;

    for category in ServiceCategory::ALL {
        let outcome = resolve_category(category, form, catalog, defaults);
        if let LineOutcome::Priced(line) = &outcome {
            current_cost += line.line_cost();
            selected_services.push(line.clone());
        }
        lines.push(outcome);
    }

    let gws_cost = bundle_price_per_user * form.employee_count;

    DiagnosisOutcome {
        summary: CostSummary {
            current_cost,
            gws_cost,
            savings: current_cost - gws_cost,
            selected_services,
            employee_count: form.employee_count,
        },
        lines,
    }
}

/// Resolve one category's (service, plan, licenses) triple to a line.
fn resolve_category(
    category: ServiceCategory,
    form: &DiagnosisForm,
    catalog: &PriceCatalog,
    defaults: &DefaultPlanMap,
) -> LineOutcome {
    let fields = form.category_fields(category);

    let service_name = match fields.service {
        Some(s) if !s.is_empty() && s != NOT_USED => s,
        _ => return LineOutcome::NotUsed,
    };

    // A zero or missing count falls back to the employee count.
    let license_count = fields
        .licenses
        .filter(|&n| n > 0)
        .unwrap_or(form.employee_count);

    let plan_name = if category == ServiceCategory::Storage && service_name == ON_PREMISE_SERVER {
        // In-house servers are priced by company size, not by the
        // user-entered plan or the purchase/lease figures on the form.
        on_premise_plan(form.employee_count).to_string()
    } else {
        match fields.plan {
            Some(p) if !p.is_empty() && p != PLAN_UNKNOWN => p.to_string(),
            _ => defaults.get(service_name).unwrap_or_default().to_string(),
        }
    };

    match catalog.price_for(service_name, &plan_name) {
        Some(price) => LineOutcome::Priced(SelectedService {
            category_name: category.display_name().to_string(),
            service_name: service_name.to_string(),
            plan_name,
            license_count,
            price,
        }),
        None => LineOutcome::Unpriced {
            category,
            service_name: service_name.to_string(),
            plan_name,
        },
    }
}

/// Seat-tier plan for an in-house server, derived from employee count.
pub fn on_premise_plan(employee_count: i64) -> &'static str {
    if employee_count <= 10 {
        "10名規模"
    } else if employee_count <= 20 {
        "20名規模"
    } else {
        "50名規模"
    }
}

/// Whether a signed savings amount counts as a cost reduction.
///
/// Strictly positive only: break-even reports as "not a reduction".
pub fn is_cost_reduction(savings: i64) -> bool {
    savings > 0
}

/// Render an amount with comma thousands grouping, ja-JP style.
///
/// No currency symbol; callers prepend one. Negative amounts keep the
/// leading sign.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    let first_group = digits.len() % 3;
    if first_group > 0 {
        grouped.push_str(&digits[..first_group]);
    }
    for chunk in digits[first_group..].as_bytes().chunks(3) {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push_str(std::str::from_utf8(chunk).unwrap_or(""));
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
