use crate::calculator::ServiceCategory;
use serde::{Deserialize, Serialize};

/// How an in-house server is financed
///
/// Captured by the form for the on-premises paths but not consumed by the
/// cost calculation, which substitutes a fixed seat-tiered list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Purchase,
    Lease,
}

/// One diagnosis form submission
///
/// Every category field is optional: the form offers a "not used" choice
/// and the UI enforces progression, so absence and the sentinel both mean
/// the category contributes nothing. Field names follow the original JSON
/// wire format (camelCase).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisForm {
    // Step 1: groupware
    pub groupware: Option<String>,
    pub groupware_plan: Option<String>,
    pub groupware_licenses: Option<i64>,

    // Groupware in-house server sub-model (typed, unused by the calculator)
    pub groupware_payment_method: Option<PaymentMethod>,
    pub groupware_purchase_cost: Option<i64>,
    pub groupware_replace_years: Option<i64>,
    pub groupware_lease_cost: Option<i64>,

    // Step 2: communication and storage
    pub video_conference: Option<String>,
    pub video_conference_plan: Option<String>,
    pub video_conference_licenses: Option<i64>,

    pub business_chat: Option<String>,
    pub business_chat_plan: Option<String>,
    pub business_chat_licenses: Option<i64>,

    pub storage: Option<String>,
    pub storage_plan: Option<String>,
    pub storage_licenses: Option<i64>,

    // Storage in-house server sub-model (typed, unused by the calculator)
    pub storage_payment_method: Option<PaymentMethod>,
    pub storage_purchase_cost: Option<i64>,
    pub storage_replace_years: Option<i64>,
    pub storage_lease_cost: Option<i64>,

    // Step 2: business tools
    pub ai: Option<String>,
    pub ai_plan: Option<String>,
    pub ai_licenses: Option<i64>,

    pub bi_tool: Option<String>,
    pub bi_tool_plan: Option<String>,
    pub bi_tool_licenses: Option<i64>,

    pub crm_tool: Option<String>,
    pub crm_tool_plan: Option<String>,
    pub crm_tool_licenses: Option<i64>,

    pub nocode_tool: Option<String>,
    pub nocode_tool_plan: Option<String>,
    pub nocode_tool_licenses: Option<i64>,

    // Step 3: contact information
    pub company_name: String,
    pub employee_count: i64,
    pub name: String,
    pub email: String,

    // Step 4: satisfaction
    pub satisfaction: Option<String>,
}

/// The (service, plan, licenses) triple for one category
#[derive(Debug, Clone, Copy)]
pub struct CategoryFields<'a> {
    pub service: Option<&'a str>,
    pub plan: Option<&'a str>,
    pub licenses: Option<i64>,
}

impl DiagnosisForm {
    /// Project the form onto a single category's fields.
    pub fn category_fields(&self, category: ServiceCategory) -> CategoryFields<'_> {
        let (service, plan, licenses) = match category {
            ServiceCategory::Groupware => {
                (&self.groupware, &self.groupware_plan, self.groupware_licenses)
            }
            ServiceCategory::VideoConference => (
                &self.video_conference,
                &self.video_conference_plan,
                self.video_conference_licenses,
            ),
            ServiceCategory::BusinessChat => (
                &self.business_chat,
                &self.business_chat_plan,
                self.business_chat_licenses,
            ),
            ServiceCategory::Storage => (&self.storage, &self.storage_plan, self.storage_licenses),
            ServiceCategory::GenerativeAi => (&self.ai, &self.ai_plan, self.ai_licenses),
            ServiceCategory::BiTool => (&self.bi_tool, &self.bi_tool_plan, self.bi_tool_licenses),
            ServiceCategory::CrmTool => {
                (&self.crm_tool, &self.crm_tool_plan, self.crm_tool_licenses)
            }
            ServiceCategory::NocodeTool => (
                &self.nocode_tool,
                &self.nocode_tool_plan,
                self.nocode_tool_licenses,
            ),
        };

        CategoryFields {
            service: service.as_deref(),
            plan: plan.as_deref(),
            licenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_wire_format() {
        let json = r#"{
            "groupware": "Microsoft 365",
            "groupwarePlan": "Business Basic",
            "groupwareLicenses": 25,
            "videoConference": "利用していない",
            "storagePaymentMethod": "lease",
            "storageLeaseCost": 300000,
            "companyName": "株式会社テスト",
            "employeeCount": 30,
            "name": "山田太郎",
            "email": "taro@example.co.jp",
            "satisfaction": "やや不満"
        }"#;

        let form: DiagnosisForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.groupware.as_deref(), Some("Microsoft 365"));
        assert_eq!(form.groupware_licenses, Some(25));
        assert_eq!(form.storage_payment_method, Some(PaymentMethod::Lease));
        assert_eq!(form.employee_count, 30);
        assert_eq!(form.bi_tool, None);
    }

    #[test]
    fn test_category_fields_projection() {
        let form = DiagnosisForm {
            crm_tool: Some("Salesforce".to_string()),
            crm_tool_plan: Some("Professional".to_string()),
            crm_tool_licenses: Some(5),
            employee_count: 12,
            ..Default::default()
        };

        let fields = form.category_fields(ServiceCategory::CrmTool);
        assert_eq!(fields.service, Some("Salesforce"));
        assert_eq!(fields.plan, Some("Professional"));
        assert_eq!(fields.licenses, Some(5));

        let empty = form.category_fields(ServiceCategory::BiTool);
        assert_eq!(empty.service, None);
    }
}
