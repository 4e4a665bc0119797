//! Form validation applied before the calculator runs.
//!
//! Category fields stay optional (every category offers a "not used"
//! choice), so only the contact block and any supplied license counts are
//! checked. Messages match the original form copy.

use crate::calculator::ServiceCategory;
use crate::error::FieldError;
use crate::models::DiagnosisForm;
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Validate a submission. Returns all failures at once so the form can
/// highlight every offending field in a single round trip.
pub fn validate_form(form: &DiagnosisForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.company_name.trim().is_empty() {
        errors.push(FieldError::new("companyName", "会社名を入力してください"));
    }

    if form.employee_count < 1 {
        errors.push(FieldError::new(
            "employeeCount",
            "従業員数は1名以上で入力してください",
        ));
    }

    if form.name.trim().is_empty() {
        errors.push(FieldError::new("name", "お名前を入力してください"));
    }

    if !email_regex().is_match(form.email.trim()) {
        errors.push(FieldError::new(
            "email",
            "有効なメールアドレスを入力してください",
        ));
    }

    for category in ServiceCategory::ALL {
        let fields = form.category_fields(category);
        if let Some(count) = fields.licenses {
            if count < 1 {
                errors.push(FieldError::new(
                    license_field_name(category),
                    "ライセンス数は1以上で入力してください",
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn license_field_name(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::Groupware => "groupwareLicenses",
        ServiceCategory::VideoConference => "videoConferenceLicenses",
        ServiceCategory::BusinessChat => "businessChatLicenses",
        ServiceCategory::Storage => "storageLicenses",
        ServiceCategory::GenerativeAi => "aiLicenses",
        ServiceCategory::BiTool => "biToolLicenses",
        ServiceCategory::CrmTool => "crmToolLicenses",
        ServiceCategory::NocodeTool => "nocodeToolLicenses",
    }
}
