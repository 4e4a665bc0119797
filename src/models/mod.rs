pub mod diagnosis;
pub mod form;
pub mod gemini;

pub use diagnosis::{CostSummary, DiagnosisRecord, SelectedService};
pub use form::{CategoryFields, DiagnosisForm, PaymentMethod};
