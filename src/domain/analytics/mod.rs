//! Read-only aggregations over the treasury tables.
//!
//! Everything here is a pure function of its inputs; "today" and the
//! generation timestamp are passed in by the caller.

pub mod consolidation;
pub mod outliers;
pub mod projection;
pub mod report;

pub use consolidation::{ConsolidatedReport, FundPosition, consolidate};
pub use outliers::{DEFAULT_OUTLIER_MULTIPLIER, OutlierReport, OutlierSummary, detect_outliers};
pub use projection::{FundDashboard, ProjectionSettings, project_cash_flow};
pub use report::{GeneratedReport, ReportRequest, ReportTemplate, ReportType, generate_report};
