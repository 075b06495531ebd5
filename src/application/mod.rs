pub mod bootstrap;

// Fund registry
pub mod fund_service;

// Obligation, receivable and subscription queries
pub mod ledger_service;

// Dashboard, consolidated, outlier and ad-hoc reports
pub mod reporting_service;

// Asset registration and document intake
pub mod asset_service;
pub mod document_intake;

// Application context
pub mod system;
