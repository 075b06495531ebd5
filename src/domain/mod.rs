// Fund registry domain
pub mod fund;

// Obligations, receivables and subscriptions
pub mod ledger;

// Registered portfolio assets
pub mod asset;

// Projections, rollups and outlier detection
pub mod analytics;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Domain-specific error types
pub mod errors;
