pub mod clock;
pub mod observability;
pub mod repositories;
pub mod seed;

pub use clock::{FixedClock, SystemClock};
pub use observability::Metrics;
pub use repositories::InMemoryTreasuryRepository;
