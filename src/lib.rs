pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{Car, CarPatch, CarReplacement, NewCar};
pub use storage::{CarStore, InMemoryCarStore, PostgresCarStore, StoreError};
