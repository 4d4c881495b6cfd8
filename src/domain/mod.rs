//! Sink-agnostic domain logic: entity population and weight allocation.

pub mod allocate;
pub mod generate;
pub mod ident;
pub mod model;
pub mod populate;

pub use allocate::AllocationPolicy;
pub use generate::generate;
pub use model::{
    Account, Dataset, Investment, Issuer, Security, CASH_CUSIP, CASH_ISSUER_CODE,
    CASH_SECURITY_ID,
};
pub use populate::{PopulationSpec, ValueRange};
