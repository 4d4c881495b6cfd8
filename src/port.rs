//! Outbound port: the persistence sink contract.

use crate::domain::Dataset;
use crate::error::Result;

/// Row counts reported by a sink after a persist run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkReport {
    pub accounts: usize,
    pub issuers: usize,
    pub securities: usize,
    pub investments: usize,
    /// Investment rows dropped because their (account, security) pair was
    /// already inserted.
    pub duplicates_ignored: usize,
}

/// A tabular sink that commits one generated dataset.
///
/// Implementations must apply the whole dataset inside a single transaction
/// so a partial failure leaves no partially-seeded database, and must drop
/// (not overwrite) investment rows whose composite key already exists.
pub trait PortfolioSink {
    fn persist(&mut self, dataset: &Dataset) -> Result<SinkReport>;
}
