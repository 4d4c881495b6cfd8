//! One-pass dataset generation pipeline.
//!
//! Data flows one way: identifier source → entity population → weight
//! allocation. Nothing reads back from the sink mid-run, and each account's
//! allocation is independent of every other account's.

use rand::Rng;
use tracing::debug;

use super::allocate::{allocate_account, AllocationPolicy};
use super::model::Dataset;
use super::populate::{self, PopulationSpec};
use crate::error::GenerateError;

/// Generate one complete dataset.
///
/// Deterministic for a seeded `rng`.
///
/// # Errors
/// Returns [`GenerateError::CapacityExhausted`] when unique identifier
/// generation runs out of free codes.
pub fn generate(
    spec: &PopulationSpec,
    policy: &AllocationPolicy,
    rng: &mut impl Rng,
) -> Result<Dataset, GenerateError> {
    let accounts = populate::accounts(spec, rng);
    let issuers = populate::issuers(spec, rng)?;
    let securities = populate::securities(spec, &issuers, rng)?;

    let pool: Vec<String> = securities
        .iter()
        .filter(|s| !s.is_cash())
        .map(|s| s.id.clone())
        .collect();

    let mut investments = Vec::new();
    for account in &accounts {
        let allocated = allocate_account(&account.code, &pool, policy, rng);
        debug!(
            account = %account.code,
            positions = allocated.len(),
            "allocated account"
        );
        investments.extend(allocated);
    }

    Ok(Dataset {
        accounts,
        issuers,
        securities,
        investments,
    })
}
