//! Entity population: accounts, issuers, and securities.
//!
//! Produces fully-formed in-memory records with randomized attributes and
//! referential links. No I/O happens here; persistence is the sink's job.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::ident::{next_unique, UPPERCASE, UPPERCASE_ALPHANUMERIC};
use super::model::{Account, Issuer, Security, CASH_CUSIP, CASH_ISSUER_CODE};
use crate::error::GenerateError;

/// Prefix for randomly generated issuer codes.
const ISSUER_CODE_PREFIX: &str = "ISS_";
const ISSUER_SUFFIX_LEN: usize = 4;
const CUSIP_LEN: usize = 9;

/// Inclusive range a numeric attribute is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a uniform value from the range.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// How many entities to generate and which ranges their attributes come from.
///
/// Counts include the distinguished cash entities: the default 5 issuers are
/// cash plus 4 random, the default 20 securities are cash plus 19 random.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PopulationSpec {
    pub accounts: usize,
    pub issuers: usize,
    pub securities: usize,
    pub market_value: ValueRange,
    pub price: ValueRange,
    pub beta: ValueRange,
    pub duration: ValueRange,
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self {
            accounts: 10,
            issuers: 5,
            securities: 20,
            market_value: ValueRange::new(100_000.0, 5_000_000.0),
            price: ValueRange::new(10.0, 1_000.0),
            beta: ValueRange::new(0.5, 2.5),
            duration: ValueRange::new(1.0, 10.0),
        }
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build the account records: sequential codes, random market values.
pub fn accounts(spec: &PopulationSpec, rng: &mut impl Rng) -> Vec<Account> {
    (1..=spec.accounts)
        .map(|i| Account {
            code: format!("ACCT{i:03}"),
            market_value: round_to(spec.market_value.sample(rng), 2),
        })
        .collect()
}

/// Build the issuer records: the fixed cash issuer first, then unique
/// random codes.
///
/// # Errors
/// Propagates [`GenerateError::CapacityExhausted`] from code generation.
pub fn issuers(spec: &PopulationSpec, rng: &mut impl Rng) -> Result<Vec<Issuer>, GenerateError> {
    let mut out = Vec::with_capacity(spec.issuers);
    out.push(Issuer {
        code: CASH_ISSUER_CODE.to_string(),
    });

    let mut taken_suffixes = HashSet::new();
    for _ in 1..spec.issuers {
        let suffix = next_unique(rng, ISSUER_SUFFIX_LEN, UPPERCASE, &mut taken_suffixes)?;
        out.push(Issuer {
            code: format!("{ISSUER_CODE_PREFIX}{suffix}"),
        });
    }
    Ok(out)
}

/// Build the security records: the fixed cash security first, then
/// sequential ids with unique CUSIPs and random non-cash issuers.
///
/// The cash issuer is excluded from random assignment whenever at least one
/// other issuer exists.
///
/// # Errors
/// Propagates [`GenerateError::CapacityExhausted`] from CUSIP generation.
pub fn securities(
    spec: &PopulationSpec,
    issuers: &[Issuer],
    rng: &mut impl Rng,
) -> Result<Vec<Security>, GenerateError> {
    let mut out = Vec::with_capacity(spec.securities);
    out.push(Security::cash());

    let mut taken_cusips: HashSet<String> = [CASH_CUSIP.to_string()].into_iter().collect();
    let non_cash_issuers: Vec<&Issuer> = issuers
        .iter()
        .filter(|i| i.code != CASH_ISSUER_CODE)
        .collect();

    for i in 1..spec.securities {
        let cusip = next_unique(rng, CUSIP_LEN, UPPERCASE_ALPHANUMERIC, &mut taken_cusips)?;
        let issuer_code = non_cash_issuers
            .choose(rng)
            .map_or_else(|| CASH_ISSUER_CODE.to_string(), |i| i.code.clone());

        out.push(Security {
            id: format!("SEC{i:04}"),
            issuer_code,
            cusip,
            market_price: round_to(spec.price.sample(rng), 2),
            beta: round_to(spec.beta.sample(rng), 4),
            duration: round_to(spec.duration.sample(rng), 2),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn round_to_fixed_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(0.005, 2), 0.01);
    }

    #[test]
    fn accounts_have_sequential_codes_and_bounded_values() {
        let spec = PopulationSpec::default();
        let accounts = accounts(&spec, &mut rng(7));

        assert_eq!(accounts.len(), 10);
        assert_eq!(accounts[0].code, "ACCT001");
        assert_eq!(accounts[9].code, "ACCT010");
        for a in &accounts {
            assert!(a.market_value >= spec.market_value.min);
            assert!(a.market_value <= spec.market_value.max);
            assert_eq!(a.market_value, round_to(a.market_value, 2));
        }
    }

    #[test]
    fn issuers_start_with_cash_and_are_unique() {
        let spec = PopulationSpec::default();
        let issuers = issuers(&spec, &mut rng(8)).unwrap();

        assert_eq!(issuers.len(), 5);
        assert_eq!(issuers[0].code, CASH_ISSUER_CODE);
        for i in &issuers[1..] {
            assert!(i.code.starts_with(ISSUER_CODE_PREFIX));
            assert_eq!(i.code.len(), ISSUER_CODE_PREFIX.len() + ISSUER_SUFFIX_LEN);
        }
        let codes: std::collections::HashSet<_> = issuers.iter().map(|i| &i.code).collect();
        assert_eq!(codes.len(), issuers.len());
    }

    #[test]
    fn securities_start_with_cash_and_avoid_the_cash_issuer() {
        let spec = PopulationSpec::default();
        let mut r = rng(9);
        let issuers = issuers(&spec, &mut r).unwrap();
        let securities = securities(&spec, &issuers, &mut r).unwrap();

        assert_eq!(securities.len(), 20);
        assert!(securities[0].is_cash());
        assert_eq!(securities[1].id, "SEC0001");
        assert_eq!(securities[19].id, "SEC0019");

        let cusips: std::collections::HashSet<_> =
            securities.iter().map(|s| &s.cusip).collect();
        assert_eq!(cusips.len(), securities.len());

        for s in &securities[1..] {
            assert_eq!(s.cusip.len(), CUSIP_LEN);
            assert_ne!(s.issuer_code, CASH_ISSUER_CODE);
            assert!(s.market_price >= spec.price.min && s.market_price <= spec.price.max);
            assert!(s.beta >= spec.beta.min && s.beta <= spec.beta.max);
            assert!(s.duration >= spec.duration.min && s.duration <= spec.duration.max);
        }
    }

    #[test]
    fn cash_issuer_is_the_fallback_when_it_is_the_only_issuer() {
        let spec = PopulationSpec {
            issuers: 1,
            securities: 4,
            ..PopulationSpec::default()
        };
        let mut r = rng(10);
        let issuers = issuers(&spec, &mut r).unwrap();
        assert_eq!(issuers.len(), 1);

        let securities = securities(&spec, &issuers, &mut r).unwrap();
        for s in &securities {
            assert_eq!(s.issuer_code, CASH_ISSUER_CODE);
        }
    }
}
