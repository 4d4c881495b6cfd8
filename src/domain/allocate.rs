//! Per-account weight allocation.
//!
//! For each account a random subset of the non-cash securities is selected
//! and the total weight is split across the picks plus a fixed cash floor.
//! Rounding uses the largest-remainder method over integer quantization
//! units so the per-account weights always sum to exactly 1.0; independent
//! per-element rounding would lose or invent weight.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::model::{Investment, CASH_SECURITY_ID};

/// Lower bound of the raw proportion draw.
const MIN_PROPORTION: f64 = 0.05;

/// Policy constants governing selection size and rounding.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Fraction of the pool that must at least be selected.
    pub min_selection_fraction: f64,
    /// Fraction of the pool that may at most be selected.
    pub max_selection_fraction: f64,
    /// Fixed weight of the cash position whenever anything else is held.
    pub cash_weight: f64,
    /// Decimal places weights are quantized to.
    pub weight_precision: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            min_selection_fraction: 0.20,
            max_selection_fraction: 0.80,
            cash_weight: 0.10,
            weight_precision: 4,
        }
    }
}

impl AllocationPolicy {
    /// Quantization units per unit of total weight, `10^precision`.
    pub fn quantization_scale(&self) -> i64 {
        10i64.pow(self.weight_precision)
    }
}

/// Allocate one account's weight across a random selection from `pool`.
///
/// Always emits the cash investment; emits one investment per selected
/// security. Pure computation: never fails, never panics, regardless of
/// pool size.
pub fn allocate_account(
    account_code: &str,
    pool: &[String],
    policy: &AllocationPolicy,
    rng: &mut impl Rng,
) -> Vec<Investment> {
    if pool.is_empty() {
        return vec![Investment::new(account_code, CASH_SECURITY_ID, 1.0)];
    }

    let k = draw_selection_count(pool.len(), policy, rng);
    if k == 0 {
        // Unreachable with a non-empty pool since the minimum count is
        // clamped to 1; kept so a policy change cannot panic.
        return vec![Investment::new(account_code, CASH_SECURITY_ID, 1.0)];
    }

    let picks: Vec<&String> = pool.choose_multiple(rng, k).collect();

    let scale = policy.quantization_scale();
    let cash_units = (policy.cash_weight * scale as f64).round() as i64;
    let target_units = scale - cash_units;

    let units = if k == 1 {
        vec![target_units]
    } else {
        let proportions: Vec<f64> = (0..k).map(|_| rng.gen_range(MIN_PROPORTION..1.0)).collect();
        let total: f64 = proportions.iter().sum();
        if total == 0.0 {
            // Unreachable while proportions are drawn from [0.05, 1.0);
            // retained so reconfiguring the draw range can never divide
            // by zero.
            equal_split_units(k, target_units)
        } else {
            largest_remainder_units(&proportions, total, target_units)
        }
    };

    let mut out = Vec::with_capacity(k + 1);
    out.push(Investment::new(
        account_code,
        CASH_SECURITY_ID,
        policy.cash_weight,
    ));
    for (security_id, u) in picks.iter().zip(&units) {
        out.push(Investment::new(
            account_code,
            security_id.as_str(),
            *u as f64 / scale as f64,
        ));
    }
    out
}

/// Draw how many securities to select from a pool of `pool_size`.
///
/// The minimum is clamped to 1; when the floor exceeds the nominal ceiling
/// the floor wins.
fn draw_selection_count(pool_size: usize, policy: &AllocationPolicy, rng: &mut impl Rng) -> usize {
    let min_count = ((policy.min_selection_fraction * pool_size as f64).ceil() as usize).max(1);
    let mut max_count =
        ((policy.max_selection_fraction * pool_size as f64).floor() as usize).min(pool_size);
    if min_count > max_count {
        max_count = min_count;
    }
    rng.gen_range(min_count..=max_count)
}

/// Apportion `target_units` across proportions via the largest-remainder
/// method: floor every exact share, then hand the unit deficit to the
/// shares with the largest fractional remainders (ties to the earlier
/// selection).
fn largest_remainder_units(proportions: &[f64], total: f64, target_units: i64) -> Vec<i64> {
    let exact: Vec<f64> = proportions
        .iter()
        .map(|p| p / total * target_units as f64)
        .collect();
    let mut units: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();
    let assigned: i64 = units.iter().sum();
    let deficit = (target_units - assigned).max(0);

    let mut order: Vec<usize> = (0..proportions.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = exact[a] - exact[a].floor();
        let rem_b = exact[b] - exact[b].floor();
        rem_b
            .partial_cmp(&rem_a)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    for j in 0..deficit as usize {
        units[order[j % order.len()]] += 1;
    }
    units
}

/// Even split with a single corrective adjustment to the last element.
fn equal_split_units(k: usize, target_units: i64) -> Vec<i64> {
    let share = target_units / k as i64;
    let mut units = vec![share; k];
    if let Some(last) = units.last_mut() {
        *last += target_units - share * k as i64;
    }
    units
}
