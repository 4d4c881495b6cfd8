//! End-to-end tests: generate a dataset, persist it to SQLite, and verify
//! the portfolio invariants by querying the database back.

use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use foliogen::adapter::sqlite::connection::{establish, run_migrations};
use foliogen::adapter::sqlite::model::{AccountRow, InvestmentRow, SecurityRow};
use foliogen::adapter::sqlite::schema::{account, investment, issuer, security};
use foliogen::adapter::sqlite::SqliteSink;
use foliogen::domain::{self, AllocationPolicy, Investment, PopulationSpec, CASH_SECURITY_ID};
use foliogen::port::PortfolioSink;

fn seed_database(seed: u64, path: &str) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = domain::generate(
        &PopulationSpec::default(),
        &AllocationPolicy::default(),
        &mut rng,
    )
    .unwrap();

    let mut conn = establish(path).unwrap();
    run_migrations(&mut conn).unwrap();
    let mut sink = SqliteSink::new(conn);
    sink.persist(&dataset).unwrap();
}

fn load_investments(conn: &mut SqliteConnection) -> Vec<Investment> {
    investment::table
        .order((investment::acct_cd, investment::sec_id))
        .load::<InvestmentRow>(conn)
        .unwrap()
        .into_iter()
        .map(Investment::from)
        .collect()
}

#[test]
fn seeded_database_has_the_configured_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fixtures.db").display().to_string();
    seed_database(1, &path);

    let mut conn = establish(&path).unwrap();
    let accounts: i64 = account::table.count().get_result(&mut conn).unwrap();
    let issuers: i64 = issuer::table.count().get_result(&mut conn).unwrap();
    let securities: i64 = security::table.count().get_result(&mut conn).unwrap();

    assert_eq!(accounts, 10);
    assert_eq!(issuers, 5);
    assert_eq!(securities, 20);
}

#[test]
fn cusips_and_codes_are_unique_in_the_database() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fixtures.db").display().to_string();
    seed_database(2, &path);

    let mut conn = establish(&path).unwrap();
    let securities: Vec<SecurityRow> = security::table.load(&mut conn).unwrap();

    let ids: HashSet<_> = securities.iter().map(|s| &s.sec_id).collect();
    let cusips: HashSet<_> = securities.iter().map(|s| &s.cusip).collect();
    assert_eq!(ids.len(), securities.len());
    assert_eq!(cusips.len(), securities.len());

    let issuers: Vec<String> = issuer::table.select(issuer::issuer_cd).load(&mut conn).unwrap();
    let issuer_set: HashSet<_> = issuers.iter().collect();
    assert_eq!(issuer_set.len(), issuers.len());

    // Every security references a persisted issuer.
    for s in &securities {
        assert!(issuer_set.contains(&s.issuer_cd), "{}", s.issuer_cd);
    }
}

#[test]
fn per_account_weights_sum_to_one() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fixtures.db").display().to_string();
    seed_database(3, &path);

    let mut conn = establish(&path).unwrap();
    let investments = load_investments(&mut conn);

    let mut sums: HashMap<String, f64> = HashMap::new();
    for inv in &investments {
        assert!(inv.weight > 0.0, "{inv:?}");
        assert!(inv.weight <= 1.0, "{inv:?}");
        *sums.entry(inv.account_code.clone()).or_default() += inv.weight;
    }

    let accounts: Vec<AccountRow> = account::table.load(&mut conn).unwrap();
    assert_eq!(sums.len(), accounts.len());
    for (code, sum) in &sums {
        assert!((sum - 1.0).abs() < 1e-9, "{code}: {sum}");
    }
}

#[test]
fn every_account_holds_the_cash_floor() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fixtures.db").display().to_string();
    seed_database(4, &path);

    let mut conn = establish(&path).unwrap();
    let investments = load_investments(&mut conn);

    let mut by_account: HashMap<&str, Vec<&Investment>> = HashMap::new();
    for inv in &investments {
        by_account.entry(&inv.account_code).or_default().push(inv);
    }

    // Default pool is 19 non-cash securities: ceil(0.2 * 19) = 4,
    // floor(0.8 * 19) = 15, so cash is always the 0.10 floor.
    for (code, positions) in &by_account {
        let cash = positions
            .iter()
            .find(|inv| inv.security_id == CASH_SECURITY_ID)
            .unwrap_or_else(|| panic!("{code} has no cash position"));
        assert_eq!(cash.weight, 0.1);

        let non_cash = positions.len() - 1;
        assert!((4..=15).contains(&non_cash), "{code}: {non_cash} picks");
    }
}

#[test]
fn reseeding_with_the_same_seed_is_identical() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("a.db").display().to_string();
    let second = tmp.path().join("b.db").display().to_string();
    seed_database(42, &first);
    seed_database(42, &second);

    let mut conn_a = establish(&first).unwrap();
    let mut conn_b = establish(&second).unwrap();
    assert_eq!(load_investments(&mut conn_a), load_investments(&mut conn_b));

    let securities_a: Vec<String> = security::table
        .order(security::sec_id)
        .select(security::cusip)
        .load(&mut conn_a)
        .unwrap();
    let securities_b: Vec<String> = security::table
        .order(security::sec_id)
        .select(security::cusip)
        .load(&mut conn_b)
        .unwrap();
    assert_eq!(securities_a, securities_b);
}
