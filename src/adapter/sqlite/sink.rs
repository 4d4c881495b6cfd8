//! SQLite portfolio sink implementation.
//!
//! Applies one generated dataset inside a single transaction. Investments
//! use insert-or-ignore on the composite (account, security) key, so a
//! duplicate pair is dropped rather than overwritten.

use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::{AccountRow, InvestmentRow, IssuerRow, SecurityRow};
use super::schema::{account, investment, issuer, security};
use crate::domain::Dataset;
use crate::error::{Error, Result};
use crate::port::{PortfolioSink, SinkReport};

/// SQLite-backed portfolio sink.
///
/// Implements the [`PortfolioSink`] trait for persisting a generated
/// dataset to a migrated SQLite database.
pub struct SqliteSink {
    conn: SqliteConnection,
}

impl SqliteSink {
    /// Create a sink over an established connection.
    #[must_use]
    pub fn new(conn: SqliteConnection) -> Self {
        Self { conn }
    }
}

impl PortfolioSink for SqliteSink {
    fn persist(&mut self, dataset: &Dataset) -> Result<SinkReport> {
        let account_rows: Vec<AccountRow> = dataset.accounts.iter().map(AccountRow::from).collect();
        let issuer_rows: Vec<IssuerRow> = dataset.issuers.iter().map(IssuerRow::from).collect();
        let security_rows: Vec<SecurityRow> =
            dataset.securities.iter().map(SecurityRow::from).collect();
        let investment_rows: Vec<InvestmentRow> =
            dataset.investments.iter().map(InvestmentRow::from).collect();

        self.conn.transaction::<_, Error, _>(|conn| {
            let accounts = diesel::insert_into(account::table)
                .values(&account_rows)
                .execute(conn)?;
            let issuers = diesel::insert_into(issuer::table)
                .values(&issuer_rows)
                .execute(conn)?;
            let securities = diesel::insert_into(security::table)
                .values(&security_rows)
                .execute(conn)?;
            let investments = diesel::insert_or_ignore_into(investment::table)
                .values(&investment_rows)
                .execute(conn)?;

            Ok(SinkReport {
                accounts,
                issuers,
                securities,
                investments,
                duplicates_ignored: investment_rows.len() - investments,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::sqlite::connection::{establish, run_migrations};
    use crate::domain::{Account, Investment, Issuer, Security};

    fn sink() -> SqliteSink {
        let mut conn = establish(":memory:").unwrap();
        run_migrations(&mut conn).unwrap();
        SqliteSink::new(conn)
    }

    fn small_dataset() -> Dataset {
        Dataset {
            accounts: vec![Account {
                code: "ACCT001".into(),
                market_value: 250_000.0,
            }],
            issuers: vec![
                Issuer { code: "CASH".into() },
                Issuer {
                    code: "ISS_ABCD".into(),
                },
            ],
            securities: vec![
                Security::cash(),
                Security {
                    id: "SEC0001".into(),
                    issuer_code: "ISS_ABCD".into(),
                    cusip: "A1B2C3D4E".into(),
                    market_price: 42.5,
                    beta: 1.2,
                    duration: 3.5,
                },
            ],
            investments: vec![
                Investment::new("ACCT001", "CASH", 0.1),
                Investment::new("ACCT001", "SEC0001", 0.9),
            ],
        }
    }

    #[test]
    fn persist_reports_inserted_row_counts() {
        let report = sink().persist(&small_dataset()).unwrap();
        assert_eq!(
            report,
            SinkReport {
                accounts: 1,
                issuers: 2,
                securities: 2,
                investments: 2,
                duplicates_ignored: 0,
            }
        );
    }

    #[test]
    fn duplicate_investment_pairs_are_dropped_not_overwritten() {
        let mut dataset = small_dataset();
        dataset
            .investments
            .push(Investment::new("ACCT001", "SEC0001", 0.5));

        let mut sink = sink();
        let report = sink.persist(&dataset).unwrap();
        assert_eq!(report.investments, 2);
        assert_eq!(report.duplicates_ignored, 1);

        // The first emitted weight wins.
        let weight: f64 = investment::table
            .filter(investment::sec_id.eq("SEC0001"))
            .select(investment::weight)
            .first(&mut sink.conn)
            .unwrap();
        assert_eq!(weight, 0.9);
    }

    #[test]
    fn foreign_key_violation_rolls_back_the_whole_run() {
        let mut dataset = small_dataset();
        dataset
            .investments
            .push(Investment::new("ACCT999", "SEC0001", 0.5));

        let mut sink = sink();
        assert!(sink.persist(&dataset).is_err());

        let accounts: i64 = account::table.count().get_result(&mut sink.conn).unwrap();
        assert_eq!(accounts, 0, "partial failure must seed nothing");
    }

    #[test]
    fn persisted_rows_round_trip_to_domain_records() {
        let dataset = small_dataset();
        let mut sink = sink();
        sink.persist(&dataset).unwrap();

        let securities: Vec<Security> = security::table
            .order(security::sec_id)
            .load::<SecurityRow>(&mut sink.conn)
            .unwrap()
            .into_iter()
            .map(Security::from)
            .collect();
        assert_eq!(securities.len(), 2);
        assert!(securities.iter().any(|s| s.is_cash()));
        assert!(securities.iter().any(|s| s.id == "SEC0001"));
    }
}
