//! Database row types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{account, investment, issuer, security};
use crate::domain::{Account, Investment, Issuer, Security};

/// Database row for an account.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = account)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountRow {
    pub acct_cd: String,
    pub mkt_val: f64,
}

/// Database row for an issuer.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = issuer)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IssuerRow {
    pub issuer_cd: String,
}

/// Database row for a security.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = security)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SecurityRow {
    pub sec_id: String,
    pub issuer_cd: String,
    pub cusip: String,
    pub mkt_price: f64,
    pub beta_value: f64,
    pub duration: f64,
}

/// Database row for an investment.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = investment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentRow {
    pub acct_cd: String,
    pub sec_id: String,
    pub weight: f64,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            acct_cd: account.code.clone(),
            mkt_val: account.market_value,
        }
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            code: row.acct_cd,
            market_value: row.mkt_val,
        }
    }
}

impl From<&Issuer> for IssuerRow {
    fn from(issuer: &Issuer) -> Self {
        Self {
            issuer_cd: issuer.code.clone(),
        }
    }
}

impl From<IssuerRow> for Issuer {
    fn from(row: IssuerRow) -> Self {
        Self { code: row.issuer_cd }
    }
}

impl From<&Security> for SecurityRow {
    fn from(security: &Security) -> Self {
        Self {
            sec_id: security.id.clone(),
            issuer_cd: security.issuer_code.clone(),
            cusip: security.cusip.clone(),
            mkt_price: security.market_price,
            beta_value: security.beta,
            duration: security.duration,
        }
    }
}

impl From<SecurityRow> for Security {
    fn from(row: SecurityRow) -> Self {
        Self {
            id: row.sec_id,
            issuer_code: row.issuer_cd,
            cusip: row.cusip,
            market_price: row.mkt_price,
            beta: row.beta_value,
            duration: row.duration,
        }
    }
}

impl From<&Investment> for InvestmentRow {
    fn from(investment: &Investment) -> Self {
        Self {
            acct_cd: investment.account_code.clone(),
            sec_id: investment.security_id.clone(),
            weight: investment.weight,
        }
    }
}

impl From<InvestmentRow> for Investment {
    fn from(row: InvestmentRow) -> Self {
        Self {
            account_code: row.acct_cd,
            security_id: row.sec_id,
            weight: row.weight,
        }
    }
}
