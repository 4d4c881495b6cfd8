//! Core record types for the generated portfolio dataset.
//!
//! All records are immutable once generated: a run produces them in bulk and
//! hands them to a persistence sink, nothing mutates them afterwards.

/// Issuer code of the distinguished cash issuer.
pub const CASH_ISSUER_CODE: &str = "CASH";

/// Security id of the distinguished cash security.
pub const CASH_SECURITY_ID: &str = "CASH";

/// CUSIP of the distinguished cash security.
pub const CASH_CUSIP: &str = "CASH";

/// A portfolio account holding weighted security positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account code, `ACCT001..ACCTnnn`.
    pub code: String,
    /// Total market value of the account, rounded to cents.
    pub market_value: f64,
}

/// An entity that issues securities. Cash is modeled as a distinguished issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    /// Unique issuer code.
    pub code: String,
}

/// An investable instrument. Cash is modeled as a distinguished security
/// with a fixed price of 1.0 and zero beta/duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Security {
    /// Unique security id, `SEC0001..` (or `CASH`).
    pub id: String,
    /// Code of the issuer that issued this security.
    pub issuer_code: String,
    /// Unique 9-character CUSIP.
    pub cusip: String,
    pub market_price: f64,
    pub beta: f64,
    pub duration: f64,
}

impl Security {
    /// The fixed cash security, owned by the cash issuer.
    pub fn cash() -> Self {
        Self {
            id: CASH_SECURITY_ID.to_string(),
            issuer_code: CASH_ISSUER_CODE.to_string(),
            cusip: CASH_CUSIP.to_string(),
            market_price: 1.0,
            beta: 0.0,
            duration: 0.0,
        }
    }

    /// Whether this is the distinguished cash security.
    pub fn is_cash(&self) -> bool {
        self.id == CASH_SECURITY_ID
    }
}

/// A weighted link between one account and one security.
///
/// For any account the weights of all its investments sum to 1.0 when
/// expressed in quantization units.
#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    pub account_code: String,
    pub security_id: String,
    /// Fractional weight in `(0, 1]`.
    pub weight: f64,
}

impl Investment {
    pub fn new(account_code: impl Into<String>, security_id: impl Into<String>, weight: f64) -> Self {
        Self {
            account_code: account_code.into(),
            security_id: security_id.into(),
            weight,
        }
    }
}

/// One complete generation run, ready for the persistence sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub accounts: Vec<Account>,
    pub issuers: Vec<Issuer>,
    pub securities: Vec<Security>,
    pub investments: Vec<Investment>,
}
