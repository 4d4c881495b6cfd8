//! Foliogen - synthetic portfolio fixture generation.
//!
//! This crate seeds a SQLite database with a randomized but internally
//! consistent portfolio dataset (accounts, issuers, securities, weighted
//! investments plus a distinguished cash position), for use as test
//! fixtures.
//!
//! The core is the weight-allocation algorithm in [`domain::allocate`]:
//! each account holds a random subset of the non-cash securities, and the
//! total weight is split with largest-remainder rounding over integer
//! quantization units so that per-account weights sum to exactly 1.0.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Entity population and weight allocation
//! - [`error`] - Error types for the crate
//! - [`port`] - The persistence sink contract
//! - [`adapter`] - SQLite sink implementation
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use foliogen::domain::{self, AllocationPolicy, PopulationSpec};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let dataset = domain::generate(
//!     &PopulationSpec::default(),
//!     &AllocationPolicy::default(),
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(dataset.accounts.len(), 10);
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
