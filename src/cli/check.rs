//! Handler for the `check config` command.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Validate a configuration file without touching any database.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());

    let config = Config::load(path)?;

    output::ok("configuration file is valid");
    output::section("Summary");
    output::key_value("Database", &config.database.path);
    output::key_value("Accounts", config.generator.accounts);
    output::key_value("Issuers", config.generator.issuers);
    output::key_value("Securities", config.generator.securities);
    output::key_value("Cash weight", config.allocation.cash_weight);
    output::key_value("Precision", config.allocation.weight_precision);
    Ok(())
}
