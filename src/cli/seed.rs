//! Handler for the `seed` command.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::adapter::sqlite::{connection, SqliteSink};
use crate::cli::{output, prepare_database_path, SeedArgs};
use crate::config::Config;
use crate::domain;
use crate::error::Result;
use crate::port::PortfolioSink;

/// Execute the seed command.
pub fn execute(args: &SeedArgs) -> Result<()> {
    // Load configuration and apply CLI overrides
    let mut config = Config::load_or_default(args.config.as_deref())?;

    if let Some(ref database) = args.database {
        config.database.path = database.display().to_string();
    }
    if let Some(accounts) = args.accounts {
        config.generator.accounts = accounts;
    }
    if let Some(issuers) = args.issuers {
        config.generator.issuers = issuers;
    }
    if let Some(securities) = args.securities {
        config.generator.securities = securities;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    config.validate()?;

    config.logging.init();

    prepare_database_path(Path::new(&config.database.path), args.force)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        accounts = config.generator.accounts,
        issuers = config.generator.issuers,
        securities = config.generator.securities,
        "generating portfolio dataset"
    );
    let dataset = domain::generate(&config.generator, &config.allocation, &mut rng)?;

    let mut conn = connection::establish(&config.database.path)?;
    connection::run_migrations(&mut conn)?;
    let mut sink = SqliteSink::new(conn);
    let report = sink.persist(&dataset)?;

    info!(
        investments = report.investments,
        ignored = report.duplicates_ignored,
        "dataset persisted"
    );

    output::section("Seeded database");
    output::key_value("Database", &config.database.path);
    output::key_value("Accounts", report.accounts);
    output::key_value("Issuers", report.issuers);
    output::key_value("Securities", report.securities);
    output::key_value("Investments", report.investments);
    if report.duplicates_ignored > 0 {
        output::key_value("Ignored", report.duplicates_ignored);
    }
    output::ok("portfolio fixture ready");

    Ok(())
}
