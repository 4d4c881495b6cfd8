//! Handler for the `blank` command.

use tracing::info;

use crate::adapter::sqlite::connection;
use crate::cli::{output, prepare_database_path, BlankArgs};
use crate::error::Result;

/// Create an empty database file with no tables.
pub fn execute(args: &BlankArgs) -> Result<()> {
    prepare_database_path(&args.database, args.force)?;

    let _conn = connection::establish(&args.database.display().to_string())?;

    info!(database = %args.database.display(), "created blank database");
    output::ok(&format!(
        "created empty database {}",
        args.database.display()
    ));
    Ok(())
}
