//! Handler for the `load` command.

use diesel::connection::SimpleConnection;
use tracing::info;

use crate::adapter::sqlite::connection;
use crate::cli::{output, prepare_database_path, LoadArgs};
use crate::error::Result;

/// Execute a SQL fixture script against a fresh database.
pub fn execute(args: &LoadArgs) -> Result<()> {
    let script = std::fs::read_to_string(&args.script)?;

    prepare_database_path(&args.database, args.force)?;

    let mut conn = connection::establish(&args.database.display().to_string())?;
    conn.batch_execute(&script)?;

    info!(
        script = %args.script.display(),
        database = %args.database.display(),
        "applied SQL fixture script"
    );
    output::ok(&format!(
        "loaded {} into {}",
        args.script.display(),
        args.database.display()
    ));
    Ok(())
}
