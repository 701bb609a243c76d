use crate::config::BenchConfig;
use crate::errors::BenchError;
use crate::generator;
use crate::scan::{self, PgExecutor};
use std::io::Write;
use std::path::Path;

use super::command::Command;

pub async fn run(cfg: &BenchConfig, cmd: Command, out_dir: &Path) -> Result<(), BenchError> {
    let mut stdout = std::io::stdout();
    run_with_output(cfg, cmd, out_dir, &mut stdout).await
}

/// Runs `cmd`, writing every output file into `out_dir` and the console report to `stdout`.
///
/// # Errors
/// The first generator, connection, query or I/O error ends the command.
pub async fn run_with_output<W: Write>(
    cfg: &BenchConfig,
    cmd: Command,
    out_dir: &Path,
    stdout: &mut W,
) -> Result<(), BenchError> {
    match cmd {
        Command::Csvs => {
            let files = generator::make_files(cfg, out_dir, stdout)?;
            log::info!("generated {} dataset files", files.len());
            Ok(())
        }
        Command::Scan { label, connection_uri } => {
            let mut exec = PgExecutor::connect(&connection_uri).await?;
            log::info!("connected; label={label}");
            let written = scan::run_scan(&mut exec, cfg, &label, out_dir, stdout).await?;
            exec.close().await?;
            log::info!("wrote {} result files", written.len());
            stdout.flush()?;
            Ok(())
        }
    }
}
