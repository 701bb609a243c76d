//! Timed scan queries against the `scan_<NNNN>` tables.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

use crate::config::{BenchConfig, QueryTemplate, table_name};
use crate::errors::BenchError;
use crate::report::ResultTable;

/// Issues one query and resolves once its result set has been fully read and closed.
#[allow(async_fn_in_trait)]
pub trait QueryExecutor {
    async fn execute(&mut self, sql: &str) -> Result<(), BenchError>;
}

/// A single PostgreSQL connection shared by every run of an invocation.
pub struct PgExecutor {
    client: Client,
    connection: JoinHandle<()>,
}

impl PgExecutor {
    /// Accepts both `postgres://` URLs and `key=value` connection strings.
    pub async fn connect(uri: &str) -> Result<Self, BenchError> {
        let (client, connection) = tokio_postgres::connect(uri, NoTls).await?;
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("postgres connection error: {e}");
            }
        });
        Ok(Self { client, connection })
    }

    /// Drops the client and waits for the connection task to finish.
    pub async fn close(self) -> Result<(), BenchError> {
        let Self { client, connection } = self;
        drop(client);
        connection.await.map_err(|e| BenchError::Io(std::io::Error::other(e)))
    }
}

impl QueryExecutor for PgExecutor {
    async fn execute(&mut self, sql: &str) -> Result<(), BenchError> {
        self.client.simple_query(sql).await?;
        Ok(())
    }
}

#[must_use]
pub fn result_file_name(label: &str, query_label: &str, row_count: usize) -> String {
    format!("results-{label}-{query_label}-rowcount{row_count}.csv")
}

/// Runs `query` `run_count` times per size class, sequentially, timing each execution.
///
/// # Errors
/// Stops at the first failed query.
pub async fn measure<E: QueryExecutor>(
    exec: &mut E,
    cfg: &BenchConfig,
    query: &QueryTemplate,
) -> Result<ResultTable, BenchError> {
    let mut table = ResultTable::new(&cfg.row_sizes);
    for (col, &size) in cfg.row_sizes.iter().enumerate() {
        let tbl = table_name(size);
        let sql = query.render(&tbl);
        for run in 1..=cfg.run_count {
            let start = Instant::now();
            exec.execute(&sql).await?;
            let elapsed = start.elapsed();
            log::debug!("{} {} run {}: {:?}", query.label, tbl, run, elapsed);
            table.record(col, elapsed);
        }
    }
    Ok(table)
}

/// Measures every configured query, writing one results CSV per query into `out_dir` and
/// echoing the table to `stdout`. Returns the written paths in query order.
///
/// # Errors
/// Aborts on the first query, file or stdout error.
pub async fn run_scan<E: QueryExecutor, W: Write>(
    exec: &mut E,
    cfg: &BenchConfig,
    label: &str,
    out_dir: &Path,
    stdout: &mut W,
) -> Result<Vec<PathBuf>, BenchError> {
    let mut written = Vec::with_capacity(cfg.queries.len());
    for q in &cfg.queries {
        let name = result_file_name(label, &q.label, cfg.row_count);
        writeln!(stdout, "Database: {label}, Query: {}", q.label)?;
        writeln!(stdout, "Query: {}", q.sql)?;
        writeln!(stdout, "Saving results to {name}.")?;
        writeln!(stdout)?;

        let table = measure(exec, cfg, q).await?;

        let path = out_dir.join(&name);
        table.write_csv(&path)?;
        table.write_aligned(&mut *stdout)?;
        writeln!(stdout)?;
        writeln!(stdout)?;
        log::info!("{}: medians {:?} written to {}", q.label, table.medians(), path.display());
        written.push(path);
    }
    Ok(written)
}
