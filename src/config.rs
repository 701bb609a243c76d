//! Benchmark parameters shared by the dataset generator and the scan runner.
//!
//! Precedence: `SCANBENCH_CONFIG` file > `./scanbench.toml` > built-in defaults.

use crate::errors::BenchError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the table name when a query template is rendered.
pub const TABLE_PLACEHOLDER: &str = "{table}";

/// Env var naming a TOML config file.
pub const CONFIG_ENV: &str = "SCANBENCH_CONFIG";

/// Config file picked up from the working directory when no env override is set.
pub const DEFAULT_CONFIG_FILE: &str = "scanbench.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryTemplate {
    /// Short name used in result file names.
    pub label: String,
    /// SQL text containing `{table}`.
    pub sql: String,
}

impl QueryTemplate {
    pub fn new(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self { label: label.into(), sql: sql.into() }
    }

    /// Substitutes the table name into the template.
    #[must_use]
    pub fn render(&self, table: &str) -> String {
        self.sql.replace(TABLE_PLACEHOLDER, table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub row_count: usize,
    pub run_count: usize,
    pub row_sizes: Vec<usize>,
    pub queries: Vec<QueryTemplate>,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            row_count: 1_000_000,
            run_count: 10,
            row_sizes: vec![16, 32, 512, 1024, 4096],
            queries: vec![
                QueryTemplate::new("sum-length-payload", "SELECT SUM(LENGTH(payload)) FROM {table}"),
                QueryTemplate::new("select-count", "SELECT COUNT(number) FROM {table}"),
            ],
            seed: 1_603_296_558_158,
        }
    }
}

impl BenchConfig {
    /// Parses a TOML document; missing keys fall back to the defaults.
    ///
    /// # Errors
    /// Returns `BenchError::Config` if the document is malformed or fails validation.
    pub fn from_toml_str(s: &str) -> Result<Self, BenchError> {
        let cfg: BenchConfig = toml::from_str(s).map_err(|e| BenchError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `BenchError::Io` if the file cannot be read, `BenchError::Config` if it is invalid.
    pub fn from_file(path: &Path) -> Result<Self, BenchError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s).map_err(|e| match e {
            BenchError::Config(msg) => BenchError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Checks the invariants the generator and runner rely on.
    ///
    /// # Errors
    /// Returns `BenchError::Config` naming the first violated rule.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.run_count == 0 {
            return Err(BenchError::Config("run_count must be at least 1".into()));
        }
        if self.row_sizes.is_empty() {
            return Err(BenchError::Config("row_sizes must not be empty".into()));
        }
        if self.queries.is_empty() {
            return Err(BenchError::Config("queries must not be empty".into()));
        }
        for q in &self.queries {
            if q.label.is_empty() || q.label.contains(['/', '\\']) {
                return Err(BenchError::Config(format!("invalid query label {:?}", q.label)));
            }
            if !q.sql.contains(TABLE_PLACEHOLDER) {
                return Err(BenchError::Config(format!(
                    "query {:?} has no {TABLE_PLACEHOLDER} placeholder",
                    q.label
                )));
            }
        }
        Ok(())
    }
}

/// Table (and dataset file stem) for a size class, zero-padded to four digits.
#[must_use]
pub fn table_name(size: usize) -> String {
    format!("scan_{size:04}")
}

/// Resolves the config for this process.
///
/// # Errors
/// Propagates read/parse/validation failures of an explicitly named or discovered file.
pub fn load_config() -> Result<BenchConfig, BenchError> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = match explicit {
        Some(p) => Some(p),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        }
    };
    match path {
        Some(p) => {
            log::info!("loading config from {}", p.display());
            BenchConfig::from_file(&p)
        }
        None => Ok(BenchConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_zero_padded() {
        assert_eq!(table_name(16), "scan_0016");
        assert_eq!(table_name(512), "scan_0512");
        assert_eq!(table_name(4096), "scan_4096");
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let q = QueryTemplate::new("self-join", "SELECT 1 FROM {table} a JOIN {table} b USING (index)");
        assert_eq!(q.render("scan_0032"), "SELECT 1 FROM scan_0032 a JOIN scan_0032 b USING (index)");
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = BenchConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.row_count, 1_000_000);
        assert_eq!(cfg.run_count, 10);
        assert_eq!(cfg.row_sizes, vec![16, 32, 512, 1024, 4096]);
        assert_eq!(cfg.queries[0].label, "sum-length-payload");
        assert_eq!(cfg.queries[1].render("scan_0016"), "SELECT COUNT(number) FROM scan_0016");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = BenchConfig::from_toml_str("row_count = 100\nrow_sizes = [64]\n").unwrap();
        assert_eq!(cfg.row_count, 100);
        assert_eq!(cfg.row_sizes, vec![64]);
        assert_eq!(cfg.run_count, 10);
        assert_eq!(cfg.queries.len(), 2);
    }

    #[test]
    fn toml_queries_replace_defaults() {
        let s = r#"
run_count = 3

[[queries]]
label = "max-index"
sql = "SELECT MAX(index) FROM {table}"
"#;
        let cfg = BenchConfig::from_toml_str(s).unwrap();
        assert_eq!(cfg.run_count, 3);
        assert_eq!(cfg.queries, vec![QueryTemplate::new("max-index", "SELECT MAX(index) FROM {table}")]);
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(matches!(BenchConfig::from_toml_str("run_count = 0"), Err(BenchError::Config(_))));
        assert!(matches!(BenchConfig::from_toml_str("row_sizes = []"), Err(BenchError::Config(_))));
        assert!(matches!(BenchConfig::from_toml_str("row_count = \"many\""), Err(BenchError::Config(_))));
        let no_placeholder = "[[queries]]\nlabel = \"x\"\nsql = \"SELECT 1\"\n";
        assert!(matches!(BenchConfig::from_toml_str(no_placeholder), Err(BenchError::Config(_))));
        let bad_label = "[[queries]]\nlabel = \"a/b\"\nsql = \"SELECT 1 FROM {table}\"\n";
        assert!(matches!(BenchConfig::from_toml_str(bad_label), Err(BenchError::Config(_))));
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.toml");
        std::fs::write(&p, "run_count = 0").unwrap();
        let err = BenchConfig::from_file(&p).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
