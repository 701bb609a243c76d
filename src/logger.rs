use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const ROLL_KEEP: u32 = 7;

fn parse_level(level: Option<&str>, fallback: LevelFilter) -> LevelFilter {
    match level.map(str::to_ascii_lowercase).as_deref() {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some("off") => LevelFilter::Off,
        _ => fallback,
    }
}

/// Builds the logging config.
///
/// With `dir`, logs roll in `{dir}/scanbench.log` (default level info). Without, they go to
/// stderr (default level warn) so stdout carries only benchmark output.
///
/// # Errors
/// Returns an error if the log directory or appender cannot be created.
pub fn build_config(
    dir: Option<&Path>,
    level: Option<&str>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let appender: Box<dyn log4rs::append::Append> = match dir {
        Some(base) => {
            std::fs::create_dir_all(base)?;
            let roller = FixedWindowRoller::builder()
                .build(&format!("{}", base.join("scanbench.{}.log").display()), ROLL_KEEP)?;
            let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
            Box::new(
                RollingFileAppender::builder()
                    .encoder(Box::new(PatternEncoder::new(PATTERN)))
                    .build(base.join("scanbench.log"), Box::new(policy))?,
            )
        }
        None => Box::new(
            ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(PATTERN)))
                .build(),
        ),
    };
    let fallback = if dir.is_some() { LevelFilter::Info } else { LevelFilter::Warn };
    let config = Config::builder()
        .appender(Appender::builder().build("main", appender))
        .build(Root::builder().appender("main").build(parse_level(level, fallback)))?;
    Ok(config)
}

/// Installs the global logger. A second call in the same process is a no-op.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>) {
    match build_config(dir, level) {
        Ok(config) => {
            let _ = log4rs::init_config(config);
        }
        Err(e) => eprintln!("warning: logging disabled: {e}"),
    }
}

/// Configure logging from environment variables if present:
/// - SCANBENCH_LOG_DIR
/// - SCANBENCH_LOG_LEVEL
pub fn configure_from_env() {
    let dir = std::env::var_os("SCANBENCH_LOG_DIR").map(PathBuf::from);
    let level = std::env::var("SCANBENCH_LOG_LEVEL").ok();
    configure_logging(dir.as_deref(), level.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level(Some("DEBUG"), LevelFilter::Warn), LevelFilter::Debug);
        assert_eq!(parse_level(Some("bogus"), LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(parse_level(None, LevelFilter::Info), LevelFilter::Info);
    }

    #[test]
    fn file_config_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("logs");
        let cfg = build_config(Some(&base), Some("debug")).unwrap();
        assert!(base.is_dir());
        assert_eq!(cfg.root().level(), LevelFilter::Debug);
    }

    #[test]
    fn console_config_defaults_to_warn() {
        let cfg = build_config(None, None).unwrap();
        assert_eq!(cfg.root().level(), LevelFilter::Warn);
    }
}
