//! Tracing setup for the `scrub` binary
//!
//! Human readable events go to stderr so stdout only carries command output.
//! `--json-logs` adds a daily rolling JSON file under the Scrub data
//! directory. `RUST_LOG` replaces the built-in filter.

use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "scrub.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Where `scrub.log.<date>` files are written
    pub log_dir: PathBuf,
    pub enable_json_logs: bool,
    /// Print source file and line on stderr
    pub include_location: bool,
    /// Emit span open/close events (action timings)
    pub enable_spans: bool,
    pub default_filter: String,
}

impl LoggingConfig {
    /// Debug builds: rule editor internals at debug level, with locations
    pub fn development() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: false,
            include_location: true,
            enable_spans: true,
            default_filter: "info,scrub_cli=debug,scrub_rule_editor=debug,scrub_services=debug"
                .to_string(),
        }
    }

    /// Release builds: banners and backend warnings only
    pub fn production() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: false,
            include_location: false,
            enable_spans: false,
            default_filter: "warn,scrub_services=info".to_string(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(config.span_events())
        .pretty()
        .with_filter(config.env_filter())
        .boxed();

    let mut layers = vec![stderr_layer];

    if config.enable_json_logs {
        std::fs::create_dir_all(&config.log_dir)?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // Flushed when the process exits.
        std::mem::forget(guard);

        layers.push(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_events(config.span_events())
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(config.env_filter())
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).init();
    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json = config.enable_json_logs,
        "logging ready"
    );
    Ok(())
}

fn log_directory() -> PathBuf {
    scrub_settings::logs_dir().unwrap_or_else(|_| PathBuf::from("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_logs_are_opt_in() {
        assert!(!LoggingConfig::development().enable_json_logs);
        assert!(!LoggingConfig::production().enable_json_logs);
    }

    #[test]
    fn test_production_is_quieter() {
        let config = LoggingConfig::production();
        assert!(config.default_filter.starts_with("warn"));
        assert!(!config.include_location);
        assert_eq!(config.span_events(), FmtSpan::NONE);
    }

    #[test]
    fn test_development_traces_rule_editor() {
        let config = LoggingConfig::development();
        assert!(config.default_filter.contains("scrub_rule_editor=debug"));
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }
}
