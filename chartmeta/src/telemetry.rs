//! Project-wide utility for initializing tracing.
//!
//! Events go to stderr so that rendered output on stdout can be piped into other tools.
use serde::Deserialize;
use snafu::ResultExt;
use std::env;
use std::io;
use tracing::Subscriber;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, EnvFilter, Registry};

const LOG_FILTER_ENV_VAR: &str = "CHARTMETA_LOG_FILTER";
const LOG_FORMAT_ENV_VAR: &str = "CHARTMETA_LOG_FORMAT";
const LOG_ANSI_ENV_VAR: &str = "CHARTMETA_LOG_ANSI";

/// How tracing events are written out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct LogFormatter {
    message_format: MessageFormat,
    ansi_enabled: bool,
}

impl LogFormatter {
    pub fn try_from_env() -> Result<Self> {
        Ok(Self {
            message_format: MessageFormat::try_from_env()?,
            ansi_enabled: ansi_enabled_from_env()?,
        })
    }

    fn into_boxed_subscriber<S>(self, subscriber: S) -> Box<dyn Subscriber + Send + Sync>
    where
        S: SubscriberExt
            + Send
            + Sync
            + for<'a> tracing_subscriber::registry::LookupSpan<'a>
            + 'static,
    {
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(self.ansi_enabled);
        // Each formatter yields a distinct layer type, so each arm boxes its own subscriber.
        match self.message_format {
            MessageFormat::Full => Box::new(subscriber.with(layer)),
            MessageFormat::Compact => Box::new(subscriber.with(layer.compact())),
            MessageFormat::Pretty => Box::new(subscriber.with(layer.pretty())),
            MessageFormat::Json => Box::new(subscriber.with(layer.json())),
        }
    }
}

fn ansi_enabled_from_env() -> Result<bool> {
    match env::var(LOG_ANSI_ENV_VAR) {
        Ok(value) => parse_ansi_enabled(&value),
        Err(_) => Ok(false),
    }
}

fn parse_ansi_enabled(value: &str) -> Result<bool> {
    value
        .trim()
        .to_lowercase()
        .parse()
        .context(error::LogAnsiEnvSnafu {
            env_value: value.to_string(),
        })
}

/// The message format for tracing events.
///
/// See https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/format/index.html
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Human-readable, single-line logs for each event.
    Full,
    #[default]
    /// A variant of the default formatter optimized for short line lengths.
    Compact,
    /// Pretty-formatted multi-line logs.
    Pretty,
    /// Newline-delimited JSON logs.
    Json,
}

impl MessageFormat {
    pub fn try_from_env() -> Result<Self> {
        match env::var(LOG_FORMAT_ENV_VAR) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse(value: &str) -> Result<Self> {
        serde_plain::from_str(value).context(error::LogFormatterEnvSnafu {
            env_value: value.to_string(),
        })
    }
}

/// Installs the global tracing subscriber. `default_level` applies when
/// `CHARTMETA_LOG_FILTER` is unset or unparseable.
pub fn init_telemetry_from_env(default_level: LevelFilter) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_FILTER_ENV_VAR)
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter);
    let subscriber = LogFormatter::try_from_env()?.into_boxed_subscriber(subscriber);

    tracing::subscriber::set_global_default(subscriber)
        .context(error::TracingConfigurationSnafu)?;

    Ok(())
}

pub mod error {
    use std::str::ParseBoolError;

    use super::*;
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub))]
    pub enum TelemetryConfigError {
        #[snafu(display("Error configuring tracing: '{}'", source))]
        TracingConfiguration {
            source: tracing::subscriber::SetGlobalDefaultError,
        },

        #[snafu(display(
            "Could not parse formatter from environment variable '{}={}': '{}'",
            LOG_FORMAT_ENV_VAR,
            env_value,
            source
        ))]
        LogFormatterEnv {
            source: serde_plain::Error,
            env_value: String,
        },

        #[snafu(display(
            "Could not parse ANSI enablement from environment variable '{}={}': '{}'",
            LOG_ANSI_ENV_VAR,
            env_value,
            source
        ))]
        LogAnsiEnv {
            source: ParseBoolError,
            env_value: String,
        },
    }
}

type Result<T> = std::result::Result<T, TelemetryConfigError>;
pub use error::TelemetryConfigError;
