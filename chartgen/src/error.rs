use chartmeta::chart::ChartError;
use chartmeta::telemetry::TelemetryConfigError;
use snafu::Snafu;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Unable to initialize telemetry: '{}'", source))]
    TelemetryInit { source: TelemetryConfigError },

    #[snafu(display("Unable to load chart from '{}': {}", chart_dir.display(), source))]
    LoadChart {
        chart_dir: std::path::PathBuf,
        source: ChartError,
    },

    #[snafu(display("Unable to serialize {} as YAML: '{}'", what, source))]
    SerializeYaml {
        what: String,
        source: serde_yaml::Error,
    },
}
