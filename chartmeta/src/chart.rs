//! The inputs every helper renders from: the chart descriptor, the release being installed,
//! and the user-supplied values.
use crate::constants::{
    CHART_FILE, DEFAULT_RELEASE_NAMESPACE, DEFAULT_RELEASE_SERVICE, VALUES_FILE,
};

use serde::{Deserialize, Deserializer};
use snafu::{ensure, ResultExt};
use std::fs;
use std::path::Path;
use tracing::{event, instrument, Level};

/// The subset of `Chart.yaml` used to derive names and labels.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub app_version: Option<String>,
}

impl Chart {
    pub fn new<S1, S2>(name: S1, version: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Chart {
            name: name.into(),
            version: version.into(),
            app_version: None,
        }
    }

    pub fn with_app_version<S: Into<String>>(mut self, app_version: S) -> Self {
        self.app_version = Some(app_version.into());
        self
    }

    /// Parses a `Chart.yaml` document, rejecting charts helm itself would refuse.
    pub fn from_yaml_str(source: &str, path: &Path) -> Result<Self> {
        let chart: Chart = serde_yaml::from_str(source).context(error::ParseYamlSnafu { path })?;
        chart.validate(path)?;
        Ok(chart)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        ensure!(
            !self.name.trim().is_empty(),
            error::MissingChartNameSnafu { path }
        );
        semver::Version::parse(&self.version).context(error::InvalidChartVersionSnafu {
            version: self.version.clone(),
        })?;
        Ok(())
    }
}

/// The release a chart is being rendered for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Release {
    pub name: String,
    pub service: String,
    pub namespace: String,
}

impl Release {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Release {
            name: name.into(),
            service: DEFAULT_RELEASE_SERVICE.to_string(),
            namespace: DEFAULT_RELEASE_NAMESPACE.to_string(),
        }
    }

    pub fn with_service<S: Into<String>>(mut self, service: S) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// The keys of `values.yaml` the naming helpers consult. Every other key is ignored.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Values {
    #[serde(default)]
    pub name_override: Option<String>,
    #[serde(default)]
    pub fullname_override: Option<String>,
    #[serde(default)]
    pub service_account: ServiceAccountValues,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ServiceAccountValues {
    #[serde(default)]
    pub create: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ServiceAccountValues {
    /// Charts create their service account unless told otherwise.
    pub fn creates(&self) -> bool {
        self.create.unwrap_or(true)
    }
}

impl Values {
    /// Layers `other` on top of `self`: any key set in `other` wins.
    pub fn merge(self, other: Values) -> Values {
        Values {
            name_override: other.name_override.or(self.name_override),
            fullname_override: other.fullname_override.or(self.fullname_override),
            service_account: ServiceAccountValues {
                create: other.service_account.create.or(self.service_account.create),
                name: other.service_account.name.or(self.service_account.name),
            },
        }
    }

    pub fn from_yaml_str(source: &str, path: &Path) -> Result<Self> {
        // An empty document deserializes to `null`, which should mean "no values".
        if source.trim().is_empty() {
            return Ok(Values::default());
        }
        let values: Option<Values> =
            serde_yaml::from_str(source).context(error::ParseYamlSnafu { path })?;
        Ok(values.unwrap_or_default())
    }
}

/// Everything needed for a single rendering of the helpers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChartContext {
    pub chart: Chart,
    pub release: Release,
    pub values: Values,
}

impl ChartContext {
    pub fn new(chart: Chart, release: Release, values: Values) -> Self {
        ChartContext {
            chart,
            release,
            values,
        }
    }

    /// Loads `Chart.yaml` and `values.yaml` from `chart_dir`, then overlays each of
    /// `values_files` in order.
    #[instrument(skip(values_files, release), fields(release = %release.name))]
    pub fn load<P: AsRef<Path>>(
        chart_dir: &Path,
        values_files: &[P],
        release: Release,
    ) -> Result<Self> {
        let chart_path = chart_dir.join(CHART_FILE);
        let chart = Chart::from_yaml_str(&read_file(&chart_path)?, &chart_path)?;
        event!(
            Level::DEBUG,
            chart = %chart.name,
            version = %chart.version,
            "Loaded chart descriptor."
        );

        let default_values_path = chart_dir.join(VALUES_FILE);
        let mut values = if default_values_path.is_file() {
            Values::from_yaml_str(&read_file(&default_values_path)?, &default_values_path)?
        } else {
            event!(
                Level::DEBUG,
                path = %default_values_path.display(),
                "Chart has no default values file."
            );
            Values::default()
        };

        for path in values_files {
            let path = path.as_ref();
            let overlay = Values::from_yaml_str(&read_file(path)?, path)?;
            event!(Level::DEBUG, path = %path.display(), "Applied values file.");
            values = values.merge(overlay);
        }

        Ok(ChartContext::new(chart, release, values))
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(error::ReadFileSnafu { path })
}

/// YAML happily reads `version: 1.0` as a float; helm treats these fields as strings.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_scalar_string(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a scalar, found null"))
}

fn optional_scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

pub mod error {
    use snafu::Snafu;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub))]
    pub enum ChartError {
        #[snafu(display("Unable to read '{}': '{}'", path.display(), source))]
        ReadFile {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Unable to parse YAML in '{}': '{}'", path.display(), source))]
        ParseYaml {
            path: PathBuf,
            source: serde_yaml::Error,
        },

        #[snafu(display("Chart descriptor '{}' does not set a name", path.display()))]
        MissingChartName { path: PathBuf },

        #[snafu(display(
            "Chart version '{}' is not a valid SemVer 2 version: '{}'",
            version,
            source
        ))]
        InvalidChartVersion {
            version: String,
            source: semver::Error,
        },
    }
}

type Result<T> = std::result::Result<T, ChartError>;
pub use error::ChartError;
