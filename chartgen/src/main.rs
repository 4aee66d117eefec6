/*!

`chartgen` evaluates a chart's naming and label helpers for a release and prints the
result, so that manifests rendered outside of helm carry the same metadata as the chart.

!*/

mod error;

use crate::error::Result;
use argh::FromArgs;
use chartmeta::constants::{DEFAULT_RELEASE_NAMESPACE, DEFAULT_RELEASE_SERVICE};
use chartmeta::helpers::RenderedHelpers;
use chartmeta::labels::{labels, selector_labels};
use chartmeta::ownership::{label_selector, object_meta};
use chartmeta::{telemetry, ChartContext, Release};
use serde::Serialize;
use snafu::ResultExt;
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{event, Level};

/// Evaluate a chart's name and label helpers for a release.
#[derive(FromArgs, Debug)]
struct Arguments {
    /// directory holding Chart.yaml and values.yaml
    #[argh(option, default = "PathBuf::from(\".\")")]
    chart_dir: PathBuf,

    /// additional values file; may be repeated, later files win
    #[argh(option)]
    values: Vec<PathBuf>,

    /// name of the release
    #[argh(option)]
    release_name: String,

    /// namespace the release is installed into
    #[argh(option, default = "DEFAULT_RELEASE_NAMESPACE.to_string()")]
    release_namespace: String,

    /// service managing the release
    #[argh(option, default = "DEFAULT_RELEASE_SERVICE.to_string()")]
    release_service: String,

    /// overrides nameOverride from the values files
    #[argh(option)]
    name_override: Option<String>,

    /// overrides fullnameOverride from the values files
    #[argh(option)]
    fullname_override: Option<String>,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Names(NamesArgs),
    Labels(LabelsArgs),
    Metadata(MetadataArgs),
}

/// Print the resolved names as YAML.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "names")]
struct NamesArgs {}

/// Print the label set as a YAML fragment.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "labels")]
struct LabelsArgs {
    /// print only the selector labels
    #[argh(switch)]
    selector: bool,

    /// number of spaces to indent each line by
    #[argh(option, default = "0")]
    indent: usize,
}

/// Print the object metadata and label selector as YAML documents.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "metadata")]
struct MetadataArgs {}

/// The subset of `RenderedHelpers` printed by `names`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Names {
    name: String,
    fullname: String,
    chart: String,
    service_account_name: String,
}

impl From<RenderedHelpers> for Names {
    fn from(helpers: RenderedHelpers) -> Self {
        Names {
            name: helpers.name,
            fullname: helpers.fullname,
            chart: helpers.chart,
            service_account_name: helpers.service_account_name,
        }
    }
}

fn main() {
    let args: Arguments = argh::from_env();

    match run(args) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run(args: Arguments) -> Result<String> {
    telemetry::init_telemetry_from_env(LevelFilter::WARN).context(error::TelemetryInitSnafu)?;
    render(args)
}

fn render(args: Arguments) -> Result<String> {
    let ctx = load_context(&args)?;
    event!(
        Level::DEBUG,
        chart = %ctx.chart.name,
        release = %ctx.release.name,
        "Rendering chart helpers."
    );

    match args.command {
        Command::Names(_) => to_yaml(&Names::from(RenderedHelpers::new(&ctx)), "names"),
        Command::Labels(labels_args) => {
            let label_set = if labels_args.selector {
                selector_labels(&ctx)
            } else {
                labels(&ctx)
            };
            Ok(format!("{}\n", label_set.render(labels_args.indent)))
        }
        Command::Metadata(_) => {
            let meta = to_yaml(&object_meta(&ctx), "object metadata")?;
            let selector = to_yaml(&label_selector(&ctx), "label selector")?;
            Ok(format!("---\n{}---\n{}", meta, selector))
        }
    }
}

fn load_context(args: &Arguments) -> Result<ChartContext> {
    let release = Release::new(args.release_name.clone())
        .with_namespace(args.release_namespace.clone())
        .with_service(args.release_service.clone());

    let mut ctx = ChartContext::load(&args.chart_dir, &args.values, release).context(
        error::LoadChartSnafu {
            chart_dir: args.chart_dir.clone(),
        },
    )?;

    // Flags take precedence over every values file.
    if let Some(name_override) = &args.name_override {
        ctx.values.name_override = Some(name_override.clone());
    }
    if let Some(fullname_override) = &args.fullname_override {
        ctx.values.fullname_override = Some(fullname_override.clone());
    }

    Ok(ctx)
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).context(error::SerializeYamlSnafu { what })
}
