/*!

Renders the chart helpers for a handful of representative releases into a golden file,
so that any change to naming or labelling shows up as a snapshot diff.

!*/

use chartmeta::chart::ServiceAccountValues;
use chartmeta::helpers::render_text;
use chartmeta::{Chart, ChartContext, Release, Values};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

const DEPLOY_DIR: &str = env!("CARGO_MANIFEST_DIR");
const YAML_DOC_LEADER: &str = "---\n";

fn golden_contexts() -> Vec<ChartContext> {
    vec![
        // Release name already contains the chart name.
        ChartContext::new(
            Chart::new("app", "0.1.0").with_app_version("1.16.0"),
            Release::new("app-prod"),
            Values::default(),
        ),
        // Build metadata in the chart version, no app version, no service account.
        ChartContext::new(
            Chart::new("billing", "1.2.3+build.7"),
            Release::new("prod").with_namespace("finance"),
            Values {
                name_override: Some("ledger".to_string()),
                service_account: ServiceAccountValues {
                    create: Some(false),
                    name: None,
                },
                ..Default::default()
            },
        ),
        // Explicit fullname and service account.
        ChartContext::new(
            Chart::new("web", "2.0.0").with_app_version("2.0"),
            Release::new("staging"),
            Values {
                fullname_override: Some("storefront".to_string()),
                service_account: ServiceAccountValues {
                    create: None,
                    name: Some("web-robot".to_string()),
                },
                ..Default::default()
            },
        ),
    ]
}

fn main() {
    // Re-run this build script if the helpers change.
    println!("cargo:rerun-if-changed=../chartmeta/src");

    let golden_dir = PathBuf::from(DEPLOY_DIR).join("tests").join("golden");
    fs::create_dir_all(&golden_dir).unwrap();
    let mut golden = File::create(golden_dir.join("rendered-helpers.yaml")).unwrap();

    for ctx in golden_contexts() {
        golden.write_all(YAML_DOC_LEADER.as_bytes()).unwrap();
        golden.write_all(render_text(&ctx).as_bytes()).unwrap();
    }
}
