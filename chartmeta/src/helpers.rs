//! All of a chart's named helpers evaluated for one release.
use crate::chart::ChartContext;
use crate::labels::{labels, selector_labels};
use crate::naming::{chart_id, fullname, name, service_account_name};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedHelpers {
    pub name: String,
    pub fullname: String,
    pub chart: String,
    pub service_account_name: String,
    pub labels: BTreeMap<String, String>,
    pub selector_labels: BTreeMap<String, String>,
}

impl RenderedHelpers {
    pub fn new(ctx: &ChartContext) -> Self {
        RenderedHelpers {
            name: name(ctx),
            fullname: fullname(ctx),
            chart: chart_id(ctx),
            service_account_name: service_account_name(ctx),
            labels: labels(ctx).to_map(),
            selector_labels: selector_labels(ctx).to_map(),
        }
    }
}

/// Renders the helpers the way a template would splice them into a manifest.
pub fn render_text(ctx: &ChartContext) -> String {
    format!(
        "name: {}\nfullname: {}\nchart: {}\nserviceAccountName: {}\nlabels:\n{}\nselectorLabels:\n{}\n",
        name(ctx),
        fullname(ctx),
        chart_id(ctx),
        service_account_name(ctx),
        labels(ctx).render(2),
        selector_labels(ctx).render(2),
    )
}
