//! Kubernetes object metadata for a release's resources, including the markers helm needs
//! to adopt objects that were created outside of it.
use crate::chart::{ChartContext, Release};
use crate::constants::{
    APP_MANAGED_BY, DEFAULT_RELEASE_SERVICE, HELM_RELEASE_NAME, HELM_RELEASE_NAMESPACE,
};
use crate::labels::{labels, selector_labels};
use crate::naming::{fullname, trunc_trim};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use maplit::btreemap;
use std::collections::BTreeMap;

/// The label and annotations that mark an object as owned by a helm release.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HelmOwnership {
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

/// Defines the ownership markers for objects belonging to `release`.
///
/// The managed-by value is always `Helm`, whatever `release.service` says: helm refuses to
/// adopt an object labelled with anything else.
pub fn helm_ownership(release: &Release) -> HelmOwnership {
    HelmOwnership {
        labels: btreemap! {
            APP_MANAGED_BY.to_string() => DEFAULT_RELEASE_SERVICE.to_string(),
        },
        annotations: btreemap! {
            HELM_RELEASE_NAME.to_string() => release.name.clone(),
            HELM_RELEASE_NAMESPACE.to_string() => release.namespace.clone(),
        },
    }
}

/// Defines the metadata of the chart's primary object.
pub fn object_meta(ctx: &ChartContext) -> ObjectMeta {
    ObjectMeta {
        name: Some(fullname(ctx)),
        namespace: Some(ctx.release.namespace.clone()),
        labels: Some(labels(ctx).to_map()),
        annotations: Some(helm_ownership(&ctx.release).annotations),
        ..Default::default()
    }
}

/// Defines the selector a controller uses to find the release's pods.
pub fn label_selector(ctx: &ChartContext) -> LabelSelector {
    LabelSelector {
        match_labels: Some(selector_labels(ctx).to_map()),
        ..Default::default()
    }
}

/// Name of the secret holding a service's root database credentials in `env`.
pub fn root_secret_name(name: &str, env: &str) -> String {
    trunc_trim(&format!("{}-root-{}", name, env))
}

/// Name of the image pull secret provisioned for a release.
pub fn pull_secret_name(release: &str) -> String {
    trunc_trim(&format!("ecr-pull-{}", release))
}
