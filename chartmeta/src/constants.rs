/// Helper macro to avoid retyping the Helm metadata domain when creating annotation keys.
/// When given no parameters, this returns the bare domain. When given a string literal
/// parameter it adds `/parameter` to the end.
#[macro_export]
macro_rules! helm_meta_domain {
    () => {
        "meta.helm.sh"
    };
    ($s:literal) => {
        concat!(helm_meta_domain!(), "/", $s)
    };
}

/// Kubernetes object names and label values must fit in a DNS label (RFC 1123).
pub const DNS_LABEL_MAX_LEN: usize = 63;

// Label keys
pub const HELM_CHART: &str = "helm.sh/chart";

// Standard tags https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
pub const APP_NAME: &str = "app.kubernetes.io/name";
pub const APP_INSTANCE: &str = "app.kubernetes.io/instance";
pub const APP_VERSION: &str = "app.kubernetes.io/version";
pub const APP_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

// Annotation keys Helm reads when adopting an existing object into a release.
pub const HELM_RELEASE_NAME: &str = helm_meta_domain!("release-name");
pub const HELM_RELEASE_NAMESPACE: &str = helm_meta_domain!("release-namespace");

// Release defaults
pub const DEFAULT_RELEASE_SERVICE: &str = "Helm"; // The value `.Release.Service` takes under helm.
pub const DEFAULT_RELEASE_NAMESPACE: &str = "default";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "default"; // Used when no service account is created.
pub const DEFAULT_SERVICE_NAME: &str = "chart-service"; // Fallback when sanitizing leaves nothing.

// Chart directory layout
pub const CHART_FILE: &str = "Chart.yaml";
pub const VALUES_FILE: &str = "values.yaml";
