//! Resource names derived from a chart and its release.
//!
//! Every name produced here is a valid object name prefix: at most 63 characters, never
//! ending in `-`. Nothing in this module fails; empty inputs produce empty names.
use crate::chart::ChartContext;
use crate::constants::{DEFAULT_SERVICE_ACCOUNT, DEFAULT_SERVICE_NAME, DNS_LABEL_MAX_LEN};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{event, Level};

lazy_static! {
    static ref NON_NAME_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9_.-]+").unwrap();
}

/// Truncates `s` to the DNS label limit and strips trailing hyphens.
pub fn trunc_trim(s: &str) -> String {
    let truncated = match s.char_indices().nth(DNS_LABEL_MAX_LEN) {
        Some((cut, _)) => {
            event!(Level::TRACE, name = %s, "Truncating name to DNS label length.");
            &s[..cut]
        }
        None => s,
    };
    truncated.trim_end_matches('-').to_string()
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// The base name of the chart's resources: `nameOverride` if set, otherwise the chart name.
pub fn name(ctx: &ChartContext) -> String {
    trunc_trim(non_empty(&ctx.values.name_override).unwrap_or(&ctx.chart.name))
}

/// The fully qualified resource name.
///
/// `fullnameOverride` wins outright. Otherwise the release name is joined with the base
/// name, unless the release name already contains it, in which case the release name is
/// used alone.
pub fn fullname(ctx: &ChartContext) -> String {
    if let Some(fullname) = non_empty(&ctx.values.fullname_override) {
        return trunc_trim(fullname);
    }

    let base = name(ctx);
    let release = &ctx.release.name;
    if release.contains(base.as_str()) {
        trunc_trim(release)
    } else {
        trunc_trim(&format!("{}-{}", release, base))
    }
}

/// The `<name>-<version>` identifier used as the `helm.sh/chart` label value.
///
/// SemVer build metadata is introduced by `+`, which label values may not contain.
pub fn chart_id(ctx: &ChartContext) -> String {
    trunc_trim(&format!("{}-{}", ctx.chart.name, ctx.chart.version).replace('+', "_"))
}

/// The service account pods run as.
pub fn service_account_name(ctx: &ChartContext) -> String {
    let sa = &ctx.values.service_account;
    match (sa.creates(), non_empty(&sa.name)) {
        (_, Some(name)) => name.to_string(),
        (true, None) => fullname(ctx),
        (false, None) => DEFAULT_SERVICE_ACCOUNT.to_string(),
    }
}

/// Turns a free-form service name into something usable as an object name.
pub fn sanitize_service_name(raw: &str) -> String {
    let replaced = NON_NAME_CHARS.replace_all(raw, "-");
    let sanitized: String = replaced.chars().take(DNS_LABEL_MAX_LEN).collect();
    if sanitized.is_empty() {
        DEFAULT_SERVICE_NAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chart::{Chart, Release, ServiceAccountValues, Values};

    fn ctx(chart: &str, release: &str) -> ChartContext {
        ChartContext::new(
            Chart::new(chart, "0.1.0"),
            Release::new(release),
            Values::default(),
        )
    }

    fn with_overrides(
        mut ctx: ChartContext,
        name_override: Option<&str>,
        fullname_override: Option<&str>,
    ) -> ChartContext {
        ctx.values.name_override = name_override.map(str::to_string);
        ctx.values.fullname_override = fullname_override.map(str::to_string);
        ctx
    }

    /// A spread of awkward strings: all lengths around the limit, with and without hyphens.
    fn sample_strings() -> Vec<String> {
        let mut samples = vec![
            String::new(),
            "-".to_string(),
            "---".to_string(),
            "a-".to_string(),
            "a--".to_string(),
        ];
        for len in 0..=130 {
            samples.push("a".repeat(len));
            samples.push(format!("{}-", "b".repeat(len)));
            samples.push(format!("{}-c", "d".repeat(len)));
            samples.push("x-".repeat(len));
        }
        samples
    }

    #[test]
    fn test_trunc_trim() {
        let test_cases = vec![
            ("", ""),
            ("app", "app"),
            ("app-", "app"),
            ("app--", "app"),
            ("-", ""),
        ];
        for (input, expected) in test_cases {
            assert_eq!(trunc_trim(input), expected);
        }

        // The cut lands right after a hyphen.
        let long = format!("{}-tail", "a".repeat(62));
        assert_eq!(trunc_trim(&long), "a".repeat(62));

        let exact = "z".repeat(63);
        assert_eq!(trunc_trim(&exact), exact);
        assert_eq!(trunc_trim(&"z".repeat(64)), exact);

        // Multi-byte characters are never split.
        let wide = "é".repeat(70);
        assert_eq!(trunc_trim(&wide), "é".repeat(63));
    }

    #[test]
    fn test_name() {
        let test_cases = vec![
            (with_overrides(ctx("app", "r"), None, None), "app"),
            (with_overrides(ctx("app", "r"), Some(""), None), "app"),
            (with_overrides(ctx("app", "r"), Some("web"), None), "web"),
            (with_overrides(ctx("app", "r"), Some("web-"), None), "web"),
            (ctx("", "r"), ""),
        ];
        for (ctx, expected) in test_cases {
            assert_eq!(name(&ctx), expected);
        }
    }

    #[test]
    fn test_name_returns_short_overrides_unchanged() {
        for sample in sample_strings() {
            if sample.chars().count() > 63 || sample.ends_with('-') {
                continue;
            }
            let ctx = with_overrides(ctx("app", "r"), Some(&sample), None);
            let expected = if sample.is_empty() { "app" } else { sample.as_str() };
            assert_eq!(name(&ctx), expected);
        }
    }

    #[test]
    fn test_fullname() {
        let test_cases = vec![
            (ctx("app", "app-prod"), "app-prod"),
            (ctx("app", "prod"), "prod-app"),
            (ctx("app", "my-app"), "my-app"),
            (ctx("app", "happy"), "happy"),
            (with_overrides(ctx("app", "prod"), Some("web"), None), "prod-web"),
            (
                with_overrides(ctx("app", "prod"), Some("web"), Some("custom")),
                "custom",
            ),
            (with_overrides(ctx("app", "prod"), None, Some("")), "prod-app"),
            (
                with_overrides(ctx("app", "prod"), None, Some("custom-")),
                "custom",
            ),
            // An empty base name is contained in every release name.
            (ctx("", "prod"), "prod"),
            // Only trailing hyphens are stripped.
            (ctx("app", ""), "-app"),
        ];
        for (ctx, expected) in test_cases {
            assert_eq!(fullname(&ctx), expected);
        }
    }

    #[test]
    fn test_fullname_truncates_joined_name() {
        let release = "r".repeat(60);
        let fullname = fullname(&ctx("application", &release));
        assert_eq!(fullname, format!("{}-ap", release));
        assert_eq!(fullname.len(), 63);

        // The join hyphen lands on the limit and is trimmed.
        let release = "r".repeat(63);
        assert_eq!(super::fullname(&ctx("app", &release)), release);
        let release = "r".repeat(62);
        assert_eq!(super::fullname(&ctx("app", &release)), release);
    }

    #[test]
    fn test_fullname_is_always_a_valid_name() {
        let samples = sample_strings();
        for release in &samples {
            for chart in ["app", "", "a-", "x-x-"] {
                let ctx = ctx(chart, release);
                let fullname = fullname(&ctx);
                assert!(fullname.chars().count() <= 63, "{:?}", fullname);
                assert!(!fullname.ends_with('-'), "{:?}", fullname);
            }
            let ctx = with_overrides(ctx("app", "r"), None, Some(release));
            let fullname = fullname(&ctx);
            assert!(fullname.chars().count() <= 63, "{:?}", fullname);
            assert!(!fullname.ends_with('-'), "{:?}", fullname);
        }
    }

    #[test]
    fn test_fullname_uses_release_containing_name() {
        for release in ["app", "app-prod", "prod-app", "my-app-1", "apple"] {
            assert_eq!(fullname(&ctx("app", release)), release);
        }
    }

    #[test]
    fn test_chart_id() {
        let test_cases = vec![
            (Chart::new("app", "0.1.0"), "app-0.1.0".to_string()),
            (Chart::new("app", "1.2.3+build.7"), "app-1.2.3_build.7".to_string()),
            (Chart::new("app", "1.0.0-rc.1+a+b"), "app-1.0.0-rc.1_a_b".to_string()),
            (Chart::new("c".repeat(70), "1.0.0"), "c".repeat(63)),
        ];
        for (chart, expected) in test_cases {
            let ctx = ChartContext::new(chart, Release::new("r"), Values::default());
            let id = chart_id(&ctx);
            assert_eq!(id, expected);
            assert!(!id.contains('+'));
        }
    }

    #[test]
    fn test_service_account_name() {
        let test_cases = vec![
            (None, None, "prod-app"),
            (Some(true), None, "prod-app"),
            (Some(true), Some("robot"), "robot"),
            (Some(true), Some(""), "prod-app"),
            (Some(false), None, "default"),
            (Some(false), Some(""), "default"),
            (Some(false), Some("existing"), "existing"),
        ];
        for (create, sa_name, expected) in test_cases {
            let mut ctx = ctx("app", "prod");
            ctx.values.service_account = ServiceAccountValues {
                create,
                name: sa_name.map(str::to_string),
            };
            assert_eq!(service_account_name(&ctx), expected);
        }
    }

    #[test]
    fn test_sanitize_service_name() {
        let test_cases = vec![
            ("billing".to_string(), "billing".to_string()),
            ("My Service!".to_string(), "My-Service-".to_string()),
            ("a  //  b".to_string(), "a-b".to_string()),
            ("v1.2_rc".to_string(), "v1.2_rc".to_string()),
            (String::new(), "chart-service".to_string()),
            ("s".repeat(80), "s".repeat(63)),
        ];
        for (raw, expected) in test_cases {
            assert_eq!(sanitize_service_name(&raw), expected);
        }
    }
}
