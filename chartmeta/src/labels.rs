//! The recommended label set applied to every object a chart renders, and the selector
//! subset controllers use to find their pods.
use crate::chart::ChartContext;
use crate::constants::{APP_INSTANCE, APP_MANAGED_BY, APP_NAME, APP_VERSION, HELM_CHART};
use crate::naming;

use std::collections::BTreeMap;

/// An ordered set of labels. Order is the order lines are emitted in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelSet {
    entries: Vec<Label>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Label {
    key: String,
    value: String,
    quoted: bool,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.push_label(key.into(), value.into(), false);
    }

    /// Adds a label whose value is double-quoted when rendered as text.
    pub fn push_quoted<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.push_label(key.into(), value.into(), true);
    }

    fn push_label(&mut self, key: String, value: String, quoted: bool) {
        self.entries.push(Label { key, value, quoted });
    }

    pub fn extend(&mut self, other: LabelSet) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|label| label.key == key)
            .map(|label| label.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|label| label.key.as_str())
    }

    /// The labels as a map, the shape `ObjectMeta.labels` and `matchLabels` take.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|label| (label.key.clone(), label.value.clone()))
            .collect()
    }

    /// Renders `key: value` lines, each indented by `indent` spaces, without a trailing newline.
    pub fn render(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        self.entries
            .iter()
            .map(|label| {
                if label.quoted {
                    format!("{}{}: {}", pad, label.key, yaml_quote(&label.value))
                } else {
                    format!("{}{}: {}", pad, label.key, label.value)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Wraps `value` in a YAML double-quoted scalar.
fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            // YAML treats these as line breaks or forbids them unescaped.
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}') => {
                quoted.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// The labels identifying a release's pods. Selectors are immutable once an object is
/// created, so this set must not change between chart versions.
pub fn selector_labels(ctx: &ChartContext) -> LabelSet {
    let mut labels = LabelSet::new();
    labels.push(APP_NAME, naming::name(ctx));
    labels.push(APP_INSTANCE, ctx.release.name.clone());
    labels
}

/// The full label set for a chart's objects.
pub fn labels(ctx: &ChartContext) -> LabelSet {
    let mut labels = LabelSet::new();
    labels.push(HELM_CHART, naming::chart_id(ctx));
    labels.extend(selector_labels(ctx));
    if let Some(app_version) = ctx.chart.app_version.as_deref().filter(|v| !v.is_empty()) {
        labels.push_quoted(APP_VERSION, app_version);
    }
    labels.push(APP_MANAGED_BY, ctx.release.service.clone());
    labels
}
