/*!

Names, labels and object metadata for the Kubernetes resources a chart renders.

Every helper takes a [`chart::ChartContext`] (the chart descriptor, the release, and the
chart values) and returns plain strings or label maps. Names follow the DNS label rules
objects are held to: at most 63 characters, no trailing hyphen.

!*/

pub mod chart;
pub mod constants;
pub mod helpers;
pub mod labels;
pub mod naming;
pub mod ownership;
pub mod telemetry;

pub use chart::{Chart, ChartContext, Release, Values};
pub use labels::LabelSet;
