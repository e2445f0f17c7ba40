use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Whether a metric is computed once per simulation turn or once per run.
///
/// Every node in one collection call's resolved closure shares exactly one
/// scope; crossing scopes is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MetricScope {
    Turn,
    Run,
}
