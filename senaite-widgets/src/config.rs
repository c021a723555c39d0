//! Page loader configuration.

use senaite_widgets_std::{IdentitySource, OverlapPolicy};

/// Name of the event the data grid fires after inserting a row.
pub const ROW_ADDED_EVENT: &str = "datagrid:row_added";

/// Namespace under which the controller registry is published.
pub const NAMESPACE: &str = "senaite.core.widgets";

/// Settings for a [`Lifecycle`](crate::Lifecycle).
///
/// # Example
///
/// ```rust
/// use senaite_widgets::{IdentitySource, OverlapPolicy, WidgetsConfig};
///
/// let config = WidgetsConfig::new()
///     .with_overlap_policy(OverlapPolicy::Reject)
///     .with_identity_sources([IdentitySource::IdAttribute])
///     .with_logging(false);
///
/// assert_eq!(config.overlap_policy(), OverlapPolicy::Reject);
/// assert_eq!(config.namespace(), "senaite.core.widgets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetsConfig {
    overlap: OverlapPolicy,
    identity_sources: Vec<IdentitySource>,
    row_added_event: String,
    namespace: String,
    logging: bool,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::default(),
            identity_sources: vec![IdentitySource::IdAttribute, IdentitySource::DataId],
            row_added_event: ROW_ADDED_EVENT.to_string(),
            namespace: NAMESPACE.to_string(),
            logging: true,
        }
    }
}

impl WidgetsConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlap policy.
    pub fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Replace the identifier sources, tried in the given order.
    pub fn with_identity_sources(
        mut self,
        sources: impl IntoIterator<Item = IdentitySource>,
    ) -> Self {
        self.identity_sources = sources.into_iter().collect();
        self
    }

    /// Rename the row-added event in log output.
    pub fn with_row_added_event(mut self, name: impl Into<String>) -> Self {
        self.row_added_event = name.into();
        self
    }

    /// Rename the published namespace in log output.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Attach a [`LoggingObserver`](senaite_widgets_std::LoggingObserver) to
    /// every dispatch.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// The overlap policy.
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Identifier sources in priority order.
    pub fn identity_sources(&self) -> &[IdentitySource] {
        &self.identity_sources
    }

    /// Name of the row-added event.
    pub fn row_added_event(&self) -> &str {
        &self.row_added_event
    }

    /// Namespace of the controller registry.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether dispatches are logged.
    pub fn logging(&self) -> bool {
        self.logging
    }
}
