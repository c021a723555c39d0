//! Renderer registry: the ordered selector to factory table.
//!
//! Entries are declared through [`RendererRegistryBuilder`] and frozen by
//! [`RendererRegistryBuilder::build`], which parses every selector up front
//! so a typo in a selector surfaces before any dispatch runs.

use senaite_widgets_core::{ConfigError, Factory, SelectorList, WidgetTable};
use std::sync::Arc;

/// A frozen registry entry.
pub struct RegistryEntry {
    selector: SelectorList,
    label: Option<String>,
    factory: Option<Arc<dyn Factory>>,
}

impl RegistryEntry {
    /// The parsed selector.
    pub fn selector(&self) -> &SelectorList {
        &self.selector
    }

    /// The selector text.
    pub fn source(&self) -> &str {
        self.selector.source()
    }

    /// Optional human readable name of the widget kind.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The bound factory, if any.
    pub fn factory(&self) -> Option<&Arc<dyn Factory>> {
        self.factory.as_ref()
    }

    /// Whether a factory is bound.
    pub fn is_bound(&self) -> bool {
        self.factory.is_some()
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("selector", &self.selector.source())
            .field("label", &self.label)
            .field("bound", &self.is_bound())
            .finish()
    }
}

struct PendingEntry {
    selector: String,
    label: Option<String>,
    factory: Option<Arc<dyn Factory>>,
}

// ============================================================================
// RendererRegistryBuilder - for declaring entries
// ============================================================================

/// Builder for a [`RendererRegistry`].
///
/// # Example
/// ```ignore
/// let registry = RendererRegistryBuilder::new()
///     .register(".senaite-phone-widget-input", PhoneFactory)
///     .register_labeled("address", ".senaite-address-widget-input", AddressFactory)
///     .build()?;
/// ```
#[derive(Default)]
pub struct RendererRegistryBuilder {
    entries: Vec<PendingEntry>,
}

impl RendererRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry binding `selector` to `factory`.
    pub fn register<F: Factory>(mut self, selector: impl Into<String>, factory: F) -> Self {
        self.register_mut(selector, factory);
        self
    }

    /// Append an entry (mutable version).
    pub fn register_mut<F: Factory>(&mut self, selector: impl Into<String>, factory: F) {
        self.push(selector.into(), None, Some(Arc::new(factory)));
    }

    /// Append an entry with a label used in diagnostics.
    pub fn register_labeled<F: Factory>(
        mut self,
        label: impl Into<String>,
        selector: impl Into<String>,
        factory: F,
    ) -> Self {
        self.push(selector.into(), Some(label.into()), Some(Arc::new(factory)));
        self
    }

    /// Declare a selector without a factory.
    ///
    /// Dispatch fails with `DispatchError::MissingFactory` as soon as such an
    /// entry matches an element.
    pub fn register_unbound(mut self, selector: impl Into<String>) -> Self {
        self.push(selector.into(), None, None);
        self
    }

    /// Append every kind of a widget table, in declaration order.
    pub fn register_table<T: WidgetTable>(mut self) -> Self {
        for &kind in T::kinds() {
            self.push(
                kind.selector().to_string(),
                Some(kind.name().to_string()),
                Some(kind.factory()),
            );
        }
        self
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse every selector and freeze the registry.
    pub fn build(self) -> Result<RendererRegistry, ConfigError> {
        let entries = self
            .entries
            .into_iter()
            .map(|pending| {
                let selector = SelectorList::parse(&pending.selector).map_err(|source| {
                    ConfigError::InvalidSelector {
                        selector: pending.selector.clone(),
                        source,
                    }
                })?;
                Ok(RegistryEntry {
                    selector,
                    label: pending.label,
                    factory: pending.factory,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(RendererRegistry { entries })
    }

    fn push(&mut self, selector: String, label: Option<String>, factory: Option<Arc<dyn Factory>>) {
        self.entries.push(PendingEntry {
            selector,
            label,
            factory,
        });
    }
}

// ============================================================================
// RendererRegistry - immutable, ordered entry storage
// ============================================================================

/// An immutable, ordered list of renderer entries.
///
/// Iteration follows declaration order. Share it through `Arc`; dispatch only
/// ever reads it.
#[derive(Debug)]
pub struct RendererRegistry {
    entries: Vec<RegistryEntry>,
}

impl RendererRegistry {
    /// Start declaring a registry.
    pub fn builder() -> RendererRegistryBuilder {
        RendererRegistryBuilder::new()
    }

    /// Build a registry from a widget table.
    pub fn from_table<T: WidgetTable>() -> Result<Self, ConfigError> {
        RendererRegistryBuilder::new().register_table::<T>().build()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&RegistryEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
