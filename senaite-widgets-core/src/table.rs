//! Compile-time widget tables.
//!
//! A widget table is a closed enum of widget kinds, each bound to a selector
//! and a factory. Implement it with `#[derive(WidgetTable)]` from
//! `senaite-widgets`; the derive refuses a variant without a factory, so a
//! table can never carry an unbound entry.

use crate::factory::Factory;
use std::{fmt::Debug, sync::Arc};

/// A closed set of widget kinds with their selectors and factories.
pub trait WidgetTable: Copy + Debug + Send + Sync + 'static {
    /// All kinds in declaration order.
    fn kinds() -> &'static [Self];

    /// Selector list matching elements of this kind.
    fn selector(self) -> &'static str;

    /// Short name used in diagnostics.
    fn name(self) -> &'static str;

    /// A fresh factory for this kind.
    fn factory(self) -> Arc<dyn Factory>;

    /// Look a kind up by its name.
    fn from_name(name: &str) -> Option<Self> {
        Self::kinds().iter().copied().find(|kind| kind.name() == name)
    }
}
