//! # Page Lifecycle
//!
//! Two triggers drive dispatch on a page:
//!
//! - **ready**: fires once when the document is loaded and renders every
//!   widget in it.
//! - **row added**: fires after the data grid inserted a row and renders the
//!   widgets inside that row only.
//!
//! The triggers can be called directly ([`Lifecycle::ready`],
//! [`Lifecycle::row_added`]) or delivered as [`PageEvent`]s through
//! [`page_channel`] and drained by [`Lifecycle::run`].

use crate::{config::WidgetsConfig, widgets::WidgetKind};
use senaite_widgets_core::{ConfigError, Document, LifecycleError, NodeId, WidgetTable};
use senaite_widgets_std::{
    ControllerRegistry, DispatchReport, Dispatcher, IdentityResolver, LoggingObserver,
    RendererRegistry,
};
use std::sync::Arc;
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver, UnboundedSender, error::SendError},
};

/// Where the page stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// The ready trigger has not fired yet.
    #[default]
    Unloaded,
    /// The page is rendered and waits for inserted rows.
    Idle,
    /// The ready dispatch failed; rows are no longer rendered.
    Failed,
}

/// A lifecycle trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The document finished loading.
    Ready,
    /// A row was inserted into a data grid.
    RowAdded {
        /// The inserted row element.
        row: NodeId,
    },
}

/// Renders widgets in response to page lifecycle triggers.
#[derive(Debug)]
pub struct Lifecycle {
    config: WidgetsConfig,
    dispatcher: Dispatcher,
    state: PageState,
}

impl Lifecycle {
    /// A lifecycle over the SENAITE widget kinds with default settings.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(WidgetsConfig::default())
    }

    /// A lifecycle over the SENAITE widget kinds.
    pub fn with_config(config: WidgetsConfig) -> Result<Self, ConfigError> {
        Self::from_table::<WidgetKind>(config)
    }

    /// A lifecycle over another widget table.
    pub fn from_table<T: WidgetTable>(config: WidgetsConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_registry(RendererRegistry::from_table::<T>()?, config))
    }

    /// A lifecycle over a prebuilt renderer registry.
    pub fn with_registry(registry: RendererRegistry, config: WidgetsConfig) -> Self {
        let controllers = Arc::new(ControllerRegistry::new());
        let mut dispatcher = Dispatcher::new(Arc::new(registry), controllers)
            .with_resolver(IdentityResolver::new(
                config.identity_sources().iter().copied(),
            ))
            .with_overlap_policy(config.overlap_policy());
        if config.logging() {
            dispatcher = dispatcher.with_observer(LoggingObserver::named("senaite-widgets"));
        }

        Self {
            config,
            dispatcher,
            state: PageState::Unloaded,
        }
    }

    /// The controller registry, shared with whoever needs live controllers.
    pub fn controllers(&self) -> Arc<ControllerRegistry> {
        Arc::clone(self.dispatcher.controllers())
    }

    /// The underlying dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The active configuration.
    pub fn config(&self) -> &WidgetsConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Render every widget in the document.
    ///
    /// Fires once per page. If the dispatch fails the page moves to
    /// [`PageState::Failed`] and inserted rows are no longer rendered.
    pub fn ready(&mut self, document: &mut Document) -> Result<DispatchReport, LifecycleError> {
        if self.state != PageState::Unloaded {
            return Err(LifecycleError::AlreadyReady);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(namespace = %self.config.namespace(), "*** SENAITE CORE WIDGETS LOADED ***");

        let report = match self.dispatcher.dispatch(document, None) {
            Ok(report) => report,
            Err(err) => {
                self.state = PageState::Failed;
                return Err(err.into());
            }
        };
        self.state = PageState::Idle;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rendered = report.rendered().len(),
            controllers = self.dispatcher.controllers().len(),
            "page rendered"
        );

        Ok(report)
    }

    /// Render the widgets inside a freshly inserted row.
    ///
    /// A `row` that is not a node of `document` renders the whole document.
    pub fn row_added(
        &mut self,
        document: &mut Document,
        row: NodeId,
    ) -> Result<DispatchReport, LifecycleError> {
        if self.state != PageState::Idle {
            return Err(LifecycleError::NotReady);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(event = %self.config.row_added_event(), %row, "rendering inserted row");

        Ok(self.dispatcher.dispatch(document, Some(row))?)
    }

    /// Apply one lifecycle trigger.
    pub fn handle(
        &mut self,
        document: &mut Document,
        event: PageEvent,
    ) -> Result<DispatchReport, LifecycleError> {
        match event {
            PageEvent::Ready => self.ready(document),
            PageEvent::RowAdded { row } => self.row_added(document, row),
        }
    }

    /// Drain `events` in arrival order until every sender is dropped.
    ///
    /// The document is locked for each event only, so the page can insert
    /// rows between events. A failing event is logged and recorded, then
    /// the next event is handled; the state stays whatever [`handle`]
    /// left it in.
    ///
    /// [`handle`]: Lifecycle::handle
    pub async fn run(
        &mut self,
        document: Arc<Mutex<Document>>,
        mut events: PageEventReceiver,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        while let Some(event) = events.recv().await {
            let mut document = document.lock().await;
            summary.handled += 1;
            if let Err(err) = self.handle(&mut document, event) {
                #[cfg(feature = "tracing")]
                tracing::error!(?event, error = %err, "page event failed");
                summary.failures.push((event, err));
            }
        }
        summary
    }
}

/// Outcome of [`Lifecycle::run`].
#[derive(Debug, Default)]
pub struct RunSummary {
    handled: usize,
    failures: Vec<(PageEvent, LifecycleError)>,
}

impl RunSummary {
    /// Number of events received, failed ones included.
    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Failed events with their errors, in arrival order.
    pub fn failures(&self) -> &[(PageEvent, LifecycleError)] {
        &self.failures
    }

    /// Whether every event succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create a page event channel.
pub fn page_channel() -> (PageEventSender, PageEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PageEventSender { tx }, PageEventReceiver { rx })
}

/// Sending half of a page event channel, held by page assembly code.
#[derive(Debug, Clone)]
pub struct PageEventSender {
    tx: UnboundedSender<PageEvent>,
}

impl PageEventSender {
    /// Queue a lifecycle trigger.
    pub fn send(&self, event: PageEvent) -> Result<(), SendError<PageEvent>> {
        self.tx.send(event)
    }

    /// Announce that the document finished loading.
    pub fn ready(&self) -> Result<(), SendError<PageEvent>> {
        self.send(PageEvent::Ready)
    }

    /// Announce an inserted row.
    pub fn row_added(&self, row: NodeId) -> Result<(), SendError<PageEvent>> {
        self.send(PageEvent::RowAdded { row })
    }
}

/// Receiving half of a page event channel, consumed by [`Lifecycle::run`].
#[derive(Debug)]
pub struct PageEventReceiver {
    rx: UnboundedReceiver<PageEvent>,
}

impl PageEventReceiver {
    /// Wait for the next event; `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<PageEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is queued.
    pub fn try_recv(&mut self) -> Option<PageEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use senaite_widgets_core::element;

    fn phone_page() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(
            root,
            element("div").class("senaite-phone-widget-input").id("phone-1"),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_ready_once() {
        let mut doc = phone_page();
        let mut lifecycle = Lifecycle::new().unwrap();
        assert_eq!(lifecycle.state(), PageState::Unloaded);

        lifecycle.ready(&mut doc).unwrap();
        assert_eq!(lifecycle.state(), PageState::Idle);
        assert!(lifecycle.controllers().contains("phone-1"));

        assert!(matches!(
            lifecycle.ready(&mut doc),
            Err(LifecycleError::AlreadyReady)
        ));
    }

    #[test]
    fn test_row_before_ready() {
        let mut doc = phone_page();
        let root = doc.root();
        let mut lifecycle = Lifecycle::new().unwrap();
        assert!(matches!(
            lifecycle.row_added(&mut doc, root),
            Err(LifecycleError::NotReady)
        ));
        assert!(lifecycle.controllers().is_empty());
    }

    #[test]
    fn test_config_reaches_dispatcher() {
        let config = WidgetsConfig::new()
            .with_overlap_policy(senaite_widgets_std::OverlapPolicy::Reject)
            .with_logging(false);
        let lifecycle = Lifecycle::with_config(config).unwrap();
        assert_eq!(
            lifecycle.dispatcher().overlap_policy(),
            senaite_widgets_std::OverlapPolicy::Reject
        );
        assert_eq!(lifecycle.dispatcher().registry().len(), WidgetKind::ALL.len());
    }

    #[test]
    fn test_channel_closes_with_senders() {
        let (tx, mut rx) = page_channel();
        tx.ready().unwrap();
        drop(tx);
        assert_eq!(rx.try_recv(), Some(PageEvent::Ready));
        assert_eq!(rx.try_recv(), None);
    }
}
