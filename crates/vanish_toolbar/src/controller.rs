//! Scroll-reactive toolbar controller
//!
//! `ScrollVanish` attaches to a host element, resolves the element it should
//! style, and hides or shows it as the scroll area reports position changes.
//!
//! Decisions are made synchronously inside the scroll handler, and the
//! `hidden` flag is updated there too. The matching style writes are handed
//! to the host's [`WriteScheduler`] and land whenever the host flushes them,
//! so the flag can be ahead of the painted styles for up to one frame.
//! Schedulers must not emit scroll events from inside `write`; the
//! decision lock is held while a write is queued.
//!
//! # Lifecycle
//!
//! 1. [`ScrollVanish::new`] with the host node, a renderer and a scheduler
//! 2. [`ScrollVanish::set_scroll_area`] with the scroll container's stream
//! 3. [`ScrollVanish::initialize`], exactly once
//!
//! The scroll subscription lives as long as the controller. Base styles are
//! left in place on teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vanish_core::{ScrollEvent, ScrollStream, Subscription, WriteScheduler};
use vanish_style::{ElementQuery, NodeId, StyleApplier, StylePatch};

use crate::config::VanishConfig;
use crate::error::{Result, VanishError};
use crate::visibility::{Visibility, VisibilityMachine};

/// State shared between the controller and its scroll handler
struct VanishShared {
    config: VanishConfig,
    target: NodeId,
    machine: Mutex<VisibilityMachine>,
    applier: Arc<dyn StyleApplier>,
    scheduler: Arc<dyn WriteScheduler>,
}

impl VanishShared {
    fn machine(&self) -> MutexGuard<'_, VisibilityMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The machine lock is held while the write is queued, so queued
    /// patches follow the same order as the state changes they encode.
    fn handle_scroll(&self, event: &ScrollEvent) {
        let mut machine = self.machine();

        match machine.on_scroll(event, self.config.trigger_distance) {
            Some(visibility) => {
                tracing::debug!(
                    ?visibility,
                    current_y = event.current_y,
                    delta_y = event.delta_y,
                    "toolbar visibility changed"
                );
                self.schedule(visibility);
            }
            None => tracing::trace!(
                current_y = event.current_y,
                delta_y = event.delta_y,
                direction = ?event.direction(),
                "scroll event ignored"
            ),
        }
        drop(machine);
    }

    fn force(&self, visibility: Visibility) {
        let mut machine = self.machine();
        let changed = machine.force(visibility);
        tracing::debug!(?visibility, changed, "toolbar visibility forced");
        self.schedule(visibility);
        drop(machine);
    }

    fn schedule(&self, visibility: Visibility) {
        let patch = match visibility {
            Visibility::Hidden => StylePatch::collapsed(),
            Visibility::Visible => StylePatch::expanded(&self.config.toolbar_height),
        };
        self.write(patch);
    }

    fn write(&self, patch: StylePatch) {
        let applier = self.applier.clone();
        let target = self.target;
        self.scheduler
            .write(Box::new(move || patch.apply(&*applier, target)));
    }
}

/// Live attachment created by `initialize`
struct Attachment {
    shared: Arc<VanishShared>,
    subscription: Subscription,
}

/// Hides a toolbar on downward scroll and restores it on upward scroll or
/// at the top of the scroll area
///
/// # Example
///
/// ```rust
/// use vanish_core::{FrameWriteQueue, ScrollEmitter};
/// use vanish_style::{SharedStyleTree, StyleProperty};
/// use vanish_toolbar::{ScrollVanish, VanishConfig};
///
/// let tree = SharedStyleTree::default();
/// let (header, toolbar) = tree.with_mut(|t| {
///     let header = t.create_element("app-toolbar");
///     let toolbar = t.create_element("ion-toolbar");
///     t.append_child(header, toolbar);
///     (header, toolbar)
/// });
///
/// let frames = FrameWriteQueue::new();
/// let content = ScrollEmitter::new();
///
/// let mut vanish = ScrollVanish::new(header, tree.clone(), frames.clone());
/// vanish.set_scroll_area(content.clone());
/// vanish.initialize(VanishConfig::default())?;
/// assert_eq!(vanish.target(), Some(toolbar));
///
/// content.scroll_to(100.0);
/// assert!(vanish.is_hidden());
///
/// frames.flush();
/// let height = tree.with(|t| t.inline_style(toolbar, StyleProperty::Height).map(String::from));
/// assert_eq!(height.as_deref(), Some("0px"));
/// # Ok::<(), vanish_toolbar::VanishError>(())
/// ```
pub struct ScrollVanish {
    host: NodeId,
    applier: Arc<dyn StyleApplier>,
    query: Arc<dyn ElementQuery>,
    scheduler: Arc<dyn WriteScheduler>,
    scroll_area: Option<Arc<dyn ScrollStream>>,
    attachment: Option<Attachment>,
}

impl ScrollVanish {
    /// Create a controller for `host`
    ///
    /// `renderer` both locates the styled element and writes its styles;
    /// `scheduler` decides when those writes land.
    pub fn new<R, S>(host: NodeId, renderer: R, scheduler: S) -> Self
    where
        R: StyleApplier + ElementQuery + 'static,
        S: WriteScheduler + 'static,
    {
        let renderer = Arc::new(renderer);
        Self {
            host,
            applier: renderer.clone(),
            query: renderer,
            scheduler: Arc::new(scheduler),
            scroll_area: None,
            attachment: None,
        }
    }

    /// Supply the scroll container whose stream drives the toolbar
    ///
    /// Must be called before [`initialize`](Self::initialize); a stream set
    /// afterwards is stored but never subscribed.
    pub fn set_scroll_area<S: ScrollStream + 'static>(&mut self, scroll_area: S) {
        if self.attachment.is_some() {
            tracing::warn!(
                "scroll area replaced after initialize; keeping the original subscription"
            );
        }
        self.scroll_area = Some(Arc::new(scroll_area));
    }

    /// Builder form of [`set_scroll_area`](Self::set_scroll_area)
    pub fn with_scroll_area<S: ScrollStream + 'static>(mut self, scroll_area: S) -> Self {
        self.set_scroll_area(scroll_area);
        self
    }

    /// Resolve the target, apply base styles and start listening
    ///
    /// Fails with [`VanishError::MissingScrollArea`] when no scroll area was
    /// supplied and [`VanishError::AlreadyInitialized`] on a second call.
    /// Events emitted before this call are never observed.
    pub fn initialize(&mut self, config: VanishConfig) -> Result<()> {
        if self.attachment.is_some() {
            return Err(VanishError::AlreadyInitialized);
        }
        config.validate()?;
        let scroll_area = self
            .scroll_area
            .clone()
            .ok_or(VanishError::MissingScrollArea)?;

        let target = self.resolve_target(&config.target_tag);

        let shared = Arc::new(VanishShared {
            target,
            machine: Mutex::new(VisibilityMachine::new()),
            applier: self.applier.clone(),
            scheduler: self.scheduler.clone(),
            config,
        });

        shared.write(StylePatch::base(
            &shared.config.transition,
            &shared.config.toolbar_height,
        ));

        let handler_shared = shared.clone();
        let subscription = scroll_area.subscribe(Arc::new(move |event: &ScrollEvent| {
            handler_shared.handle_scroll(event)
        }));

        tracing::debug!(
            host = ?self.host,
            ?target,
            trigger_distance = shared.config.trigger_distance,
            "scroll vanish initialized"
        );

        self.attachment = Some(Attachment {
            shared,
            subscription,
        });
        Ok(())
    }

    fn resolve_target(&self, tag: &str) -> NodeId {
        match self.query.find_descendant(self.host, tag) {
            Some(node) => {
                tracing::debug!(?node, tag, "styling nested toolbar");
                node
            }
            None => {
                tracing::debug!(host = ?self.host, tag, "no nested toolbar, styling host");
                self.host
            }
        }
    }

    fn attached(&self) -> Result<&VanishShared> {
        self.attachment
            .as_ref()
            .map(|a| a.shared.as_ref())
            .ok_or(VanishError::NotInitialized)
    }

    /// Collapse the toolbar now
    ///
    /// Always schedules the collapse write, even if already hidden.
    pub fn hide(&self) -> Result<()> {
        self.attached()?.force(Visibility::Hidden);
        Ok(())
    }

    /// Expand the toolbar now
    ///
    /// Always schedules the expand write, even if already visible.
    pub fn show(&self) -> Result<()> {
        self.attached()?.force(Visibility::Visible);
        Ok(())
    }

    /// Whether the toolbar is (or is about to be) hidden
    pub fn is_hidden(&self) -> bool {
        self.visibility().is_hidden()
    }

    /// Current visibility; `Visible` before initialization
    pub fn visibility(&self) -> Visibility {
        self.attached()
            .map(|shared| shared.machine().current_state())
            .unwrap_or_default()
    }

    /// Transitions taken since initialization
    pub fn history(&self) -> Vec<(Visibility, Visibility)> {
        self.attached()
            .map(|shared| shared.machine().history().to_vec())
            .unwrap_or_default()
    }

    /// The node being styled, once resolved
    pub fn target(&self) -> Option<NodeId> {
        self.attached().ok().map(|shared| shared.target)
    }

    /// The attachment host
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The active configuration, once initialized
    pub fn config(&self) -> Option<&VanishConfig> {
        self.attached().ok().map(|shared| &shared.config)
    }

    pub fn is_initialized(&self) -> bool {
        self.attachment.is_some()
    }

    /// Stop listening to the scroll area
    ///
    /// Styles already applied (or queued) are left as they are.
    pub fn detach(mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.subscription.unsubscribe();
            tracing::debug!(host = ?self.host, "scroll vanish detached");
        }
    }
}

impl std::fmt::Debug for ScrollVanish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollVanish")
            .field("host", &self.host)
            .field("target", &self.target())
            .field("visibility", &self.visibility())
            .field("has_scroll_area", &self.scroll_area.is_some())
            .finish()
    }
}
